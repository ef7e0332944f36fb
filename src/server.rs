//!
//! eventcat HTTP server
//! --------------------
//! Axum JSON API over the two catalogs. Routes mirror the catalog operations:
//!
//! - `POST /v1/list-races`   body `{ "filter": ListFilter? }` (or empty) → `{ "races": [...] }`
//! - `GET  /v1/races/{id}`   → `{ "race": {...} }`
//! - `POST /v1/list-sports`  body `{ "filter": ListFilter? }` (or empty) → `{ "sports": [...] }`
//! - `GET  /v1/sports/{id}`  → `{ "sport": {...} }`
//!
//! Catalog calls are synchronous SQLite round trips and run on the blocking pool.

use std::net::SocketAddr;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{Catalog, ListFilter, Race, Sport};
use crate::config::Config;
use crate::error::{AppError, AppResult, CatalogResult};
use crate::storage::Store;

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub races: Catalog<Race>,
    pub sports: Catalog<Sport>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { races: Catalog::new(store.clone()), sports: Catalog::new(store) }
    }

    /// Seed both catalogs (idempotent per state).
    pub fn seed(&self, rows: usize) -> CatalogResult<()> {
        self.races.ensure_initialized(rows)?;
        self.sports.ensure_initialized(rows)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListRequest {
    pub filter: Option<ListFilter>,
}

impl ListRequest {
    /// Decode a list body. An empty body is a request with no filter; a body that
    /// does not match the filter shape is a user error.
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| AppError::user("invalid_filter".to_string(), e.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListRacesResponse {
    pub races: Vec<Race>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetRaceResponse {
    pub race: Race,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListSportsResponse {
    pub sports: Vec<Sport>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetSportResponse {
    pub sport: Sport,
}

async fn blocking<T, F>(op: &'static str, f: F) -> AppResult<T>
where
    F: FnOnce() -> CatalogResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(v)) => Ok(v),
        Ok(Err(e)) => {
            warn!(op, error = %e, "catalog call failed");
            Err(AppError::from(e))
        }
        Err(join) => Err(AppError::internal("join_error".to_string(), join.to_string())),
    }
}

async fn list_races(State(state): State<AppState>, body: Bytes) -> AppResult<Json<ListRacesResponse>> {
    let req = ListRequest::from_body(&body)?;
    let races = state.races.clone();
    let races = blocking("list_races", move || races.list(req.filter.as_ref())).await?;
    Ok(Json(ListRacesResponse { races }))
}

async fn get_race(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<GetRaceResponse>> {
    let races = state.races.clone();
    let race = blocking("get_race", move || races.get(id)).await?;
    Ok(Json(GetRaceResponse { race }))
}

async fn list_sports(State(state): State<AppState>, body: Bytes) -> AppResult<Json<ListSportsResponse>> {
    let req = ListRequest::from_body(&body)?;
    let sports = state.sports.clone();
    let sports = blocking("list_sports", move || sports.list(req.filter.as_ref())).await?;
    Ok(Json(ListSportsResponse { sports }))
}

async fn get_sport(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<GetSportResponse>> {
    let sports = state.sports.clone();
    let sport = blocking("get_sport", move || sports.get(id)).await?;
    Ok(Json(GetSportResponse { sport }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/v1/list-races", post(list_races))
        .route("/v1/races/{id}", get(get_race))
        .route("/v1/list-sports", post(list_sports))
        .route("/v1/sports/{id}", get(get_sport))
        .with_state(state)
}

/// Serve `state` on an already bound listener until the server stops.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = Store::open(&config.store_options()).with_context(|| format!("While opening store at {:?}", config.db))?;
    let state = AppState::new(store);
    if config.seed {
        let seeding = state.clone();
        let rows = config.seed_rows;
        tokio::task::spawn_blocking(move || seeding.seed(rows))
            .await
            .context("seed task panicked")?
            .context("While seeding demo catalogs")?;
    }

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.with_context(|| format!("While binding {}", addr))?;
    serve(listener, state).await
}
