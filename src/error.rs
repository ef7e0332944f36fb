//! Unified application error model and mapping helpers.
//! `CatalogError` is the typed failure returned by the catalog core; `AppError` is the
//! boundary error handed to HTTP callers, with a stable `code` and an HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Failures raised by the catalog core. None of these are retried internally.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("table '{table}' reports no columns")]
    UnknownTable { table: String },

    #[error("invalid sort: field '{field}' direction '{direction}'")]
    InvalidSort { field: String, direction: String },

    #[error("expected exactly one record in '{table}' for id {id}, found {found}")]
    Cardinality { table: &'static str, id: i64, found: usize },

    #[error("cannot convert column '{column}' value '{value}' to a UTC timestamp")]
    Conversion { column: &'static str, value: String },

    #[error("initialization failed: {0}")]
    Init(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Cardinality { found: 0, .. })
    }

    pub fn is_invalid_filter(&self) -> bool {
        matches!(self, CatalogError::InvalidSort { .. })
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    NotFound { code: String, message: String },
    Exec { code: String, message: String },
    Io { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Exec { code, .. }
            | AppError::Io { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Exec { message, .. }
            | AppError::Io { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn user<S: Into<String>>(code: S, msg: S) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn not_found<S: Into<String>>(code: S, msg: S) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn exec<S: Into<String>>(code: S, msg: S) -> Self { AppError::Exec { code: code.into(), message: msg.into() } }
    pub fn io<S: Into<String>>(code: S, msg: S) -> Self { AppError::Io { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Map to HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::UserInput { .. } => 400,
            AppError::NotFound { .. } => 404,
            AppError::Exec { .. } => 500,
            AppError::Io { .. } => 503,
            AppError::Internal { .. } => 500,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::InvalidSort { .. } => AppError::user("invalid_sort".to_string(), message),
            CatalogError::Cardinality { found: 0, .. } => AppError::not_found("not_found".to_string(), message),
            CatalogError::Cardinality { .. } => AppError::exec("cardinality".to_string(), message),
            CatalogError::Conversion { .. } => AppError::exec("conversion_error".to_string(), message),
            CatalogError::Pool(_) => AppError::io("store_unavailable".to_string(), message),
            CatalogError::Store(_) | CatalogError::UnknownTable { .. } => AppError::exec("store_error".to_string(), message),
            CatalogError::Init(_) => AppError::internal("init_failed".to_string(), message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
