//! Synthetic demo/test fixtures.
//!
//! Seeding runs through the catalog's `InitGuard`, so concurrent first calls create
//! the table and insert rows exactly once per catalog handle. Inserts use
//! `INSERT OR IGNORE` keyed on the id, which keeps re-seeding an existing file
//! store a no-op.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tracing::info;

use crate::catalog::{Catalog, CatalogEntry, Race, Sport, TableDef};
use crate::error::CatalogResult;

const PLACES: &[&str] = &[
    "Flemington", "Randwick", "Eagle Farm", "Morphettville", "Ascot", "Ellerslie", "Caulfield",
    "Rosehill", "Doomben", "Moonee Valley", "Trentham", "Cheltenham",
];
const RACE_KINDS: &[&str] = &["Plate", "Cup", "Stakes", "Handicap", "Classic", "Sprint", "Derby", "Quality"];
const CATEGORIES: &[&str] = &["football", "basketball", "tennis", "cricket", "rugby", "hockey", "baseball", "volleyball"];
const CITIES: &[&str] = &[
    "North Shore", "Riverside", "Lakeport", "Hillcrest", "Eastwood", "Bayview", "Stonebridge", "Westfield",
    "Harbor City", "Kingsford",
];
const MASCOTS: &[&str] = &["Falcons", "Tigers", "Sharks", "Rovers", "Knights", "Comets", "Wolves", "Giants", "Hornets", "Raiders"];

fn pick<R: Rng>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// Advertised start uniformly within [now - 1 day, now + 2 days], stored as RFC 3339 UTC text.
fn advertised_start<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Value {
    let offset = rng.gen_range(-86_400i64..=2 * 86_400);
    Value::Text((now + Duration::seconds(offset)).to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Row generator for a seedable catalog. Values follow `TABLE.columns` order.
pub trait Fixture: CatalogEntry {
    fn fixture_values<R: Rng>(id: i64, rng: &mut R, now: DateTime<Utc>) -> Vec<Value>;
}

impl Fixture for Race {
    fn fixture_values<R: Rng>(id: i64, rng: &mut R, now: DateTime<Utc>) -> Vec<Value> {
        vec![
            Value::Integer(id),
            Value::Integer(rng.gen_range(1..=10)),
            Value::Text(format!("{} {}", pick(rng, PLACES), pick(rng, RACE_KINDS))),
            Value::Integer(rng.gen_range(1..=12)),
            Value::Integer(rng.gen_range(0..=1)),
            advertised_start(rng, now),
        ]
    }
}

impl Fixture for Sport {
    fn fixture_values<R: Rng>(id: i64, rng: &mut R, now: DateTime<Utc>) -> Vec<Value> {
        let home = format!("{} {}", pick(rng, CITIES), pick(rng, MASCOTS));
        let mut away = format!("{} {}", pick(rng, CITIES), pick(rng, MASCOTS));
        while away == home {
            away = format!("{} {}", pick(rng, CITIES), pick(rng, MASCOTS));
        }
        vec![
            Value::Integer(id),
            Value::Integer(rng.gen_range(1..=20)),
            Value::Text(pick(rng, CATEGORIES).to_string()),
            Value::Text(home),
            Value::Text(away),
            Value::Integer(rng.gen_range(0..=1)),
            advertised_start(rng, now),
        ]
    }
}

pub fn create_table_sql(def: &TableDef) -> String {
    let cols = def
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| if i == 0 { format!("{} INTEGER PRIMARY KEY", c.name) } else { format!("{} {}", c.name, c.coltype.sql_type()) })
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE IF NOT EXISTS {} ({})", def.name, cols)
}

pub fn insert_sql(def: &TableDef) -> String {
    let names = def.columns.iter().map(|c| c.name).collect::<Vec<_>>().join(", ");
    let placeholders = vec!["?"; def.columns.len()].join(", ");
    format!("INSERT OR IGNORE INTO {} ({}) VALUES ({})", def.name, names, placeholders)
}

pub fn create_table(conn: &Connection, def: &TableDef) -> CatalogResult<()> {
    conn.execute_batch(&create_table_sql(def))?;
    Ok(())
}

/// Create the table and insert `rows` fixtures with ids `1..=rows`. Returns the number of rows inserted.
pub fn seed_table<E: Fixture>(conn: &Connection, rows: usize, now: DateTime<Utc>) -> CatalogResult<usize> {
    create_table(conn, &E::TABLE)?;
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0usize;
    {
        let mut stmt = tx.prepare(&insert_sql(&E::TABLE))?;
        let mut rng = rand::thread_rng();
        for id in 1..=rows as i64 {
            inserted += stmt.execute(params_from_iter(E::fixture_values(id, &mut rng, now)))?;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

impl<E: Fixture> Catalog<E> {
    /// Seed this catalog's table once per handle. Safe to call from many threads.
    pub fn ensure_initialized(&self, rows: usize) -> CatalogResult<()> {
        self.init.ensure_initialized(|| {
            let conn = self.store().conn()?;
            let inserted = seed_table::<E>(&conn, rows, Utc::now())?;
            info!(table = E::TABLE.name, requested = rows, inserted, "seeded catalog");
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod seed_tests;
