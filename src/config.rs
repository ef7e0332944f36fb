//!
//! eventcat configuration
//! ----------------------
//! Defaults, overridden by `EVENTCAT_*` environment variables, then by
//! command-line flags.
//!
//! | flag            | env                  | default     |
//! |-----------------|----------------------|-------------|
//! | `--http-port`   | `EVENTCAT_HTTP_PORT` | 8000        |
//! | `--db`          | `EVENTCAT_DB_PATH`   | `:memory:`  |
//! | `--pool-size`   | `EVENTCAT_POOL_SIZE` | 8           |
//! | `--seed-rows`   | `EVENTCAT_SEED_ROWS` | 100         |
//! | `--no-seed`     | `EVENTCAT_SEED`      | seed on     |

use std::env;
use std::time::Duration;

use crate::storage::{Location, StoreOptions};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub http_port: u16,
    pub db: Location,
    pub pool_size: u32,
    pub seed: bool,
    pub seed_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { http_port: 8000, db: Location::Memory, pool_size: 8, seed: true, seed_rows: 100 }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
        if let Some(v) = args[i].strip_prefix(flag).and_then(|rest| rest.strip_prefix('=')) {
            return Some(v);
        }
        i += 1;
    }
    None
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_vars(|name| env::var(name).ok())
    }

    /// Apply `EVENTCAT_*` overrides from any variable source. Unparseable values are ignored.
    pub fn with_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(p) = lookup("EVENTCAT_HTTP_PORT").and_then(|v| v.parse::<u16>().ok()) { self.http_port = p; }
        if let Some(db) = lookup("EVENTCAT_DB_PATH") { self.db = Location::parse(&db); }
        if let Some(n) = lookup("EVENTCAT_POOL_SIZE").and_then(|v| v.parse::<u32>().ok()) { self.pool_size = n; }
        if let Some(b) = lookup("EVENTCAT_SEED").and_then(|v| parse_bool(&v)) { self.seed = b; }
        if let Some(n) = lookup("EVENTCAT_SEED_ROWS").and_then(|v| v.parse::<usize>().ok()) { self.seed_rows = n; }
        self
    }

    /// Apply command-line overrides (`args` excludes the program name).
    pub fn with_args(mut self, args: &[String]) -> Self {
        if let Some(p) = flag_value(args, "--http-port").and_then(|v| v.parse::<u16>().ok()) { self.http_port = p; }
        if let Some(db) = flag_value(args, "--db") { self.db = Location::parse(db); }
        if let Some(n) = flag_value(args, "--pool-size").and_then(|v| v.parse::<u32>().ok()) { self.pool_size = n; }
        if let Some(n) = flag_value(args, "--seed-rows").and_then(|v| v.parse::<usize>().ok()) { self.seed_rows = n; }
        if args.iter().any(|a| a == "--no-seed") { self.seed = false; }
        self
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions { location: self.db.clone(), max_pool_size: self.pool_size, connection_timeout: Duration::from_secs(5) }
    }
}
