pub mod catalog;
pub mod config;
pub mod error;
pub mod seed;
pub mod server;
pub mod storage;
