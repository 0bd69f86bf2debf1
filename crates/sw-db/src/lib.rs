//! sw-db - DuckDB ledger for Stepwise
//!
//! This crate provides [`DuckDbLedger`], an implementation of the
//! `sw_core::Ledger` trait backed by a DuckDB database.

pub mod duckdb;
pub mod error;
pub mod params;

pub use duckdb::{qualified_table_name, DuckDbLedger};
pub use error::{DbError, DbResult};
pub use params::Placeholders;
