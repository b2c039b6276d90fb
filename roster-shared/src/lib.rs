//! # Roster Shared Library
//!
//! This crate contains the record store and everything that works on loaded
//! records. The dispatcher in `roster-worker` and the HTTP server in
//! `roster-api` are both built on it.
//!
//! ## Module Organization
//!
//! - `db`: SQLite connection pool and schema lifecycle
//! - `models`: The persisted record and its queries
//! - `store`: The record store handle
//! - `search`: In-memory filtering over loaded records
//! - `listing`: Display rows and labels
//! - `form`: Record form validation
//! - `remote`: Read-only client for the remote post collection
//! - `error`: Store error types

pub mod db;
pub mod error;
pub mod form;
pub mod listing;
pub mod models;
pub mod remote;
pub mod search;
pub mod store;

/// Current version of the roster shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
