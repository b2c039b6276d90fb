//! # Roster API Server Library
//!
//! HTTP front end for the record roster. Record routes go through the
//! command dispatcher; post routes call the injected remote source.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
