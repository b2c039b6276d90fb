//! # Roster Worker Library
//!
//! Typed command dispatch for the record roster. User actions become
//! `Command` values, a single `Controller` turns them into store and search
//! calls, and the answer comes back as an `Outcome`.
//!
//! ## Modules
//!
//! - `command`: Commands and their outcomes
//! - `controller`: Maps commands onto the store and the search session
//! - `dispatcher`: Runs the controller on its own task behind a channel
//!
//! ## Example
//!
//! ```no_run
//! use roster_shared::db::pool::DatabaseConfig;
//! use roster_shared::store::Store;
//! use roster_worker::command::{Command, Outcome};
//! use roster_worker::controller::Controller;
//! use roster_worker::dispatcher::Dispatcher;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::open(DatabaseConfig::for_path("roster.db")).await?;
//! let dispatcher = Dispatcher::spawn(Controller::new(store));
//!
//! let handle = dispatcher.handle();
//! if let Outcome::Count(n) = handle.send(Command::Count).await? {
//!     println!("{} records", n);
//! }
//!
//! dispatcher.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod controller;
pub mod dispatcher;
