/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `records`: Record CRUD through the dispatcher
/// - `search`: Store search and in-memory filters
/// - `posts`: Remote post collection

pub mod health;
pub mod posts;
pub mod records;
pub mod search;

use crate::error::ApiError;
use roster_worker::command::Outcome;

/// Error for a dispatcher reply that does not fit the command sent
pub(crate) fn unexpected(outcome: Outcome) -> ApiError {
    ApiError::InternalError(format!("Unexpected dispatcher outcome: {:?}", outcome))
}
