/// Database models for the roster store
///
/// # Models
///
/// - `record`: user profile records and their queries

pub mod record;
