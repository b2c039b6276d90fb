/// Display projections for records and posts
///
/// These are read-only views built from already-loaded data. They know
/// nothing about the store.

use crate::models::record::Record;
use crate::remote::Post;
use serde::Serialize;

/// Placeholder shown for empty optional fields
const MISSING: &str = "-";

/// One row of the record list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub city: String,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            city: record.city.clone().unwrap_or_default(),
        }
    }
}

/// Rows for a record list, in the given order
pub fn rows(records: &[Record]) -> Vec<RecordRow> {
    records.iter().map(RecordRow::from).collect()
}

/// Single-line label used by search results: `"<name> - <city>"`
pub fn search_label(record: &Record) -> String {
    format!(
        "{} - {}",
        record.name,
        record.city.as_deref().unwrap_or(MISSING)
    )
}

/// Multi-line detail block for one record
pub fn detail_text(record: &Record) -> String {
    let age = record
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| MISSING.to_string());

    format!(
        "Email: {}\nPhone: {}\nAge: {}\nCity: {}\nGender: {}\nNotifications: {}",
        record.email,
        record.phone.as_deref().unwrap_or(MISSING),
        age,
        record.city.as_deref().unwrap_or(MISSING),
        record.gender.as_deref().unwrap_or(MISSING),
        if record.notifications_enabled { "Yes" } else { "No" },
    )
}

pub fn total_label(count: usize) -> String {
    format!("Total records: {}", count)
}

pub fn results_label(count: usize) -> String {
    format!("Results found: {}", count)
}

/// One row of the remote post list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRow {
    pub id_label: String,
    pub title: String,
    pub body: String,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            id_label: format!("ID: {}", post.id),
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }
}
