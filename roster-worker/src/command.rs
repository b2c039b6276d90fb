/// Commands accepted by the controller and the outcomes it returns
///
/// Every user action on the roster is one `Command`. Store commands touch
/// the database; filter commands only work on the record set the controller
/// already loaded.

use roster_shared::models::record::{NewRecord, Record};

/// A single user action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert a new record
    CreateRecord(NewRecord),

    /// Overwrite every field of an existing record
    UpdateRecord(Record),

    /// Delete a record by id
    DeleteRecord(i64),

    /// Read every record and reload the search session
    LoadAll,

    /// Read one record
    LoadById(i64),

    /// Store-side name search
    SearchByName(String),

    /// In-memory filter on name, email or city
    FilterQuery(String),

    /// In-memory city filter (type-ahead)
    CityQuery(String),

    /// Show the full loaded set again
    ResetFilter,

    /// Distinct cities of the loaded set
    CitySuggestions,

    /// Total number of stored records
    Count,
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateRecord(_) => "create_record",
            Command::UpdateRecord(_) => "update_record",
            Command::DeleteRecord(_) => "delete_record",
            Command::LoadAll => "load_all",
            Command::LoadById(_) => "load_by_id",
            Command::SearchByName(_) => "search_by_name",
            Command::FilterQuery(_) => "filter_query",
            Command::CityQuery(_) => "city_query",
            Command::ResetFilter => "reset_filter",
            Command::CitySuggestions => "city_suggestions",
            Command::Count => "count",
        }
    }

    /// Whether the command writes to the store
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::CreateRecord(_) | Command::UpdateRecord(_) | Command::DeleteRecord(_)
        )
    }
}

/// Result of a successfully handled command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// New record id
    Created(i64),

    /// Id of the overwritten record
    Updated(i64),

    /// Id of the deleted record
    Deleted(i64),

    /// A list of records (load, search or filter)
    Records(Vec<Record>),

    /// A single record
    Record(Record),

    /// City suggestions
    Cities(Vec<String>),

    /// Record count
    Count(i64),
}
