/// Record endpoints
///
/// Every handler turns the request into a dispatcher command. Writes go
/// through form validation first, so the store only sees well-formed input.
///
/// # Endpoints
///
/// - `GET /v1/records` - List every record, ordered by name
/// - `POST /v1/records` - Validate a form and create a record
/// - `GET /v1/records/count` - Count records
/// - `GET /v1/records/:id` - One record with its detail text
/// - `PUT /v1/records/:id` - Overwrite every field of a record
/// - `DELETE /v1/records/:id` - Delete a record

use crate::{
    app::AppState,
    error::ApiResult,
    routes::unexpected,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use roster_shared::form::RecordForm;
use roster_shared::listing::{self, RecordRow};
use roster_shared::models::record::Record;
use roster_worker::command::{Command, Outcome};
use serde::Serialize;

/// Record list response
#[derive(Debug, Serialize)]
pub struct ListRecordsResponse {
    /// Rows in display order
    pub records: Vec<RecordRow>,

    /// Number of rows
    pub total: usize,

    /// Display label, e.g. "Total records: 3"
    pub total_label: String,
}

/// Single record response
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    /// The stored record
    pub record: Record,

    /// One-line label, e.g. "Ana - Lima"
    pub label: String,

    /// Multi-line detail block
    pub detail: String,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            label: listing::search_label(&record),
            detail: listing::detail_text(&record),
            record,
        }
    }
}

/// Create record response
#[derive(Debug, Serialize)]
pub struct CreateRecordResponse {
    /// Id assigned by the store
    pub id: i64,
}

/// Delete record response
#[derive(Debug, Serialize)]
pub struct DeleteRecordResponse {
    /// Id of the deleted record
    pub id: i64,

    /// Always true; a missing record is a 404
    pub deleted: bool,
}

/// Record count response
#[derive(Debug, Serialize)]
pub struct CountResponse {
    /// Number of stored records
    pub count: i64,

    /// Display label, e.g. "Total records: 3"
    pub total_label: String,
}

/// List records
///
/// Also reloads the dispatcher's search session, so later filters see the
/// same set.
///
/// # Endpoint
///
/// ```text
/// GET /v1/records
/// ```
///
/// # Response
///
/// ```json
/// {
///   "records": [{ "id": 1, "name": "Ana", "email": "ana@example.com", "city": "Lima" }],
///   "total": 1,
///   "total_label": "Total records: 1"
/// }
/// ```
pub async fn list_records(State(state): State<AppState>) -> ApiResult<Json<ListRecordsResponse>> {
    let records = match state.dispatcher.send(Command::LoadAll).await? {
        Outcome::Records(records) => records,
        other => return Err(unexpected(other)),
    };

    Ok(Json(ListRecordsResponse {
        total: records.len(),
        total_label: listing::total_label(records.len()),
        records: listing::rows(&records),
    }))
}

/// Create a record
///
/// # Endpoint
///
/// ```text
/// POST /v1/records
/// Content-Type: application/json
///
/// {
///   "name": "Ana",
///   "email": "ana@example.com",
///   "phone": "5551234567",
///   "age": "31",
///   "city": "Lima",
///   "gender": "Female",
///   "notifications_enabled": true,
///   "accepted_terms": true
/// }
/// ```
///
/// # Errors
///
/// - 422 listing every invalid field
/// - 409 if the email is already taken
pub async fn create_record(
    State(state): State<AppState>,
    Json(form): Json<RecordForm>,
) -> ApiResult<(StatusCode, Json<CreateRecordResponse>)> {
    let record = form.into_new_record()?;

    match state.dispatcher.send(Command::CreateRecord(record)).await? {
        Outcome::Created(id) => {
            tracing::info!(id, "Record created via API");
            Ok((StatusCode::CREATED, Json(CreateRecordResponse { id })))
        }
        other => Err(unexpected(other)),
    }
}

/// Count records
pub async fn count_records(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    match state.dispatcher.send(Command::Count).await? {
        Outcome::Count(count) => Ok(Json(CountResponse {
            count,
            total_label: listing::total_label(count as usize),
        })),
        other => Err(unexpected(other)),
    }
}

/// Get one record
///
/// # Errors
///
/// 404 if no record has this id
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RecordResponse>> {
    match state.dispatcher.send(Command::LoadById(id)).await? {
        Outcome::Record(record) => Ok(Json(record.into())),
        other => Err(unexpected(other)),
    }
}

/// Overwrite a record
///
/// Takes the same form as creation; fields left out of the form are cleared.
///
/// # Errors
///
/// - 422 listing every invalid field
/// - 404 if no record has this id
/// - 409 if the new email belongs to another record
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<RecordForm>,
) -> ApiResult<Json<RecordResponse>> {
    let record = form.into_new_record()?.with_id(id);

    match state
        .dispatcher
        .send(Command::UpdateRecord(record.clone()))
        .await?
    {
        Outcome::Updated(_) => Ok(Json(record.into())),
        other => Err(unexpected(other)),
    }
}

/// Delete a record
///
/// # Errors
///
/// 404 if no record has this id
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteRecordResponse>> {
    match state.dispatcher.send(Command::DeleteRecord(id)).await? {
        Outcome::Deleted(id) => Ok(Json(DeleteRecordResponse { id, deleted: true })),
        other => Err(unexpected(other)),
    }
}
