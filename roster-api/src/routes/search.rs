/// Search and filter endpoints
///
/// `/v1/search` runs a name search in the store. The `/v1/filter` routes
/// work on the record set the dispatcher last loaded, and every query
/// starts again from that full set.
///
/// # Endpoints
///
/// - `GET /v1/search?name=` - Store search by name
/// - `GET /v1/filter?q=` - Filter on name, email or city
/// - `GET /v1/filter/city?q=` - Filter on city (needs two characters)
/// - `GET /v1/filter/cities` - Distinct cities for type-ahead

use crate::{app::AppState, error::ApiResult, routes::unexpected};
use axum::{
    extract::{Query, State},
    Json,
};
use roster_shared::listing::{self, RecordRow};
use roster_shared::models::record::Record;
use roster_worker::command::{Command, Outcome};
use serde::{Deserialize, Serialize};

/// `?name=` query
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

/// `?q=` query
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub q: String,
}

/// One store search hit
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub id: i64,

    /// "<name> - <city>"
    pub label: String,
}

/// Store search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub count: usize,
    pub results_label: String,
}

/// Filter response
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub records: Vec<RecordRow>,
    pub count: usize,
    pub results_label: String,
}

/// City suggestions response
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}

fn filter_response(outcome: Outcome) -> ApiResult<Json<FilterResponse>> {
    match outcome {
        Outcome::Records(records) => Ok(Json(FilterResponse {
            count: records.len(),
            results_label: listing::results_label(records.len()),
            records: listing::rows(&records),
        })),
        other => Err(unexpected(other)),
    }
}

/// Search records by name in the store
///
/// Case-insensitive substring match on the name only.
///
/// # Response
///
/// ```json
/// {
///   "results": [{ "id": 1, "label": "Ana - Lima" }],
///   "count": 1,
///   "results_label": "Results found: 1"
/// }
/// ```
pub async fn search_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let records: Vec<Record> = match state.dispatcher.send(Command::SearchByName(query.name)).await? {
        Outcome::Records(records) => records,
        other => return Err(unexpected(other)),
    };

    Ok(Json(SearchResponse {
        count: records.len(),
        results_label: listing::results_label(records.len()),
        results: records
            .iter()
            .map(|r| SearchHit {
                id: r.id,
                label: listing::search_label(r),
            })
            .collect(),
    }))
}

/// Filter the loaded records on name, email or city
///
/// An empty `q` returns every loaded record.
pub async fn filter_records(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Json<FilterResponse>> {
    filter_response(state.dispatcher.send(Command::FilterQuery(query.q)).await?)
}

/// Filter the loaded records on city
///
/// A `q` shorter than two characters returns every loaded record.
pub async fn filter_by_city(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Json<FilterResponse>> {
    filter_response(state.dispatcher.send(Command::CityQuery(query.q)).await?)
}

/// Distinct cities of the loaded records, in first-seen order
pub async fn city_suggestions(State(state): State<AppState>) -> ApiResult<Json<CitiesResponse>> {
    match state.dispatcher.send(Command::CitySuggestions).await? {
        Outcome::Cities(cities) => Ok(Json(CitiesResponse { cities })),
        other => Err(unexpected(other)),
    }
}
