//! HTTP handler exposing the date range resolver.

use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    date_range::{query::RangeParams, query::RangeQuery, resolver::DateRangeResult},
    timezone::local_reference,
};

/// The JSON body returned by [get_date_range].
///
/// Boundaries are midnights of the clinic's calendar written with a `Z`
/// offset. For a clinic outside UTC they differ from the true instants by the
/// clinic's UTC offset.
#[derive(Debug, Serialize)]
pub struct DateRangeResponse {
    /// The resolved range.
    #[serde(flatten)]
    pub range: DateRangeResult,
    /// The query parameters a client should send to the report endpoints.
    pub query: RangeParams,
}

/// Decodes the request's query string so a malformed query is answered with
/// the same JSON error body as every other invalid range.
impl<S> FromRequestParts<S> for RangeQuery
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        RangeQuery::from_query_string(parts.uri.query().unwrap_or_default())
    }
}

/// Resolve the date range described by `query`.
///
/// The clock is read once here. Requests without a `reference` are resolved
/// relative to the current wall clock time in `local_timezone`.
pub(crate) fn resolve_request_range(
    query: &RangeQuery,
    local_timezone: &str,
) -> Result<DateRangeResult, Error> {
    let reference = local_reference(OffsetDateTime::now_utc(), local_timezone)?;

    query
        .resolve(reference)
        .inspect_err(|error| tracing::debug!("could not resolve {query:?}: {error}"))
}

/// Resolve a date range preset and return its boundaries, months and query parameters.
pub async fn get_date_range(
    State(state): State<AppState>,
    query: RangeQuery,
) -> Result<Json<DateRangeResponse>, Error> {
    let range = resolve_request_range(&query, &state.local_timezone)?;
    let query = range.query_params();

    Ok(Json(DateRangeResponse { range, query }))
}
