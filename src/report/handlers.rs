//! Report HTTP handlers.
//!
//! Every handler resolves the requested date range, loads the transactions
//! inside it and returns the aggregated numbers as JSON.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    date_range::{DateRangeResult, MonthBucket, RangeQuery, resolve_request_range},
    report::aggregation::{
        CategoryTrend, GroupTotals, MonthlyTotals, Totals, monthly_expenses_by_category,
        monthly_totals, summarize, totals_by_department,
    },
    transaction::{Transaction, get_transactions_in_range},
};

/// The state needed for the report endpoints.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Income and expenses per month.
#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    /// The resolved range the report covers.
    pub range: DateRangeResult,
    /// One entry per month of the range.
    pub months: Vec<MonthlyTotals>,
    /// The totals over the whole range.
    pub totals: Totals,
}

/// Income and expenses per department.
#[derive(Debug, Serialize)]
pub struct DepartmentReport {
    /// The resolved range the report covers.
    pub range: DateRangeResult,
    /// One entry per department.
    pub departments: Vec<GroupTotals>,
    /// The totals over the whole range.
    pub totals: Totals,
}

/// Monthly expenses per category.
#[derive(Debug, Serialize)]
pub struct ExpenseTrendReport {
    /// The resolved range the report covers.
    pub range: DateRangeResult,
    /// The months each category's values refer to.
    pub months: Vec<MonthBucket>,
    /// One entry per category with expenses in the range.
    pub categories: Vec<CategoryTrend>,
}

/// Get income and expense totals for each month of the requested range.
pub async fn get_monthly_report(
    State(state): State<ReportState>,
    query: RangeQuery,
) -> Result<Json<MonthlyReport>, Error> {
    let (range, transactions) = load_range(&state, &query)?;

    Ok(Json(MonthlyReport {
        months: monthly_totals(&transactions, range.buckets()),
        totals: summarize(&transactions),
        range,
    }))
}

/// Get income and expense totals for each department over the requested range.
pub async fn get_department_report(
    State(state): State<ReportState>,
    query: RangeQuery,
) -> Result<Json<DepartmentReport>, Error> {
    let (range, transactions) = load_range(&state, &query)?;

    Ok(Json(DepartmentReport {
        departments: totals_by_department(&transactions),
        totals: summarize(&transactions),
        range,
    }))
}

/// Get monthly expenses for each category over the requested range.
pub async fn get_expense_trends(
    State(state): State<ReportState>,
    query: RangeQuery,
) -> Result<Json<ExpenseTrendReport>, Error> {
    let (range, transactions) = load_range(&state, &query)?;

    Ok(Json(ExpenseTrendReport {
        months: range.buckets().to_vec(),
        categories: monthly_expenses_by_category(&transactions, range.buckets()),
        range,
    }))
}

fn load_range(
    state: &ReportState,
    query: &RangeQuery,
) -> Result<(DateRangeResult, Vec<Transaction>), Error> {
    let range = resolve_request_range(query, &state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions_in_range(&range, &connection).inspect_err(|error| {
        tracing::error!("could not get transactions for {}: {error}", range.label())
    })?;

    tracing::debug!(
        "Loaded {} transactions for {}",
        transactions.len(),
        range.label()
    );

    Ok((range, transactions))
}
