//! Calendar arithmetic for named date ranges.
//!
//! This module is the single place that turns a preset such as `last-6-months`
//! into month boundaries. The query string helpers, the SQL filter and the
//! report endpoints all go through [resolve] so they agree on what a range means.

mod handlers;
mod month;
mod preset;
mod query;
mod resolver;

pub use handlers::{DateRangeResponse, get_date_range};
pub(crate) use handlers::resolve_request_range;
pub use month::MonthBucket;
pub use preset::{RangeKind, RangePreset};
pub use query::{RangeParams, RangeQuery};
pub use resolver::{DateRangeResult, last_complete_month, resolve, resolve_custom};
