//! The API endpoints URIs.

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route for resolving a date range preset into month boundaries.
pub const DATE_RANGE_API: &str = "/api/date-range";
/// The route for income and expense totals per month.
pub const MONTHLY_REPORT_API: &str = "/api/reports/monthly";
/// The route for income and expense totals per department.
pub const DEPARTMENT_REPORT_API: &str = "/api/reports/departments";
/// The route for monthly expenses broken down by category.
pub const EXPENSE_TRENDS_API: &str = "/api/reports/expense-trends";
