//! Financial reports over a resolved date range.

mod aggregation;
mod handlers;

pub use aggregation::{
    CategoryTrend, GroupTotals, MonthlyTotals, Totals, monthly_expenses_by_category,
    monthly_totals, summarize, totals_by_department,
};
pub use handlers::{
    DepartmentReport, ExpenseTrendReport, MonthlyReport, ReportState, get_department_report,
    get_expense_trends, get_monthly_report,
};
