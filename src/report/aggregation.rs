//! Transaction aggregation over the months of a resolved date range.
//!
//! Provides functions to total income and expenses per month, per department
//! and per category. Expenses are reported as positive magnitudes.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    date_range::MonthBucket,
    transaction::{Transaction, UNASSIGNED_LABEL},
};

/// Income, expense and net totals for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    /// The sum of positive amounts.
    pub income: f64,
    /// The sum of negative amounts, as a positive number.
    pub expenses: f64,
    /// Income minus expenses.
    pub net: f64,
}

impl Totals {
    fn add(&mut self, amount: f64) {
        if amount < 0.0 {
            self.expenses += amount.abs();
        } else {
            self.income += amount;
        }

        self.net += amount;
    }
}

/// The totals for one month of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// The month the totals belong to.
    pub bucket: MonthBucket,
    /// The totals for the month.
    #[serde(flatten)]
    pub totals: Totals,
}

/// The totals for one department or category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotals {
    /// The department or category name.
    pub name: String,
    /// The totals for the group.
    #[serde(flatten)]
    pub totals: Totals,
}

/// Monthly expenses for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTrend {
    /// The category name.
    pub category: String,
    /// One entry per report month, `None` for months without expenses.
    pub monthly_expenses: Vec<Option<f64>>,
}

/// Sums all `transactions`.
pub fn summarize(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();

    for transaction in transactions {
        totals.add(transaction.amount);
    }

    totals
}

/// Totals transaction amounts for each of `buckets`.
///
/// # Returns
/// One entry per bucket in the same order. Months without transactions have
/// zero totals. Transactions outside the buckets are ignored.
pub fn monthly_totals(transactions: &[Transaction], buckets: &[MonthBucket]) -> Vec<MonthlyTotals> {
    let mut totals_by_month: HashMap<MonthBucket, Totals> = HashMap::new();

    for transaction in transactions {
        totals_by_month
            .entry(MonthBucket::containing(transaction.date))
            .or_default()
            .add(transaction.amount);
    }

    buckets
        .iter()
        .map(|bucket| MonthlyTotals {
            bucket: *bucket,
            totals: totals_by_month.get(bucket).copied().unwrap_or_default(),
        })
        .collect()
}

/// Totals transaction amounts for each department.
///
/// # Returns
/// Departments sorted by name, with [UNASSIGNED_LABEL] sorted last.
pub fn totals_by_department(transactions: &[Transaction]) -> Vec<GroupTotals> {
    let mut totals_by_name: HashMap<&str, Totals> = HashMap::new();

    for transaction in transactions {
        totals_by_name
            .entry(transaction.department_name())
            .or_default()
            .add(transaction.amount);
    }

    sorted_names(totals_by_name.keys().copied())
        .into_iter()
        .map(|name| GroupTotals {
            name: name.to_owned(),
            totals: totals_by_name[name],
        })
        .collect()
}

/// Groups expense transactions by category and totals them for each of `buckets`.
///
/// Only negative amounts (expenses) are included.
///
/// # Returns
/// Categories sorted by name with [UNASSIGNED_LABEL] last. Each category has
/// one value per bucket, with `None` for months without expenses.
pub fn monthly_expenses_by_category(
    transactions: &[Transaction],
    buckets: &[MonthBucket],
) -> Vec<CategoryTrend> {
    let mut expenses_by_category: HashMap<&str, HashMap<MonthBucket, f64>> = HashMap::new();

    for transaction in transactions.iter().filter(|t| t.amount < 0.0) {
        *expenses_by_category
            .entry(transaction.category_name())
            .or_default()
            .entry(MonthBucket::containing(transaction.date))
            .or_insert(0.0) += transaction.amount.abs();
    }

    sorted_names(expenses_by_category.keys().copied())
        .into_iter()
        .map(|category| {
            let monthly = &expenses_by_category[category];

            CategoryTrend {
                category: category.to_owned(),
                monthly_expenses: buckets
                    .iter()
                    .map(|bucket| monthly.get(bucket).copied())
                    .collect(),
            }
        })
        .collect()
}

/// Sorts `names` alphabetically, moving [UNASSIGNED_LABEL] to the end.
fn sorted_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut has_unassigned = false;
    let mut sorted: Vec<&str> = names
        .filter(|&name| {
            let is_unassigned = name == UNASSIGNED_LABEL;
            has_unassigned |= is_unassigned;
            !is_unassigned
        })
        .collect();
    sorted.sort();

    if has_unassigned {
        sorted.push(UNASSIGNED_LABEL);
    }

    sorted
}
