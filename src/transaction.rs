//! Defines the transaction model and the database queries the reports need.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{Error, date_range::DateRangeResult};

/// The label used for transactions without a department or category.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// An income or expense recorded by the clinic.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: i64,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The clinic department the transaction is attributed to, e.g. "Radiology".
    pub department: Option<String>,
    /// The category of the transaction, e.g. "Supplies", "Insurance Payments".
    pub category: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: Date, description: &str) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description: description.to_owned(),
            department: None,
            category: None,
        }
    }

    /// The department name, or [UNASSIGNED_LABEL].
    pub fn department_name(&self) -> &str {
        self.department.as_deref().unwrap_or(UNASSIGNED_LABEL)
    }

    /// The category name, or [UNASSIGNED_LABEL].
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(UNASSIGNED_LABEL)
    }
}

/// A builder for creating [Transaction] instances.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The monetary amount of the transaction.
    ///
    /// Positive values are income (patient payments, insurance
    /// reimbursements), negative values are expenses (salaries, supplies).
    pub amount: f64,

    /// The date when the transaction occurred.
    pub date: Date,

    /// A human-readable description of the transaction.
    pub description: String,

    /// The department the transaction belongs to.
    pub department: Option<String>,

    /// The category of the transaction.
    pub category: Option<String>,
}

impl TransactionBuilder {
    /// Set the department for the transaction.
    pub fn department(mut self, department: &str) -> Self {
        self.department = Some(department.to_owned());
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }
}

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, description, department, category)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, date, description, department, category",
        )?
        .query_row(
            (
                builder.amount,
                builder.date,
                builder.description,
                builder.department,
                builder.category,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get the transactions that fall inside `range`, ordered by date.
///
/// The filter uses the range's query dates: `date >= startDate AND date < endDate`.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_in_range(
    range: &DateRangeResult,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let params = range.query_params();

    connection
        .prepare(
            "SELECT id, amount, date, description, department, category
             FROM \"transaction\"
             WHERE date >= ?1 AND date < ?2
             ORDER BY date ASC, id ASC",
        )?
        .query_map((params.start_date, params.end_date), map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                department TEXT,
                category TEXT
                )",
        (),
    )?;

    // Range filters on every report.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        department: row.get(4)?,
        category: row.get(5)?,
    })
}
