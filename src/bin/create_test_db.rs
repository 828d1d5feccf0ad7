use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use clinic_ledger::{
    initialize_db,
    transaction::{Transaction, count_transactions, create_transaction},
};

/// A utility for creating a test database for the clinic ledger server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of transactions to create, counting back from today.
    #[arg(long, default_value_t = 730)]
    days: i64,
}

/// Recurring transactions: (amount, description, department, category, every n days).
const SAMPLE_TRANSACTIONS: [(f64, &str, Option<&str>, Option<&str>, i64); 8] = [
    (
        180.0,
        "Consultation fees",
        Some("General Practice"),
        Some("Patient Payments"),
        1,
    ),
    (
        950.0,
        "Insurance reimbursement",
        Some("Radiology"),
        Some("Insurance Payments"),
        7,
    ),
    (
        2400.0,
        "Day surgery",
        Some("Surgery"),
        Some("Patient Payments"),
        10,
    ),
    (
        -320.0,
        "Medical supplies",
        Some("Surgery"),
        Some("Supplies"),
        5,
    ),
    (
        -145.0,
        "Contrast agent",
        Some("Radiology"),
        Some("Supplies"),
        9,
    ),
    (-12500.0, "Staff salaries", None, Some("Payroll"), 14),
    (-3200.0, "Rent", None, Some("Facilities"), 30),
    (-85.0, "Cleaning", None, None, 3),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating clinic transactions for the last {} days...", args.days);

    let today = OffsetDateTime::now_utc().date();
    let tx = conn.transaction()?;

    for day in 0..args.days {
        let date = today - Duration::days(day);

        for (amount, description, department, category, every) in SAMPLE_TRANSACTIONS {
            if day % every != 0 {
                continue;
            }

            let mut builder = Transaction::build(amount, date, description);
            if let Some(department) = department {
                builder = builder.department(department);
            }
            if let Some(category) = category {
                builder = builder.category(category);
            }

            create_transaction(builder, &tx)?;
        }
    }

    tx.commit()?;

    println!("Created {} transactions.", count_transactions(&conn)?);
    println!("Success!");

    Ok(())
}
