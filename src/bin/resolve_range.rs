use std::{error::Error, process::exit};

use clap::{Parser, ValueEnum};
use time::OffsetDateTime;

use clinic_ledger::{date_range::RangeQuery, timezone::local_reference};

/// A utility for resolving a date range preset from the command line.
///
/// Prints the resolved range as JSON, or the query string the report
/// endpoints accept.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The preset to resolve, e.g. "last-quarter" or "custom".
    #[arg(default_value = "last-12-months")]
    preset: String,

    /// The instant to resolve relative to. Defaults to now.
    #[arg(long)]
    reference: Option<String>,

    /// The start of a custom range.
    #[arg(long)]
    start: Option<String>,

    /// The exclusive end of a custom range.
    #[arg(long)]
    end: Option<String>,

    /// The timezone whose wall clock is used when no reference is given.
    #[arg(long, env = "CLINIC_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// How to print the resolved range.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// The resolved range as pretty printed JSON.
    Json,
    /// The report query string, e.g. `startDate=...&endDate=...&range=...`.
    Query,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let query = RangeQuery {
        range: Some(args.preset),
        preset: None,
        start_date: args.start,
        end_date: args.end,
        reference: args.reference,
    };

    let now = local_reference(OffsetDateTime::now_utc(), &args.timezone)?;

    let range = match query.resolve(now) {
        Ok(range) => range,
        Err(error) => {
            eprintln!("Could not resolve date range: {error}");
            exit(1);
        }
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&range)?),
        OutputFormat::Query => println!("{}", range.query_params().to_query_string()?),
    }

    Ok(())
}
