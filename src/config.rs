//! Server configuration read from command line flags and environment variables.

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use time::OffsetDateTime;

use crate::{Error, timezone::get_local_offset};

/// The REST API server for the clinic's financial reports.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// File path to the application SQLite database.
    #[arg(long, env = "CLINIC_DB_PATH")]
    pub db_path: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, env = "CLINIC_PORT", default_value_t = 3000)]
    pub port: u16,

    /// The clinic's canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Month boundaries follow the calendar in this timezone.
    #[arg(long, env = "CLINIC_TIMEZONE", default_value = "Etc/UTC")]
    pub timezone: String,

    /// File path that debug logs are appended to.
    #[arg(long, env = "CLINIC_LOG_PATH", default_value = "debug.log")]
    pub log_path: PathBuf,
}

impl ServerConfig {
    /// Check that the configured timezone is a known canonical timezone name.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the timezone is not recognised.
    pub fn validate(&self) -> Result<(), Error> {
        match get_local_offset(&self.timezone, OffsetDateTime::now_utc()) {
            Some(_) => Ok(()),
            None => Err(Error::InvalidTimezone(self.timezone.clone())),
        }
    }

    /// The local address to listen on.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], self.port))
    }
}
