//! Query string parameters carrying a resolved date range between client and server.

use serde::{Deserialize, Serialize, Serializer};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    date_range::{
        preset::RangePreset,
        resolver::{DateRangeResult, resolve, resolve_custom},
    },
    timezone::{parse_range_bound, parse_reference},
};

/// The query parameters produced for a resolved range.
///
/// `end_date` is exclusive: filters must use `date < endDate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    /// The first UTC calendar date in the range, inclusive.
    #[serde(serialize_with = "serialize_date")]
    pub start_date: Date,
    /// The UTC calendar date the range ends before, exclusive.
    #[serde(serialize_with = "serialize_date")]
    pub end_date: Date,
    /// The preset key, passed through unchanged.
    pub range: RangePreset,
}

impl RangeParams {
    /// Encode the parameters as a URL query string, e.g.
    /// `startDate=2025-01-01&endDate=2025-07-01&range=last-6-months`.
    ///
    /// # Errors
    /// Returns [Error::InvalidQuery] if the parameters cannot be encoded.
    pub fn to_query_string(&self) -> Result<String, Error> {
        serde_urlencoded::to_string(self).map_err(|error| Error::InvalidQuery(error.to_string()))
    }
}

fn serialize_date<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(date)
}

impl DateRangeResult {
    /// The query parameters for this range.
    pub fn query_params(&self) -> RangeParams {
        RangeParams {
            start_date: self.start_query_date(),
            end_date: self.end_query_date(),
            range: self.preset(),
        }
    }
}

/// The query parameters accepted by endpoints that work on a date range.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    /// The range preset to resolve.
    pub range: Option<String>,
    /// An alternative name for `range`.
    pub preset: Option<String>,
    /// The start of a custom range.
    pub start_date: Option<String>,
    /// The exclusive end of a custom range.
    pub end_date: Option<String>,
    /// The instant to resolve the range relative to, instead of the current time.
    pub reference: Option<String>,
}

impl RangeQuery {
    /// Create a query for `preset`.
    pub fn for_preset(preset: RangePreset) -> Self {
        Self {
            range: Some(preset.as_query_value().to_owned()),
            ..Default::default()
        }
    }

    /// Decode a URL query string such as `range=last-month&reference=2025-01-15`.
    ///
    /// # Errors
    /// Returns [Error::InvalidQuery] if the query string is malformed.
    pub fn from_query_string(query: &str) -> Result<Self, Error> {
        serde_urlencoded::from_str(query.trim_start_matches('?'))
            .map_err(|error| Error::InvalidQuery(error.to_string()))
    }

    /// The preset named by the query, or the default preset if none is named.
    ///
    /// # Errors
    /// Returns [Error::InvalidPreset] if the query names a preset that does not exist.
    pub fn preset(&self) -> Result<RangePreset, Error> {
        match self.range.as_deref().or(self.preset.as_deref()) {
            Some(key) => key.parse(),
            None => Ok(RangePreset::default_preset()),
        }
    }

    /// Resolve the query to a date range.
    ///
    /// `now` is used as the reference instant unless the query supplies its own.
    /// The start and end dates are only read for custom ranges.
    ///
    /// # Errors
    /// Returns [Error::InvalidPreset], [Error::InvalidReference] or
    /// [Error::InvalidRange] as described by [resolve] and [resolve_custom].
    pub fn resolve(&self, now: OffsetDateTime) -> Result<DateRangeResult, Error> {
        let preset = self.preset()?;

        if preset == RangePreset::Custom {
            let (Some(start), Some(end)) = (&self.start_date, &self.end_date) else {
                return Err(Error::InvalidRange(
                    "a custom range needs both startDate and endDate".to_owned(),
                ));
            };

            return resolve_custom(parse_range_bound(start)?, parse_range_bound(end)?);
        }

        let reference = match &self.reference {
            Some(reference) => parse_reference(reference)?,
            None => now,
        };

        resolve(preset, reference)
    }
}
