//! The named date range presets and how they are written in query strings.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A named calendar range that a caller selects instead of supplying raw dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum RangePreset {
    /// The calendar month before the reference month.
    LastMonth,
    /// The last three complete months. Also accepted as `last-3-months`.
    LastQuarter,
    /// The last six complete months.
    LastSixMonths,
    /// The last twelve complete months.
    LastTwelveMonths,
    /// January of the reference year through the last complete month.
    ThisYear,
    /// January through December of the year before the reference year.
    LastYear,
    /// The reference month up to the reference instant.
    CurrentMonth,
    /// January 1 of the reference year up to the reference instant.
    YearToDate,
    /// Explicit start and end instants supplied by the caller.
    Custom,
}

/// How the boundaries of a preset relate to the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeKind {
    /// A window of whole months that moves forward with the reference.
    Rolling,
    /// A window of whole months anchored to a calendar period.
    Fixed,
    /// A window that ends at the reference instant itself.
    ToDate,
    /// Caller supplied boundaries.
    Custom,
}

impl RangePreset {
    /// Every preset, in the order they are usually offered to users.
    pub const ALL: [RangePreset; 9] = [
        Self::LastMonth,
        Self::LastQuarter,
        Self::LastSixMonths,
        Self::LastTwelveMonths,
        Self::ThisYear,
        Self::LastYear,
        Self::CurrentMonth,
        Self::YearToDate,
        Self::Custom,
    ];

    /// The preset used when a request does not name one.
    pub fn default_preset() -> Self {
        Self::LastTwelveMonths
    }

    /// The key used for the preset in query strings and JSON, e.g. `last-6-months`.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::LastMonth => "last-month",
            Self::LastQuarter => "last-quarter",
            Self::LastSixMonths => "last-6-months",
            Self::LastTwelveMonths => "last-12-months",
            Self::ThisYear => "this-year",
            Self::LastYear => "last-year",
            Self::CurrentMonth => "current-month",
            Self::YearToDate => "year-to-date",
            Self::Custom => "custom",
        }
    }

    /// The suffix appended to range labels.
    pub fn description(self) -> &'static str {
        match self {
            Self::LastMonth => "last month",
            Self::LastQuarter => "last 3 months",
            Self::LastSixMonths => "last 6 months",
            Self::LastTwelveMonths => "last 12 months",
            Self::ThisYear => "this year",
            Self::LastYear => "last year",
            Self::CurrentMonth => "month to date",
            Self::YearToDate => "year to date",
            Self::Custom => "custom range",
        }
    }

    /// Whether the preset is rolling, anchored to the calendar, to-date or custom.
    pub fn kind(self) -> RangeKind {
        match self {
            Self::LastQuarter | Self::LastSixMonths | Self::LastTwelveMonths => RangeKind::Rolling,
            Self::LastMonth | Self::ThisYear | Self::LastYear => RangeKind::Fixed,
            Self::CurrentMonth | Self::YearToDate => RangeKind::ToDate,
            Self::Custom => RangeKind::Custom,
        }
    }
}

impl FromStr for RangePreset {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "last-month" => Ok(Self::LastMonth),
            "last-quarter" | "last-3-months" => Ok(Self::LastQuarter),
            "last-6-months" => Ok(Self::LastSixMonths),
            "last-12-months" => Ok(Self::LastTwelveMonths),
            "this-year" => Ok(Self::ThisYear),
            "last-year" => Ok(Self::LastYear),
            "current-month" => Ok(Self::CurrentMonth),
            "year-to-date" => Ok(Self::YearToDate),
            "custom" => Ok(Self::Custom),
            other => Err(Error::InvalidPreset(other.to_owned())),
        }
    }
}

impl TryFrom<String> for RangePreset {
    type Error = Error;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        key.parse()
    }
}

impl From<RangePreset> for &'static str {
    fn from(preset: RangePreset) -> Self {
        preset.as_query_value()
    }
}

impl fmt::Display for RangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}
