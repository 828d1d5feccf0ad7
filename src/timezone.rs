//! Parsing reference instants and converting the server clock to the clinic's calendar.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the UTC offset of `canonical_timezone`, e.g. "Pacific/Auckland", at the instant `at`.
///
/// Returns `None` if the timezone name is not recognised.
pub fn get_local_offset(canonical_timezone: &str, at: OffsetDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&at).to_utc())
}

/// Re-label the wall clock time of `canonical_timezone` at `now` as UTC.
///
/// Month boundaries are computed in UTC, so the result is what the resolver
/// needs to follow the clinic's calendar rather than the server's.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the timezone name is not recognised.
pub fn local_reference(
    now: OffsetDateTime,
    canonical_timezone: &str,
) -> Result<OffsetDateTime, Error> {
    let offset = get_local_offset(canonical_timezone, now)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))?;

    Ok(now.to_offset(offset).replace_offset(UtcOffset::UTC))
}

/// Parse an instant from an RFC 3339 date-time, a date-time without an
/// offset, or a plain `YYYY-MM-DD` date.
///
/// Date-times without an offset and plain dates are interpreted as UTC.
/// Returns `None` if `text` matches none of these formats.
pub fn parse_instant(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Ok(instant) = OffsetDateTime::parse(text, &Rfc3339) {
        return instant.checked_to_offset(UtcOffset::UTC);
    }

    if let Ok(date_time) = PrimitiveDateTime::parse(
        text,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(date_time.assume_utc());
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Parse the reference instant for a date range.
///
/// # Errors
/// Returns [Error::InvalidReference] if `text` is not a valid date or date-time.
pub fn parse_reference(text: &str) -> Result<OffsetDateTime, Error> {
    parse_instant(text)
        .ok_or_else(|| Error::InvalidReference(format!("could not parse \"{text}\" as a date")))
}

/// Parse one bound of a custom date range.
///
/// # Errors
/// Returns [Error::InvalidRange] if `text` is not a valid date or date-time.
pub fn parse_range_bound(text: &str) -> Result<OffsetDateTime, Error> {
    parse_instant(text)
        .ok_or_else(|| Error::InvalidRange(format!("could not parse \"{text}\" as a date")))
}
