//! Resolves range presets into half-open date intervals and the months they cover.

use serde::Serialize;
use time::{Date, Duration, OffsetDateTime, UtcOffset};

use crate::{
    Error,
    date_range::{
        month::MonthBucket,
        preset::{RangeKind, RangePreset},
    },
};

/// A resolved date range.
///
/// The interval is half-open: `start` is included and `end` is excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeResult {
    preset: RangePreset,
    kind: RangeKind,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
    buckets: Vec<MonthBucket>,
    label: String,
}

impl DateRangeResult {
    fn new(
        preset: RangePreset,
        start_date: OffsetDateTime,
        end_date: OffsetDateTime,
        buckets: Vec<MonthBucket>,
    ) -> Self {
        let label = range_label(preset, &buckets);

        Self {
            preset,
            kind: preset.kind(),
            start_date,
            end_date,
            buckets,
            label,
        }
    }

    /// The preset this range was resolved from.
    pub fn preset(&self) -> RangePreset {
        self.preset
    }

    /// The first instant in the range, inclusive.
    pub fn start(&self) -> OffsetDateTime {
        self.start_date
    }

    /// The instant the range ends at, exclusive.
    pub fn end(&self) -> OffsetDateTime {
        self.end_date
    }

    /// The calendar months the range covers, in chronological order.
    pub fn buckets(&self) -> &[MonthBucket] {
        &self.buckets
    }

    /// A human readable description of the range, e.g.
    /// "January 2025 – June 2025 (last 6 months)".
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether `instant` lies inside the half-open range.
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        instant >= self.start_date && instant < self.end_date
    }

    /// The first UTC calendar date in the range, inclusive.
    pub fn start_query_date(&self) -> Date {
        self.start_date.date()
    }

    /// The UTC calendar date the range ends before, exclusive.
    ///
    /// Preset ranges end at midnight, so this is simply the date of
    /// [DateRangeResult::end]. A custom range that ends part way through a day
    /// includes that whole day, so the following day is used.
    pub fn end_query_date(&self) -> Date {
        let end_date = self.end_date.date();

        if self.end_date.time() == time::Time::MIDNIGHT {
            end_date
        } else {
            end_date.next_day().unwrap_or(Date::MAX)
        }
    }

    /// Whether the UTC calendar `date` falls between the query dates.
    pub fn contains_date(&self, date: Date) -> bool {
        date >= self.start_query_date() && date < self.end_query_date()
    }
}

/// The most recent calendar month that has fully elapsed at `reference`.
///
/// If `reference` falls in January, this is December of the previous year.
/// Every rolling preset and `this-year` is computed from this month.
pub fn last_complete_month(reference: OffsetDateTime) -> MonthBucket {
    MonthBucket::containing(reference.to_offset(UtcOffset::UTC).date()).previous()
}

/// Resolve `preset` relative to `reference`.
///
/// `reference` is converted to UTC before any calendar arithmetic, so the
/// result does not depend on the offset the caller used.
///
/// The to-date presets include the whole UTC calendar day of `reference` and
/// end at the following midnight. A reference at midnight on the first of a
/// month therefore resolves `current-month` to that first day alone.
///
/// # Errors
/// Returns:
/// - [Error::InvalidRange] for [RangePreset::Custom], use [resolve_custom] instead.
/// - [Error::InvalidReference] if `reference` is within a year of the edge of
///   the supported calendar.
pub fn resolve(preset: RangePreset, reference: OffsetDateTime) -> Result<DateRangeResult, Error> {
    check_supported(reference).map_err(Error::InvalidReference)?;
    let reference = reference.to_offset(UtcOffset::UTC);

    let last_complete = last_complete_month(reference);
    let current = MonthBucket::containing(reference.date());
    let january = MonthBucket::january(reference.year());

    let (first, last) = match preset {
        RangePreset::LastMonth => (last_complete, last_complete),
        RangePreset::LastQuarter => (last_complete.offset(-2), last_complete),
        RangePreset::LastSixMonths => (last_complete.offset(-5), last_complete),
        RangePreset::LastTwelveMonths => (last_complete.offset(-11), last_complete),
        // In January no month of the year has completed yet, so the range
        // holds January alone rather than reaching back into last year.
        RangePreset::ThisYear => (january, last_complete.max(january)),
        RangePreset::LastYear => (
            MonthBucket::january(reference.year() - 1),
            MonthBucket::december(reference.year() - 1),
        ),
        RangePreset::CurrentMonth => (current, current),
        RangePreset::YearToDate => (january, current),
        RangePreset::Custom => {
            return Err(Error::InvalidRange(
                "a custom range needs explicit start and end dates".to_owned(),
            ));
        }
    };

    let start = first.start()?;
    let end = match preset.kind() {
        RangeKind::ToDate => end_of_day(reference)?,
        _ => last.next().start()?,
    };
    let result = DateRangeResult::new(preset, start, end, MonthBucket::span(first, last));

    tracing::debug!(
        "Resolved {preset} at {reference} to [{}, {})",
        result.start_date,
        result.end_date
    );

    Ok(result)
}

/// Resolve a custom range with caller supplied bounds.
///
/// The bounds are returned unchanged apart from being expressed in UTC. The
/// buckets are every month the half-open interval touches.
///
/// # Errors
/// Returns [Error::InvalidRange] if `start` is after `end` or if either bound
/// is within a year of the edge of the supported calendar.
pub fn resolve_custom(
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Result<DateRangeResult, Error> {
    check_supported(start).map_err(Error::InvalidRange)?;
    check_supported(end).map_err(Error::InvalidRange)?;
    let start = start.to_offset(UtcOffset::UTC);
    let end = end.to_offset(UtcOffset::UTC);

    if start > end {
        return Err(Error::InvalidRange(format!(
            "the start {start} is after the end {end}"
        )));
    }

    let first = MonthBucket::containing(start.date());
    let last = if start == end {
        first
    } else {
        MonthBucket::containing((end - Duration::NANOSECOND).date())
    };

    Ok(DateRangeResult::new(
        RangePreset::Custom,
        start,
        end,
        MonthBucket::span(first, last),
    ))
}

/// The midnight after the UTC calendar day of `reference`.
fn end_of_day(reference: OffsetDateTime) -> Result<OffsetDateTime, Error> {
    reference
        .date()
        .next_day()
        .map(|day| day.midnight().assume_utc())
        .ok_or_else(|| Error::InvalidReference(format!("{reference} has no following day")))
}

/// Month arithmetic looks up to a year either side of an instant, so instants
/// in the first or last supported year are rejected.
fn check_supported(instant: OffsetDateTime) -> Result<(), String> {
    let supported_years = (Date::MIN.year() + 1)..=(Date::MAX.year() - 1);

    if supported_years.contains(&instant.year()) {
        Ok(())
    } else {
        Err(format!(
            "{instant} is outside the supported years {} to {}",
            supported_years.start(),
            supported_years.end()
        ))
    }
}

fn range_label(preset: RangePreset, buckets: &[MonthBucket]) -> String {
    let span = match (buckets.first(), buckets.last()) {
        (Some(first), Some(last)) if first == last => first.to_string(),
        (Some(first), Some(last)) => format!("{first} – {last}"),
        _ => String::new(),
    };

    format!("{span} ({})", preset.description())
}

#[cfg(test)]
mod tests {
    use time::{
        Date, Duration, Month, OffsetDateTime,
        macros::{date, datetime, offset},
    };

    use super::{DateRangeResult, last_complete_month, resolve, resolve_custom};
    use crate::{
        Error,
        date_range::{month::MonthBucket, preset::RangePreset},
    };

    fn bucket(year: i32, month: u8) -> MonthBucket {
        MonthBucket::new(year, month).unwrap()
    }

    fn months_of(year: i32, months: std::ops::RangeInclusive<u8>) -> Vec<MonthBucket> {
        months.map(|month| bucket(year, month)).collect()
    }

    fn every_day_between(start: OffsetDateTime, end: OffsetDateTime) -> Vec<OffsetDateTime> {
        let mut days = Vec::new();
        let mut day = start;

        while day < end {
            days.push(day);
            day += Duration::hours(23);
        }

        days
    }

    #[test]
    fn last_complete_month_rolls_back_over_the_year() {
        assert_eq!(
            last_complete_month(datetime!(2025-01-15 12:00 UTC)),
            bucket(2024, 12)
        );
        assert_eq!(
            last_complete_month(datetime!(2025-07-01 00:00 UTC)),
            bucket(2025, 6)
        );
    }

    #[test]
    fn last_complete_month_uses_utc() {
        // 23:30 on the last of the month in UTC-05:00 is already the next month in UTC.
        let reference = datetime!(2025-03-31 23:30 -05:00);

        assert_eq!(last_complete_month(reference), bucket(2025, 3));
    }

    #[test]
    fn resolve_is_idempotent() {
        let reference = datetime!(2025-05-17 08:45:12 UTC);

        for preset in RangePreset::ALL
            .into_iter()
            .filter(|preset| *preset != RangePreset::Custom)
        {
            assert_eq!(
                resolve(preset, reference).unwrap(),
                resolve(preset, reference).unwrap()
            );
        }
    }

    #[test]
    fn last_month_crosses_year_boundary() {
        let got = resolve(RangePreset::LastMonth, datetime!(2025-01-15 00:00 UTC)).unwrap();

        assert_eq!(got.buckets(), [bucket(2024, 12)]);
        assert_eq!(got.start(), datetime!(2024-12-01 00:00 UTC));
        assert_eq!(got.end(), datetime!(2025-01-01 00:00 UTC));
        assert_eq!(got.label(), "December 2024 (last month)");
    }

    #[test]
    fn last_six_months_ends_at_last_complete_month() {
        for day in 1..=31 {
            let reference = datetime!(2025-07-01 09:30 UTC) + Duration::days(day - 1);

            let got = resolve(RangePreset::LastSixMonths, reference).unwrap();

            assert_eq!(got.buckets(), months_of(2025, 1..=6), "reference {reference}");
            assert_eq!(got.start(), datetime!(2025-01-01 00:00 UTC));
            assert_eq!(got.end(), datetime!(2025-07-01 00:00 UTC));
        }
    }

    #[test]
    fn last_quarter_spans_year_boundary() {
        let got = resolve(RangePreset::LastQuarter, datetime!(2025-02-10 00:00 UTC)).unwrap();

        assert_eq!(
            got.buckets(),
            [bucket(2024, 11), bucket(2024, 12), bucket(2025, 1)]
        );
        assert_eq!(got.label(), "November 2024 – January 2025 (last 3 months)");
    }

    #[test]
    fn last_twelve_months_has_twelve_buckets() {
        let got = resolve(
            RangePreset::LastTwelveMonths,
            datetime!(2025-03-03 00:00 UTC),
        )
        .unwrap();

        assert_eq!(got.buckets().len(), 12);
        assert_eq!(got.buckets().first(), Some(&bucket(2024, 3)));
        assert_eq!(got.buckets().last(), Some(&bucket(2025, 2)));
    }

    #[test]
    fn this_year_is_anchored_to_january() {
        for reference in [
            datetime!(2025-03-03 00:00 UTC),
            datetime!(2025-12-31 23:59:59 UTC),
            datetime!(2025-02-01 00:00 UTC),
        ] {
            let got = resolve(RangePreset::ThisYear, reference).unwrap();

            assert_eq!(got.buckets().first(), Some(&bucket(2025, 1)));
            assert_eq!(got.buckets().last(), Some(&last_complete_month(reference)));
            assert_eq!(got.start(), datetime!(2025-01-01 00:00 UTC));
        }
    }

    #[test]
    fn this_year_in_january_holds_only_january() {
        let got = resolve(RangePreset::ThisYear, datetime!(2025-01-20 00:00 UTC)).unwrap();

        assert_eq!(got.buckets(), [bucket(2025, 1)]);
        assert_eq!(got.start(), datetime!(2025-01-01 00:00 UTC));
        assert_eq!(got.end(), datetime!(2025-02-01 00:00 UTC));
    }

    #[test]
    fn last_year_is_the_whole_previous_year() {
        for reference in [
            datetime!(2025-01-01 00:00 UTC),
            datetime!(2025-06-15 00:00 UTC),
            datetime!(2025-12-31 23:59 UTC),
        ] {
            let got = resolve(RangePreset::LastYear, reference).unwrap();

            assert_eq!(got.buckets(), months_of(2024, 1..=12));
            assert_eq!(got.start(), datetime!(2024-01-01 00:00 UTC));
            assert_eq!(got.end(), datetime!(2025-01-01 00:00 UTC));
            assert_eq!(got.label(), "January 2024 – December 2024 (last year)");
        }
    }

    #[test]
    fn current_month_ends_after_the_reference_day() {
        let reference = datetime!(2025-04-18 14:05 UTC);

        let got = resolve(RangePreset::CurrentMonth, reference).unwrap();

        assert_eq!(got.buckets(), [bucket(2025, 4)]);
        assert_eq!(got.start(), datetime!(2025-04-01 00:00 UTC));
        assert_eq!(got.end(), datetime!(2025-04-19 00:00 UTC));
        assert!(got.contains(reference));
    }

    #[test]
    fn current_month_on_the_first_at_midnight_holds_that_day() {
        let got = resolve(RangePreset::CurrentMonth, datetime!(2025-04-01 00:00 UTC)).unwrap();

        assert_eq!(got.buckets(), [bucket(2025, 4)]);
        assert_eq!(got.start(), datetime!(2025-04-01 00:00 UTC));
        assert_eq!(got.end(), datetime!(2025-04-02 00:00 UTC));
        assert_buckets_start_inside(&got);
    }

    #[test]
    fn year_to_date_ends_after_the_reference_day() {
        let reference = datetime!(2025-04-18 14:05 UTC);

        let got = resolve(RangePreset::YearToDate, reference).unwrap();

        assert_eq!(got.buckets(), months_of(2025, 1..=4));
        assert_eq!(got.start(), datetime!(2025-01-01 00:00 UTC));
        assert_eq!(got.end(), datetime!(2025-04-19 00:00 UTC));
        assert_eq!(got.label(), "January 2025 – April 2025 (year to date)");
    }

    #[test]
    fn to_date_presets_ignore_the_time_of_the_reference_day() {
        for preset in [RangePreset::CurrentMonth, RangePreset::YearToDate] {
            let midnight = resolve(preset, datetime!(2025-04-18 00:00 UTC)).unwrap();
            let just_after = resolve(preset, datetime!(2025-04-18 00:00:01 UTC)).unwrap();
            let last_second = resolve(preset, datetime!(2025-04-18 23:59:59 UTC)).unwrap();

            assert_eq!(midnight, just_after, "{preset}");
            assert_eq!(midnight, last_second, "{preset}");
            assert!(midnight.contains_date(date!(2025 - 04 - 18)), "{preset}");
            assert!(!midnight.contains_date(date!(2025 - 04 - 19)), "{preset}");
        }
    }

    #[test]
    fn non_utc_reference_is_converted_before_resolving() {
        let reference = datetime!(2025-01-01 08:00 +13:00);

        let got = resolve(RangePreset::LastMonth, reference).unwrap();

        // 08:00 on January 1 in +13:00 is still December 31 in UTC.
        assert_eq!(got.buckets(), [bucket(2024, 11)]);
        assert_eq!(got.start().offset(), offset!(UTC));
    }

    #[test]
    fn resolve_custom_preset_without_bounds_fails() {
        let got = resolve(RangePreset::Custom, datetime!(2025-01-01 00:00 UTC));

        assert!(matches!(got, Err(Error::InvalidRange(_))));
    }

    #[test]
    fn resolve_rejects_reference_at_edge_of_calendar() {
        let reference = Date::MIN.midnight().assume_utc() + Duration::days(14);

        let got = resolve(RangePreset::LastMonth, reference);

        assert!(matches!(got, Err(Error::InvalidReference(_))));
    }

    #[test]
    fn custom_range_passes_bounds_through() {
        let start = datetime!(2025-03-10 00:00 UTC);
        let end = datetime!(2025-03-20 00:00 UTC);

        let got = resolve_custom(start, end).unwrap();

        assert_eq!(got.preset(), RangePreset::Custom);
        assert_eq!(got.start(), start);
        assert_eq!(got.end(), end);
        assert_eq!(got.buckets(), [bucket(2025, 3)]);
        assert_eq!(got.label(), "March 2025 (custom range)");
    }

    #[test]
    fn custom_range_rejects_start_after_end() {
        let got = resolve_custom(
            datetime!(2025-03-20 00:00 UTC),
            datetime!(2025-03-10 00:00 UTC),
        );

        assert!(matches!(got, Err(Error::InvalidRange(_))));
    }

    #[test]
    fn custom_range_allows_empty_interval() {
        let instant = datetime!(2025-03-10 00:00 UTC);

        let got = resolve_custom(instant, instant).unwrap();

        assert_eq!(got.buckets(), [bucket(2025, 3)]);
        assert!(!got.contains(instant));
    }

    #[test]
    fn custom_range_ending_on_month_start_excludes_that_month() {
        let got = resolve_custom(
            datetime!(2025-01-15 00:00 UTC),
            datetime!(2025-03-01 00:00 UTC),
        )
        .unwrap();

        assert_eq!(got.buckets(), [bucket(2025, 1), bucket(2025, 2)]);
    }

    #[test]
    fn every_month_aligned_preset_satisfies_the_half_open_invariant() {
        let presets = [
            RangePreset::LastMonth,
            RangePreset::LastQuarter,
            RangePreset::LastSixMonths,
            RangePreset::LastTwelveMonths,
            RangePreset::ThisYear,
            RangePreset::LastYear,
        ];

        for reference in every_day_between(
            datetime!(2023-01-01 00:00 UTC),
            datetime!(2026-12-31 23:59 UTC),
        ) {
            for preset in presets {
                let got = resolve(preset, reference).unwrap();

                assert_half_open(&got);
                assert_contiguous(&got);

                let january_this_year =
                    preset == RangePreset::ThisYear && reference.month() == Month::January;
                if !january_this_year {
                    assert!(got.end() <= reference, "{preset} at {reference} includes the future");
                }
            }
        }
    }

    #[test]
    fn to_date_presets_contain_the_whole_reference_day() {
        for reference in every_day_between(
            datetime!(2024-01-01 00:00 UTC),
            datetime!(2025-12-31 23:59 UTC),
        ) {
            for preset in [RangePreset::CurrentMonth, RangePreset::YearToDate] {
                let got = resolve(preset, reference).unwrap();
                let day_start = reference.date().midnight().assume_utc();

                assert_buckets_start_inside(&got);
                assert!(got.contains(day_start), "{preset} at {reference}");
                assert!(got.contains(reference), "{preset} at {reference}");
                assert!(!got.contains(day_start + Duration::DAY), "{preset} at {reference}");
                assert_eq!(
                    got.buckets().last(),
                    Some(&MonthBucket::containing(reference.date()))
                );
                assert_contiguous(&got);
            }
        }
    }

    fn assert_buckets_start_inside(range: &DateRangeResult) {
        assert!(range.start() < range.end(), "{range:?}");

        for bucket in range.buckets() {
            let month_start = bucket.start().unwrap();

            assert!(month_start >= range.start(), "{bucket} starts before {range:?}");
            assert!(month_start < range.end(), "{bucket} starts after {range:?}");
        }
    }

    fn assert_half_open(range: &DateRangeResult) {
        assert_buckets_start_inside(range);

        for bucket in range.buckets() {
            assert!(
                bucket.next().start().unwrap() <= range.end(),
                "{bucket} ends after {range:?}"
            );
        }
    }

    fn assert_contiguous(range: &DateRangeResult) {
        assert!(!range.buckets().is_empty(), "{range:?}");

        for pair in range.buckets().windows(2) {
            assert_eq!(pair[0].next(), pair[1], "{range:?}");
        }
    }
}
