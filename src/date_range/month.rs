//! Calendar month buckets.

use std::{cmp::Ordering, fmt};

use serde::{Serialize, Serializer, ser::SerializeStruct};
use time::{Date, Month, OffsetDateTime};

use crate::Error;

/// One whole calendar month, identified by its year and month.
///
/// Buckets are ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthBucket {
    year: i32,
    month: Month,
}

impl MonthBucket {
    /// Create a bucket from a year and a month number between 1 and 12.
    ///
    /// # Errors
    /// Returns [Error::InvalidRange] if `month` is not between 1 and 12 or if
    /// the year is outside the calendar supported by [time::Date].
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        let month = Month::try_from(month)
            .map_err(|_| Error::InvalidRange(format!("{month} is not a month number")))?;
        let bucket = Self { year, month };
        bucket.first_day()?;

        Ok(bucket)
    }

    /// The month containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// January of `year`.
    pub fn january(year: i32) -> Self {
        Self {
            year,
            month: Month::January,
        }
    }

    /// December of `year`.
    pub fn december(year: i32) -> Self {
        Self {
            year,
            month: Month::December,
        }
    }

    /// The calendar year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// The calendar month.
    pub fn month(self) -> Month {
        self.month
    }

    /// The month number, 1 for January through 12 for December.
    pub fn month_number(self) -> u8 {
        self.month as u8
    }

    /// The month after this one.
    pub fn next(self) -> Self {
        match self.month {
            Month::December => Self::january(self.year + 1),
            month => Self {
                year: self.year,
                month: month.next(),
            },
        }
    }

    /// The month before this one.
    pub fn previous(self) -> Self {
        match self.month {
            Month::January => Self::december(self.year - 1),
            month => Self {
                year: self.year,
                month: month.previous(),
            },
        }
    }

    /// The bucket `months` months away from this one. Negative values go back in time.
    pub fn offset(self, months: i32) -> Self {
        let index = self.year * 12 + i32::from(self.month_number()) - 1 + months;

        Self {
            year: index.div_euclid(12),
            month: Month::January.nth_next(index.rem_euclid(12) as u8),
        }
    }

    /// The first day of the month.
    ///
    /// # Errors
    /// Returns [Error::InvalidRange] if the month lies outside the calendar
    /// supported by [time::Date].
    pub fn first_day(self) -> Result<Date, Error> {
        Date::from_calendar_date(self.year, self.month, 1)
            .map_err(|error| Error::InvalidRange(format!("{self} is out of range: {error}")))
    }

    /// The first instant of the month at UTC midnight.
    ///
    /// # Errors
    /// See [MonthBucket::first_day].
    pub fn start(self) -> Result<OffsetDateTime, Error> {
        Ok(self.first_day()?.midnight().assume_utc())
    }

    /// Every month from `first` through `last`, inclusive, in order.
    ///
    /// Returns an empty list if `last` comes before `first`.
    pub fn span(first: Self, last: Self) -> Vec<Self> {
        let mut buckets = Vec::new();
        let mut current = first;

        while current <= last {
            buckets.push(current);
            current = current.next();
        }

        buckets
    }
}

impl Ord for MonthBucket {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month_number()).cmp(&(other.year, other.month_number()))
    }
}

impl PartialOrd for MonthBucket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

impl Serialize for MonthBucket {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("MonthBucket", 2)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month_number())?;
        state.end()
    }
}
