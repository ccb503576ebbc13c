use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Date as entered by user - either real calendar date or the text which failed to parse.
///
/// Parsing never fails, so an invalid value can be assigned to a record and reported later
/// by its validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CalendarDate {
    Valid(Date),
    Invalid(String),
}

impl CalendarDate {
    pub fn parse(s: &str) -> Self {
        match Date::parse(s, DATE_FORMAT) {
            Ok(date) => CalendarDate::Valid(date),
            Err(_) => CalendarDate::Invalid(s.to_string()),
        }
    }

    pub fn date(&self) -> Option<Date> {
        match self {
            CalendarDate::Valid(date) => Some(*date),
            CalendarDate::Invalid(_) => None,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.date().map(|d| d.year())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CalendarDate::Valid(_))
    }
}

impl From<Date> for CalendarDate {
    fn from(value: Date) -> Self {
        CalendarDate::Valid(value)
    }
}

impl FromStr for CalendarDate {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CalendarDate::parse(s))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarDate::Valid(date) => {
                let s = date.format(DATE_FORMAT).map_err(|_| fmt::Error)?;
                f.write_str(&s)
            }
            CalendarDate::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(CalendarDate::parse(&s))
    }
}
