use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{EnumIter, EnumProperty, IntoEnumIterator};

/// Day of the week a class meets, numbered 1 (Monday) through 7 (Sunday)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumProperty,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    #[strum(props(short = "Mon"))]
    Monday = 1,
    #[strum(props(short = "Tue"))]
    Tuesday = 2,
    #[strum(props(short = "Wed"))]
    Wednesday = 3,
    #[strum(props(short = "Thu"))]
    Thursday = 4,
    #[strum(props(short = "Fri"))]
    Friday = 5,
    #[strum(props(short = "Sat"))]
    Saturday = 6,
    #[strum(props(short = "Sun"))]
    Sunday = 7,
}

impl Weekday {
    /// Looks up a weekday by its 1-based number
    pub fn from_number(number: u8) -> Option<Self> {
        Self::iter().find(|day| day.number() == number)
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Zero-based column index in a Monday-first grid
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }

    pub fn short_name(self) -> &'static str {
        self.get_str("short").unwrap_or_default()
    }

    pub fn all() -> Vec<Weekday> {
        Self::iter().collect()
    }
}

/// Monday of the week containing `date`, saturating at `NaiveDate::MIN`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = Duration::days(i64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_signed(offset).unwrap_or(NaiveDate::MIN)
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.number()
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or_else(|| format!("weekday must be 1-7, got {number}"))
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .trim()
            .parse::<u8>()
            .map_err(|e| format!("invalid weekday '{s}': {e}"))?;
        Self::try_from(number)
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.short_name())
    }
}
