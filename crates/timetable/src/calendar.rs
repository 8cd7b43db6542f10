use chrono::{Datelike, Duration, Local, NaiveDate};
use log::debug;
pub use models::weekday::start_of_week;
use models::weekday::Weekday;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Weekday of `date`, Monday being 1
pub fn weekday_of(date: NaiveDate) -> Weekday {
    Weekday::from(date.weekday())
}

/// Parses an ISO `YYYY-MM-DD` date, returning `None` for anything else
pub fn parse_iso_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// 1-based semester week that `reference` falls in.
///
/// Both dates are moved back to the Monday of their week first. Dates before
/// the semester's first week have no week number.
pub fn week_number_for(semester_start: NaiveDate, reference: NaiveDate) -> Option<u32> {
    let weeks = (start_of_week(reference) - start_of_week(semester_start)).num_weeks() + 1;
    (weeks > 0).then_some(weeks as u32)
}

/// Like [`week_number_for`], with the semester start given as an ISO string
pub fn week_number_for_str(semester_start: &str, reference: NaiveDate) -> Option<u32> {
    match parse_iso_date(semester_start) {
        Some(start) => week_number_for(start, reference),
        None => {
            debug!("Unparseable semester start date {semester_start:?}");
            None
        }
    }
}

/// Semester week of today's local date
pub fn current_week_number(semester_start: NaiveDate) -> Option<u32> {
    week_number_for(semester_start, Local::now().date_naive())
}

/// Monday-to-Sunday span of one semester week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekDateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(7)
    }
}

/// Dates covered by semester week `week_number`
pub fn week_date_range_for(semester_start: NaiveDate, week_number: i64) -> Option<WeekDateRange> {
    if week_number < 1 {
        return None;
    }

    let start = start_of_week(semester_start)
        .checked_add_signed(Duration::try_weeks(week_number - 1)?)?;
    let end = start.checked_add_signed(Duration::days(6))?;
    Some(WeekDateRange { start, end })
}

/// Like [`week_date_range_for`], with the semester start given as an ISO string
pub fn week_date_range_for_str(semester_start: &str, week_number: i64) -> Option<WeekDateRange> {
    week_date_range_for(parse_iso_date(semester_start)?, week_number)
}

/// Why a requested date range was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeError {
    MissingDate,
    StartInPast,
    EndBeforeStart,
    TooLong { max_span_days: i64 },
}

impl Display for DateRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::MissingDate => write!(f, "Please select both a start date and an end date."),
            Self::StartInPast => write!(f, "Start date cannot be earlier than today."),
            Self::EndBeforeStart => write!(f, "End date cannot be earlier than the start date."),
            Self::TooLong { max_span_days } => {
                write!(f, "Date range cannot exceed {max_span_days} days.")
            }
        }
    }
}

impl std::error::Error for DateRangeError {}

/// Outcome of a date range check, shaped for form validation messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRangeCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Result<(), DateRangeError>> for DateRangeCheck {
    fn from(result: Result<(), DateRangeError>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                reason: None,
            },
            Err(e) => Self {
                valid: false,
                reason: Some(e.to_string()),
            },
        }
    }
}

/// Checks a query range against `today`: both ends present, not starting in
/// the past, not inverted, and `end - start` below `max_span_days`
pub fn validate_date_range(
    today: NaiveDate,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    max_span_days: i64,
) -> Result<(), DateRangeError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(DateRangeError::MissingDate);
    };

    if start < today {
        return Err(DateRangeError::StartInPast);
    }
    if end < start {
        return Err(DateRangeError::EndBeforeStart);
    }
    if (end - start).num_days() >= max_span_days {
        return Err(DateRangeError::TooLong { max_span_days });
    }

    Ok(())
}

pub fn is_date_range_valid_on(
    today: NaiveDate,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    max_span_days: i64,
) -> DateRangeCheck {
    validate_date_range(today, start, end, max_span_days).into()
}

/// [`is_date_range_valid_on`] against today's local date
pub fn is_date_range_valid(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    max_span_days: i64,
) -> DateRangeCheck {
    is_date_range_valid_on(Local::now().date_naive(), start, end, max_span_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_of_week() {
        // 2024-09-04 is a Wednesday
        assert_eq!(start_of_week(date(2024, 9, 4)), date(2024, 9, 2));
        assert_eq!(start_of_week(date(2024, 9, 2)), date(2024, 9, 2));
        assert_eq!(start_of_week(date(2024, 9, 8)), date(2024, 9, 2));
        assert_eq!(weekday_of(date(2024, 9, 8)), Weekday::Sunday);
    }

    #[test]
    fn test_week_number_for_start_is_one() {
        let start = date(2024, 9, 2);
        assert_eq!(week_number_for(start, start), Some(1));
        assert_eq!(week_number_for(start, date(2024, 9, 8)), Some(1));
        assert_eq!(week_number_for(start, date(2024, 9, 9)), Some(2));
        assert_eq!(week_number_for(start, date(2024, 12, 22)), Some(16));
    }

    #[test]
    fn test_week_number_mid_week_start() {
        // Semester starting on a Thursday still has its Monday as week 1
        let start = date(2024, 9, 5);
        assert_eq!(week_number_for(start, date(2024, 9, 2)), Some(1));
        assert_eq!(week_number_for(start, date(2024, 9, 1)), None);
    }

    #[test]
    fn test_week_number_before_semester() {
        let start = date(2024, 9, 2);
        assert_eq!(week_number_for(start, date(2024, 8, 30)), None);
        assert_eq!(week_number_for(start, date(2023, 9, 2)), None);
    }

    #[test]
    fn test_week_number_for_str() {
        assert_eq!(week_number_for_str("2024-09-02", date(2024, 9, 16)), Some(3));
        assert_eq!(week_number_for_str("not a date", date(2024, 9, 16)), None);
        assert_eq!(week_number_for_str("2024-02-30", date(2024, 9, 16)), None);
    }

    #[test]
    fn test_week_date_range_for() {
        let start = date(2024, 9, 4);
        let week1 = week_date_range_for(start, 1).unwrap();
        assert_eq!(week1.start, date(2024, 9, 2));
        assert_eq!(week1.end, date(2024, 9, 8));

        let week3 = week_date_range_for(start, 3).unwrap();
        assert_eq!(week3.start, date(2024, 9, 16));
        assert_eq!(week3.end, date(2024, 9, 22));
        assert_eq!(week3.days().count(), 7);

        assert!(week_date_range_for(start, 0).is_none());
        assert!(week_date_range_for(start, -2).is_none());
        assert!(week_date_range_for_str("bad", 1).is_none());
    }

    #[test]
    fn test_week_number_and_range_agree() {
        let start = date(2025, 2, 26);
        for offset in 0..140 {
            let day = start + Duration::days(offset);
            let week = week_number_for(start, day).unwrap();
            let range = week_date_range_for(start, week as i64).unwrap();
            assert!(range.contains(day), "{day} not in week {week}");
        }
    }

    #[test]
    fn test_date_range_policy() {
        let today = date(2024, 10, 7);
        let check = |start, end| is_date_range_valid_on(today, start, end, 7);

        assert!(check(Some(today), Some(today + Duration::days(6))).valid);
        assert!(check(Some(today), Some(today)).valid);

        let too_long = check(Some(today), Some(today + Duration::days(7)));
        assert!(!too_long.valid);
        assert_eq!(too_long.reason.as_deref(), Some("Date range cannot exceed 7 days."));

        let inverted = check(Some(today + Duration::days(1)), Some(today));
        assert_eq!(
            inverted.reason.as_deref(),
            Some("End date cannot be earlier than the start date.")
        );

        let past = check(Some(today - Duration::days(1)), Some(today));
        assert_eq!(
            past.reason.as_deref(),
            Some("Start date cannot be earlier than today.")
        );

        assert_eq!(
            check(None, Some(today)).reason.as_deref(),
            Some("Please select both a start date and an end date.")
        );
    }

    #[test]
    fn test_date_range_check_serializes_without_reason_when_valid() {
        let json = serde_json::to_value(DateRangeCheck::from(Ok(()))).unwrap();
        assert_eq!(json, serde_json::json!({ "valid": true }));
    }

    #[test]
    fn test_is_date_range_valid_uses_today() {
        let today = Local::now().date_naive();
        assert!(is_date_range_valid(Some(today), Some(today + Duration::days(6)), 7).valid);
        assert!(!is_date_range_valid(Some(today), Some(today + Duration::days(7)), 7).valid);
        assert!(!is_date_range_valid(Some(today + Duration::days(1)), Some(today), 7).valid);
    }
}
