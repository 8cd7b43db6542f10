use serde::Serialize;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Error returned by strict parsing and validation of week specs
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum WeekSpecError {
    EmptyInput,
    InvalidToken(String),
    ZeroWeek,
    ReversedRange(u32, u32),
    OutOfRange { week: u32, total_weeks: u32 },
}

impl Display for WeekSpecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmptyInput => write!(f, "Week spec is empty"),
            Self::InvalidToken(token) => write!(f, "Invalid week token '{token}'"),
            Self::ZeroWeek => write!(f, "Weeks are numbered from 1"),
            Self::ReversedRange(start, end) => {
                write!(f, "Week range {start}-{end} ends before it starts")
            }
            Self::OutOfRange { week, total_weeks } => {
                write!(f, "Week {week} is outside the semester's {total_weeks} weeks")
            }
        }
    }
}

impl std::error::Error for WeekSpecError {}

/// A single week or a closed range of weeks
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum WeekRange {
    Single(u32),
    Span(u32, u32),
}

impl WeekRange {
    fn new(first: u32, last: u32) -> Self {
        if first == last {
            Self::Single(first)
        } else {
            Self::Span(first, last)
        }
    }

    pub fn first(&self) -> u32 {
        match self {
            Self::Single(week) => *week,
            Self::Span(first, _) => *first,
        }
    }

    pub fn last(&self) -> u32 {
        match self {
            Self::Single(week) => *week,
            Self::Span(_, last) => *last,
        }
    }

    pub fn contains(&self, week: u32) -> bool {
        self.first() <= week && week <= self.last()
    }
}

impl Display for WeekRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Single(week) => write!(f, "{week}"),
            Self::Span(first, last) => write!(f, "{first}-{last}"),
        }
    }
}

/// Splits a trimmed token into its inclusive bounds, without checking them
fn parse_token(token: &str) -> Option<(u32, u32)> {
    match token.split_once('-') {
        Some((first, last)) => {
            let first = first.trim().parse::<u32>().ok()?;
            let last = last.trim().parse::<u32>().ok()?;
            Some((first, last))
        }
        None => token.parse::<u32>().ok().map(|week| (week, week)),
    }
}

/// The set of semester weeks a schedule entry meets, e.g. `1-8,10,12-16`
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct WeekRangeSpec {
    ranges: Vec<WeekRange>,
}

impl WeekRangeSpec {
    /// Parses a spec the way the timetable reads stored data: tokens that are not
    /// integers or `a-b` ranges are skipped and the rest still count.
    pub fn parse_lenient(spec: &str) -> Self {
        let ranges = spec
            .split(',')
            .filter_map(|token| parse_token(token.trim()))
            .filter(|(first, last)| first <= last)
            .map(|(first, last)| WeekRange::new(first, last))
            .collect();

        Self { ranges }
    }

    pub fn ranges(&self) -> &[WeekRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, week: u32) -> bool {
        week >= 1 && self.ranges.iter().any(|range| range.contains(week))
    }

    /// Sorts the ranges and merges overlapping or adjacent ones
    pub fn normalized(&self) -> Self {
        let mut sorted = self.ranges.clone();
        sorted.sort_by_key(|range| (range.first(), range.last()));

        let mut merged: Vec<WeekRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            match merged.last_mut() {
                Some(prev) if range.first() <= prev.last().saturating_add(1) => {
                    *prev = WeekRange::new(prev.first(), prev.last().max(range.last()));
                }
                _ => merged.push(range),
            }
        }

        Self { ranges: merged }
    }

    /// Checks every week lies within `[1, total_weeks]`
    pub fn validate(&self, total_weeks: u32) -> Result<(), WeekSpecError> {
        for range in &self.ranges {
            if range.first() == 0 {
                return Err(WeekSpecError::ZeroWeek);
            }
            if range.last() > total_weeks {
                return Err(WeekSpecError::OutOfRange {
                    week: range.last(),
                    total_weeks,
                });
            }
        }
        Ok(())
    }

    /// One flag per semester week, index 0 being week 1. Weeks past `total_weeks` are dropped.
    pub fn to_selection(&self, total_weeks: u32) -> Vec<bool> {
        let mut selected = vec![false; total_weeks as usize];

        for range in &self.ranges {
            let first = range.first().max(1);
            let last = range.last().min(total_weeks);
            for week in first..=last {
                selected[week as usize - 1] = true;
            }
        }

        selected
    }

    /// Builds the compact spec from per-week flags
    pub fn from_selection(selected: &[bool]) -> Self {
        let mut ranges = Vec::new();
        let mut run_start: Option<u32> = None;

        for (index, &is_selected) in selected.iter().enumerate() {
            let week = index as u32 + 1;
            match (is_selected, run_start) {
                (true, None) => run_start = Some(week),
                (false, Some(start)) => {
                    ranges.push(WeekRange::new(start, week - 1));
                    run_start = None;
                }
                _ => {}
            }
        }

        if let Some(start) = run_start {
            ranges.push(WeekRange::new(start, selected.len() as u32));
        }

        Self { ranges }
    }

    /// Smallest week present in both specs
    pub fn first_shared_week(&self, other: &Self) -> Option<u32> {
        self.ranges
            .iter()
            .flat_map(|a| other.ranges.iter().map(move |b| (a, b)))
            .filter_map(|(a, b)| {
                let first = a.first().max(b.first()).max(1);
                let last = a.last().min(b.last());
                (first <= last).then_some(first)
            })
            .min()
    }
}

impl FromStr for WeekRangeSpec {
    type Err = WeekSpecError;

    /// Strict parsing for user-entered specs
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(WeekSpecError::EmptyInput);
        }

        let mut ranges = Vec::new();
        for token in s.split(',') {
            let token = token.trim();
            let (first, last) =
                parse_token(token).ok_or_else(|| WeekSpecError::InvalidToken(token.to_string()))?;

            if first == 0 {
                return Err(WeekSpecError::ZeroWeek);
            }
            if first > last {
                return Err(WeekSpecError::ReversedRange(first, last));
            }
            ranges.push(WeekRange::new(first, last));
        }

        Ok(Self { ranges })
    }
}

impl Display for WeekRangeSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;
        for range in &self.ranges {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{range}")?;
            first = false;
        }
        Ok(())
    }
}

/// Whether `target_week` is one of the weeks named by `week_spec`.
///
/// Missing or empty specs and weeks below 1 are never active; malformed
/// tokens are ignored.
pub fn is_week_active(week_spec: Option<&str>, target_week: u32) -> bool {
    match week_spec {
        Some(spec) if target_week >= 1 && !spec.trim().is_empty() => {
            WeekRangeSpec::parse_lenient(spec).contains(target_week)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_week_active_mixed_spec() {
        let spec = Some("1-8,10,12-16");
        for week in 1..=20 {
            let expected = (1..=8).contains(&week) || week == 10 || (12..=16).contains(&week);
            assert_eq!(is_week_active(spec, week), expected, "week {week}");
        }
    }

    #[test]
    fn test_is_week_active_missing_spec() {
        for week in 0..=20 {
            assert!(!is_week_active(Some(""), week));
            assert!(!is_week_active(None, week));
            assert!(!is_week_active(Some("  "), week));
        }
    }

    #[test]
    fn test_is_week_active_skips_malformed_tokens() {
        assert!(is_week_active(Some("abc,3"), 3));
        assert!(is_week_active(Some("x-2, 5 - 7 ,,"), 6));
        assert!(!is_week_active(Some("abc"), 1));
        assert!(!is_week_active(Some("-3"), 3));
        assert!(!is_week_active(Some("8-3"), 5));
        assert!(!is_week_active(Some("1-8"), 0));
    }

    #[test]
    fn test_multi_hyphen_token_is_not_a_range() {
        // "1-2-3" is neither a week nor an a-b range
        assert!(!is_week_active(Some("1-2-3"), 1));
        assert!(!is_week_active(Some("1-2-3"), 2));
        assert!(is_week_active(Some("1-2-3,5"), 5));
        assert_eq!(
            WeekRangeSpec::from_str("1-2-3"),
            Err(WeekSpecError::InvalidToken("1-2-3".to_string()))
        );
    }

    #[test]
    fn test_strict_parse() {
        let spec = WeekRangeSpec::from_str("1-8, 10 ,12-16").unwrap();
        assert_eq!(
            spec.ranges(),
            &[
                WeekRange::Span(1, 8),
                WeekRange::Single(10),
                WeekRange::Span(12, 16)
            ]
        );
        assert_eq!(spec.to_string(), "1-8,10,12-16");
    }

    #[test]
    fn test_strict_parse_errors() {
        assert_eq!(WeekRangeSpec::from_str(" "), Err(WeekSpecError::EmptyInput));
        assert_eq!(
            WeekRangeSpec::from_str("1,abc"),
            Err(WeekSpecError::InvalidToken("abc".to_string()))
        );
        assert_eq!(
            WeekRangeSpec::from_str("1,,2"),
            Err(WeekSpecError::InvalidToken(String::new()))
        );
        assert_eq!(WeekRangeSpec::from_str("0-4"), Err(WeekSpecError::ZeroWeek));
        assert_eq!(
            WeekRangeSpec::from_str("9-2"),
            Err(WeekSpecError::ReversedRange(9, 2))
        );
    }

    #[test]
    fn test_validate_against_semester_length() {
        let spec = WeekRangeSpec::from_str("1-8,17").unwrap();
        assert!(spec.validate(18).is_ok());
        assert_eq!(
            spec.validate(16),
            Err(WeekSpecError::OutOfRange {
                week: 17,
                total_weeks: 16
            })
        );
    }

    #[test]
    fn test_normalized_merges_overlaps_and_neighbours() {
        let spec = WeekRangeSpec::parse_lenient("12-16,3,1-2,5-9,7-10");
        assert_eq!(spec.normalized().to_string(), "1-3,5-16");

        let single = WeekRangeSpec::parse_lenient("4,4");
        assert_eq!(single.normalized().to_string(), "4");
    }

    #[test]
    fn test_selection_round_trip() {
        let spec = WeekRangeSpec::parse_lenient("1-3,5,7-20");
        let selected = spec.to_selection(10);

        assert_eq!(selected.len(), 10);
        assert_eq!(
            selected,
            vec![true, true, true, false, true, false, true, true, true, true]
        );
        assert_eq!(
            WeekRangeSpec::from_selection(&selected).to_string(),
            "1-3,5,7-10"
        );
    }

    #[test]
    fn test_from_selection_edges() {
        assert!(WeekRangeSpec::from_selection(&[]).is_empty());
        assert!(WeekRangeSpec::from_selection(&[false, false]).is_empty());
        assert_eq!(
            WeekRangeSpec::from_selection(&[false, false, true]).to_string(),
            "3"
        );
        assert_eq!(
            WeekRangeSpec::from_selection(&[true, false, true, true]).to_string(),
            "1,3-4"
        );
    }

    #[test]
    fn test_first_shared_week() {
        let a = WeekRangeSpec::parse_lenient("1-4");
        let b = WeekRangeSpec::parse_lenient("4-8");
        let c = WeekRangeSpec::parse_lenient("5-8");
        let d = WeekRangeSpec::parse_lenient("1-3,9,11-12");

        assert_eq!(a.first_shared_week(&b), Some(4));
        assert_eq!(a.first_shared_week(&c), None);
        assert_eq!(d.first_shared_week(&WeekRangeSpec::parse_lenient("10-16")), Some(11));
        assert_eq!(WeekRangeSpec::default().first_shared_week(&a), None);
    }
}
