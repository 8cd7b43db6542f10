use crate::weekday::start_of_week;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TermType {
    Spring,
    Fall,
}

/// A teaching term and its calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterInfo {
    #[serde(rename = "semesterId")]
    pub id: i32,
    #[serde(rename = "semesterName")]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub term_type: TermType,
    /// e.g. "2024-2025"
    pub academic_year: String,
    #[serde(default)]
    pub is_current: bool,
}

impl SemesterInfo {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of Monday-started weeks from the week of the start date through
    /// the week of the end date
    pub fn total_weeks(&self) -> u32 {
        if self.end_date < self.start_date {
            return 0;
        }

        let first_monday = start_of_week(self.start_date);
        let last_monday = start_of_week(self.end_date);
        ((last_monday - first_monday).num_weeks() + 1) as u32
    }

    /// Calendar year of the courses offered in this term. Fall belongs to the
    /// first year of the academic year, spring to the second.
    pub fn course_year(&self) -> Option<i32> {
        let mut years = self.academic_year.split('-').map(str::trim);
        let first = years.next()?.parse::<i32>().ok()?;

        match self.term_type {
            TermType::Fall => Some(first),
            TermType::Spring => years
                .next()
                .and_then(|y| y.parse::<i32>().ok())
                .or(Some(first + 1)),
        }
    }
}

/// Marks `semester_id` as the only current semester.
///
/// Returns `false` and leaves every flag untouched when no semester has that id.
pub fn set_current_semester(semesters: &mut [SemesterInfo], semester_id: i32) -> bool {
    if !semesters.iter().any(|s| s.id == semester_id) {
        return false;
    }

    for semester in semesters.iter_mut() {
        semester.is_current = semester.id == semester_id;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn semester(id: i32, start: (i32, u32, u32), end: (i32, u32, u32)) -> SemesterInfo {
        SemesterInfo {
            id,
            name: format!("Semester {id}"),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            term_type: TermType::Fall,
            academic_year: "2024-2025".to_string(),
            is_current: false,
        }
    }

    #[test]
    fn test_total_weeks() {
        // Monday 2024-09-02 through Sunday 2024-12-22 is 16 full weeks
        assert_eq!(semester(1, (2024, 9, 2), (2024, 12, 22)).total_weeks(), 16);
        // A Wednesday start still counts its partial first week
        assert_eq!(semester(1, (2024, 9, 4), (2024, 9, 9)).total_weeks(), 2);
        assert_eq!(semester(1, (2024, 9, 4), (2024, 9, 1)).total_weeks(), 0);
    }

    #[test]
    fn test_course_year() {
        let mut fall = semester(1, (2024, 9, 2), (2025, 1, 12));
        assert_eq!(fall.course_year(), Some(2024));

        fall.term_type = TermType::Spring;
        assert_eq!(fall.course_year(), Some(2025));

        fall.academic_year = "garbage".to_string();
        assert_eq!(fall.course_year(), None);
    }

    #[test]
    fn test_term_type_strings() {
        assert_eq!(TermType::Spring.to_string(), "spring");
        assert_eq!(TermType::from_str("Fall").unwrap(), TermType::Fall);
        assert_eq!(serde_json::to_string(&TermType::Fall).unwrap(), "\"fall\"");
    }

    #[test]
    fn test_set_current_semester() {
        let mut semesters = vec![
            semester(1, (2024, 2, 26), (2024, 7, 7)),
            semester(2, (2024, 9, 2), (2025, 1, 12)),
            semester(3, (2025, 2, 24), (2025, 7, 6)),
        ];
        semesters[0].is_current = true;

        assert!(set_current_semester(&mut semesters, 2));
        let current: Vec<_> = semesters.iter().filter(|s| s.is_current).map(|s| s.id).collect();
        assert_eq!(current, vec![2]);

        assert!(!set_current_semester(&mut semesters, 42));
        assert!(semesters[1].is_current);
    }

    #[test]
    fn test_semester_json_shape() {
        let json = serde_json::to_value(semester(7, (2024, 9, 2), (2025, 1, 12))).unwrap();
        assert_eq!(json["semesterId"], 7);
        assert_eq!(json["startDate"], "2024-09-02");
        assert_eq!(json["termType"], "fall");
        assert_eq!(json["isCurrent"], false);
    }
}
