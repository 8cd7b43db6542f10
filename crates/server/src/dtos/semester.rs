use chrono::NaiveDate;
use models::semester::SemesterInfo;
use serde::Serialize;
use timetable::WeekDateRange;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResponse {
    pub semester_id: i32,
    pub semester_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// "spring" or "fall"
    pub term_type: String,
    pub academic_year: String,
    /// Calendar year the term's courses belong to
    pub course_year: Option<i32>,
    pub is_current: bool,
    pub total_weeks: u32,
}

impl From<SemesterInfo> for SemesterResponse {
    fn from(semester: SemesterInfo) -> Self {
        let total_weeks = semester.total_weeks();
        let course_year = semester.course_year();
        Self {
            semester_id: semester.id,
            semester_name: semester.name,
            start_date: semester.start_date,
            end_date: semester.end_date,
            term_type: semester.term_type.to_string(),
            academic_year: semester.academic_year,
            course_year,
            is_current: semester.is_current,
            total_weeks,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSemesterResponse {
    pub semester: SemesterResponse,
    /// Week of the semester containing today; null before the semester starts
    pub current_week: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekRangeResponse {
    pub week: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRangeResponse {
    pub fn new(week: u32, range: WeekDateRange) -> Self {
        Self {
            week,
            start: range.start,
            end: range.end,
        }
    }
}
