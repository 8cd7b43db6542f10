use crate::error::ApiError;
use models::{schedule::ScheduleEntry, weekday::Weekday, weeks::WeekRangeSpec};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One class meeting: a course in a classroom at a weekday and section,
/// repeated over the weeks in `weeks`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryDto {
    /// 0 on creation lets the server assign one
    #[serde(default)]
    pub schedule_id: i32,
    pub course_id: i32,
    pub teacher_id: String,
    pub classroom_id: i32,
    pub section_id: u32,
    /// 1 = Monday ... 7 = Sunday
    pub week_day: u8,
    /// e.g. "1-8,10,12-16"
    #[serde(default)]
    pub weeks: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
}

impl From<ScheduleEntry> for ScheduleEntryDto {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            schedule_id: entry.schedule_id,
            course_id: entry.course_id,
            teacher_id: entry.teacher_id,
            classroom_id: entry.classroom_id,
            section_id: entry.section_id,
            week_day: entry.weekday.number(),
            weeks: entry.weeks,
            course_name: entry.course_name,
            course_code: entry.course_code,
            teacher_name: entry.teacher_name,
        }
    }
}

impl TryFrom<ScheduleEntryDto> for ScheduleEntry {
    type Error = ApiError;

    fn try_from(dto: ScheduleEntryDto) -> Result<Self, Self::Error> {
        let weekday = Weekday::from_number(dto.week_day).ok_or_else(|| {
            ApiError::BadRequest(format!("weekDay must be 1-7, got {}", dto.week_day))
        })?;

        Ok(Self {
            schedule_id: dto.schedule_id,
            course_id: dto.course_id,
            teacher_id: dto.teacher_id,
            classroom_id: dto.classroom_id,
            section_id: dto.section_id,
            weekday,
            weeks: dto.weeks,
            course_name: dto.course_name,
            course_code: dto.course_code,
            teacher_name: dto.teacher_name,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    /// Defaults to the current semester
    #[serde(default)]
    pub semester_id: Option<i32>,
    /// One flag per semester week, replacing `weeks` when present
    #[serde(default)]
    pub week_selection: Option<Vec<bool>>,
    #[serde(flatten)]
    pub entry: ScheduleEntryDto,
}

impl CreateScheduleRequest {
    /// The entry to store, with `weeks` taken from `weekSelection` when given
    pub fn into_entry(self, total_weeks: u32) -> Result<ScheduleEntry, ApiError> {
        let mut entry = ScheduleEntry::try_from(self.entry)?;

        if let Some(selected) = self.week_selection {
            if selected.len() != total_weeks as usize {
                return Err(ApiError::BadRequest(format!(
                    "weekSelection needs {total_weeks} flags, got {}",
                    selected.len()
                )));
            }
            entry.weeks = WeekRangeSpec::from_selection(&selected).to_string();
        }

        Ok(entry)
    }
}

/// A stored schedule entry and the semester weeks it meets in
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(flatten)]
    pub entry: ScheduleEntryDto,
    /// One flag per semester week, index 0 being week 1
    pub week_selection: Vec<bool>,
}

impl ScheduleResponse {
    pub fn new(entry: ScheduleEntry, total_weeks: u32) -> Self {
        let week_selection = entry.week_spec().to_selection(total_weeks);
        Self {
            entry: entry.into(),
            week_selection,
        }
    }
}
