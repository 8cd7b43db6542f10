use crate::{
    weekday::Weekday,
    weeks::{WeekRangeSpec, is_week_active},
};
use serde::{Deserialize, Serialize};

/// A recurring class meeting: one course in one classroom at one section of
/// one weekday, repeated over the weeks named by `weeks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub schedule_id: i32,
    pub course_id: i32,
    pub teacher_id: String,
    pub classroom_id: i32,
    pub section_id: u32,
    #[serde(rename = "weekDay")]
    pub weekday: Weekday,
    /// Week spec such as "1-8,10,12-16"
    pub weeks: String,

    // Display fields joined in by the data source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
}

impl ScheduleEntry {
    pub fn is_active_in(&self, week: u32) -> bool {
        is_week_active(Some(self.weeks.as_str()), week)
    }

    pub fn week_spec(&self) -> WeekRangeSpec {
        WeekRangeSpec::parse_lenient(&self.weeks)
    }

    /// Whether both entries claim the same weekday and section
    pub fn same_slot(&self, other: &ScheduleEntry) -> bool {
        self.weekday == other.weekday && self.section_id == other.section_id
    }
}
