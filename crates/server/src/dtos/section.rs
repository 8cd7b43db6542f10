use chrono::NaiveTime;
use models::section::ClassSection;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub section_id: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// "morning", "afternoon" or "evening"
    pub period_type: String,
    /// e.g. "08:00-08:45"
    pub label: String,
}

impl From<ClassSection> for SectionResponse {
    fn from(section: ClassSection) -> Self {
        Self {
            label: section.time_label(),
            section_id: section.id,
            start_time: section.start_time,
            end_time: section.end_time,
            period_type: section.period.to_string(),
        }
    }
}
