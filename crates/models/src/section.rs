use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Part of the day a class section falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PeriodType {
    Morning,
    Afternoon,
    Evening,
}

/// One numbered teaching period of the day, e.g. section 1 at 08:00-08:45
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    #[serde(rename = "sectionId")]
    pub id: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(rename = "periodType")]
    pub period: PeriodType,
}

impl ClassSection {
    /// `HH:MM-HH:MM` label for the grid sidebar
    pub fn time_label(&self) -> String {
        format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// Sorts sections by id, the order the timetable grid lists them in
pub fn sort_sections(sections: &mut [ClassSection]) {
    sections.sort_by_key(|section| section.id);
}
