use crate::dtos::schedule::ScheduleEntryDto;
use serde::{Deserialize, Serialize};
use timetable::RenderBlock;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TimetableParams {
    /// Defaults to the current week of the semester
    pub week: Option<u32>,
    pub teacher_id: Option<String>,
    pub classroom_id: Option<i32>,
}

/// A class drawn over `span` consecutive sections starting at `startSection`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderBlockResponse {
    pub week_day: u8,
    pub start_section: u32,
    pub end_section: u32,
    pub span: u32,
    pub entry: ScheduleEntryDto,
}

impl From<RenderBlock> for RenderBlockResponse {
    fn from(block: RenderBlock) -> Self {
        Self {
            week_day: block.weekday.number(),
            start_section: block.start_section,
            end_section: block.end_section(),
            span: block.span,
            entry: block.entry.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimetableResponse {
    pub semester_id: i32,
    pub week: u32,
    pub blocks: Vec<RenderBlockResponse>,
}
