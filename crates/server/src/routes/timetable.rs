use crate::{
    dtos::timetable::{RenderBlockResponse, TimetableParams, TimetableResponse},
    error::{ApiError, ErrorBody},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use log::debug;
use timetable::{build_render_blocks, calendar::current_week_number};

/// Get the blocks to draw on a semester's weekly grid
#[utoipa::path(
    get,
    path = "/semesters/{id}/timetable",
    params(
        ("id" = i32, Path, description = "Semester ID"),
        TimetableParams
    ),
    responses(
        (status = 200, description = "Timetable built successfully", body = TimetableResponse),
        (status = 400, description = "No week given before the semester starts", body = ErrorBody),
        (status = 404, description = "Semester not found", body = ErrorBody)
    ),
    tag = "Timetable"
)]
pub async fn get_timetable(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<TimetableParams>,
) -> Result<Json<TimetableResponse>, ApiError> {
    let semester = state.repository.get_semester(id).await?;
    let week = params
        .week
        .or_else(|| current_week_number(semester.start_date))
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Semester {} has not started yet, please pass a week",
                semester.name
            ))
        })?;

    let sections = state.repository.list_sections().await?;
    let mut entries = state.repository.schedules_for_semester(id).await?;
    entries.retain(|entry| {
        params
            .teacher_id
            .as_deref()
            .is_none_or(|teacher| entry.teacher_id == teacher)
            && params
                .classroom_id
                .is_none_or(|classroom| entry.classroom_id == classroom)
    });

    let blocks = build_render_blocks(&entries, &sections, week);
    debug!(
        "Semester {id} week {week}: {} entries merged into {} blocks",
        entries.len(),
        blocks.len()
    );

    Ok(Json(TimetableResponse {
        semester_id: id,
        week,
        blocks: blocks.into_iter().map(RenderBlockResponse::from).collect(),
    }))
}
