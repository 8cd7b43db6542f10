use crate::{
    dtos::section::SectionResponse,
    error::{ApiError, ErrorBody},
    state::AppState,
};
use axum::{Json, extract::State};

/// List class sections in period order
#[utoipa::path(
    get,
    path = "/sections",
    responses(
        (status = 200, description = "Sections retrieved successfully", body = Vec<SectionResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Timetable"
)]
pub async fn list_sections(
    State(state): State<AppState>,
) -> Result<Json<Vec<SectionResponse>>, ApiError> {
    let sections = state.repository.list_sections().await?;
    Ok(Json(sections.into_iter().map(Into::into).collect()))
}
