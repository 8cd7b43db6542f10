use crate::{
    dtos::schedule::{CreateScheduleRequest, ScheduleResponse},
    error::{ApiError, ErrorBody},
    routes::semester::resolve_semester,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};

/// Add a class meeting to a semester
#[utoipa::path(
    post,
    path = "/schedules",
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created, weeks in canonical form", body = ScheduleResponse),
        (status = 400, description = "Malformed weeks or unknown section/classroom", body = ErrorBody),
        (status = 404, description = "Semester not found", body = ErrorBody),
        (status = 409, description = "Classroom or teacher already taken", body = ErrorBody)
    ),
    tag = "Timetable"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), ApiError> {
    let semester = resolve_semester(&state, request.semester_id).await?;
    let total_weeks = semester.total_weeks();
    let entry = request.into_entry(total_weeks)?;

    let saved = state.repository.add_schedule(semester.id, entry).await?;
    Ok((
        StatusCode::CREATED,
        Json(ScheduleResponse::new(saved, total_weeks)),
    ))
}
