use crate::{
    dtos::classroom::{ClassroomResponse, DayAvailabilityResponse, EmptyClassroomParams},
    error::{ApiError, ErrorBody},
    routes::semester::resolve_semester,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Local;
use timetable::{
    availability::find_free_classrooms,
    calendar::{DateRangeError, validate_date_range},
};

/// List classrooms ordered by building and room number
#[utoipa::path(
    get,
    path = "/classrooms",
    responses(
        (status = 200, description = "Classrooms retrieved successfully", body = Vec<ClassroomResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Classrooms"
)]
pub async fn list_classrooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassroomResponse>>, ApiError> {
    let classrooms = state.repository.list_classrooms().await?;
    Ok(Json(classrooms.into_iter().map(Into::into).collect()))
}

/// Find classrooms free in every requested section, day by day
#[utoipa::path(
    get,
    path = "/classrooms/empty",
    params(EmptyClassroomParams),
    responses(
        (status = 200, description = "Free classrooms per day", body = Vec<DayAvailabilityResponse>),
        (status = 400, description = "Invalid date range or filters", body = ErrorBody),
        (status = 404, description = "Semester not found", body = ErrorBody)
    ),
    tag = "Classrooms"
)]
pub async fn empty_classrooms(
    State(state): State<AppState>,
    Query(params): Query<EmptyClassroomParams>,
) -> Result<Json<Vec<DayAvailabilityResponse>>, ApiError> {
    let today = Local::now().date_naive();
    validate_date_range(
        today,
        params.start_date,
        params.end_date,
        state.max_query_span_days,
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let (Some(start_date), Some(end_date)) = (params.start_date, params.end_date) else {
        return Err(ApiError::BadRequest(DateRangeError::MissingDate.to_string()));
    };

    let semester = resolve_semester(&state, params.semester_id).await?;
    let query = params.into_query(start_date, end_date)?;

    let classrooms = state.repository.list_classrooms().await?;
    let entries = state.repository.schedules_for_semester(semester.id).await?;

    let days = find_free_classrooms(&query, &semester, &classrooms, &entries);
    Ok(Json(days.into_iter().map(Into::into).collect()))
}
