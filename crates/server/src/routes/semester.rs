use crate::{
    dtos::semester::{CurrentSemesterResponse, SemesterResponse, WeekRangeResponse},
    error::{ApiError, ErrorBody},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use models::semester::SemesterInfo;
use timetable::calendar::{current_week_number, week_date_range_for};

/// The semester with `semester_id`, or the current semester when absent
pub(crate) async fn resolve_semester(
    state: &AppState,
    semester_id: Option<i32>,
) -> Result<SemesterInfo, ApiError> {
    match semester_id {
        Some(id) => Ok(state.repository.get_semester(id).await?),
        None => state
            .repository
            .current_semester()
            .await?
            .ok_or_else(|| ApiError::NotFound("No semester is marked current".to_string())),
    }
}

/// List all semesters ordered by start date
#[utoipa::path(
    get,
    path = "/semesters",
    responses(
        (status = 200, description = "Semesters retrieved successfully", body = Vec<SemesterResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Semesters"
)]
pub async fn list_semesters(
    State(state): State<AppState>,
) -> Result<Json<Vec<SemesterResponse>>, ApiError> {
    let semesters = state.repository.list_semesters().await?;
    Ok(Json(semesters.into_iter().map(Into::into).collect()))
}

/// Get the current semester and today's week within it
#[utoipa::path(
    get,
    path = "/semesters/current",
    responses(
        (status = 200, description = "Current semester found", body = CurrentSemesterResponse),
        (status = 404, description = "No semester is marked current", body = ErrorBody)
    ),
    tag = "Semesters"
)]
pub async fn current_semester(
    State(state): State<AppState>,
) -> Result<Json<CurrentSemesterResponse>, ApiError> {
    let semester = resolve_semester(&state, None).await?;
    let current_week = current_week_number(semester.start_date);

    Ok(Json(CurrentSemesterResponse {
        semester: semester.into(),
        current_week,
    }))
}

/// Make a semester the only current semester
#[utoipa::path(
    post,
    path = "/semesters/{id}/activate",
    params(
        ("id" = i32, Path, description = "Semester ID")
    ),
    responses(
        (status = 200, description = "Semester activated", body = SemesterResponse),
        (status = 404, description = "Semester not found", body = ErrorBody)
    ),
    tag = "Semesters"
)]
pub async fn activate_semester(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SemesterResponse>, ApiError> {
    let semester = state.repository.activate_semester(id).await?;
    Ok(Json(semester.into()))
}

/// Get the Monday-to-Sunday dates of a semester week
#[utoipa::path(
    get,
    path = "/semesters/{id}/weeks/{week}",
    params(
        ("id" = i32, Path, description = "Semester ID"),
        ("week" = i64, Path, description = "Week number, starting at 1")
    ),
    responses(
        (status = 200, description = "Week found", body = WeekRangeResponse),
        (status = 404, description = "Semester or week not found", body = ErrorBody)
    ),
    tag = "Semesters"
)]
pub async fn week_range(
    State(state): State<AppState>,
    Path((id, week)): Path<(i32, i64)>,
) -> Result<Json<WeekRangeResponse>, ApiError> {
    let semester = state.repository.get_semester(id).await?;

    let not_found = || ApiError::NotFound(format!("Week {week} does not exist"));
    let range = week_date_range_for(semester.start_date, week).ok_or_else(not_found)?;
    let week = u32::try_from(week).map_err(|_| not_found())?;

    Ok(Json(WeekRangeResponse::new(week, range)))
}
