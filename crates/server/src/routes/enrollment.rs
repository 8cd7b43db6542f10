use crate::{
    dtos::enrollment::{EnrollRequest, EnrollmentResponse, StudentParams},
    error::{ApiError, ErrorBody},
    routes::semester::resolve_semester,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

fn student_id(raw: &str) -> Result<&str, ApiError> {
    match raw.trim() {
        "" => Err(ApiError::BadRequest("studentId is required".to_string())),
        id => Ok(id),
    }
}

/// List a student's enrollments in a semester
#[utoipa::path(
    get,
    path = "/enrollments",
    params(StudentParams),
    responses(
        (status = 200, description = "Enrollments retrieved successfully", body = Vec<EnrollmentResponse>),
        (status = 400, description = "Missing student id", body = ErrorBody),
        (status = 404, description = "Semester not found", body = ErrorBody)
    ),
    tag = "Enrollments"
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    Query(params): Query<StudentParams>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let student_id = student_id(&params.student_id)?;
    let semester = resolve_semester(&state, params.semester_id).await?;

    let enrollments = state
        .repository
        .enrollments_for_student(semester.id, student_id)
        .await?;
    Ok(Json(enrollments.into_iter().map(Into::into).collect()))
}

/// Enroll a student in every meeting of a schedule
#[utoipa::path(
    post,
    path = "/enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 400, description = "Missing student id", body = ErrorBody),
        (status = 404, description = "Semester or schedule not found", body = ErrorBody),
        (status = 409, description = "Already enrolled, schedule full, or time conflict", body = ErrorBody)
    ),
    tag = "Enrollments"
)]
pub async fn enroll(
    State(state): State<AppState>,
    Json(request): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let student_id = student_id(&request.student_id)?;
    let semester = resolve_semester(&state, request.semester_id).await?;

    let enrollment = state
        .repository
        .enroll(semester.id, student_id, request.schedule_id)
        .await?;
    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

/// Withdraw one of a student's enrollments
#[utoipa::path(
    delete,
    path = "/enrollments/{id}",
    params(
        ("id" = i32, Path, description = "Enrollment ID"),
        StudentParams
    ),
    responses(
        (status = 200, description = "Withdrawn", body = EnrollmentResponse),
        (status = 404, description = "No such enrollment for this student", body = ErrorBody),
        (status = 409, description = "Already withdrawn", body = ErrorBody)
    ),
    tag = "Enrollments"
)]
pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<StudentParams>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let student_id = student_id(&params.student_id)?;

    let enrollment = state.repository.withdraw(student_id, id).await?;
    Ok(Json(enrollment.into()))
}
