use crate::{
    doc::ApiDoc,
    routes::{classroom, enrollment, health, schedule, section, semester, timetable},
    state::AppState,
};
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the HTTP router over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/semesters", get(semester::list_semesters))
        .route("/semesters/current", get(semester::current_semester))
        .route("/semesters/{id}/activate", post(semester::activate_semester))
        .route("/semesters/{id}/weeks/{week}", get(semester::week_range))
        .route("/semesters/{id}/timetable", get(timetable::get_timetable))
        .route("/sections", get(section::list_sections))
        .route("/classrooms", get(classroom::list_classrooms))
        .route("/classrooms/empty", get(classroom::empty_classrooms))
        .route("/schedules", post(schedule::create_schedule))
        .route("/enrollments", get(enrollment::list_enrollments).post(enrollment::enroll))
        .route("/enrollments/{id}", delete(enrollment::withdraw))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
