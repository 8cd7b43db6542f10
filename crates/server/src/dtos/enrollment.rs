use chrono::NaiveDateTime;
use models::enrollment::Enrollment;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub enrollment_id: i32,
    pub student_id: String,
    pub schedule_id: i32,
    pub semester_id: i32,
    /// "enrolled" or "withdrawn"
    pub status: String,
    pub enrolled_at: NaiveDateTime,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            enrollment_id: enrollment.id,
            student_id: enrollment.student_id,
            schedule_id: enrollment.schedule_id,
            semester_id: enrollment.semester_id,
            status: enrollment.status.to_string(),
            enrolled_at: enrollment.enrolled_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub student_id: String,
    pub schedule_id: i32,
    /// Defaults to the current semester
    #[serde(default)]
    pub semester_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudentParams {
    pub student_id: String,
    /// Defaults to the current semester
    pub semester_id: Option<i32>,
}
