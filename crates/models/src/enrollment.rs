use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EnrollmentStatus {
    Enrolled,
    Withdrawn,
}

/// A student's seat in every meeting of one schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(rename = "enrollmentId")]
    pub id: i32,
    pub student_id: String,
    pub schedule_id: i32,
    pub semester_id: i32,
    pub status: EnrollmentStatus,
    pub enrolled_at: NaiveDateTime,
}

impl Enrollment {
    /// Withdrawn enrollments keep their row but hold no seat
    pub fn is_active(&self) -> bool {
        self.status == EnrollmentStatus::Enrolled
    }
}
