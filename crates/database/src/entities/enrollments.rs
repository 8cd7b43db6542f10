use crate::error::{RepositoryError, RepositoryResult};
use models::enrollment::{Enrollment, EnrollmentStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Withdrawing keeps the row and flips `status`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: String,
    pub schedule_id: i32,
    pub semester_id: i32,
    pub status: String, // "enrolled" or "withdrawn"
    pub enrolled_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::semesters::Entity",
        from = "Column::SemesterId",
        to = "super::semesters::Column::Id"
    )]
    Semester,
}

impl Related<super::semesters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semester.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_enrollment(self) -> RepositoryResult<Enrollment> {
        let status = EnrollmentStatus::from_str(&self.status).map_err(|_| {
            RepositoryError::ValidationError(format!(
                "enrollment {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;

        Ok(Enrollment {
            id: self.id,
            student_id: self.student_id,
            schedule_id: self.schedule_id,
            semester_id: self.semester_id,
            status,
            enrolled_at: self.enrolled_at,
        })
    }
}
