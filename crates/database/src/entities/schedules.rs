use crate::error::{RepositoryError, RepositoryResult};
use models::{schedule::ScheduleEntry, weekday::Weekday};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per (schedule, weekday, section). Rows of a multi-section class
/// share `schedule_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub schedule_id: i32,
    pub semester_id: i32,
    pub course_id: i32,
    pub teacher_id: String,
    pub classroom_id: i32,
    pub section_id: i32,
    pub week_day: i16, // 1 = Monday
    pub weeks: String, // e.g. "1-8,10,12-16"
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub teacher_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::semesters::Entity",
        from = "Column::SemesterId",
        to = "super::semesters::Column::Id"
    )]
    Semester,
    #[sea_orm(
        belongs_to = "super::classrooms::Entity",
        from = "Column::ClassroomId",
        to = "super::classrooms::Column::Id"
    )]
    Classroom,
}

impl Related<super::semesters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semester.def()
    }
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_entry(self) -> RepositoryResult<ScheduleEntry> {
        let weekday = u8::try_from(self.week_day)
            .ok()
            .and_then(Weekday::from_number)
            .ok_or_else(|| {
                RepositoryError::ValidationError(format!(
                    "schedule row {} has invalid weekday {}",
                    self.id, self.week_day
                ))
            })?;
        let section_id = u32::try_from(self.section_id).map_err(|_| {
            RepositoryError::ValidationError(format!(
                "schedule row {} has invalid section {}",
                self.id, self.section_id
            ))
        })?;

        Ok(ScheduleEntry {
            schedule_id: self.schedule_id,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            classroom_id: self.classroom_id,
            section_id,
            weekday,
            weeks: self.weeks,
            course_name: self.course_name,
            course_code: self.course_code,
            teacher_name: self.teacher_name,
        })
    }
}
