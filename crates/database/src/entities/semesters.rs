use crate::error::{RepositoryError, RepositoryResult};
use models::semester::{SemesterInfo, TermType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "semesters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub term_type: String, // "spring" or "fall"
    pub academic_year: String, // e.g. "2024-2025"
    pub is_current: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_semester(self) -> RepositoryResult<SemesterInfo> {
        let term_type = TermType::from_str(&self.term_type).map_err(|_| {
            RepositoryError::ValidationError(format!(
                "semester {} has unknown term type '{}'",
                self.id, self.term_type
            ))
        })?;

        Ok(SemesterInfo {
            id: self.id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            term_type,
            academic_year: self.academic_year,
            is_current: self.is_current,
        })
    }
}
