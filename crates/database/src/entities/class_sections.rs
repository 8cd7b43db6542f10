use crate::error::{RepositoryError, RepositoryResult};
use models::section::{ClassSection, PeriodType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "class_sections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub start_time: Time,
    pub end_time: Time,
    pub period_type: String, // morning, afternoon, evening
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_section(self) -> RepositoryResult<ClassSection> {
        let id = u32::try_from(self.id).map_err(|_| {
            RepositoryError::ValidationError(format!("negative section id {}", self.id))
        })?;
        let period = PeriodType::from_str(&self.period_type).map_err(|_| {
            RepositoryError::ValidationError(format!(
                "section {} has unknown period type '{}'",
                self.id, self.period_type
            ))
        })?;

        Ok(ClassSection {
            id,
            start_time: self.start_time,
            end_time: self.end_time,
            period,
        })
    }
}
