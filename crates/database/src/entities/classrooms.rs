use crate::error::{RepositoryError, RepositoryResult};
use models::classroom::{Classroom, Equipment};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "classrooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub building: String,
    pub room_number: String,
    pub capacity: i32,
    pub equipment: String, // basic, multimedia, lab
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_classroom(self) -> RepositoryResult<Classroom> {
        let equipment = Equipment::from_str(&self.equipment).map_err(|_| {
            RepositoryError::ValidationError(format!(
                "classroom {} has unknown equipment '{}'",
                self.id, self.equipment
            ))
        })?;

        Ok(Classroom {
            id: self.id,
            building: self.building,
            room_number: self.room_number,
            capacity: self.capacity.max(0) as u32,
            equipment,
        })
    }
}
