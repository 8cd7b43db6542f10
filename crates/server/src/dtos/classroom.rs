use crate::error::ApiError;
use chrono::NaiveDate;
use models::classroom::{Classroom, Equipment};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use timetable::availability::{DayAvailability, EmptyClassroomQuery};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomResponse {
    pub classroom_id: i32,
    pub building: String,
    pub room_number: String,
    /// Building and room number, e.g. "North 101"
    pub label: String,
    pub capacity: u32,
    /// "basic", "multimedia" or "lab"
    pub equipment: String,
}

impl From<Classroom> for ClassroomResponse {
    fn from(classroom: Classroom) -> Self {
        Self {
            label: classroom.label(),
            classroom_id: classroom.id,
            building: classroom.building,
            room_number: classroom.room_number,
            capacity: classroom.capacity,
            equipment: classroom.equipment.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailabilityResponse {
    pub date: NaiveDate,
    /// Semester week of `date`; null outside the semester
    pub week: Option<u32>,
    pub classrooms: Vec<ClassroomResponse>,
}

impl From<DayAvailability> for DayAvailabilityResponse {
    fn from(day: DayAvailability) -> Self {
        Self {
            date: day.date,
            week: day.week,
            classrooms: day.classrooms.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmptyClassroomParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Comma separated section ids, e.g. "1,2"
    pub section_ids: Option<String>,
    pub building: Option<String>,
    /// "basic", "multimedia" or "lab"
    pub equipment: Option<String>,
    pub min_capacity: Option<u32>,
    /// Defaults to the current semester
    pub semester_id: Option<i32>,
}

impl EmptyClassroomParams {
    /// Builds the engine query once the date range has been checked
    pub fn into_query(
        self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<EmptyClassroomQuery, ApiError> {
        let section_ids = self
            .section_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<u32>()
                    .map_err(|_| ApiError::BadRequest(format!("invalid section id '{id}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if section_ids.is_empty() {
            return Err(ApiError::BadRequest(
                "Please select at least one section.".to_string(),
            ));
        }

        let equipment = self
            .equipment
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(|e| {
                Equipment::from_str(e)
                    .map_err(|_| ApiError::BadRequest(format!("unknown equipment '{e}'")))
            })
            .transpose()?;

        Ok(EmptyClassroomQuery {
            start_date,
            end_date,
            section_ids,
            building: self.building,
            equipment,
            min_capacity: self.min_capacity,
        })
    }
}
