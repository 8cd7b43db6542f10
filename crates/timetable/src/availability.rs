use crate::calendar::{week_number_for, weekday_of};
use chrono::NaiveDate;
use log::warn;
use models::{
    classroom::{Classroom, Equipment},
    schedule::ScheduleEntry,
    semester::SemesterInfo,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Search for classrooms with no class in any of `section_ids`, day by day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyClassroomQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub section_ids: Vec<u32>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    /// Ignored when zero
    #[serde(default)]
    pub min_capacity: Option<u32>,
}

impl EmptyClassroomQuery {
    fn accepts(&self, classroom: &Classroom) -> bool {
        let building_ok = match self.building.as_deref().map(str::trim) {
            Some(building) if !building.is_empty() => classroom.building == building,
            _ => true,
        };
        let equipment_ok = self
            .equipment
            .is_none_or(|equipment| classroom.equipment == equipment);
        let capacity_ok = self
            .min_capacity
            .is_none_or(|min| min == 0 || classroom.capacity >= min);

        building_ok && equipment_ok && capacity_ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub date: NaiveDate,
    /// Semester week of `date`, if it falls inside the semester
    pub week: Option<u32>,
    pub classrooms: Vec<Classroom>,
}

/// Lists, for every date of the query range, the classrooms free in all the
/// requested sections.
///
/// A schedule entry occupies its classroom on a date when the date is inside
/// the semester, falls on the entry's weekday, and its semester week is one
/// of the entry's weeks.
pub fn find_free_classrooms(
    query: &EmptyClassroomQuery,
    semester: &SemesterInfo,
    classrooms: &[Classroom],
    schedules: &[ScheduleEntry],
) -> Vec<DayAvailability> {
    if query.section_ids.is_empty() {
        warn!("Empty classroom search without any section ids");
        return Vec::new();
    }

    let mut candidates: Vec<&Classroom> = classrooms.iter().filter(|c| query.accepts(c)).collect();
    candidates.sort_by(|a, b| (&a.building, &a.room_number).cmp(&(&b.building, &b.room_number)));

    query
        .start_date
        .iter_days()
        .take_while(|date| *date <= query.end_date)
        .map(|date| {
            let week = semester
                .contains(date)
                .then(|| week_number_for(semester.start_date, date))
                .flatten();
            let weekday = weekday_of(date);

            let occupied: HashSet<i32> = match week {
                Some(week) => schedules
                    .iter()
                    .filter(|entry| {
                        entry.weekday == weekday
                            && query.section_ids.contains(&entry.section_id)
                            && entry.is_active_in(week)
                    })
                    .map(|entry| entry.classroom_id)
                    .collect(),
                None => HashSet::new(),
            };

            DayAvailability {
                date,
                week,
                classrooms: candidates
                    .iter()
                    .filter(|c| !occupied.contains(&c.id))
                    .map(|c| (*c).clone())
                    .collect(),
            }
        })
        .collect()
}
