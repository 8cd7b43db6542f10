pub mod classroom;
pub mod enrollment;
pub mod schedule;
pub mod section;
pub mod semester;
pub mod timetable;
