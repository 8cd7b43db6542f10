pub mod class_sections;
pub mod classrooms;
pub mod enrollments;
pub mod schedules;
pub mod semesters;
