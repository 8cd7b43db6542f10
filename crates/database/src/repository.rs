//! Storage seam for timetable reference data.
//!
//! The server only talks to [`TimetableRepository`]; the in-memory
//! [`LocalRepository`](crate::local::LocalRepository) and the SQL-backed
//! [`SqlRepository`](crate::services::sql::SqlRepository) are interchangeable.

use crate::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use log::warn;
use models::{
    classroom::Classroom, enrollment::Enrollment, schedule::ScheduleEntry,
    section::ClassSection, semester::SemesterInfo, weeks::WeekRangeSpec,
};
use std::{collections::HashSet, str::FromStr};
use timetable::conflict::{find_placement_conflict, find_time_conflict};

/// Repository of semesters, sections, classrooms, schedules and enrollments.
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// every request handler.
#[async_trait]
pub trait TimetableRepository: Send + Sync {
    /// Whether the backing store is reachable
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All semesters ordered by start date
    async fn list_semesters(&self) -> RepositoryResult<Vec<SemesterInfo>>;

    /// # Errors
    /// `RepositoryError::NotFound` if no semester has `semester_id`
    async fn get_semester(&self, semester_id: i32) -> RepositoryResult<SemesterInfo>;

    /// The semester flagged current, if any
    async fn current_semester(&self) -> RepositoryResult<Option<SemesterInfo>>;

    /// Makes `semester_id` the only current semester, atomically.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` if no semester has `semester_id`; no flag
    /// is changed in that case
    async fn activate_semester(&self, semester_id: i32) -> RepositoryResult<SemesterInfo>;

    /// Class sections ordered by id
    async fn list_sections(&self) -> RepositoryResult<Vec<ClassSection>>;

    /// Classrooms ordered by building and room number
    async fn list_classrooms(&self) -> RepositoryResult<Vec<Classroom>>;

    /// Every schedule entry of a semester
    async fn schedules_for_semester(&self, semester_id: i32)
    -> RepositoryResult<Vec<ScheduleEntry>>;

    /// Stores a schedule entry after [`validate_new_schedule`] and returns it
    /// as stored. A `schedule_id` of 0 asks the repository to assign the next
    /// free id.
    async fn add_schedule(
        &self,
        semester_id: i32,
        entry: ScheduleEntry,
    ) -> RepositoryResult<ScheduleEntry>;

    /// A student's enrollments in a semester, withdrawn ones included, oldest first
    async fn enrollments_for_student(
        &self,
        semester_id: i32,
        student_id: &str,
    ) -> RepositoryResult<Vec<Enrollment>>;

    /// Enrolls a student in every meeting of `schedule_id` after
    /// [`validate_enrollment`]
    async fn enroll(
        &self,
        semester_id: i32,
        student_id: &str,
        schedule_id: i32,
    ) -> RepositoryResult<Enrollment>;

    /// Marks one of the student's enrollments withdrawn.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` if the enrollment does not belong to the
    /// student, `RepositoryError::Conflict` if it is already withdrawn
    async fn withdraw(&self, student_id: &str, enrollment_id: i32)
    -> RepositoryResult<Enrollment>;
}

/// Checks a schedule entry before it is stored and returns it with its weeks
/// in canonical form.
///
/// The entry needs a positive schedule id below `i32::MAX`, a well-formed week
/// spec inside the semester, a known section and classroom, and no other entry
/// holding its classroom or teacher at the same weekday and section in a
/// shared week.
pub fn validate_new_schedule(
    semester: &SemesterInfo,
    sections: &[ClassSection],
    classrooms: &[Classroom],
    existing: &[ScheduleEntry],
    mut entry: ScheduleEntry,
) -> RepositoryResult<ScheduleEntry> {
    if entry.schedule_id <= 0 || entry.schedule_id == i32::MAX {
        return Err(RepositoryError::ValidationError(format!(
            "schedule id {} out of range",
            entry.schedule_id
        )));
    }

    let weeks = WeekRangeSpec::from_str(&entry.weeks)
        .map_err(|e| RepositoryError::ValidationError(format!("weeks '{}': {e}", entry.weeks)))?;
    weeks
        .validate(semester.total_weeks())
        .map_err(|e| RepositoryError::ValidationError(format!("weeks '{}': {e}", entry.weeks)))?;
    entry.weeks = weeks.normalized().to_string();

    if !sections.iter().any(|s| s.id == entry.section_id) {
        return Err(RepositoryError::ValidationError(format!(
            "unknown section {}",
            entry.section_id
        )));
    }
    if !classrooms.iter().any(|c| c.id == entry.classroom_id) {
        return Err(RepositoryError::ValidationError(format!(
            "unknown classroom {}",
            entry.classroom_id
        )));
    }

    if existing
        .iter()
        .any(|e| e.schedule_id == entry.schedule_id && e.same_slot(&entry))
    {
        return Err(RepositoryError::Conflict(format!(
            "schedule {} already meets on {} section {}",
            entry.schedule_id, entry.weekday, entry.section_id
        )));
    }

    if let Some(conflict) = find_placement_conflict(&entry, existing) {
        warn!("Rejected schedule {}: {conflict}", entry.schedule_id);
        return Err(RepositoryError::Conflict(conflict.to_string()));
    }

    Ok(entry)
}

/// Checks a student can join `schedule_id`: the schedule meets in the
/// semester, the student does not already hold a seat in it, its smallest
/// classroom has a seat left, and none of its meetings clashes with the
/// student's other active enrollments.
///
/// `schedules` and `enrollments` are everything stored for the semester.
pub fn validate_enrollment(
    semester_id: i32,
    schedules: &[ScheduleEntry],
    classrooms: &[Classroom],
    enrollments: &[Enrollment],
    student_id: &str,
    schedule_id: i32,
) -> RepositoryResult<()> {
    let meetings: Vec<&ScheduleEntry> = schedules
        .iter()
        .filter(|e| e.schedule_id == schedule_id)
        .collect();
    if meetings.is_empty() {
        return Err(RepositoryError::NotFound(format!(
            "schedule {schedule_id} in semester {semester_id}"
        )));
    }

    let active: Vec<&Enrollment> = enrollments.iter().filter(|e| e.is_active()).collect();
    if active
        .iter()
        .any(|e| e.student_id == student_id && e.schedule_id == schedule_id)
    {
        return Err(RepositoryError::Conflict(format!(
            "student {student_id} is already enrolled in schedule {schedule_id}"
        )));
    }

    let seats = meetings
        .iter()
        .filter_map(|m| classrooms.iter().find(|c| c.id == m.classroom_id))
        .map(|c| c.capacity as usize)
        .min();
    let taken = active.iter().filter(|e| e.schedule_id == schedule_id).count();
    if let Some(seats) = seats
        && taken >= seats
    {
        return Err(RepositoryError::Conflict(format!(
            "schedule {schedule_id} is full ({taken} of {seats} seats taken)"
        )));
    }

    let enrolled: HashSet<i32> = active
        .iter()
        .filter(|e| e.student_id == student_id)
        .map(|e| e.schedule_id)
        .collect();
    let timetable: Vec<ScheduleEntry> = schedules
        .iter()
        .filter(|e| enrolled.contains(&e.schedule_id))
        .cloned()
        .collect();

    for meeting in meetings {
        if let Some(conflict) = find_time_conflict(meeting, &timetable) {
            return Err(RepositoryError::Conflict(format!(
                "schedule {schedule_id} {conflict}"
            )));
        }
    }

    Ok(())
}

/// Checks `enrollment` can be withdrawn by `student_id`
pub fn validate_withdrawal(
    enrollment: Option<&Enrollment>,
    student_id: &str,
    enrollment_id: i32,
) -> RepositoryResult<()> {
    match enrollment {
        Some(e) if e.student_id == student_id && e.is_active() => Ok(()),
        Some(e) if e.student_id == student_id => Err(RepositoryError::Conflict(format!(
            "enrollment {enrollment_id} is already withdrawn"
        ))),
        _ => Err(RepositoryError::NotFound(format!(
            "enrollment {enrollment_id} for student {student_id}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use models::{
        classroom::Equipment, enrollment::EnrollmentStatus, section::PeriodType,
        semester::TermType, weekday::Weekday,
    };

    fn semester() -> SemesterInfo {
        SemesterInfo {
            id: 1,
            name: "Fall 2024".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 22).unwrap(),
            term_type: TermType::Fall,
            academic_year: "2024-2025".to_string(),
            is_current: true,
        }
    }

    fn sections() -> Vec<ClassSection> {
        (1..=2)
            .map(|id| ClassSection {
                id,
                start_time: NaiveTime::from_hms_opt(7 + id, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(7 + id, 45, 0).unwrap(),
                period: PeriodType::Morning,
            })
            .collect()
    }

    fn classrooms() -> Vec<Classroom> {
        vec![
            Classroom {
                id: 10,
                building: "North".to_string(),
                room_number: "101".to_string(),
                capacity: 50,
                equipment: Equipment::Basic,
            },
            Classroom {
                id: 11,
                building: "North".to_string(),
                room_number: "102".to_string(),
                capacity: 2,
                equipment: Equipment::Basic,
            },
        ]
    }

    fn entry(schedule_id: i32, weeks: &str) -> ScheduleEntry {
        ScheduleEntry {
            schedule_id,
            course_id: 1,
            teacher_id: "T001".to_string(),
            classroom_id: 10,
            section_id: 1,
            weekday: Weekday::Monday,
            weeks: weeks.to_string(),
            course_name: None,
            course_code: None,
            teacher_name: None,
        }
    }

    fn check(
        existing: &[ScheduleEntry],
        candidate: ScheduleEntry,
    ) -> RepositoryResult<ScheduleEntry> {
        validate_new_schedule(&semester(), &sections(), &classrooms(), existing, candidate)
    }

    fn enrollment(id: i32, student_id: &str, schedule_id: i32) -> Enrollment {
        Enrollment {
            id,
            student_id: student_id.to_string(),
            schedule_id,
            semester_id: 1,
            status: EnrollmentStatus::Enrolled,
            enrolled_at: NaiveDate::from_ymd_opt(2024, 9, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_accepts_disjoint_weeks() {
        assert!(check(&[entry(1, "1-8")], entry(2, "9-16")).is_ok());
    }

    #[test]
    fn test_stores_canonical_weeks() {
        let saved = check(&[], entry(1, "9-12, 1-4,5-8,14")).unwrap();
        assert_eq!(saved.weeks, "1-12,14");
    }

    #[test]
    fn test_rejects_overlapping_weeks() {
        let err = check(&[entry(1, "1-8")], entry(2, "8-16")).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)), "{err}");
    }

    #[test]
    fn test_rejects_same_teacher_in_another_room() {
        let mut candidate = entry(2, "1-16");
        candidate.classroom_id = 11;

        let err = check(&[entry(1, "1-16")], candidate.clone()).unwrap_err();
        assert!(
            matches!(&err, RepositoryError::Conflict(msg) if msg.starts_with("teacher T001")),
            "{err}"
        );

        candidate.teacher_id = "T002".to_string();
        assert!(check(&[entry(1, "1-16")], candidate).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_schedule_ids() {
        for schedule_id in [-1, 0, i32::MAX] {
            assert!(
                matches!(
                    check(&[], entry(schedule_id, "1")),
                    Err(RepositoryError::ValidationError(_))
                ),
                "{schedule_id}"
            );
        }
        assert!(check(&[], entry(i32::MAX - 1, "1")).is_ok());
    }

    #[test]
    fn test_rejects_bad_weeks() {
        assert!(matches!(
            check(&[], entry(1, "1-x")),
            Err(RepositoryError::ValidationError(_))
        ));
        // 16 week semester
        assert!(matches!(
            check(&[], entry(1, "1-17")),
            Err(RepositoryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_references() {
        let mut e = entry(1, "1-8");
        e.section_id = 9;
        assert!(matches!(check(&[], e), Err(RepositoryError::ValidationError(_))));

        let mut e = entry(1, "1-8");
        e.classroom_id = 99;
        assert!(matches!(check(&[], e), Err(RepositoryError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_duplicate_slot_of_same_schedule() {
        assert!(matches!(
            check(&[entry(1, "1-8")], entry(1, "9-16")),
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[test]
    fn test_enrollment_rules() {
        let mut small_room = entry(2, "1-16");
        small_room.classroom_id = 11;
        small_room.section_id = 2;
        let schedules = vec![entry(1, "1-8"), small_room];
        let enroll = |enrollments: &[Enrollment], student: &str, schedule_id| {
            validate_enrollment(1, &schedules, &classrooms(), enrollments, student, schedule_id)
        };

        assert!(enroll(&[], "S1", 1).is_ok());
        assert!(matches!(enroll(&[], "S1", 9), Err(RepositoryError::NotFound(_))));

        let taken = [enrollment(1, "S1", 1)];
        assert!(matches!(enroll(&taken, "S1", 1), Err(RepositoryError::Conflict(_))));

        // Room 102 seats two
        let full = [enrollment(1, "S1", 2), enrollment(2, "S2", 2)];
        let err = enroll(&full, "S3", 2).unwrap_err();
        assert_eq!(err.to_string(), "Conflict: schedule 2 is full (2 of 2 seats taken)");

        let mut withdrawn = enrollment(2, "S2", 2);
        withdrawn.status = EnrollmentStatus::Withdrawn;
        assert!(enroll(&[enrollment(1, "S1", 2), withdrawn], "S3", 2).is_ok());
    }

    #[test]
    fn test_enrollment_time_conflict() {
        let mut other_room = entry(3, "8-10");
        other_room.classroom_id = 11;
        let schedules = vec![entry(1, "1-8"), other_room];

        let err = validate_enrollment(
            1,
            &schedules,
            &classrooms(),
            &[enrollment(1, "S1", 1)],
            "S1",
            3,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Conflict: schedule 3 overlaps schedule 1 on Mon section 1 (e.g. week 8)"
        );

        // Another student's timetable does not matter
        assert!(
            validate_enrollment(1, &schedules, &classrooms(), &[enrollment(1, "S2", 1)], "S1", 3)
                .is_ok()
        );
    }

    #[test]
    fn test_withdrawal_rules() {
        let mut e = enrollment(4, "S1", 1);
        assert!(validate_withdrawal(Some(&e), "S1", 4).is_ok());
        assert!(matches!(
            validate_withdrawal(Some(&e), "S2", 4),
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            validate_withdrawal(None, "S1", 4),
            Err(RepositoryError::NotFound(_))
        ));

        e.status = EnrollmentStatus::Withdrawn;
        assert!(matches!(
            validate_withdrawal(Some(&e), "S1", 4),
            Err(RepositoryError::Conflict(_))
        ));
    }
}
