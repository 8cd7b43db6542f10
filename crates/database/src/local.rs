//! In-memory repository.
//!
//! Keeps every table in memory behind one lock. Used for tests and for running
//! the server without a database, optionally seeded from a JSON file.

use crate::{
    error::{RepositoryError, RepositoryResult},
    repository::{
        TimetableRepository, validate_enrollment, validate_new_schedule, validate_withdrawal,
    },
};
use async_trait::async_trait;
use chrono::Local;
use log::{info, warn};
use models::{
    classroom::Classroom,
    enrollment::{Enrollment, EnrollmentStatus},
    schedule::ScheduleEntry,
    section::{ClassSection, sort_sections},
    semester::{SemesterInfo, set_current_semester},
};
use serde::Deserialize;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A schedule entry together with the semester it belongs to
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSchedule {
    pub semester_id: i32,
    #[serde(flatten)]
    pub entry: ScheduleEntry,
}

/// Initial contents of a [`LocalRepository`], in the API's JSON shape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub semesters: Vec<SemesterInfo>,
    pub sections: Vec<ClassSection>,
    pub classrooms: Vec<Classroom>,
    pub schedules: Vec<SeedSchedule>,
    pub enrollments: Vec<Enrollment>,
}

#[derive(Default)]
struct LocalData {
    semesters: Vec<SemesterInfo>,
    sections: Vec<ClassSection>,
    classrooms: Vec<Classroom>,
    schedules: HashMap<i32, Vec<ScheduleEntry>>,
    enrollments: Vec<Enrollment>,
    next_schedule_id: i32,
    next_enrollment_id: i32,
}

/// In-memory [`TimetableRepository`]
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from seed data. Seed schedules are trusted and not
    /// conflict-checked; if several semesters are flagged current, only the
    /// first keeps the flag.
    pub fn from_seed(seed: Seed) -> Self {
        let Seed {
            mut semesters,
            mut sections,
            mut classrooms,
            schedules,
            mut enrollments,
        } = seed;

        semesters.sort_by_key(|s| s.start_date);
        if let Some(first_current) = semesters.iter().find(|s| s.is_current).map(|s| s.id)
            && semesters.iter().filter(|s| s.is_current).count() > 1
        {
            warn!("Seed marks several semesters current, keeping semester {first_current}");
            set_current_semester(&mut semesters, first_current);
        }

        sort_sections(&mut sections);
        classrooms.sort_by(|a, b| (&a.building, &a.room_number).cmp(&(&b.building, &b.room_number)));

        let next_schedule_id = schedules
            .iter()
            .map(|s| s.entry.schedule_id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);

        enrollments.sort_by_key(|e| e.id);
        let next_enrollment_id = enrollments
            .last()
            .map_or(0, |e| e.id)
            .saturating_add(1);

        let mut by_semester: HashMap<i32, Vec<ScheduleEntry>> = HashMap::new();
        for SeedSchedule { semester_id, entry } in schedules {
            by_semester.entry(semester_id).or_default().push(entry);
        }

        info!(
            "Loaded {} semesters, {} sections, {} classrooms into memory",
            semesters.len(),
            sections.len(),
            classrooms.len()
        );

        Self {
            data: Arc::new(RwLock::new(LocalData {
                semesters,
                sections,
                classrooms,
                schedules: by_semester,
                enrollments,
                next_schedule_id,
                next_enrollment_id,
            })),
        }
    }

    pub fn from_json_str(json: &str) -> RepositoryResult<Self> {
        let seed: Seed = serde_json::from_str(json)
            .map_err(|e| RepositoryError::ValidationError(format!("invalid seed data: {e}")))?;
        Ok(Self::from_seed(seed))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::ConnectionError(format!("cannot read seed file {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, LocalData>> {
        self.data
            .read()
            .map_err(|_| RepositoryError::InternalError("local repository lock poisoned".into()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, LocalData>> {
        self.data
            .write()
            .map_err(|_| RepositoryError::InternalError("local repository lock poisoned".into()))
    }
}

fn semester_not_found(semester_id: i32) -> RepositoryError {
    RepositoryError::NotFound(format!("semester {semester_id}"))
}

#[async_trait]
impl TimetableRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_ok())
    }

    async fn list_semesters(&self) -> RepositoryResult<Vec<SemesterInfo>> {
        Ok(self.read()?.semesters.clone())
    }

    async fn get_semester(&self, semester_id: i32) -> RepositoryResult<SemesterInfo> {
        self.read()?
            .semesters
            .iter()
            .find(|s| s.id == semester_id)
            .cloned()
            .ok_or_else(|| semester_not_found(semester_id))
    }

    async fn current_semester(&self) -> RepositoryResult<Option<SemesterInfo>> {
        Ok(self.read()?.semesters.iter().find(|s| s.is_current).cloned())
    }

    async fn activate_semester(&self, semester_id: i32) -> RepositoryResult<SemesterInfo> {
        let mut data = self.write()?;
        if !set_current_semester(&mut data.semesters, semester_id) {
            return Err(semester_not_found(semester_id));
        }

        info!("Semester {semester_id} is now the current semester");
        data.semesters
            .iter()
            .find(|s| s.id == semester_id)
            .cloned()
            .ok_or_else(|| semester_not_found(semester_id))
    }

    async fn list_sections(&self) -> RepositoryResult<Vec<ClassSection>> {
        Ok(self.read()?.sections.clone())
    }

    async fn list_classrooms(&self) -> RepositoryResult<Vec<Classroom>> {
        Ok(self.read()?.classrooms.clone())
    }

    async fn schedules_for_semester(
        &self,
        semester_id: i32,
    ) -> RepositoryResult<Vec<ScheduleEntry>> {
        let data = self.read()?;
        if !data.semesters.iter().any(|s| s.id == semester_id) {
            return Err(semester_not_found(semester_id));
        }
        Ok(data.schedules.get(&semester_id).cloned().unwrap_or_default())
    }

    async fn add_schedule(
        &self,
        semester_id: i32,
        mut entry: ScheduleEntry,
    ) -> RepositoryResult<ScheduleEntry> {
        let mut data = self.write()?;
        let semester = data
            .semesters
            .iter()
            .find(|s| s.id == semester_id)
            .cloned()
            .ok_or_else(|| semester_not_found(semester_id))?;

        if entry.schedule_id == 0 {
            entry.schedule_id = data.next_schedule_id;
        }

        let existing = data.schedules.get(&semester_id).map(Vec::as_slice).unwrap_or(&[]);
        let entry =
            validate_new_schedule(&semester, &data.sections, &data.classrooms, existing, entry)?;

        let after = entry.schedule_id.checked_add(1).ok_or_else(|| {
            RepositoryError::ValidationError(format!("schedule id {} out of range", entry.schedule_id))
        })?;
        data.next_schedule_id = data.next_schedule_id.max(after);
        data.schedules
            .entry(semester_id)
            .or_default()
            .push(entry.clone());

        info!(
            "Added schedule {} to semester {semester_id}",
            entry.schedule_id
        );
        Ok(entry)
    }

    async fn enrollments_for_student(
        &self,
        semester_id: i32,
        student_id: &str,
    ) -> RepositoryResult<Vec<Enrollment>> {
        let data = self.read()?;
        if !data.semesters.iter().any(|s| s.id == semester_id) {
            return Err(semester_not_found(semester_id));
        }

        Ok(data
            .enrollments
            .iter()
            .filter(|e| e.semester_id == semester_id && e.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn enroll(
        &self,
        semester_id: i32,
        student_id: &str,
        schedule_id: i32,
    ) -> RepositoryResult<Enrollment> {
        let mut data = self.write()?;
        if !data.semesters.iter().any(|s| s.id == semester_id) {
            return Err(semester_not_found(semester_id));
        }

        let schedules = data.schedules.get(&semester_id).map(Vec::as_slice).unwrap_or(&[]);
        let in_semester: Vec<Enrollment> = data
            .enrollments
            .iter()
            .filter(|e| e.semester_id == semester_id)
            .cloned()
            .collect();
        validate_enrollment(
            semester_id,
            schedules,
            &data.classrooms,
            &in_semester,
            student_id,
            schedule_id,
        )?;

        let id = data.next_enrollment_id;
        data.next_enrollment_id = id.checked_add(1).ok_or_else(|| {
            RepositoryError::InternalError("enrollment ids exhausted".to_string())
        })?;

        let enrollment = Enrollment {
            id,
            student_id: student_id.to_string(),
            schedule_id,
            semester_id,
            status: EnrollmentStatus::Enrolled,
            enrolled_at: Local::now().naive_local(),
        };
        data.enrollments.push(enrollment.clone());

        info!("Student {student_id} enrolled in schedule {schedule_id} (enrollment {id})");
        Ok(enrollment)
    }

    async fn withdraw(
        &self,
        student_id: &str,
        enrollment_id: i32,
    ) -> RepositoryResult<Enrollment> {
        let mut data = self.write()?;
        let enrollment = data.enrollments.iter_mut().find(|e| e.id == enrollment_id);
        validate_withdrawal(enrollment.as_deref(), student_id, enrollment_id)?;

        let enrollment = enrollment.ok_or_else(|| {
            RepositoryError::NotFound(format!("enrollment {enrollment_id}"))
        })?;
        enrollment.status = EnrollmentStatus::Withdrawn;

        info!("Student {student_id} withdrew enrollment {enrollment_id}");
        Ok(enrollment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::weekday::Weekday;

    const SEED: &str = r#"{
        "semesters": [
            {"semesterId": 2, "semesterName": "Spring 2025", "startDate": "2025-02-24",
             "endDate": "2025-06-29", "termType": "spring", "academicYear": "2024-2025",
             "isCurrent": false},
            {"semesterId": 1, "semesterName": "Fall 2024", "startDate": "2024-09-02",
             "endDate": "2024-12-22", "termType": "fall", "academicYear": "2024-2025",
             "isCurrent": true}
        ],
        "sections": [
            {"sectionId": 2, "startTime": "08:55:00", "endTime": "09:40:00", "periodType": "morning"},
            {"sectionId": 1, "startTime": "08:00:00", "endTime": "08:45:00", "periodType": "morning"}
        ],
        "classrooms": [
            {"classroomId": 10, "building": "North", "roomNumber": "101", "capacity": 80,
             "equipment": "multimedia"},
            {"classroomId": 11, "building": "North", "roomNumber": "102", "capacity": 1,
             "equipment": "basic"}
        ],
        "schedules": [
            {"semesterId": 1, "scheduleId": 5, "courseId": 1, "teacherId": "T001",
             "classroomId": 10, "sectionId": 1, "weekDay": 1, "weeks": "1-16"}
        ]
    }"#;

    fn new_entry(schedule_id: i32, section_id: u32, weeks: &str) -> ScheduleEntry {
        ScheduleEntry {
            schedule_id,
            course_id: 2,
            teacher_id: "T002".to_string(),
            classroom_id: 10,
            section_id,
            weekday: Weekday::Monday,
            weeks: weeks.to_string(),
            course_name: Some("Operating Systems".to_string()),
            course_code: None,
            teacher_name: None,
        }
    }

    #[tokio::test]
    async fn test_seed_is_sorted() {
        let repo = LocalRepository::from_json_str(SEED).unwrap();

        let semesters = repo.list_semesters().await.unwrap();
        assert_eq!(semesters.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);

        let sections = repo.list_sections().await.unwrap();
        assert_eq!(sections.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);

        assert_eq!(repo.current_semester().await.unwrap().unwrap().id, 1);
        assert_eq!(repo.schedules_for_semester(1).await.unwrap().len(), 1);
        assert!(repo.schedules_for_semester(2).await.unwrap().is_empty());
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_activate_semester_is_exclusive() {
        let repo = LocalRepository::from_json_str(SEED).unwrap();

        let activated = repo.activate_semester(2).await.unwrap();
        assert!(activated.is_current);

        let current: Vec<i32> = repo
            .list_semesters()
            .await
            .unwrap()
            .iter()
            .filter(|s| s.is_current)
            .map(|s| s.id)
            .collect();
        assert_eq!(current, vec![2]);
    }

    #[tokio::test]
    async fn test_concurrent_activations_leave_one_current() {
        let repo = LocalRepository::from_json_str(SEED).unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.activate_semester(1 + i % 2).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let current = repo
            .list_semesters()
            .await
            .unwrap()
            .iter()
            .filter(|s| s.is_current)
            .count();
        assert_eq!(current, 1);
    }

    #[tokio::test]
    async fn test_activate_unknown_semester_changes_nothing() {
        let repo = LocalRepository::from_json_str(SEED).unwrap();

        let err = repo.activate_semester(99).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
        assert_eq!(repo.current_semester().await.unwrap().unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_add_schedule_assigns_id_and_checks_conflicts() {
        let repo = LocalRepository::from_json_str(SEED).unwrap();

        let added = repo.add_schedule(1, new_entry(0, 2, "1-16")).await.unwrap();
        assert_eq!(added.schedule_id, 6);

        // Same room, weekday and section as the seeded schedule 5
        let err = repo.add_schedule(1, new_entry(0, 1, "16")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)), "{err}");

        // The same slot is free in another semester
        assert!(repo.add_schedule(2, new_entry(0, 1, "1-16")).await.is_ok());
        assert_eq!(repo.schedules_for_semester(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_out_of_range_schedule_id_leaves_repository_usable() {
        let repo = LocalRepository::from_json_str(SEED).unwrap();

        let err = repo
            .add_schedule(1, new_entry(i32::MAX, 2, "1-16"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError(_)), "{err}");

        assert_eq!(repo.list_sections().await.unwrap().len(), 2);
        let added = repo.add_schedule(1, new_entry(0, 2, "1-16")).await.unwrap();
        assert_eq!(added.schedule_id, 6);
    }

    #[tokio::test]
    async fn test_teacher_cannot_hold_two_rooms_at_once() {
        let repo = LocalRepository::from_json_str(SEED).unwrap();
        repo.add_schedule(1, new_entry(0, 2, "1-16")).await.unwrap();

        let mut elsewhere = new_entry(0, 2, "1-16");
        elsewhere.classroom_id = 11;
        let err = repo.add_schedule(1, elsewhere).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)), "{err}");
        assert_eq!(repo.schedules_for_semester(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_schedule_stores_canonical_weeks() {
        let repo = LocalRepository::from_json_str(SEED).unwrap();

        let added = repo.add_schedule(1, new_entry(0, 2, "5-7, 1-4")).await.unwrap();
        assert_eq!(added.weeks, "1-7");

        let stored = repo.schedules_for_semester(1).await.unwrap();
        assert_eq!(stored.last().map(|e| e.weeks.as_str()), Some("1-7"));
    }

    #[tokio::test]
    async fn test_enroll_and_withdraw() {
        let repo = LocalRepository::from_json_str(SEED).unwrap();

        let first = repo.enroll(1, "S1", 5).await.unwrap();
        assert_eq!(first.id, 1);
        assert!(first.is_active());
        assert!(matches!(
            repo.enroll(1, "S1", 5).await,
            Err(RepositoryError::Conflict(_))
        ));
        assert!(matches!(
            repo.enroll(1, "S1", 99).await,
            Err(RepositoryError::NotFound(_))
        ));

        // Room 102 seats one, and meets when schedule 5 does in weeks 10-12
        let mut clashing = new_entry(0, 1, "10-12");
        clashing.classroom_id = 11;
        clashing.teacher_id = "T003".to_string();
        let clashing = repo.add_schedule(1, clashing).await.unwrap();

        let err = repo.enroll(1, "S1", clashing.schedule_id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)), "{err}");
        repo.enroll(1, "S2", clashing.schedule_id).await.unwrap();
        let err = repo.enroll(1, "S3", clashing.schedule_id).await.unwrap_err();
        assert!(err.to_string().contains("full"), "{err}");

        assert!(matches!(
            repo.withdraw("S2", first.id).await,
            Err(RepositoryError::NotFound(_))
        ));
        let withdrawn = repo.withdraw("S1", first.id).await.unwrap();
        assert_eq!(withdrawn.status, EnrollmentStatus::Withdrawn);
        assert!(matches!(
            repo.withdraw("S1", first.id).await,
            Err(RepositoryError::Conflict(_))
        ));

        let mine = repo.enrollments_for_student(1, "S1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert!(!mine[0].is_active());
        assert!(repo.enrollments_for_student(2, "S1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_semester() {
        let repo = LocalRepository::new();
        assert!(matches!(
            repo.get_semester(1).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.schedules_for_semester(1).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(repo.current_semester().await.unwrap().is_none());
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        assert!(matches!(
            LocalRepository::from_json_str("{\"semesters\": 3}"),
            Err(RepositoryError::ValidationError(_))
        ));
    }
}
