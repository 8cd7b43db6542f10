use crate::{
    entities::{class_sections, classrooms, enrollments, schedules, semesters},
    error::{RepositoryError, RepositoryResult},
    repository::{
        TimetableRepository, validate_enrollment, validate_new_schedule, validate_withdrawal,
    },
};
use async_trait::async_trait;
use chrono::Local;
use log::info;
use models::{
    classroom::Classroom,
    enrollment::{Enrollment, EnrollmentStatus},
    schedule::ScheduleEntry,
    section::ClassSection,
    semester::SemesterInfo,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::Expr,
};

/// [`TimetableRepository`] backed by a sea-orm connection
#[derive(Clone)]
pub struct SqlRepository {
    db: DatabaseConnection,
}

impl SqlRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_sections<C: ConnectionTrait>(conn: &C) -> RepositoryResult<Vec<ClassSection>> {
        class_sections::Entity::find()
            .order_by_asc(class_sections::Column::Id)
            .all(conn)
            .await?
            .into_iter()
            .map(class_sections::Model::into_section)
            .collect()
    }

    async fn load_classrooms<C: ConnectionTrait>(conn: &C) -> RepositoryResult<Vec<Classroom>> {
        classrooms::Entity::find()
            .order_by_asc(classrooms::Column::Building)
            .order_by_asc(classrooms::Column::RoomNumber)
            .all(conn)
            .await?
            .into_iter()
            .map(classrooms::Model::into_classroom)
            .collect()
    }

    async fn load_schedules<C: ConnectionTrait>(
        conn: &C,
        semester_id: i32,
    ) -> RepositoryResult<Vec<ScheduleEntry>> {
        schedules::Entity::find()
            .filter(schedules::Column::SemesterId.eq(semester_id))
            .order_by_asc(schedules::Column::ScheduleId)
            .order_by_asc(schedules::Column::WeekDay)
            .order_by_asc(schedules::Column::SectionId)
            .all(conn)
            .await?
            .into_iter()
            .map(schedules::Model::into_entry)
            .collect()
    }

    async fn find_semester<C: ConnectionTrait>(
        conn: &C,
        semester_id: i32,
    ) -> RepositoryResult<SemesterInfo> {
        semesters::Entity::find_by_id(semester_id)
            .one(conn)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("semester {semester_id}")))?
            .into_semester()
    }

    async fn load_enrollments<C: ConnectionTrait>(
        conn: &C,
        semester_id: i32,
    ) -> RepositoryResult<Vec<Enrollment>> {
        enrollments::Entity::find()
            .filter(enrollments::Column::SemesterId.eq(semester_id))
            .order_by_asc(enrollments::Column::Id)
            .all(conn)
            .await?
            .into_iter()
            .map(enrollments::Model::into_enrollment)
            .collect()
    }

    /// Locks every semester row with `SELECT ... FOR UPDATE` until `txn` ends,
    /// so activations, schedule inserts and enrollments run one at a time, and
    /// returns the one with `semester_id`
    async fn lock_semester(
        txn: &DatabaseTransaction,
        semester_id: i32,
    ) -> RepositoryResult<SemesterInfo> {
        let locked = semesters::Entity::find()
            .order_by_asc(semesters::Column::Id)
            .lock_exclusive()
            .all(txn)
            .await?;

        locked
            .into_iter()
            .find(|s| s.id == semester_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("semester {semester_id}")))?
            .into_semester()
    }

    /// Largest schedule id in use, across all semesters
    async fn max_schedule_id<C: ConnectionTrait>(conn: &C) -> RepositoryResult<i32> {
        let max: Option<Option<i32>> = schedules::Entity::find()
            .select_only()
            .column_as(schedules::Column::ScheduleId.max(), "max_schedule_id")
            .into_tuple()
            .one(conn)
            .await?;
        Ok(max.flatten().unwrap_or(0))
    }
}

#[async_trait]
impl TimetableRepository for SqlRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.db.ping().await.is_ok())
    }

    async fn list_semesters(&self) -> RepositoryResult<Vec<SemesterInfo>> {
        semesters::Entity::find()
            .order_by_asc(semesters::Column::StartDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(semesters::Model::into_semester)
            .collect()
    }

    async fn get_semester(&self, semester_id: i32) -> RepositoryResult<SemesterInfo> {
        Self::find_semester(&self.db, semester_id).await
    }

    async fn current_semester(&self) -> RepositoryResult<Option<SemesterInfo>> {
        semesters::Entity::find()
            .filter(semesters::Column::IsCurrent.eq(true))
            .order_by_asc(semesters::Column::StartDate)
            .one(&self.db)
            .await?
            .map(semesters::Model::into_semester)
            .transpose()
    }

    async fn activate_semester(&self, semester_id: i32) -> RepositoryResult<SemesterInfo> {
        let txn = self.db.begin().await?;

        // Check first so an unknown id leaves every flag untouched
        let semester = Self::lock_semester(&txn, semester_id).await?;

        semesters::Entity::update_many()
            .col_expr(semesters::Column::IsCurrent, Expr::value(false))
            .filter(semesters::Column::IsCurrent.eq(true))
            .exec(&txn)
            .await?;
        semesters::Entity::update_many()
            .col_expr(semesters::Column::IsCurrent, Expr::value(true))
            .filter(semesters::Column::Id.eq(semester_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        info!("Semester {semester_id} is now the current semester");

        Ok(SemesterInfo {
            is_current: true,
            ..semester
        })
    }

    async fn list_sections(&self) -> RepositoryResult<Vec<ClassSection>> {
        Self::load_sections(&self.db).await
    }

    async fn list_classrooms(&self) -> RepositoryResult<Vec<Classroom>> {
        Self::load_classrooms(&self.db).await
    }

    async fn schedules_for_semester(
        &self,
        semester_id: i32,
    ) -> RepositoryResult<Vec<ScheduleEntry>> {
        Self::find_semester(&self.db, semester_id).await?;
        Self::load_schedules(&self.db, semester_id).await
    }

    async fn add_schedule(
        &self,
        semester_id: i32,
        mut entry: ScheduleEntry,
    ) -> RepositoryResult<ScheduleEntry> {
        let txn = self.db.begin().await?;

        let semester = Self::lock_semester(&txn, semester_id).await?;
        if entry.schedule_id == 0 {
            entry.schedule_id = Self::max_schedule_id(&txn)
                .await?
                .checked_add(1)
                .ok_or_else(|| RepositoryError::ValidationError("schedule ids exhausted".into()))?;
        }

        let sections = Self::load_sections(&txn).await?;
        let classrooms = Self::load_classrooms(&txn).await?;
        let existing = Self::load_schedules(&txn, semester_id).await?;
        let entry = validate_new_schedule(&semester, &sections, &classrooms, &existing, entry)?;

        let section_id = i32::try_from(entry.section_id).map_err(|_| {
            RepositoryError::ValidationError(format!("section {} out of range", entry.section_id))
        })?;

        schedules::ActiveModel {
            schedule_id: Set(entry.schedule_id),
            semester_id: Set(semester_id),
            course_id: Set(entry.course_id),
            teacher_id: Set(entry.teacher_id.clone()),
            classroom_id: Set(entry.classroom_id),
            section_id: Set(section_id),
            week_day: Set(i16::from(entry.weekday.number())),
            weeks: Set(entry.weeks.clone()),
            course_name: Set(entry.course_name.clone()),
            course_code: Set(entry.course_code.clone()),
            teacher_name: Set(entry.teacher_name.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
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
        Self::find_semester(&self.db, semester_id).await?;

        enrollments::Entity::find()
            .filter(enrollments::Column::SemesterId.eq(semester_id))
            .filter(enrollments::Column::StudentId.eq(student_id))
            .order_by_asc(enrollments::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(enrollments::Model::into_enrollment)
            .collect()
    }

    async fn enroll(
        &self,
        semester_id: i32,
        student_id: &str,
        schedule_id: i32,
    ) -> RepositoryResult<Enrollment> {
        let txn = self.db.begin().await?;

        Self::lock_semester(&txn, semester_id).await?;
        let schedules = Self::load_schedules(&txn, semester_id).await?;
        let classrooms = Self::load_classrooms(&txn).await?;
        let in_semester = Self::load_enrollments(&txn, semester_id).await?;
        validate_enrollment(
            semester_id,
            &schedules,
            &classrooms,
            &in_semester,
            student_id,
            schedule_id,
        )?;

        let saved = enrollments::ActiveModel {
            student_id: Set(student_id.to_string()),
            schedule_id: Set(schedule_id),
            semester_id: Set(semester_id),
            status: Set(EnrollmentStatus::Enrolled.to_string()),
            enrolled_at: Set(Local::now().naive_local()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(
            "Student {student_id} enrolled in schedule {schedule_id} (enrollment {})",
            saved.id
        );
        saved.into_enrollment()
    }

    async fn withdraw(
        &self,
        student_id: &str,
        enrollment_id: i32,
    ) -> RepositoryResult<Enrollment> {
        let txn = self.db.begin().await?;

        let row = enrollments::Entity::find_by_id(enrollment_id)
            .lock_exclusive()
            .one(&txn)
            .await?;
        let current = row
            .clone()
            .map(enrollments::Model::into_enrollment)
            .transpose()?;
        validate_withdrawal(current.as_ref(), student_id, enrollment_id)?;

        let row = row
            .ok_or_else(|| RepositoryError::NotFound(format!("enrollment {enrollment_id}")))?;
        let mut active: enrollments::ActiveModel = row.into();
        active.status = Set(EnrollmentStatus::Withdrawn.to_string());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        info!("Student {student_id} withdrew enrollment {enrollment_id}");
        updated.into_enrollment()
    }
}
