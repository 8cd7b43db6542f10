use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Timetable and free-classroom queries load one semester at a time
        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_semester_id")
                    .table(Schedules::Table)
                    .col(Schedules::SemesterId)
                    .to_owned(),
            )
            .await?;

        // Placement conflicts are checked per classroom slot
        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_classroom_slot")
                    .table(Schedules::Table)
                    .col(Schedules::ClassroomId)
                    .col(Schedules::WeekDay)
                    .col(Schedules::SectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_teacher_id")
                    .table(Schedules::Table)
                    .col(Schedules::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_semesters_is_current")
                    .table(Semesters::Table)
                    .col(Semesters::IsCurrent)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(Index::drop().name("idx_semesters_is_current").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_schedules_teacher_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_schedules_classroom_slot").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_schedules_semester_id").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Schedules {
    Table,
    SemesterId,
    ClassroomId,
    WeekDay,
    SectionId,
    TeacherId,
}

#[derive(Iden)]
enum Semesters {
    Table,
    IsCurrent,
}
