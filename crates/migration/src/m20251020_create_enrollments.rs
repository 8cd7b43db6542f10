use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // schedule_id is shared by every meeting row of a schedule, so it has no foreign key
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).string().not_null())
                    .col(ColumnDef::new(Enrollments::ScheduleId).integer().not_null())
                    .col(ColumnDef::new(Enrollments::SemesterId).integer().not_null())
                    .col(
                        ColumnDef::new(Enrollments::Status)
                            .string()
                            .not_null()
                            .default("enrolled"),
                    )
                    .col(ColumnDef::new(Enrollments::EnrolledAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-semester_id")
                            .from(Enrollments::Table, Enrollments::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_semester_student")
                    .table(Enrollments::Table)
                    .col(Enrollments::SemesterId)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        // Seat counts are taken per schedule
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_schedule_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::ScheduleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_enrollments_schedule_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_enrollments_semester_student").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Semesters {
    Table,
    Id,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    ScheduleId,
    SemesterId,
    Status,
    EnrolledAt,
}
