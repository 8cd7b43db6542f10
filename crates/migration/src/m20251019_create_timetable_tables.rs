use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Semesters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Semesters::Name).string().not_null())
                    .col(ColumnDef::new(Semesters::StartDate).date().not_null())
                    .col(ColumnDef::new(Semesters::EndDate).date().not_null())
                    .col(ColumnDef::new(Semesters::TermType).string().not_null())
                    .col(ColumnDef::new(Semesters::AcademicYear).string().not_null())
                    .col(
                        ColumnDef::new(Semesters::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Section ids are the period numbers printed on the grid, so they are not generated
        manager
            .create_table(
                Table::create()
                    .table(ClassSections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassSections::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassSections::StartTime).time().not_null())
                    .col(ColumnDef::new(ClassSections::EndTime).time().not_null())
                    .col(ColumnDef::new(ClassSections::PeriodType).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Classrooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classrooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classrooms::Building).string().not_null())
                    .col(ColumnDef::new(Classrooms::RoomNumber).string().not_null())
                    .col(ColumnDef::new(Classrooms::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Classrooms::Equipment)
                            .string()
                            .not_null()
                            .default("basic"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::ScheduleId).integer().not_null())
                    .col(ColumnDef::new(Schedules::SemesterId).integer().not_null())
                    .col(ColumnDef::new(Schedules::CourseId).integer().not_null())
                    .col(ColumnDef::new(Schedules::TeacherId).string().not_null())
                    .col(ColumnDef::new(Schedules::ClassroomId).integer().not_null())
                    .col(ColumnDef::new(Schedules::SectionId).integer().not_null())
                    .col(ColumnDef::new(Schedules::WeekDay).small_integer().not_null())
                    .col(ColumnDef::new(Schedules::Weeks).string().not_null())
                    .col(ColumnDef::new(Schedules::CourseName).string())
                    .col(ColumnDef::new(Schedules::CourseCode).string())
                    .col(ColumnDef::new(Schedules::TeacherName).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-semester_id")
                            .from(Schedules::Table, Schedules::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-classroom_id")
                            .from(Schedules::Table, Schedules::ClassroomId)
                            .to(Classrooms::Table, Classrooms::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-section_id")
                            .from(Schedules::Table, Schedules::SectionId)
                            .to(ClassSections::Table, ClassSections::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Classrooms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ClassSections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Semesters {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    TermType,
    AcademicYear,
    IsCurrent,
}

#[derive(Iden)]
enum ClassSections {
    Table,
    Id,
    StartTime,
    EndTime,
    PeriodType,
}

#[derive(Iden)]
enum Classrooms {
    Table,
    Id,
    Building,
    RoomNumber,
    Capacity,
    Equipment,
}

#[derive(Iden)]
enum Schedules {
    Table,
    Id,
    ScheduleId,
    SemesterId,
    CourseId,
    TeacherId,
    ClassroomId,
    SectionId,
    WeekDay,
    Weeks,
    CourseName,
    CourseCode,
    TeacherName,
}
