pub use sea_orm_migration::prelude::*;

mod m20251019_add_schedule_indexes;
mod m20251019_create_timetable_tables;
mod m20251020_create_enrollments;
mod m20251020_unique_current_semester;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251019_create_timetable_tables::Migration),
            Box::new(m20251019_add_schedule_indexes::Migration),
            Box::new(m20251020_unique_current_semester::Migration),
            Box::new(m20251020_create_enrollments::Migration),
        ]
    }
}
