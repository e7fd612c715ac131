pub use sea_orm_migration::prelude::*;

mod m20260715_000001_init_schema;
mod m20260802_000002_add_outreach_queue;
mod m20260811_000003_add_thread_id;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260715_000001_init_schema::Migration),
            Box::new(m20260802_000002_add_outreach_queue::Migration),
            Box::new(m20260811_000003_add_thread_id::Migration),
        ]
    }
}
