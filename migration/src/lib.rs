mod utils;

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_companies_table;
mod m20250601_000002_create_domains_table;
mod m20250601_000003_create_company_domains_table;
mod m20250601_000004_create_topics_table;
mod m20250601_000005_create_users_table;
mod m20250601_000006_create_questions_table;
mod m20250601_000007_create_dynamic_tables_table;
mod m20250601_000008_create_submissions_table;
mod m20250601_000009_create_table_infos_table;
mod m20250601_000010_create_table_info_links_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_companies_table::Migration),
            Box::new(m20250601_000002_create_domains_table::Migration),
            Box::new(m20250601_000003_create_company_domains_table::Migration),
            Box::new(m20250601_000004_create_topics_table::Migration),
            Box::new(m20250601_000005_create_users_table::Migration),
            Box::new(m20250601_000006_create_questions_table::Migration),
            Box::new(m20250601_000007_create_dynamic_tables_table::Migration),
            Box::new(m20250601_000008_create_submissions_table::Migration),
            Box::new(m20250601_000009_create_table_infos_table::Migration),
            Box::new(m20250601_000010_create_table_info_links_table::Migration),
        ]
    }
}
