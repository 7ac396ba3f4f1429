use entity::companies::{self, constraints::*};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(companies::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(companies::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(companies::Column::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(companies::Column::Domain)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(companies::Column::Category)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(companies::Column::Status).text().not_null())
                    .col(ColumnDef::new(companies::Column::LogoUrl).text().null())
                    .col(
                        ColumnDef::new(companies::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .index(
                        Index::create()
                            .name(UC_COMPANIES_DOMAIN)
                            .col(companies::Column::Domain)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(companies::Entity).to_owned())
            .await
    }
}
