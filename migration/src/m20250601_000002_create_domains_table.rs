use entity::domains::{self, constraints::*};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(domains::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(domains::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(domains::Column::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(domains::Column::Description).text().not_null())
                    .col(ColumnDef::new(domains::Column::Status).text().not_null())
                    .index(
                        Index::create()
                            .name(UC_DOMAINS_NAME)
                            .col(domains::Column::Name)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(domains::Entity).to_owned())
            .await
    }
}
