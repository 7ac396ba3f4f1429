use entity::dynamic_tables::{self, constraints::*};
use entity::questions;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(dynamic_tables::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(dynamic_tables::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(dynamic_tables::Column::TableName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(dynamic_tables::Column::CreateTableQuery)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(dynamic_tables::Column::InsertDataQuery)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(dynamic_tables::Column::Status).text().not_null())
                    .col(ColumnDef::new(dynamic_tables::Column::QuestionId).integer().null())
                    .col(
                        ColumnDef::new(dynamic_tables::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(dynamic_tables::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .index(
                        Index::create()
                            .name(UC_DYNAMIC_TABLES_TABLE_NAME)
                            .col(dynamic_tables::Column::TableName)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_DYNAMIC_TABLES_QUESTION_ID)
                            .from(dynamic_tables::Entity, dynamic_tables::Column::QuestionId)
                            .to(questions::Entity, questions::Column::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(dynamic_tables::Entity).to_owned())
            .await
    }
}
