use entity::questions::{self, constraints::*};
use entity::{companies, topics};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(questions::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(questions::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(questions::Column::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(questions::Column::CompanyId).integer().not_null())
                    .col(ColumnDef::new(questions::Column::TopicId).integer().not_null())
                    .col(
                        ColumnDef::new(questions::Column::DbType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(questions::Column::Difficulty).text().not_null())
                    .col(ColumnDef::new(questions::Column::Status).text().not_null())
                    .col(ColumnDef::new(questions::Column::Question).text().not_null())
                    .col(ColumnDef::new(questions::Column::Schema).text().null())
                    .col(ColumnDef::new(questions::Column::SchemaImage).text().null())
                    .col(ColumnDef::new(questions::Column::Solution).text().null())
                    .col(ColumnDef::new(questions::Column::Query).text().not_null())
                    .col(
                        ColumnDef::new(questions::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(questions::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_QUESTIONS_COMPANY_ID)
                            .from(questions::Entity, questions::Column::CompanyId)
                            .to(companies::Entity, companies::Column::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_QUESTIONS_TOPIC_ID)
                            .from(questions::Entity, questions::Column::TopicId)
                            .to(topics::Entity, topics::Column::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(questions::Entity).to_owned())
            .await
    }
}
