use entity::submissions::{self, constraints::*};
use entity::{questions, users};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(submissions::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(submissions::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(submissions::Column::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(submissions::Column::QuestionId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(submissions::Column::Code).text().not_null())
                    .col(
                        ColumnDef::new(submissions::Column::DbType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(submissions::Column::Score).integer().not_null())
                    .col(ColumnDef::new(submissions::Column::Status).text().not_null())
                    .col(ColumnDef::new(submissions::Column::Result).text().null())
                    .col(ColumnDef::new(submissions::Column::Error).text().null())
                    .col(
                        ColumnDef::new(submissions::Column::RunTime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(submissions::Column::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBMISSIONS_USER_ID)
                            .from(submissions::Entity, submissions::Column::UserId)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBMISSIONS_QUESTION_ID)
                            .from(submissions::Entity, submissions::Column::QuestionId)
                            .to(questions::Entity, questions::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(submissions::Entity).to_owned())
            .await
    }
}
