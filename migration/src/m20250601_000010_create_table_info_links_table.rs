use entity::table_info_links::{self, constraints::*};
use entity::{dynamic_tables, table_infos};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(table_info_links::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(table_info_links::Column::TableInfoId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(table_info_links::Column::DynamicTableId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name(PK_TABLE_INFO_LINKS)
                            .col(table_info_links::Column::TableInfoId)
                            .col(table_info_links::Column::DynamicTableId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TABLE_INFO_LINKS_TABLE_INFO_ID)
                            .from(table_info_links::Entity, table_info_links::Column::TableInfoId)
                            .to(table_infos::Entity, table_infos::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TABLE_INFO_LINKS_DYNAMIC_TABLE_ID)
                            .from(table_info_links::Entity, table_info_links::Column::DynamicTableId)
                            .to(dynamic_tables::Entity, dynamic_tables::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(table_info_links::Entity).to_owned())
            .await
    }
}
