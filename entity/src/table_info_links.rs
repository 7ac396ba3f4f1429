use super::{dynamic_tables, table_infos};
use sea_orm::entity::prelude::*;

pub mod constraints {
    pub const PK_TABLE_INFO_LINKS: &str = "PK_table_info_links";
    pub const FK_TABLE_INFO_LINKS_TABLE_INFO_ID: &str = "FK_table_info_links_table_info_id";
    pub const FK_TABLE_INFO_LINKS_DYNAMIC_TABLE_ID: &str = "FK_table_info_links_dynamic_table_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "table_info_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub table_info_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub dynamic_table_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    TableInfo,
    Table,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::TableInfo => Entity::belongs_to(table_infos::Entity)
                .from(Column::TableInfoId)
                .to(table_infos::Column::Id)
                .into(),
            Self::Table => Entity::belongs_to(dynamic_tables::Entity)
                .from(Column::DynamicTableId)
                .to(dynamic_tables::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
