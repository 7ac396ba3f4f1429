use super::{dynamic_tables, table_info_links};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Schema documentation shown next to the practice tables it describes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "table_infos")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub schema_content: String,
    pub schema_image_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<dynamic_tables::Entity> for Entity {
    fn to() -> RelationDef {
        table_info_links::Relation::Table.def()
    }

    fn via() -> Option<RelationDef> {
        Some(table_info_links::Relation::TableInfo.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
