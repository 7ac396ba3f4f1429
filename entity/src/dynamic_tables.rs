use super::{questions, TableStatus};
use sea_orm::entity::prelude::*;
use serde::Serialize;

pub mod constraints {
    pub const UC_DYNAMIC_TABLES_TABLE_NAME: &str = "UC_dynamic_tables_table_name";
    pub const FK_DYNAMIC_TABLES_QUESTION_ID: &str = "FK_dynamic_tables_question_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "dynamic_tables")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub table_name: String,
    #[sea_orm(column_type = "Text")]
    pub create_table_query: String,
    #[sea_orm(column_type = "Text")]
    pub insert_data_query: String,
    pub status: TableStatus,
    /// The question whose statements created this table, if any.
    pub question_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Question,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Question => Entity::belongs_to(questions::Entity)
                .from(Column::QuestionId)
                .to(questions::Column::Id)
                .into(),
        }
    }
}

impl Related<questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    #[inline]
    pub fn find_by_table_name(table_name: &str) -> Select<Entity> {
        Self::find().filter(Column::TableName.eq(table_name))
    }
}
