use super::{companies, topics, Difficulty, Status};
use sea_orm::entity::prelude::*;
use serde::Serialize;

pub mod constraints {
    pub const FK_QUESTIONS_COMPANY_ID: &str = "FK_questions_company_id";
    pub const FK_QUESTIONS_TOPIC_ID: &str = "FK_questions_topic_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "questions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub company_id: i32,
    pub topic_id: i32,
    pub db_type: String,
    pub difficulty: Difficulty,
    pub status: Status,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub schema: Option<String>,
    pub schema_image: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub solution: Option<String>,
    /// JSON encoded `{"createTable": ..., "addData": ...}` pair backing the practice table.
    #[sea_orm(column_type = "Text")]
    pub query: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
    Topic,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Company => Entity::belongs_to(companies::Entity)
                .from(Column::CompanyId)
                .to(companies::Column::Id)
                .into(),
            Self::Topic => Entity::belongs_to(topics::Entity)
                .from(Column::TopicId)
                .to(topics::Column::Id)
                .into(),
        }
    }
}

impl Related<companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    #[inline]
    pub fn find_active() -> Select<Entity> {
        Self::find().filter(Column::Status.eq(Status::Active))
    }
}
