use super::{questions, users, SubmissionStatus};
use sea_orm::entity::prelude::*;
use serde::Serialize;

pub mod constraints {
    pub const FK_SUBMISSIONS_USER_ID: &str = "FK_submissions_user_id";
    pub const FK_SUBMISSIONS_QUESTION_ID: &str = "FK_submissions_question_id";
}

/// One graded attempt. Rows are only ever inserted, a new attempt never touches an older one.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "submissions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub question_id: i32,
    #[sea_orm(column_type = "Text")]
    pub code: String,
    pub db_type: String,
    pub score: i32,
    pub status: SubmissionStatus,
    /// Serialized result rows of the submitted statement.
    #[sea_orm(column_type = "Text", nullable)]
    pub result: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub error: Option<String>,
    pub run_time: i64,
    pub submitted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Question,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::User => Entity::belongs_to(users::Entity)
                .from(Column::UserId)
                .to(users::Column::Id)
                .into(),
            Self::Question => Entity::belongs_to(questions::Entity)
                .from(Column::QuestionId)
                .to(questions::Column::Id)
                .into(),
        }
    }
}

impl Related<users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
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
    pub fn find_by_user(user_id: i32) -> Select<Entity> {
        Self::find().filter(Column::UserId.eq(user_id))
    }
}
