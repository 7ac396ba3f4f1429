use crate::{
    error,
    extractors::Json,
    jwt::Claims,
    utils::parse_id,
    Result, StateTrait,
};
use axum::extract::{Path, Query, State};
use entity::{questions, Difficulty, Status};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, Select,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct Filters {
    search: Option<String>,
    company_id: Option<i32>,
    topic_id: Option<i32>,
    db_type: Option<String>,
    difficulty: Option<Difficulty>,
    status: Option<Status>,
}

impl Filters {
    fn apply(self, mut query: Select<questions::Entity>) -> Select<questions::Entity> {
        if let Some(search) = self.search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(questions::Column::Title.contains(search));
        }
        if let Some(company_id) = self.company_id {
            query = query.filter(questions::Column::CompanyId.eq(company_id));
        }
        if let Some(topic_id) = self.topic_id {
            query = query.filter(questions::Column::TopicId.eq(topic_id));
        }
        if let Some(db_type) = self.db_type {
            query = query.filter(questions::Column::DbType.eq(db_type));
        }
        if let Some(difficulty) = self.difficulty {
            query = query.filter(questions::Column::Difficulty.eq(difficulty));
        }
        if let Some(status) = self.status {
            query = query.filter(questions::Column::Status.eq(status));
        }

        query.order_by_asc(questions::Column::Id)
    }
}

/// What users see of a question. The solution and the table statements stay hidden.
#[derive(Debug, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: i32,
    pub title: String,
    pub company_id: i32,
    pub topic_id: i32,
    pub db_type: String,
    pub difficulty: Difficulty,
    pub question: String,
    pub schema: Option<String>,
    pub schema_image: Option<String>,
}

pub async fn list_questions<S: StateTrait>(
    State(state): State<S>,
    Query(filters): Query<Filters>,
) -> Result<Json<Vec<questions::Model>>> {
    let res = filters
        .apply(questions::Entity::find())
        .all(state.db())
        .await?;

    Ok(Json(res))
}

pub async fn get_question<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<Json<questions::Model>> {
    let id = parse_id(&id, error::QUESTION_NOT_FOUND)?;

    let Some(question) = questions::Entity::find_by_id(id).one(state.db()).await? else {
        return Err(error::QUESTION_NOT_FOUND);
    };

    Ok(Json(question))
}

/// Active questions only, whatever status the filters ask for.
pub async fn list_active_questions<S: StateTrait>(
    State(state): State<S>,
    _claims: Claims,
    Query(filters): Query<Filters>,
) -> Result<Json<Vec<PublicQuestion>>> {
    let filters = Filters {
        status: None,
        ..filters
    };

    let res = filters
        .apply(questions::Entity::find_active())
        .into_model::<PublicQuestion>()
        .all(state.db())
        .await?;

    Ok(Json(res))
}
