use crate::{
    error::{self, DatabaseError},
    extractors::{Json, ValidatedJson},
    jwt::Claims,
    utils::parse_id,
    Result, StateTrait,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use entity::{questions, topics};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use validator::Validate;

pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new().route("/", get(list_topics::<S>))
}

pub fn admin_routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/", post(create_topic::<S>))
        .route("/:id", put(update_topic::<S>).delete(delete_topic::<S>))
}

#[derive(Deserialize, Validate)]
pub struct Request {
    #[validate(length(min = 2, max = 100))]
    name: String,
}

pub async fn list_topics<S: StateTrait>(
    State(state): State<S>,
    _claims: Claims,
) -> Result<Json<Vec<topics::Model>>> {
    let res = topics::Entity::find()
        .order_by_asc(topics::Column::Name)
        .all(state.db())
        .await?;

    Ok(Json(res))
}

pub async fn create_topic<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<(StatusCode, Json<topics::Model>)> {
    let topic = topics::ActiveModel {
        name: Set(request.name),
        ..Default::default()
    }
    .insert(state.db())
    .await?;

    Ok((StatusCode::CREATED, Json(topic)))
}

pub async fn update_topic<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<topics::Model>> {
    let id = parse_id(&id, error::TOPIC_NOT_FOUND)?;

    let Some(topic) = topics::Entity::find_by_id(id).one(state.db()).await? else {
        return Err(error::TOPIC_NOT_FOUND);
    };

    let mut active: topics::ActiveModel = topic.into();
    active.name = Set(request.name);

    Ok(Json(active.update(state.db()).await?))
}

pub async fn delete_topic<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, error::TOPIC_NOT_FOUND)?;

    let res = match topics::Entity::delete_by_id(id).exec(state.db()).await {
        Err(err) if err.foreign_key_violation(questions::constraints::FK_QUESTIONS_TOPIC_ID) => {
            return Err(error::TOPIC_HAS_QUESTIONS)
        }
        r => r?,
    };

    if res.rows_affected == 0 {
        return Err(error::TOPIC_NOT_FOUND);
    }

    Ok(StatusCode::OK)
}
