use super::{ensure_references, table_name_of};
use crate::{
    error,
    extractors::{Json, ValidatedJson},
    schema::{Provisioner, QueryPair, Registry},
    sql,
    utils::parse_id,
    Result, StateTrait,
};
use axum::extract::{Path, State};
use chrono::Utc;
use entity::{questions, Difficulty, Status};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[validate(length(min = 5, max = 255))]
    title: Option<String>,
    company_id: Option<i32>,
    topic_id: Option<i32>,
    #[validate(length(min = 1, max = 64))]
    db_type: Option<String>,
    difficulty: Option<Difficulty>,
    status: Option<Status>,
    #[validate(length(min = 1))]
    question: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    schema: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    schema_image: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    solution: Option<Option<String>>,
    #[validate(nested)]
    query: Option<QueryPair>,
}

/// Updates a question. A new query pair replaces the practice table in place, it may not rename
/// it or insert into columns the table does not define.
pub async fn update_question<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<questions::Model>> {
    let id = parse_id(&id, error::QUESTION_NOT_FOUND)?;

    let Some(question) = questions::Entity::find_by_id(id).one(state.db()).await? else {
        return Err(error::QUESTION_NOT_FOUND);
    };

    ensure_references(state.db(), request.company_id, request.topic_id).await?;

    let mut active: questions::ActiveModel = question.clone().into();

    if let Some(pair) = request.query {
        let provisioner = Provisioner::new(state.db(), state.table_locks());

        let entry = match table_name_of(&question.query) {
            Some(name) => Registry::new(state.db()).find(&name).await?,
            None => None,
        };

        let entry = match entry {
            Some(entry) => {
                provisioner
                    .reprovision(&entry, &pair.create_table, &pair.add_data)
                    .await?
            }
            None => {
                let definition = sql::create_table_target(&pair.create_table)?;
                provisioner
                    .provision(&definition.name, &pair.create_table, &pair.add_data)
                    .await?
            }
        };

        if entry.question_id != Some(question.id) {
            Registry::new(state.db()).assign(entry, question.id).await?;
        }

        active.query = Set(pair.encode()?);
    }

    if let Some(title) = request.title {
        active.title = Set(title);
    }
    if let Some(company_id) = request.company_id {
        active.company_id = Set(company_id);
    }
    if let Some(topic_id) = request.topic_id {
        active.topic_id = Set(topic_id);
    }
    if let Some(db_type) = request.db_type {
        active.db_type = Set(db_type);
    }
    if let Some(difficulty) = request.difficulty {
        active.difficulty = Set(difficulty);
    }
    if let Some(status) = request.status {
        active.status = Set(status);
    }
    if let Some(text) = request.question {
        active.question = Set(text);
    }
    if let Some(schema) = request.schema {
        active.schema = Set(schema);
    }
    if let Some(schema_image) = request.schema_image {
        active.schema_image = Set(schema_image);
    }
    if let Some(solution) = request.solution {
        active.solution = Set(solution);
    }

    active.updated_at = Set(Utc::now());

    let question = active.update(state.db()).await?;

    info!(question_id = question.id, "question updated");

    Ok(Json(question))
}
