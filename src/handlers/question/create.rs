use super::ensure_references;
use crate::{
    extractors::{Json, ValidatedJson},
    schema::{Provisioner, QueryPair, Registry},
    sql, Result, StateTrait,
};
use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use entity::{questions, Difficulty, Status};
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[validate(length(min = 5, max = 255))]
    title: String,
    company_id: i32,
    topic_id: i32,
    #[validate(length(min = 1, max = 64))]
    db_type: String,
    difficulty: Difficulty,
    #[serde(default)]
    status: Status,
    #[validate(length(min = 1))]
    question: String,
    schema: Option<String>,
    #[validate(url)]
    schema_image: Option<String>,
    solution: Option<String>,
    #[validate(nested)]
    query: QueryPair,
}

/// Creates a question together with the practice table its query pair defines.
///
/// The table is dropped again if the question itself cannot be stored.
pub async fn create_question<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<(StatusCode, Json<questions::Model>)> {
    ensure_references(state.db(), Some(request.company_id), Some(request.topic_id)).await?;

    let definition = sql::create_table_target(&request.query.create_table)?;
    let query = request.query.encode()?;

    let provisioner = Provisioner::new(state.db(), state.table_locks());
    let entry = provisioner
        .provision(
            &definition.name,
            &request.query.create_table,
            &request.query.add_data,
        )
        .await?;

    let now = Utc::now();
    let question = questions::ActiveModel {
        title: Set(request.title),
        company_id: Set(request.company_id),
        topic_id: Set(request.topic_id),
        db_type: Set(request.db_type),
        difficulty: Set(request.difficulty),
        status: Set(request.status),
        question: Set(request.question),
        schema: Set(request.schema),
        schema_image: Set(request.schema_image),
        solution: Set(request.solution),
        query: Set(query),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let question = match question.insert(state.db()).await {
        Ok(question) => question,
        Err(err) => {
            if let Err(cleanup) = provisioner.deprovision(&definition.name).await {
                error!(
                    table_name = %definition.name,
                    "failed to remove table of unsaved question: {}",
                    cleanup
                );
            }
            return Err(err.into());
        }
    };

    Registry::new(state.db()).assign(entry, question.id).await?;

    info!(
        question_id = question.id,
        table_name = %definition.name,
        "question created"
    );

    Ok((StatusCode::CREATED, Json(question)))
}
