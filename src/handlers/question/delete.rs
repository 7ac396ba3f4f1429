use super::table_name_of;
use crate::{error, schema::Provisioner, utils::parse_id, Result, StateTrait};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use entity::questions;
use sea_orm::EntityTrait;

/// Drops the practice table first, the question row and its submissions go after it.
pub async fn delete_question<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, error::QUESTION_NOT_FOUND)?;

    let Some(question) = questions::Entity::find_by_id(id).one(state.db()).await? else {
        return Err(error::QUESTION_NOT_FOUND);
    };

    match table_name_of(&question.query) {
        Some(table_name) => {
            Provisioner::new(state.db(), state.table_locks())
                .deprovision(&table_name)
                .await?;
        }
        None => warn!(question_id = id, "question has no usable query pair"),
    }

    let res = questions::Entity::delete_by_id(id).exec(state.db()).await?;

    if res.rows_affected == 0 {
        return Err(error::QUESTION_NOT_FOUND);
    }

    info!(question_id = id, "question deleted");

    Ok(StatusCode::OK)
}
