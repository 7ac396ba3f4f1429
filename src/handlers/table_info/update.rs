use super::{find_table_info, link_tables, respond, Response};
use crate::{
    extractors::{Json, ValidatedJson},
    Result, StateTrait,
};
use axum::extract::{Path, State};
use chrono::Utc;
use entity::table_infos;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[validate(length(min = 1))]
    schema_content: Option<String>,
    #[validate(url)]
    #[serde(default, with = "::serde_with::rust::double_option")]
    schema_image_url: Option<Option<String>>,
    table_ids: Option<Vec<i32>>,
}

/// Fields left out stay as they are. `tableIds` replaces every link when present.
pub async fn update_table_info<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<Response>> {
    let txn = state.db().begin().await?;

    let table_info = find_table_info(&txn, &id).await?;
    let mut active: table_infos::ActiveModel = table_info.into();

    if let Some(schema_content) = request.schema_content {
        active.schema_content = Set(schema_content);
    }
    if let Some(schema_image_url) = request.schema_image_url {
        active.schema_image_url = Set(schema_image_url);
    }
    active.updated_at = Set(Utc::now());

    let table_info = active.update(&txn).await?;

    if let Some(ids) = request.table_ids {
        link_tables(&txn, table_info.id, ids).await?;
    }

    let res = respond(&txn, table_info).await?;

    txn.commit().await?;

    Ok(Json(res))
}
