use super::{link_tables, respond, Response};
use crate::{
    extractors::{Json, ValidatedJson},
    Result, StateTrait,
};
use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use entity::table_infos;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[validate(length(min = 1))]
    schema_content: String,
    #[validate(url)]
    schema_image_url: Option<String>,
    #[serde(default)]
    table_ids: Vec<i32>,
}

pub async fn create_table_info<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<(StatusCode, Json<Response>)> {
    let txn = state.db().begin().await?;

    let now = Utc::now();
    let table_info = table_infos::ActiveModel {
        schema_content: Set(request.schema_content),
        schema_image_url: Set(request.schema_image_url),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    link_tables(&txn, table_info.id, request.table_ids).await?;
    let res = respond(&txn, table_info).await?;

    txn.commit().await?;

    info!(table_info_id = res.table_info.id, "table info created");

    Ok((StatusCode::CREATED, Json(res)))
}
