use crate::{
    extractors::{Json, ValidatedJson},
    schema::Provisioner,
    Result, StateTrait,
};
use axum::{extract::State, http::StatusCode};
use entity::dynamic_tables;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[validate(length(min = 1, max = 63))]
    table_name: String,
    #[validate(length(min = 1))]
    create_table_query: String,
    #[validate(length(min = 1))]
    insert_data_query: String,
}

pub async fn create_table<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<(StatusCode, Json<dynamic_tables::Model>)> {
    let entry = Provisioner::new(state.db(), state.table_locks())
        .provision(
            &request.table_name,
            &request.create_table_query,
            &request.insert_data_query,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}
