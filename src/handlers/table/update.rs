use super::{ensure_unowned, find_entry};
use crate::{
    extractors::{Json, ValidatedJson},
    schema::Provisioner,
    Result, StateTrait,
};
use axum::extract::{Path, State};
use entity::dynamic_tables;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[validate(length(min = 1))]
    create_table_query: String,
    #[validate(length(min = 1))]
    insert_data_query: String,
}

/// Recreates the table from new statements. The name has to stay the same.
pub async fn update_table<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<dynamic_tables::Model>> {
    let entry = find_entry(state.db(), &id).await?;
    ensure_unowned(&entry)?;

    let entry = Provisioner::new(state.db(), state.table_locks())
        .reprovision(
            &entry,
            &request.create_table_query,
            &request.insert_data_query,
        )
        .await?;

    Ok(Json(entry))
}
