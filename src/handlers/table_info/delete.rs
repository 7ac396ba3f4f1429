use super::find_table_info;
use crate::{Result, StateTrait};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use entity::table_infos;
use sea_orm::EntityTrait;

/// Links go with the description.
pub async fn delete_table_info<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let table_info = find_table_info(state.db(), &id).await?;

    table_infos::Entity::delete_by_id(table_info.id)
        .exec(state.db())
        .await?;

    info!(table_info_id = table_info.id, "table info deleted");

    Ok(StatusCode::OK)
}
