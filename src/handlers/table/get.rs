use super::find_entry;
use crate::{extractors::Json, Result, StateTrait};
use axum::extract::{Path, State};
use entity::dynamic_tables;
use sea_orm::{EntityTrait, QueryOrder};

pub async fn get_table<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<Json<dynamic_tables::Model>> {
    Ok(Json(find_entry(state.db(), &id).await?))
}

pub async fn list_tables<S: StateTrait>(
    State(state): State<S>,
) -> Result<Json<Vec<dynamic_tables::Model>>> {
    let res = dynamic_tables::Entity::find()
        .order_by_asc(dynamic_tables::Column::Id)
        .all(state.db())
        .await?;

    Ok(Json(res))
}
