use super::{find_table_info, linked_tables, respond, Response};
use crate::{extractors::Json, jwt::Claims, Result, StateTrait};
use axum::extract::{Path, State};
use entity::table_infos;
use sea_orm::{EntityTrait, QueryOrder};

pub async fn list_table_infos<S: StateTrait>(
    State(state): State<S>,
    _claims: Claims,
) -> Result<Json<Vec<Response>>> {
    let table_infos = table_infos::Entity::find()
        .order_by_asc(table_infos::Column::Id)
        .all(state.db())
        .await?;

    let ids: Vec<i32> = table_infos.iter().map(|table_info| table_info.id).collect();
    let mut tables = linked_tables(state.db(), &ids).await?;

    let res = table_infos
        .into_iter()
        .map(|table_info| Response {
            tables: tables.remove(&table_info.id).unwrap_or_default(),
            table_info,
        })
        .collect();

    Ok(Json(res))
}

pub async fn get_table_info<S: StateTrait>(
    State(state): State<S>,
    _claims: Claims,
    Path(id): Path<String>,
) -> Result<Json<Response>> {
    let table_info = find_table_info(state.db(), &id).await?;

    Ok(Json(respond(state.db(), table_info).await?))
}
