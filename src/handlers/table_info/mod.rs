mod create;
mod delete;
mod get;
mod update;

use crate::{error, utils::parse_id, Result, StateTrait};
use axum::{
    routing::{get, post, put},
    Router,
};
use entity::{dynamic_tables, table_info_links, table_infos};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use serde::Serialize;
use std::collections::HashMap;

/// Routes for table descriptions
///
/// # Authenticated users
/// GET    /table-info
/// GET    /table-info/:id
///
/// # Admin actions
/// POST   /admin/table-info
/// PUT    /admin/table-info/:id
/// DELETE /admin/table-info/:id
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/", get(get::list_table_infos::<S>))
        .route("/:id", get(get::get_table_info::<S>))
}

pub fn admin_routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/", post(create::create_table_info::<S>))
        .route(
            "/:id",
            put(update::update_table_info::<S>).delete(delete::delete_table_info::<S>),
        )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedTable {
    id: i32,
    table_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(flatten)]
    table_info: table_infos::Model,
    tables: Vec<LinkedTable>,
}

async fn find_table_info<C: ConnectionTrait>(conn: &C, id: &str) -> Result<table_infos::Model> {
    let id = parse_id(id, error::TABLE_INFO_NOT_FOUND)?;

    table_infos::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(error::TABLE_INFO_NOT_FOUND)
}

/// The tables linked to each of `table_info_ids`, ordered by id.
async fn linked_tables<C: ConnectionTrait>(
    conn: &C,
    table_info_ids: &[i32],
) -> Result<HashMap<i32, Vec<LinkedTable>>> {
    let links = table_info_links::Entity::find()
        .filter(table_info_links::Column::TableInfoId.is_in(table_info_ids.iter().copied()))
        .all(conn)
        .await?;

    let names: HashMap<i32, String> = dynamic_tables::Entity::find()
        .filter(dynamic_tables::Column::Id.is_in(links.iter().map(|link| link.dynamic_table_id)))
        .all(conn)
        .await?
        .into_iter()
        .map(|table| (table.id, table.table_name))
        .collect();

    let mut tables: HashMap<i32, Vec<LinkedTable>> = HashMap::new();
    for link in links {
        if let Some(table_name) = names.get(&link.dynamic_table_id) {
            tables
                .entry(link.table_info_id)
                .or_default()
                .push(LinkedTable {
                    id: link.dynamic_table_id,
                    table_name: table_name.clone(),
                });
        }
    }

    for list in tables.values_mut() {
        list.sort_unstable_by_key(|table| table.id);
    }

    Ok(tables)
}

async fn respond<C: ConnectionTrait>(conn: &C, table_info: table_infos::Model) -> Result<Response> {
    let tables = linked_tables(conn, &[table_info.id])
        .await?
        .remove(&table_info.id)
        .unwrap_or_default();

    Ok(Response { table_info, tables })
}

/// Replaces the table links of a description. Every id has to name an existing table.
async fn link_tables<C: ConnectionTrait>(conn: &C, table_info_id: i32, mut ids: Vec<i32>) -> Result {
    ids.sort_unstable();
    ids.dedup();

    let found = dynamic_tables::Entity::find()
        .filter(dynamic_tables::Column::Id.is_in(ids.iter().copied()))
        .count(conn)
        .await?;

    if found != ids.len() as u64 {
        return Err(error::TABLE_NOT_FOUND);
    }

    table_info_links::Entity::delete_many()
        .filter(table_info_links::Column::TableInfoId.eq(table_info_id))
        .exec(conn)
        .await?;

    if ids.is_empty() {
        return Ok(());
    }

    let links = ids
        .into_iter()
        .map(|dynamic_table_id| table_info_links::ActiveModel {
            table_info_id: Set(table_info_id),
            dynamic_table_id: Set(dynamic_table_id),
        });

    table_info_links::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}
