mod create;
mod delete;
mod get;
mod update;

use crate::{error, utils::parse_id, Result, StateTrait};
use axum::{
    routing::{get, post},
    Router,
};
use entity::dynamic_tables;
use sea_orm::{ConnectionTrait, EntityTrait};

/// Routes for practice tables, all admin only
///
/// POST   /admin/table
/// GET    /admin/table
/// GET    /admin/table/:id
/// PUT    /admin/table/:id
/// DELETE /admin/table/:id
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route(
            "/",
            post(create::create_table::<S>).get(get::list_tables::<S>),
        )
        .route(
            "/:id",
            get(get::get_table::<S>)
                .put(update::update_table::<S>)
                .delete(delete::delete_table::<S>),
        )
}

/// Tables created for a question are changed and removed through that question.
fn ensure_unowned(entry: &dynamic_tables::Model) -> Result {
    match entry.question_id {
        Some(_) => Err(error::TABLE_OWNED_BY_QUESTION),
        None => Ok(()),
    }
}

async fn find_entry<C: ConnectionTrait>(conn: &C, id: &str) -> Result<dynamic_tables::Model> {
    let id = parse_id(id, error::TABLE_NOT_FOUND)?;

    dynamic_tables::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(error::TABLE_NOT_FOUND)
}
