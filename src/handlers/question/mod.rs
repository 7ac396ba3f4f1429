mod create;
mod delete;
mod details;
mod list;
mod progress;
mod update;

use crate::{
    error::{self, Result},
    schema::QueryPair,
    sql, StateTrait,
};
use axum::{
    routing::{get, post},
    Router,
};
use entity::{companies, topics};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

/// Routes for questions
///
/// # Users
/// GET    /question
/// GET    /question/progress
/// GET    /question/:id
///
/// # Admin actions
/// POST   /admin/question
/// GET    /admin/question
/// GET    /admin/question/:id
/// PUT    /admin/question/:id
/// DELETE /admin/question/:id
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/", get(list::list_active_questions::<S>))
        .route("/progress", get(progress::get_progress::<S>))
        .route("/:id", get(details::get_question_details::<S>))
}

pub fn admin_routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route(
            "/",
            post(create::create_question::<S>).get(list::list_questions::<S>),
        )
        .route(
            "/:id",
            get(list::get_question::<S>)
                .put(update::update_question::<S>)
                .delete(delete::delete_question::<S>),
        )
}

/// Name of the practice table a stored query pair creates, if it still parses.
fn table_name_of(query: &str) -> Option<String> {
    let pair = QueryPair::decode(query).ok()?;
    sql::create_table_target(&pair.create_table)
        .ok()
        .map(|definition| definition.name)
}

async fn ensure_references<C: ConnectionTrait>(
    conn: &C,
    company_id: Option<i32>,
    topic_id: Option<i32>,
) -> Result {
    if let Some(id) = company_id {
        if companies::Entity::find_by_id(id).count(conn).await? == 0 {
            return Err(error::COMPANY_NOT_FOUND);
        }
    }

    if let Some(id) = topic_id {
        if topics::Entity::find_by_id(id).count(conn).await? == 0 {
            return Err(error::TOPIC_NOT_FOUND);
        }
    }

    Ok(())
}
