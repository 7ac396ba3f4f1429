mod company;
mod domain;
mod question;
mod register;
mod submission;
mod summary;
mod table;
mod table_info;
mod topic;

use crate::{
    middlewares::{PermissionsLayer, ADMIN},
    state::StateTrait,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use sea_orm::ConnectionTrait;

pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .nest(
            "/v1",
            Router::new()
                .route("/register", post(register::register::<S>))
                .nest("/question", question::routes::<S>())
                .nest("/submission", submission::routes::<S>())
                .nest("/company", company::routes::<S>())
                .nest("/domain", domain::routes::<S>())
                .nest("/topic", topic::routes::<S>())
                .nest("/table-info", table_info::routes::<S>())
                .nest("/admin", admin_routes::<S>()),
        )
        .route("/livez", get(liveness::<S>))
        .route("/readyz", get(|| async {}))
}

/// Everything below `/v1/admin` requires the admin permission.
fn admin_routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .nest("/question", question::admin_routes::<S>())
        .nest("/table", table::routes::<S>())
        .nest("/table-info", table_info::admin_routes::<S>())
        .nest("/submission", submission::admin_routes::<S>())
        .nest("/company", company::admin_routes::<S>())
        .nest("/domain", domain::admin_routes::<S>())
        .nest("/topic", topic::admin_routes::<S>())
        .route("/summary", get(summary::get_summary::<S>))
        .route_layer(PermissionsLayer::new(&[ADMIN]))
}

async fn liveness<S: StateTrait>(State(state): State<S>) -> StatusCode {
    if let Err(err) = state.db().execute_unprepared("select 1").await {
        error!("liveness check failed: {}", err);
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    StatusCode::OK
}
