#[macro_use]
extern crate tracing;

mod best;
mod config;
mod engine;
pub mod error;
mod extractors;
mod grading;
mod handlers;
mod jwt;
mod middlewares;
mod progress;
mod sandbox;
mod schema;
mod sql;
mod state;
mod utils;

use crate::{middlewares::middlewares, utils::shutdown_signal};
pub use config::*;
use error::Result;
pub use jwt::Claims;
pub use state::*;
use tokio::net::TcpListener;
pub use utils::panic;

pub async fn run<S: StateTrait>(listener: TcpListener, state: S) -> anyhow::Result<()> {
    info!("listening on port {}", listener.local_addr()?.port());

    let routes = handlers::routes::<S>();
    let app = middlewares(state, routes);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
