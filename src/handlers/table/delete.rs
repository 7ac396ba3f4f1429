use super::{ensure_unowned, find_entry};
use crate::{schema::Provisioner, Result, StateTrait};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};

pub async fn delete_table<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let entry = find_entry(state.db(), &id).await?;
    ensure_unowned(&entry)?;

    Provisioner::new(state.db(), state.table_locks())
        .deprovision(&entry.table_name)
        .await?;

    Ok(StatusCode::OK)
}
