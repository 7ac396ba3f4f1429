use crate::{
    extractors::{Json, UserID},
    progress::{compute_progress, Progress},
    Result, StateTrait,
};
use axum::extract::State;

pub async fn get_progress<S: StateTrait>(
    State(state): State<S>,
    user_id: UserID,
) -> Result<Json<Progress>> {
    let progress = compute_progress(state.db(), *user_id).await?;

    Ok(Json(progress))
}
