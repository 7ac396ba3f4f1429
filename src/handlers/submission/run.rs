use crate::{
    error,
    extractors::{Json, UserID},
    sandbox::{RunStatus, Sandbox},
    Result, StateTrait,
};
use axum::extract::State;
use chrono::{DateTime, Utc};
use sea_orm::JsonValue;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    question_id: Option<i32>,
    code: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    status: RunStatus,
    data: Option<Vec<JsonValue>>,
    error: Option<String>,
    submitted_at: DateTime<Utc>,
    run_time: i64,
}

/// Runs a query without grading or storing it.
pub async fn run_query<S: StateTrait>(
    State(state): State<S>,
    user_id: UserID,
    Json(request): Json<Request>,
) -> Result<Json<Response>> {
    let (Some(question_id), Some(code)) = (
        request.question_id,
        request.code.filter(|code| !code.trim().is_empty()),
    ) else {
        return Err(error::MISSING_FIELDS);
    };

    let submitted_at = Utc::now();

    let outcome = Sandbox::new(state.db(), state.config().statement_timeout)
        .run(&code)
        .await;

    if outcome.is_success() {
        debug!(user_id = *user_id, question_id, "ran query");
    } else {
        debug!(
            user_id = *user_id,
            question_id,
            "query failed: {}",
            outcome.error.as_deref().unwrap_or_default()
        );
    }

    Ok(Json(Response {
        status: outcome.status,
        data: outcome.rows,
        error: outcome.error,
        submitted_at,
        run_time: outcome.run_time_ms,
    }))
}
