mod list;
mod run;
mod submit;

use crate::StateTrait;
use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use entity::{submissions, SubmissionStatus};
use sea_orm::JsonValue;
use serde::Serialize;

/// Routes for running and grading queries
///
/// POST /submission/run
/// POST /submission/submit
///
/// # Admin actions
/// GET  /admin/submission
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/run", post(run::run_query::<S>))
        .route("/submit", post(submit::submit_query::<S>))
}

pub fn admin_routes<S: StateTrait>() -> Router<S> {
    Router::new().route("/", get(list::list_submissions::<S>))
}

/// A stored submission with its result rows decoded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub id: i32,
    pub user_id: i32,
    pub question_id: i32,
    pub code: String,
    pub db_type: String,
    pub score: i32,
    pub status: SubmissionStatus,
    pub result: Option<JsonValue>,
    pub error: Option<String>,
    pub run_time: i64,
    pub submitted_at: DateTime<Utc>,
}

fn decode_result(submission_id: i32, result: Option<&str>) -> Option<JsonValue> {
    let raw = result?;

    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(submission_id, "stored result is not valid json: {}", err);
            None
        }
    }
}

impl From<submissions::Model> for SubmissionView {
    fn from(model: submissions::Model) -> Self {
        Self {
            result: decode_result(model.id, model.result.as_deref()),
            id: model.id,
            user_id: model.user_id,
            question_id: model.question_id,
            code: model.code,
            db_type: model.db_type,
            score: model.score,
            status: model.status,
            error: model.error,
            run_time: model.run_time,
            submitted_at: model.submitted_at,
        }
    }
}
