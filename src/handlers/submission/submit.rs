use super::SubmissionView;
use crate::{
    error,
    extractors::{Json, UserID},
    grading::{verdict, GradeRequest, Grader},
    Result, StateTrait,
};
use axum::extract::State;
use entity::users;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    question_id: Option<i32>,
    code: Option<String>,
    db_type: Option<String>,
}

#[derive(Serialize)]
pub struct Response {
    message: &'static str,
    submission: SubmissionView,
}

pub async fn submit_query<S: StateTrait>(
    State(state): State<S>,
    user_id: UserID,
    Json(request): Json<Request>,
) -> Result<Json<Response>> {
    let registered = users::Entity::find_by_id(*user_id)
        .count(state.db())
        .await?;

    if registered == 0 {
        return Err(error::USER_NOT_REGISTERED);
    }

    let config = state.config();
    let grader = Grader::new(state.db(), config.statement_timeout, config.comparison_mode);

    let submission = grader
        .grade(GradeRequest {
            user_id: Some(*user_id),
            question_id: request.question_id,
            code: request.code,
            db_type: request.db_type,
        })
        .await?;

    Ok(Json(Response {
        message: verdict(submission.status),
        submission: submission.into(),
    }))
}
