use super::list::PublicQuestion;
use crate::{
    best::best,
    error,
    extractors::{Json, UserID},
    handlers::submission::SubmissionView,
    utils::parse_id,
    Result, StateTrait,
};
use axum::extract::{Path, State};
use entity::{questions, submissions};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    question: PublicQuestion,
    submissions: Vec<SubmissionView>,
    best_submission: Option<SubmissionView>,
}

/// An active question with the caller's own attempts on it, newest first.
pub async fn get_question_details<S: StateTrait>(
    State(state): State<S>,
    user_id: UserID,
    Path(id): Path<String>,
) -> Result<Json<Response>> {
    let id = parse_id(&id, error::QUESTION_NOT_FOUND)?;

    let question = questions::Entity::find_active()
        .filter(questions::Column::Id.eq(id))
        .into_model::<PublicQuestion>()
        .one(state.db())
        .await?;

    let Some(question) = question else {
        return Err(error::QUESTION_NOT_FOUND);
    };

    let submissions = submissions::Entity::find_by_user(*user_id)
        .filter(submissions::Column::QuestionId.eq(id))
        .order_by_desc(submissions::Column::SubmittedAt)
        .order_by_desc(submissions::Column::Id)
        .all(state.db())
        .await?;

    let best_submission = best(submissions.iter().cloned()).map(SubmissionView::from);

    Ok(Json(Response {
        question,
        submissions: submissions.into_iter().map(SubmissionView::from).collect(),
        best_submission,
    }))
}
