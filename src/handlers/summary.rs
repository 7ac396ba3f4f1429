use crate::{extractors::Json, Result, StateTrait};
use axum::extract::State;
use entity::{companies, questions, submissions, users};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    total_questions: u64,
    total_companies: u64,
    total_users: u64,
    total_submissions: u64,
}

pub async fn get_summary<S: StateTrait>(State(state): State<S>) -> Result<Json<Response>> {
    let db = state.db();

    Ok(Json(Response {
        total_questions: questions::Entity::find().count(db).await?,
        total_companies: companies::Entity::find().count(db).await?,
        total_users: users::Entity::find().count(db).await?,
        total_submissions: submissions::Entity::find().count(db).await?,
    }))
}
