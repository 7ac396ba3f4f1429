use super::{decode_result, SubmissionView};
use crate::{
    best::{best_per_pair, Ranked},
    extractors::Json,
    Result, StateTrait,
};
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use entity::{questions, submissions, users, SubmissionStatus};
use sea_orm::{
    sea_query::Condition, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct Filters {
    question_id: Option<i32>,
    db_type: Option<String>,
    status: Option<SubmissionStatus>,
    search: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct Row {
    id: i32,
    user_id: i32,
    question_id: i32,
    code: String,
    db_type: String,
    score: i32,
    status: SubmissionStatus,
    result: Option<String>,
    error: Option<String>,
    run_time: i64,
    submitted_at: DateTime<Utc>,
    user_name: String,
    user_email: String,
    question_title: String,
}

impl Ranked for Row {
    fn pair(&self) -> (i32, i32) {
        (self.user_id, self.question_id)
    }

    fn status(&self) -> SubmissionStatus {
        self.status
    }

    fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(flatten)]
    submission: SubmissionView,
    user_name: String,
    user_email: String,
    question_title: String,
}

impl From<Row> for Response {
    fn from(row: Row) -> Self {
        Self {
            submission: SubmissionView {
                result: decode_result(row.id, row.result.as_deref()),
                id: row.id,
                user_id: row.user_id,
                question_id: row.question_id,
                code: row.code,
                db_type: row.db_type,
                score: row.score,
                status: row.status,
                error: row.error,
                run_time: row.run_time,
                submitted_at: row.submitted_at,
            },
            user_name: row.user_name,
            user_email: row.user_email,
            question_title: row.question_title,
        }
    }
}

/// The best submission of every (user, question) pair matching the filters.
pub async fn list_submissions<S: StateTrait>(
    State(state): State<S>,
    Query(filters): Query<Filters>,
) -> Result<Json<Vec<Response>>> {
    let mut query = submissions::Entity::find()
        .column_as(users::Column::Name, "user_name")
        .column_as(users::Column::Email, "user_email")
        .column_as(questions::Column::Title, "question_title")
        .join(JoinType::InnerJoin, submissions::Relation::User.def())
        .join(JoinType::InnerJoin, submissions::Relation::Question.def())
        .order_by_desc(submissions::Column::SubmittedAt)
        .order_by_desc(submissions::Column::Id);

    if let Some(question_id) = filters.question_id {
        query = query.filter(submissions::Column::QuestionId.eq(question_id));
    }
    if let Some(db_type) = filters.db_type {
        query = query.filter(submissions::Column::DbType.eq(db_type));
    }
    if let Some(status) = filters.status {
        query = query.filter(submissions::Column::Status.eq(status));
    }
    if let Some(search) = filters.search.filter(|s| !s.trim().is_empty()) {
        query = query.filter(
            Condition::any()
                .add(users::Column::Name.contains(&search))
                .add(users::Column::Email.contains(&search))
                .add(questions::Column::Title.contains(&search)),
        );
    }

    let rows = query.into_model::<Row>().all(state.db()).await?;

    let res = best_per_pair(rows).into_iter().map(Response::from).collect();

    Ok(Json(res))
}
