use crate::{
    config::ComparisonMode,
    engine::SqlEngine,
    error::{self, Result},
    sandbox::Sandbox,
};
use chrono::Utc;
use entity::{questions, submissions, SubmissionStatus};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, JsonValue, Set};
use serde_json::Map;
use std::time::Duration;

pub const MISMATCH_MESSAGE: &str = "output doesn't match the solution's output";

#[derive(Debug, Clone, Default)]
pub struct GradeRequest {
    pub user_id: Option<i32>,
    pub question_id: Option<i32>,
    pub code: Option<String>,
    pub db_type: Option<String>,
}

/// Human readable verdict for a graded submission.
pub fn verdict(status: SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::Passed => "Correct answer!",
        SubmissionStatus::Mismatch => "Your query's output doesn't match with the solution's output!",
        SubmissionStatus::Failed => "Your answer is incorrect.",
        SubmissionStatus::Error => "There was an error while executing your query.",
    }
}

fn sort_keys(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            JsonValue::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect::<Map<_, _>>(),
            )
        }
        JsonValue::Array(values) => JsonValue::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Serializes every row with its keys in a fixed order.
pub fn canonicalize(rows: &[JsonValue]) -> Vec<String> {
    rows.iter()
        .map(|row| sort_keys(row.clone()).to_string())
        .collect()
}

/// Ordered mode keeps the engine's row order, unordered mode compares the rows as multisets.
pub fn results_match(user: &[JsonValue], solution: &[JsonValue], mode: ComparisonMode) -> bool {
    let mut user = canonicalize(user);
    let mut solution = canonicalize(solution);

    if mode == ComparisonMode::Unordered {
        user.sort_unstable();
        solution.sort_unstable();
    }

    user == solution
}

pub struct Grader<'a, C> {
    conn: &'a C,
    timeout: Duration,
    mode: ComparisonMode,
}

impl<'a, C: ConnectionTrait + SqlEngine> Grader<'a, C> {
    pub fn new(conn: &'a C, timeout: Duration, mode: ComparisonMode) -> Self {
        Self {
            conn,
            timeout,
            mode,
        }
    }

    /// Runs the submitted code and the stored solution, compares their rows and records the attempt.
    ///
    /// A submission row is written for every graded attempt, including ones whose code failed.
    pub async fn grade(&self, request: GradeRequest) -> Result<submissions::Model> {
        let (Some(user_id), Some(question_id), Some(code), Some(db_type)) = (
            request.user_id,
            request.question_id,
            request.code.filter(|code| !code.trim().is_empty()),
            request.db_type.filter(|db_type| !db_type.trim().is_empty()),
        ) else {
            return Err(error::MISSING_FIELDS);
        };

        let submitted_at = Utc::now();

        let question = questions::Entity::find_by_id(question_id)
            .one(self.conn)
            .await?
            .ok_or(error::SOLUTION_NOT_FOUND)?;

        let Some(solution) = question.solution.filter(|s| !s.trim().is_empty()) else {
            return Err(error::SOLUTION_NOT_FOUND);
        };

        let sandbox = Sandbox::new(self.conn, self.timeout);

        let user = sandbox.run(&code).await;
        let run_time = user.run_time_ms;

        let (status, score, result, error) = match user.rows {
            None => (SubmissionStatus::Error, 0, None, user.error),
            Some(user_rows) => {
                let expected = sandbox.run(&solution).await;

                match expected.rows {
                    None => {
                        error!(
                            question_id,
                            "stored solution failed to execute: {}",
                            expected.error.as_deref().unwrap_or_default()
                        );
                        let message = format!(
                            "solution failed to execute: {}",
                            expected.error.unwrap_or_default()
                        );
                        (SubmissionStatus::Error, 0, None, Some(message))
                    }
                    Some(solution_rows) if results_match(&user_rows, &solution_rows, self.mode) => {
                        let result = serde_json::to_string(&user_rows)?;
                        (SubmissionStatus::Passed, 100, Some(result), None)
                    }
                    Some(_) => (
                        SubmissionStatus::Mismatch,
                        0,
                        None,
                        Some(MISMATCH_MESSAGE.to_owned()),
                    ),
                }
            }
        };

        let submission = submissions::ActiveModel {
            user_id: Set(user_id),
            question_id: Set(question_id),
            code: Set(code),
            db_type: Set(db_type),
            score: Set(score),
            status: Set(status),
            result: Set(result),
            error: Set(error),
            run_time: Set(run_time),
            submitted_at: Set(submitted_at),
            ..Default::default()
        };

        let submission = submission.insert(self.conn).await?;

        info!(
            user_id,
            question_id,
            status = ?submission.status,
            run_time,
            "graded submission"
        );

        Ok(submission)
    }
}
