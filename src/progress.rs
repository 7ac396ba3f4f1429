use crate::error::Result;
use entity::{questions, submissions, Difficulty, SubmissionStatus};
use futures::TryStreamExt;
use sea_orm::{
    ConnectionTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryOrder,
    QuerySelect, RelationTrait, StreamTrait,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyCounts {
    pub attempted: usize,
    pub solved: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyProgress {
    pub beginner: DifficultyCounts,
    pub intermediate: DifficultyCounts,
    pub advanced: DifficultyCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total_attempted: usize,
    pub total_solved: usize,
    pub overall_progress: u32,
    pub difficulty_progress: DifficultyProgress,
}

#[derive(Default)]
struct QuestionSets {
    attempted: HashSet<i32>,
    solved: HashSet<i32>,
}

impl QuestionSets {
    fn counts(&self) -> DifficultyCounts {
        DifficultyCounts {
            attempted: self.attempted.len(),
            solved: self.solved.len(),
        }
    }
}

/// Folds submissions into distinct attempted and solved questions.
///
/// Repeated attempts on one question count once.
#[derive(Default)]
pub struct ProgressBuilder {
    overall: QuestionSets,
    by_difficulty: HashMap<Difficulty, QuestionSets>,
}

impl ProgressBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question_id: i32, difficulty: Difficulty, status: SubmissionStatus) {
        let sets = self.by_difficulty.entry(difficulty).or_default();

        self.overall.attempted.insert(question_id);
        sets.attempted.insert(question_id);

        if status == SubmissionStatus::Passed {
            self.overall.solved.insert(question_id);
            sets.solved.insert(question_id);
        }
    }

    pub fn finish(self, total_active_questions: u64) -> Progress {
        let counts = |difficulty: Difficulty| {
            self.by_difficulty
                .get(&difficulty)
                .map(QuestionSets::counts)
                .unwrap_or_default()
        };

        let total_solved = self.overall.solved.len();

        Progress {
            total_attempted: self.overall.attempted.len(),
            total_solved,
            overall_progress: percentage(total_solved, total_active_questions),
            difficulty_progress: DifficultyProgress {
                beginner: counts(Difficulty::Beginner),
                intermediate: counts(Difficulty::Intermediate),
                advanced: counts(Difficulty::Advanced),
            },
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage(solved: usize, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }

    let percent = (solved as f64 * 100.0 / total as f64).round();
    percent.min(100.0) as u32
}

#[derive(Debug, FromQueryResult)]
struct Attempt {
    question_id: i32,
    difficulty: Difficulty,
    status: SubmissionStatus,
}

pub async fn compute_progress<C>(conn: &C, user_id: i32) -> Result<Progress>
where
    C: ConnectionTrait + StreamTrait + Send,
{
    let total_active = questions::Entity::find_active().count(conn).await?;

    let mut builder = ProgressBuilder::new();

    let mut attempts = submissions::Entity::find_by_user(user_id)
        .select_only()
        .column(submissions::Column::QuestionId)
        .column(submissions::Column::Status)
        .column(questions::Column::Difficulty)
        .join(JoinType::InnerJoin, submissions::Relation::Question.def())
        .order_by_asc(submissions::Column::QuestionId)
        .order_by_desc(submissions::Column::SubmittedAt)
        .into_model::<Attempt>()
        .stream(conn)
        .await?;

    while let Some(attempt) = attempts.try_next().await? {
        builder.record(attempt.question_id, attempt.difficulty, attempt.status);
    }

    Ok(builder.finish(total_active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{memory_database, seed_question_with, seed_submission, seed_user};

    #[test]
    fn repeated_passes_count_once() {
        let mut builder = ProgressBuilder::new();
        builder.record(1, Difficulty::Beginner, SubmissionStatus::Passed);
        builder.record(1, Difficulty::Beginner, SubmissionStatus::Passed);
        builder.record(1, Difficulty::Beginner, SubmissionStatus::Error);

        let progress = builder.finish(4);

        assert_eq!(progress.total_attempted, 1);
        assert_eq!(progress.total_solved, 1);
        assert_eq!(progress.overall_progress, 25);
        assert_eq!(
            progress.difficulty_progress.beginner,
            DifficultyCounts {
                attempted: 1,
                solved: 1
            }
        );
    }

    #[test]
    fn no_questions_means_no_progress() {
        let progress = ProgressBuilder::new().finish(0);

        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn percentage_rounds_and_clamps() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(5, 3), 100);
    }

    #[test]
    fn serializes_in_camel_case() {
        let value = serde_json::to_value(ProgressBuilder::new().finish(1)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "totalAttempted": 0,
                "totalSolved": 0,
                "overallProgress": 0,
                "difficultyProgress": {
                    "beginner": {"attempted": 0, "solved": 0},
                    "intermediate": {"attempted": 0, "solved": 0},
                    "advanced": {"attempted": 0, "solved": 0},
                },
            })
        );
    }

    #[tokio::test]
    async fn aggregates_submissions_of_one_user() {
        let db = memory_database().await;
        let user = seed_user(&db, 1).await;
        let other = seed_user(&db, 2).await;

        let easy = seed_question_with(&db, Difficulty::Beginner, "SELECT 1").await;
        let medium = seed_question_with(&db, Difficulty::Intermediate, "SELECT 1").await;
        let hard = seed_question_with(&db, Difficulty::Advanced, "SELECT 1").await;
        seed_question_with(&db, Difficulty::Advanced, "SELECT 1").await;

        seed_submission(&db, user.id, easy.id, SubmissionStatus::Passed).await;
        seed_submission(&db, user.id, easy.id, SubmissionStatus::Passed).await;
        seed_submission(&db, user.id, medium.id, SubmissionStatus::Mismatch).await;
        seed_submission(&db, user.id, hard.id, SubmissionStatus::Error).await;
        seed_submission(&db, user.id, hard.id, SubmissionStatus::Passed).await;
        seed_submission(&db, other.id, medium.id, SubmissionStatus::Passed).await;

        let progress = compute_progress(&db, user.id).await.unwrap();

        assert_eq!(progress.total_attempted, 3);
        assert_eq!(progress.total_solved, 2);
        assert_eq!(progress.overall_progress, 50);
        assert_eq!(
            progress.difficulty_progress,
            DifficultyProgress {
                beginner: DifficultyCounts {
                    attempted: 1,
                    solved: 1
                },
                intermediate: DifficultyCounts {
                    attempted: 1,
                    solved: 0
                },
                advanced: DifficultyCounts {
                    attempted: 1,
                    solved: 1
                },
            }
        );
    }
}
