use chrono::Utc;
use entity::{
    companies, questions, submissions, topics, users, Difficulty, Status, SubmissionStatus,
};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn next() -> usize {
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A private, migrated in-memory database.
///
/// Limited to a single connection, every connection to `sqlite::memory:` would see a database of
/// its own.
pub async fn memory_database() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .expect("failed to open in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("failed to apply migrations");

    db
}

pub async fn seed_user(db: &DatabaseConnection, id: i32) -> users::Model {
    users::ActiveModel {
        id: Set(id),
        name: Set(format!("User {id}")),
        email: Set(format!("user{id}@example.com")),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("failed to seed user")
}

pub async fn seed_question_with(
    db: &DatabaseConnection,
    difficulty: Difficulty,
    solution: &str,
) -> questions::Model {
    let n = next();
    let now = Utc::now();

    let company = companies::ActiveModel {
        name: Set(format!("Company {n}")),
        domain: Set(format!("company{n}.example.com")),
        category: Set("tech".to_owned()),
        status: Set(Status::Active),
        logo_url: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed company");

    let topic = topics::ActiveModel {
        name: Set(format!("Topic {n}")),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed topic");

    questions::ActiveModel {
        title: Set(format!("Question {n}")),
        company_id: Set(company.id),
        topic_id: Set(topic.id),
        db_type: Set("sql".to_owned()),
        difficulty: Set(difficulty),
        status: Set(Status::Active),
        question: Set("Select everything".to_owned()),
        schema: Set(None),
        schema_image: Set(None),
        solution: Set(Some(solution.to_owned())),
        query: Set(r#"{"createTable":"","addData":""}"#.to_owned()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed question")
}

pub async fn seed_question(db: &DatabaseConnection, solution: &str) -> questions::Model {
    seed_question_with(db, Difficulty::Beginner, solution).await
}

pub async fn seed_submission(
    db: &DatabaseConnection,
    user_id: i32,
    question_id: i32,
    status: SubmissionStatus,
) -> submissions::Model {
    submissions::ActiveModel {
        user_id: Set(user_id),
        question_id: Set(question_id),
        code: Set("SELECT 1".to_owned()),
        db_type: Set("sql".to_owned()),
        score: Set(if status == SubmissionStatus::Passed { 100 } else { 0 }),
        status: Set(status),
        result: Set(None),
        error: Set(None),
        run_time: Set(1),
        submitted_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed submission")
}
