use super::{
    request::RequestBuilder,
    user::{mint_token, User},
};
use http::StatusCode;
use migration::MigratorTrait;
use reqwest::Client;
use sea_orm::{ConnectOptions, Database, DbConn};
use serde_json::{json, Value};
use sql_practice_backend::{Config, State};
use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicI32, Ordering},
        Arc,
    },
};
use tokio::net::TcpListener;
use tracing::log::LevelFilter;

pub const JWT_SECRET: &str = "integration-test-secret";

async fn setup_database() -> DbConn {
    // every connection to an in-memory database gets its own database
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging_level(LevelFilter::Debug);

    let db = Database::connect(opts)
        .await
        .expect("failed to connect to database");

    migration::Migrator::up(&db, None)
        .await
        .expect("failed to apply migrations");

    db
}

async fn setup_backend(db: DbConn) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = Config::new("sqlite::memory:", JWT_SECRET);
    let state = State::with_database(config, db);

    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        sql_practice_backend::run(listener, state).await.unwrap();
    });

    addr
}

#[allow(unused)]
pub async fn setup() -> App {
    let db = setup_database().await;
    let addr = setup_backend(db).await;

    App {
        addr,
        client: Client::new(),
        user_num: Arc::new(AtomicI32::new(1)),
    }
}

#[derive(Clone)]
pub struct App {
    pub addr: SocketAddr,
    pub client: Client,
    user_num: Arc<AtomicI32>,
}

#[allow(unused)]
impl App {
    fn get_url(&self, url: &str) -> String {
        format!("http://{}{}", self.addr, url)
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.get(self.get_url(url)))
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.post(self.get_url(url)))
    }

    pub fn put(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.put(self.get_url(url)))
    }

    pub fn delete(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.delete(self.get_url(url)))
    }
}

#[allow(unused)]
impl App {
    /// A user with a valid token but no local account.
    pub fn unregistered_user(&self) -> User {
        let id = self.user_num.fetch_add(1, Ordering::Relaxed);
        User::new(id, mint_token(id, &[]))
    }

    pub async fn register_user(&self) -> User {
        let user = self.unregistered_user();

        let res = self
            .post("/v1/register")
            .user(&user)
            .json(&json!({
                "name": format!("Test User {}", user.id),
                "email": format!("user{}@test.test", user.id),
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);

        user
    }

    pub async fn register_admin(&self) -> User {
        let user = self.register_user().await;
        User::new(user.id, mint_token(user.id, &["practice.admin"]))
    }

    pub async fn create_company(&self, admin: &User, domain: &str) -> i32 {
        let res = self
            .post("/v1/admin/company")
            .user(admin)
            .json(&json!({
                "name": "Test Company",
                "domain": domain,
                "category": "tech",
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = res.json().await;
        body["id"].as_i64().expect("no company id") as i32
    }

    pub async fn create_topic(&self, admin: &User, name: &str) -> i32 {
        let res = self
            .post("/v1/admin/topic")
            .user(admin)
            .json(&json!({ "name": name }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = res.json().await;
        body["id"].as_i64().expect("no topic id") as i32
    }

    /// Creates a company, a topic and an active question backed by a two row `employees` style
    /// table called `table`.
    pub async fn create_question(&self, admin: &User, table: &str, solution: &str) -> Value {
        let company_id = self.create_company(admin, &format!("{table}.example.com")).await;
        let topic_id = self.create_topic(admin, &format!("{table} topic")).await;

        let res = self
            .post("/v1/admin/question")
            .user(admin)
            .json(&json!({
                "title": format!("Question on {table}"),
                "companyId": company_id,
                "topicId": topic_id,
                "dbType": "sql",
                "difficulty": "beginner",
                "question": "Find the employee with id 1",
                "solution": solution,
                "query": {
                    "createTable": format!("CREATE TABLE {table}(id INTEGER, name TEXT)"),
                    "addData": format!("INSERT INTO {table} (id, name) VALUES (1, 'Alice'), (2, 'Bob')"),
                },
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);

        res.json().await
    }
}
