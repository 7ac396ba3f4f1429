mod utils;

use utils::prelude::*;

const SOLUTION: &str = "SELECT id, name FROM employees WHERE id = 1";

async fn submit(app: &App, user: &User, question_id: &Value, code: &str) -> TestResponse {
    app.post("/v1/submission/submit")
        .user(user)
        .json(&json!({
            "questionId": question_id,
            "code": code,
            "dbType": "sql",
        }))
        .send()
        .await
}

mod run {
    use super::*;

    #[tokio::test]
    async fn success() {
        let app = setup().await;
        let admin = app.register_admin().await;
        let user = app.unregistered_user();
        let question = app.create_question(&admin, "employees", SOLUTION).await;

        let res = app
            .post("/v1/submission/run")
            .user(&user)
            .json(&json!({
                "questionId": question["id"],
                "code": SOLUTION,
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await;
        assert_eq!(body["status"], "success");
        assert!(body["error"].is_null());
        assert!(body["runTime"].is_i64());
        assert!(body["submittedAt"].is_string());
        assert_json_eq!(body["data"], json!([{ "id": 1, "name": "Alice" }]));
    }

    #[tokio::test]
    async fn broken_query() {
        let app = setup().await;
        let user = app.unregistered_user();

        let res = app
            .post("/v1/submission/run")
            .user(&user)
            .json(&json!({
                "questionId": 1,
                "code": "SELEC * FROM nowhere",
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await;
        assert_eq!(body["status"], "error");
        assert!(body["data"].is_null());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn missing_fields() {
        let app = setup().await;
        let user = app.unregistered_user();

        let res = app
            .post("/v1/submission/run")
            .user(&user)
            .json(&json!({ "questionId": 1 }))
            .send()
            .await;

        assert_error!(res, error::MISSING_FIELDS);
    }
}

mod submit {
    use super::*;

    #[tokio::test]
    async fn correct_answer() {
        let app = setup().await;
        let admin = app.register_admin().await;
        let user = app.register_user().await;
        let question = app.create_question(&admin, "employees", SOLUTION).await;

        let res = submit(&app, &user, &question["id"], "SELECT name, id FROM employees WHERE id = 1").await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await;
        assert_json_include!(
            actual: body,
            expected: json!({
                "message": "Correct answer!",
                "submission": {
                    "userId": user.id,
                    "questionId": question["id"],
                    "status": "passed",
                    "score": 100,
                    "error": null,
                    "result": [{ "id": 1, "name": "Alice" }],
                },
            })
        );
    }

    #[tokio::test]
    async fn wrong_rows_are_a_mismatch() {
        let app = setup().await;
        let admin = app.register_admin().await;
        let user = app.register_user().await;
        let question = app.create_question(&admin, "employees", SOLUTION).await;

        let res = submit(&app, &user, &question["id"], "SELECT id, name FROM employees").await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await;
        assert_json_include!(
            actual: body,
            expected: json!({
                "message": "Your query's output doesn't match with the solution's output!",
                "submission": {
                    "status": "mismatch",
                    "score": 0,
                    "result": null,
                },
            })
        );
    }

    #[tokio::test]
    async fn broken_query_is_an_error() {
        let app = setup().await;
        let admin = app.register_admin().await;
        let user = app.register_user().await;
        let question = app.create_question(&admin, "employees", SOLUTION).await;

        let res = submit(&app, &user, &question["id"], "SELECT nope FROM employees").await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await;
        assert_eq!(body["message"], "There was an error while executing your query.");
        assert_eq!(body["submission"]["status"], "error");
        assert!(body["submission"]["error"].is_string());
    }

    #[tokio::test]
    async fn unregistered_user() {
        let app = setup().await;
        let admin = app.register_admin().await;
        let user = app.unregistered_user();
        let question = app.create_question(&admin, "employees", SOLUTION).await;

        let res = submit(&app, &user, &question["id"], SOLUTION).await;
        assert_error!(res, error::USER_NOT_REGISTERED);
    }

    #[tokio::test]
    async fn missing_fields() {
        let app = setup().await;
        let user = app.register_user().await;

        let res = app
            .post("/v1/submission/submit")
            .user(&user)
            .json(&json!({ "questionId": 1, "code": "SELECT 1" }))
            .send()
            .await;

        assert_error!(res, error::MISSING_FIELDS);
    }

    #[tokio::test]
    async fn unknown_question() {
        let app = setup().await;
        let user = app.register_user().await;

        let res = submit(&app, &user, &json!(9999), "SELECT 1").await;
        assert_error!(res, error::SOLUTION_NOT_FOUND);
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn best_submission_per_user_and_question() {
        let app = setup().await;
        let admin = app.register_admin().await;
        let alice = app.register_user().await;
        let bob = app.register_user().await;
        let question = app.create_question(&admin, "employees", SOLUTION).await;

        submit(&app, &alice, &question["id"], SOLUTION).await;
        submit(&app, &alice, &question["id"], "SELECT id, name FROM employees").await;
        submit(&app, &bob, &question["id"], "SELECT nope FROM employees").await;
        submit(&app, &bob, &question["id"], "SELECT id, name FROM employees").await;

        let res = app.get("/v1/admin/submission").user(&admin).send().await;
        assert_eq!(res.status(), StatusCode::OK);

        let list: Value = res.json().await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 2);

        let best_of = |user: &User| {
            list.iter()
                .find(|s| s["userId"] == user.id)
                .expect("no submission for user")
        };

        assert_eq!(best_of(&alice)["status"], "passed");
        assert_eq!(best_of(&bob)["status"], "mismatch");
        assert_eq!(best_of(&bob)["questionTitle"], "Question on employees");

        let res = app
            .get("/v1/admin/submission")
            .user(&admin)
            .query(&[("status", "passed")])
            .send()
            .await;
        let list: Value = res.json().await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["userId"], alice.id);

        let res = app
            .get("/v1/admin/submission")
            .user(&admin)
            .query(&[("search", format!("user{}@", bob.id))])
            .send()
            .await;
        let list: Value = res.json().await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["userEmail"], format!("user{}@test.test", bob.id));
    }
}
