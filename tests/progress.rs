mod utils;

use utils::prelude::*;

async fn submit(app: &App, user: &User, question: &Value, code: &str) {
    let res = app
        .post("/v1/submission/submit")
        .user(user)
        .json(&json!({
            "questionId": question["id"],
            "code": code,
            "dbType": "sql",
        }))
        .send()
        .await;

    assert_eq!(res.status(), StatusCode::OK);
}

async fn update(app: &App, admin: &User, question: &Value, body: Value) {
    let res = app
        .put(&format!("/v1/admin/question/{}", question["id"]))
        .user(admin)
        .json(&body)
        .send()
        .await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn no_submissions() {
    let app = setup().await;
    let user = app.register_user().await;

    let res = app.get("/v1/question/progress").user(&user).send().await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await;
    assert_json_eq!(
        body,
        json!({
            "totalAttempted": 0,
            "totalSolved": 0,
            "overallProgress": 0,
            "difficultyProgress": {
                "beginner": { "attempted": 0, "solved": 0 },
                "intermediate": { "attempted": 0, "solved": 0 },
                "advanced": { "attempted": 0, "solved": 0 },
            },
        })
    );
}

#[tokio::test]
async fn counts_distinct_questions() {
    let app = setup().await;
    let admin = app.register_admin().await;
    let user = app.register_user().await;
    let other = app.register_user().await;

    let employees = app
        .create_question(&admin, "employees", "SELECT id, name FROM employees WHERE id = 1")
        .await;
    let managers = app
        .create_question(&admin, "managers", "SELECT name FROM managers WHERE id = 2")
        .await;
    let archived = app
        .create_question(&admin, "archived", "SELECT id FROM archived")
        .await;

    update(&app, &admin, &managers, json!({ "difficulty": "advanced" })).await;
    update(&app, &admin, &archived, json!({ "status": "inactive" })).await;

    submit(&app, &user, &employees, "SELECT id FROM employees").await;
    submit(&app, &user, &employees, "SELECT id, name FROM employees WHERE id = 1").await;
    submit(&app, &user, &employees, "SELECT id, name FROM employees WHERE id = 1").await;
    submit(&app, &user, &managers, "SELECT name FROM managers").await;
    submit(&app, &other, &managers, "SELECT name FROM managers WHERE id = 2").await;

    let res = app.get("/v1/question/progress").user(&user).send().await;
    let body: Value = res.json().await;

    assert_json_eq!(
        body,
        json!({
            "totalAttempted": 2,
            "totalSolved": 1,
            "overallProgress": 50,
            "difficultyProgress": {
                "beginner": { "attempted": 1, "solved": 1 },
                "intermediate": { "attempted": 0, "solved": 0 },
                "advanced": { "attempted": 1, "solved": 0 },
            },
        })
    );

    let res = app.get("/v1/admin/summary").user(&admin).send().await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await;
    assert_json_eq!(
        body,
        json!({
            "totalQuestions": 3,
            "totalCompanies": 3,
            "totalUsers": 3,
            "totalSubmissions": 5,
        })
    );
}

#[tokio::test]
async fn summary_requires_admin() {
    let app = setup().await;
    let user = app.register_user().await;

    let res = app.get("/v1/admin/summary").user(&user).send().await;
    assert_error!(res, error::NOT_ENOUGH_PERMISSIONS);
}
