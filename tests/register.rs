mod utils;

use utils::prelude::*;

#[tokio::test]
async fn success() {
    let app = setup().await;
    let user = app.unregistered_user();

    let res = app
        .post("/v1/register")
        .user(&user)
        .json(&json!({
            "name": "Test User",
            "email": "test@test.test",
        }))
        .send()
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn already_registered() {
    let app = setup().await;
    let user = app.register_user().await;

    let res = app
        .post("/v1/register")
        .user(&user)
        .json(&json!({
            "name": "Test User",
            "email": "other@test.test",
        }))
        .send()
        .await;

    assert_error!(res, error::USER_ALREADY_EXISTS);
}

#[tokio::test]
async fn invalid_email() {
    let app = setup().await;
    let user = app.unregistered_user();

    let res = app
        .post("/v1/register")
        .user(&user)
        .json(&json!({
            "name": "Test User",
            "email": "not an email",
        }))
        .send()
        .await;

    assert_error!(res, error::JSON_VALIDATE_INVALID);
}

#[tokio::test]
async fn missing_fields() {
    let app = setup().await;
    let user = app.unregistered_user();

    let res = app
        .post("/v1/register")
        .user(&user)
        .json(&json!({
            "name": "Test User",
        }))
        .send()
        .await;

    assert_error!(res, error::JSON_MISSING_FIELDS);
}

#[tokio::test]
async fn no_token() {
    let app = setup().await;

    let res = app
        .post("/v1/register")
        .json(&json!({
            "name": "Test User",
            "email": "test@test.test",
        }))
        .send()
        .await;

    assert_error!(res, error::COULD_NOT_GET_CLAIMS);
}

#[tokio::test]
async fn health() {
    let app = setup().await;

    assert_eq!(app.get("/livez").send().await.status(), StatusCode::OK);
    assert_eq!(app.get("/readyz").send().await.status(), StatusCode::OK);
}
