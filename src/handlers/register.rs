use crate::{
    error::{self, DatabaseError},
    extractors::{UserID, ValidatedJson},
    Result, StateTrait,
};
use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use entity::users::{self, constraints::*};
use sea_orm::{EntityTrait, Set};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct Request {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

pub async fn register<S: StateTrait>(
    State(state): State<S>,
    user_id: UserID,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<StatusCode> {
    let user = users::ActiveModel {
        id: Set(*user_id),
        name: Set(request.name),
        email: Set(request.email),
        created_at: Set(Utc::now()),
    };

    let result = users::Entity::insert(user)
        .exec_without_returning(state.db())
        .await;

    match result {
        Err(err) if err.unique_violation(PK_USERS) || err.unique_violation(UC_USERS_EMAIL) => {
            return Err(error::USER_ALREADY_EXISTS)
        }
        r => r?,
    };

    info!(user_id = *user_id, "user registered");

    Ok(StatusCode::CREATED)
}
