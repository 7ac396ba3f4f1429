use crate::{
    error::{self, DatabaseError},
    extractors::{Json, ValidatedJson},
    jwt::Claims,
    utils::parse_id,
    Result, StateTrait,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use entity::{
    domains::{self, constraints::*},
    Status,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use validator::Validate;

/// Routes for domains
///
/// GET    /domain
/// POST   /admin/domain
/// PUT    /admin/domain/:id
/// DELETE /admin/domain/:id
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new().route("/", get(list_domains::<S>))
}

pub fn admin_routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/", post(create_domain::<S>))
        .route("/:id", put(update_domain::<S>).delete(delete_domain::<S>))
}

#[derive(Deserialize, Validate)]
pub struct CreateRequest {
    #[validate(length(min = 2, max = 100))]
    name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    description: String,
    #[serde(default)]
    status: Status,
}

#[derive(Deserialize, Validate)]
pub struct UpdateRequest {
    #[validate(length(min = 2, max = 100))]
    name: Option<String>,
    #[validate(length(max = 1000))]
    description: Option<String>,
    status: Option<Status>,
}

pub async fn list_domains<S: StateTrait>(
    State(state): State<S>,
    _claims: Claims,
) -> Result<Json<Vec<domains::Model>>> {
    let res = domains::Entity::find()
        .order_by_asc(domains::Column::Name)
        .all(state.db())
        .await?;

    Ok(Json(res))
}

pub async fn create_domain<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<CreateRequest>,
) -> Result<(StatusCode, Json<domains::Model>)> {
    let domain = domains::ActiveModel {
        name: Set(request.name),
        description: Set(request.description),
        status: Set(request.status),
        ..Default::default()
    };

    let domain = match domain.insert(state.db()).await {
        Err(err) if err.unique_violation(UC_DOMAINS_NAME) => {
            return Err(error::DUPLICATE_DOMAIN_NAME)
        }
        r => r?,
    };

    Ok((StatusCode::CREATED, Json(domain)))
}

pub async fn update_domain<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRequest>,
) -> Result<Json<domains::Model>> {
    let id = parse_id(&id, error::DOMAIN_NOT_FOUND)?;

    let Some(domain) = domains::Entity::find_by_id(id).one(state.db()).await? else {
        return Err(error::DOMAIN_NOT_FOUND);
    };

    let mut active: domains::ActiveModel = domain.clone().into();

    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(description) = request.description {
        active.description = Set(description);
    }
    if let Some(status) = request.status {
        active.status = Set(status);
    }

    if !active.is_changed() {
        return Ok(Json(domain));
    }

    let domain = match active.update(state.db()).await {
        Err(err) if err.unique_violation(UC_DOMAINS_NAME) => {
            return Err(error::DUPLICATE_DOMAIN_NAME)
        }
        r => r?,
    };

    Ok(Json(domain))
}

/// Links to companies go with the domain.
pub async fn delete_domain<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, error::DOMAIN_NOT_FOUND)?;

    let res = domains::Entity::delete_by_id(id).exec(state.db()).await?;

    if res.rows_affected == 0 {
        return Err(error::DOMAIN_NOT_FOUND);
    }

    Ok(StatusCode::OK)
}
