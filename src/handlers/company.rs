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
use chrono::Utc;
use entity::{
    companies::{self, constraints::*},
    company_domains, domains, questions, Status,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Routes for companies
///
/// # Authenticated users
/// GET    /company
/// GET    /company/:id
///
/// # Admin actions
/// POST   /admin/company
/// PUT    /admin/company/:id
/// DELETE /admin/company/:id
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/", get(list_companies::<S>))
        .route("/:id", get(get_company::<S>))
}

pub fn admin_routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/", post(create_company::<S>))
        .route("/:id", put(update_company::<S>).delete(delete_company::<S>))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(flatten)]
    company: companies::Model,
    domain_ids: Vec<i32>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[validate(length(min = 2, max = 100))]
    name: String,
    #[validate(length(min = 2, max = 255))]
    domain: String,
    #[validate(length(min = 2, max = 100))]
    category: String,
    #[serde(default)]
    status: Status,
    #[validate(url)]
    logo_url: Option<String>,
    #[serde(default)]
    domain_ids: Vec<i32>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[validate(length(min = 2, max = 100))]
    name: Option<String>,
    #[validate(length(min = 2, max = 255))]
    domain: Option<String>,
    #[validate(length(min = 2, max = 100))]
    category: Option<String>,
    status: Option<Status>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    logo_url: Option<Option<String>>,
    domain_ids: Option<Vec<i32>>,
}

async fn domain_ids<C: ConnectionTrait>(conn: &C, company_id: i32) -> Result<Vec<i32>> {
    let links = company_domains::Entity::find()
        .filter(company_domains::Column::CompanyId.eq(company_id))
        .order_by_asc(company_domains::Column::DomainId)
        .all(conn)
        .await?;

    Ok(links.into_iter().map(|link| link.domain_id).collect())
}

/// Replaces the domain links of a company. Every id has to name an existing domain.
async fn link_domains<C: ConnectionTrait>(conn: &C, company_id: i32, mut ids: Vec<i32>) -> Result {
    ids.sort_unstable();
    ids.dedup();

    let found = domains::Entity::find()
        .filter(domains::Column::Id.is_in(ids.iter().copied()))
        .count(conn)
        .await?;

    if found != ids.len() as u64 {
        return Err(error::DOMAIN_NOT_FOUND);
    }

    company_domains::Entity::delete_many()
        .filter(company_domains::Column::CompanyId.eq(company_id))
        .exec(conn)
        .await?;

    if ids.is_empty() {
        return Ok(());
    }

    let links = ids.into_iter().map(|domain_id| company_domains::ActiveModel {
        company_id: Set(company_id),
        domain_id: Set(domain_id),
    });

    company_domains::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

pub async fn create_company<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<CreateRequest>,
) -> Result<(StatusCode, Json<Response>)> {
    let txn = state.db().begin().await?;

    let company = companies::ActiveModel {
        name: Set(request.name),
        domain: Set(request.domain),
        category: Set(request.category),
        status: Set(request.status),
        logo_url: Set(request.logo_url),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let company = match company.insert(&txn).await {
        Err(err) if err.unique_violation(UC_COMPANIES_DOMAIN) => {
            return Err(error::DUPLICATE_COMPANY_DOMAIN)
        }
        r => r?,
    };

    link_domains(&txn, company.id, request.domain_ids).await?;
    let domain_ids = domain_ids(&txn, company.id).await?;

    txn.commit().await?;

    info!(company_id = company.id, "company created");

    Ok((
        StatusCode::CREATED,
        Json(Response {
            company,
            domain_ids,
        }),
    ))
}

pub async fn list_companies<S: StateTrait>(
    State(state): State<S>,
    _claims: Claims,
) -> Result<Json<Vec<Response>>> {
    let companies = companies::Entity::find()
        .order_by_asc(companies::Column::Name)
        .all(state.db())
        .await?;

    let mut links: HashMap<i32, Vec<i32>> = HashMap::new();
    for link in company_domains::Entity::find()
        .order_by_asc(company_domains::Column::DomainId)
        .all(state.db())
        .await?
    {
        links.entry(link.company_id).or_default().push(link.domain_id);
    }

    let res = companies
        .into_iter()
        .map(|company| Response {
            domain_ids: links.remove(&company.id).unwrap_or_default(),
            company,
        })
        .collect();

    Ok(Json(res))
}

pub async fn get_company<S: StateTrait>(
    State(state): State<S>,
    _claims: Claims,
    Path(id): Path<String>,
) -> Result<Json<Response>> {
    let id = parse_id(&id, error::COMPANY_NOT_FOUND)?;

    let Some(company) = companies::Entity::find_by_id(id).one(state.db()).await? else {
        return Err(error::COMPANY_NOT_FOUND);
    };

    let domain_ids = domain_ids(state.db(), company.id).await?;

    Ok(Json(Response {
        company,
        domain_ids,
    }))
}

pub async fn update_company<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRequest>,
) -> Result<Json<Response>> {
    let id = parse_id(&id, error::COMPANY_NOT_FOUND)?;

    let txn = state.db().begin().await?;

    let Some(company) = companies::Entity::find_by_id(id).one(&txn).await? else {
        return Err(error::COMPANY_NOT_FOUND);
    };

    let mut active: companies::ActiveModel = company.clone().into();

    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(domain) = request.domain {
        active.domain = Set(domain);
    }
    if let Some(category) = request.category {
        active.category = Set(category);
    }
    if let Some(status) = request.status {
        active.status = Set(status);
    }
    if let Some(logo_url) = request.logo_url {
        active.logo_url = Set(logo_url);
    }

    // an update without columns is not valid sql
    let company = if active.is_changed() {
        match active.update(&txn).await {
            Err(err) if err.unique_violation(UC_COMPANIES_DOMAIN) => {
                return Err(error::DUPLICATE_COMPANY_DOMAIN)
            }
            r => r?,
        }
    } else {
        company
    };

    if let Some(ids) = request.domain_ids {
        link_domains(&txn, company.id, ids).await?;
    }

    let domain_ids = domain_ids(&txn, company.id).await?;

    txn.commit().await?;

    Ok(Json(Response {
        company,
        domain_ids,
    }))
}

pub async fn delete_company<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, error::COMPANY_NOT_FOUND)?;

    let res = match companies::Entity::delete_by_id(id).exec(state.db()).await {
        Err(err) if err.foreign_key_violation(questions::constraints::FK_QUESTIONS_COMPANY_ID) => {
            return Err(error::COMPANY_HAS_QUESTIONS)
        }
        r => r?,
    };

    if res.rows_affected == 0 {
        return Err(error::COMPANY_NOT_FOUND);
    }

    info!(company_id = id, "company deleted");

    Ok(StatusCode::OK)
}
