use super::{company_domains, domains, Status};
use sea_orm::entity::prelude::*;
use serde::Serialize;

pub mod constraints {
    pub const UC_COMPANIES_DOMAIN: &str = "UC_companies_domain";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "companies")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub domain: String,
    pub category: String,
    pub status: Status,
    pub logo_url: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<domains::Entity> for Entity {
    fn to() -> RelationDef {
        company_domains::Relation::Domain.def()
    }

    fn via() -> Option<RelationDef> {
        Some(company_domains::Relation::Company.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
