use super::{companies, domains};
use sea_orm::entity::prelude::*;

pub mod constraints {
    pub const PK_COMPANY_DOMAINS: &str = "PK_company_domains";
    pub const FK_COMPANY_DOMAINS_COMPANY_ID: &str = "FK_company_domains_company_id";
    pub const FK_COMPANY_DOMAINS_DOMAIN_ID: &str = "FK_company_domains_domain_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "company_domains")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub company_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub domain_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
    Domain,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Company => Entity::belongs_to(companies::Entity)
                .from(Column::CompanyId)
                .to(companies::Column::Id)
                .into(),
            Self::Domain => Entity::belongs_to(domains::Entity)
                .from(Column::DomainId)
                .to(domains::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
