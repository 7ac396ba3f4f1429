use entity::company_domains::{self, constraints::*};
use entity::{companies, domains};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(company_domains::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(company_domains::Column::CompanyId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(company_domains::Column::DomainId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name(PK_COMPANY_DOMAINS)
                            .col(company_domains::Column::CompanyId)
                            .col(company_domains::Column::DomainId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMPANY_DOMAINS_COMPANY_ID)
                            .from(company_domains::Entity, company_domains::Column::CompanyId)
                            .to(companies::Entity, companies::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMPANY_DOMAINS_DOMAIN_ID)
                            .from(company_domains::Entity, company_domains::Column::DomainId)
                            .to(domains::Entity, domains::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(company_domains::Entity).to_owned())
            .await
    }
}
