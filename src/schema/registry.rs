use crate::error::{self, DatabaseError, Result};
use chrono::Utc;
use entity::{
    dynamic_tables::{self, constraints::*},
    TableStatus,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

/// Bookkeeping of the practice tables created at runtime.
///
/// Only records intent and outcome, never touches the physical tables themselves.
pub struct Registry<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> Registry<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn exists(&self, table_name: &str) -> Result<bool> {
        let count = dynamic_tables::Entity::find_by_table_name(table_name)
            .count(self.conn)
            .await?;

        Ok(count > 0)
    }

    pub async fn find(&self, table_name: &str) -> Result<Option<dynamic_tables::Model>> {
        Ok(dynamic_tables::Entity::find_by_table_name(table_name)
            .one(self.conn)
            .await?)
    }

    /// Inserts a `pending` entry. Fails with `DUPLICATE_TABLE` if the name is taken.
    pub async fn register(
        &self,
        table_name: &str,
        create_table_query: &str,
        insert_data_query: &str,
    ) -> Result<dynamic_tables::Model> {
        if self.exists(table_name).await? {
            return Err(error::DUPLICATE_TABLE);
        }

        let now = Utc::now();
        let entry = dynamic_tables::ActiveModel {
            table_name: Set(table_name.to_owned()),
            create_table_query: Set(create_table_query.to_owned()),
            insert_data_query: Set(insert_data_query.to_owned()),
            status: Set(TableStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let entry = match entry.insert(self.conn).await {
            Err(err) if err.unique_violation(UC_DYNAMIC_TABLES_TABLE_NAME) => {
                return Err(error::DUPLICATE_TABLE)
            }
            r => r?,
        };

        info!(table_name, "registered table as pending");

        Ok(entry)
    }

    pub async fn mark_completed(
        &self,
        entry: dynamic_tables::Model,
    ) -> Result<dynamic_tables::Model> {
        self.transition(entry, TableStatus::Completed).await
    }

    pub async fn mark_failed(&self, entry: dynamic_tables::Model) -> Result<dynamic_tables::Model> {
        self.transition(entry, TableStatus::Failed).await
    }

    async fn transition(
        &self,
        mut entry: dynamic_tables::Model,
        status: TableStatus,
    ) -> Result<dynamic_tables::Model> {
        let now = Utc::now();

        // the status filter makes a concurrent transition of the same entry lose
        let res = dynamic_tables::Entity::update_many()
            .col_expr(dynamic_tables::Column::Status, Expr::value(status))
            .col_expr(dynamic_tables::Column::UpdatedAt, Expr::value(now))
            .filter(dynamic_tables::Column::Id.eq(entry.id))
            .filter(dynamic_tables::Column::Status.eq(TableStatus::Pending))
            .exec(self.conn)
            .await?;

        if res.rows_affected != 1 {
            error!(
                table_name = %entry.table_name,
                from = ?entry.status,
                to = ?status,
                "invalid table state transition"
            );
            return Err(error::INVALID_TABLE_STATE);
        }

        info!(table_name = %entry.table_name, ?status, "table state changed");

        entry.status = status;
        entry.updated_at = now;

        Ok(entry)
    }

    /// Replaces the statements of an entry and puts it back into `pending`.
    pub async fn restage(
        &self,
        entry: dynamic_tables::Model,
        create_table_query: &str,
        insert_data_query: &str,
    ) -> Result<dynamic_tables::Model> {
        let mut active: dynamic_tables::ActiveModel = entry.into();
        active.create_table_query = Set(create_table_query.to_owned());
        active.insert_data_query = Set(insert_data_query.to_owned());
        active.status = Set(TableStatus::Pending);
        active.updated_at = Set(Utc::now());

        let entry = active.update(self.conn).await?;

        info!(table_name = %entry.table_name, "restaged table as pending");

        Ok(entry)
    }

    /// Records the question the table belongs to. Owned tables are managed through their question.
    pub async fn assign(
        &self,
        entry: dynamic_tables::Model,
        question_id: i32,
    ) -> Result<dynamic_tables::Model> {
        let mut active: dynamic_tables::ActiveModel = entry.into();
        active.question_id = Set(Some(question_id));
        active.updated_at = Set(Utc::now());

        Ok(active.update(self.conn).await?)
    }

    /// Deleting an entry that is already gone is not an error.
    pub async fn remove(&self, entry: &dynamic_tables::Model) -> Result {
        dynamic_tables::Entity::delete_by_id(entry.id)
            .exec(self.conn)
            .await?;

        Ok(())
    }
}
