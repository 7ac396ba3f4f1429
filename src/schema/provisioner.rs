use super::{Registry, TableLocks};
use crate::{
    error::{self, driver_message, Result},
    sql::{self, InsertTarget, TableDefinition},
};
use entity::{dynamic_tables, TableStatus};
use sea_orm::ConnectionTrait;

/// Creates, replaces and drops the physical practice tables, keeping the [`Registry`] in sync.
pub struct Provisioner<'a, C> {
    conn: &'a C,
    locks: &'a TableLocks,
}

fn same_name(expected: &str, parsed: &str) -> bool {
    expected == parsed || expected.to_lowercase() == parsed
}

fn parse_pair(create_table: &str, insert_data: &str) -> Result<(TableDefinition, InsertTarget)> {
    let definition = sql::create_table_target(create_table)?;
    let insert = sql::insert_target(insert_data)?;

    if definition.name != insert.name {
        return Err(error::TABLE_NAME_MISMATCH.with_message(format!(
            "CREATE TABLE targets {} but INSERT targets {}",
            definition.name, insert.name
        )));
    }

    Ok((definition, insert))
}

impl<'a, C: ConnectionTrait + Send> Provisioner<'a, C> {
    pub fn new(conn: &'a C, locks: &'a TableLocks) -> Self {
        Self { conn, locks }
    }

    fn registry(&self) -> Registry<'a, C> {
        Registry::new(self.conn)
    }

    /// Creates `table_name` from its statement pair.
    ///
    /// On an execution error the partially created table is dropped, the entry stays in the registry
    /// as `failed` and the driver message is returned in a `PROVISIONING_FAILED` error.
    pub async fn provision(
        &self,
        table_name: &str,
        create_table: &str,
        insert_data: &str,
    ) -> Result<dynamic_tables::Model> {
        let (definition, _) = parse_pair(create_table, insert_data)?;

        if !same_name(table_name, &definition.name) {
            return Err(error::TABLE_NAME_MISMATCH.with_message(format!(
                "expected table {} but the statements target {}",
                table_name, definition.name
            )));
        }

        let _guard = self.locks.lock(&definition.name).await;

        let registry = self.registry();

        // a failed attempt keeps its entry for inspection, retrying the same name reuses it
        let entry = match registry.find(&definition.name).await? {
            Some(existing) if existing.status == TableStatus::Failed => {
                registry
                    .restage(existing, create_table, insert_data)
                    .await?
            }
            Some(_) => return Err(error::DUPLICATE_TABLE),
            None => {
                registry
                    .register(&definition.name, create_table, insert_data)
                    .await?
            }
        };

        self.apply(entry).await
    }

    /// Replaces the statements of an existing table. Renaming is not supported.
    pub async fn reprovision(
        &self,
        entry: &dynamic_tables::Model,
        create_table: &str,
        insert_data: &str,
    ) -> Result<dynamic_tables::Model> {
        let (definition, insert) = parse_pair(create_table, insert_data)?;

        if definition.name != entry.table_name {
            return Err(error::TABLE_NAME_MISMATCH.with_message(format!(
                "table {} cannot be renamed to {}",
                entry.table_name, definition.name
            )));
        }

        sql::check_columns(&definition, &insert)?;

        let _guard = self.locks.lock(&entry.table_name).await;

        // someone may have removed it while we waited for the lock
        let Some(current) = self.registry().find(&entry.table_name).await? else {
            return Err(error::TABLE_NOT_FOUND);
        };

        let current = self
            .registry()
            .restage(current, create_table, insert_data)
            .await?;

        let drop = sql::drop_table_statement(&current.table_name);
        if let Err(err) = self.conn.execute_unprepared(&drop).await {
            let message = driver_message(&err);
            error!(table_name = %current.table_name, "failed to drop table: {}", message);
            self.registry().mark_failed(current).await?;
            return Err(error::PROVISIONING_FAILED.with_message(message));
        }

        self.apply(current).await
    }

    /// Drops the table and forgets it. Running it for a table that is already gone is fine.
    pub async fn deprovision(&self, table_name: &str) -> Result {
        sql::validate_table_name(table_name)?;

        let guard = self.locks.lock(table_name).await;
        let dropped = self.drop_and_unregister(table_name).await;
        drop(guard);

        self.locks.forget(table_name);
        dropped?;

        info!(table_name, "table deprovisioned");

        Ok(())
    }

    async fn drop_and_unregister(&self, table_name: &str) -> Result {
        self.conn
            .execute_unprepared(&sql::drop_table_statement(table_name))
            .await?;

        if let Some(entry) = self.registry().find(table_name).await? {
            self.registry().remove(&entry).await?;
        }

        Ok(())
    }

    async fn apply(&self, entry: dynamic_tables::Model) -> Result<dynamic_tables::Model> {
        let executed = async {
            self.conn
                .execute_unprepared(&entry.create_table_query)
                .await?;
            self.conn
                .execute_unprepared(&entry.insert_data_query)
                .await
        }
        .await;

        let Err(err) = executed else {
            return self.registry().mark_completed(entry).await;
        };

        let message = driver_message(&err);
        warn!(table_name = %entry.table_name, "failed to provision table: {}", message);

        let drop = sql::drop_table_statement(&entry.table_name);
        if let Err(drop_err) = self.conn.execute_unprepared(&drop).await {
            error!(
                table_name = %entry.table_name,
                "failed to drop partially created table: {}",
                driver_message(&drop_err)
            );
        }

        self.registry().mark_failed(entry).await?;

        Err(error::PROVISIONING_FAILED.with_message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::SqlEngine, utils::testing::memory_database};
    use serde_json::json;

    #[tokio::test]
    async fn provision_creates_and_fills_table() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        let entry = provisioner
            .provision(
                "t1",
                "CREATE TABLE t1(id INTEGER)",
                "INSERT INTO t1 VALUES(1)",
            )
            .await
            .unwrap();

        assert_eq!(entry.status, TableStatus::Completed);

        let rows = db.fetch_all("SELECT * FROM t1").await.unwrap();
        assert_eq!(rows, vec![json!({"id": 1})]);
    }

    #[tokio::test]
    async fn provision_rejects_name_mismatch() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        let err = provisioner
            .provision("foo", "CREATE TABLE foo(id INTEGER)", "INSERT INTO bar VALUES(1)")
            .await
            .unwrap_err();
        assert_eq!(err, error::TABLE_NAME_MISMATCH);

        let err = provisioner
            .provision("baz", "CREATE TABLE foo(id INTEGER)", "INSERT INTO foo VALUES(1)")
            .await
            .unwrap_err();
        assert_eq!(err, error::TABLE_NAME_MISMATCH);

        assert!(!Registry::new(&db).exists("foo").await.unwrap());
    }

    #[tokio::test]
    async fn provision_rejects_duplicate_and_keeps_first() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        provisioner
            .provision("t1", "CREATE TABLE t1(id INTEGER)", "INSERT INTO t1 VALUES(1)")
            .await
            .unwrap();

        let err = provisioner
            .provision("t1", "CREATE TABLE t1(name TEXT)", "INSERT INTO t1 VALUES('x')")
            .await
            .unwrap_err();
        assert_eq!(err, error::DUPLICATE_TABLE);

        let rows = db.fetch_all("SELECT * FROM t1").await.unwrap();
        assert_eq!(rows, vec![json!({"id": 1})]);
    }

    #[tokio::test]
    async fn failed_provision_drops_table_and_marks_failed() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        let err = provisioner
            .provision(
                "t1",
                "CREATE TABLE t1(id INTEGER)",
                "INSERT INTO t1 VALUES(1, 2)",
            )
            .await
            .unwrap_err();

        assert_eq!(err, error::PROVISIONING_FAILED);
        assert!(!err.message().is_empty());

        assert!(db.fetch_all("SELECT * FROM t1").await.is_err());

        let entry = Registry::new(&db).find("t1").await.unwrap().unwrap();
        assert_eq!(entry.status, TableStatus::Failed);
    }

    #[tokio::test]
    async fn failed_table_can_be_provisioned_again() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        provisioner
            .provision("t1", "CREATE TABLE t1(id INTEGER)", "INSERT INTO t1 VALUES(1, 2)")
            .await
            .unwrap_err();

        let entry = provisioner
            .provision("t1", "CREATE TABLE t1(id INTEGER)", "INSERT INTO t1 VALUES(1)")
            .await
            .unwrap();

        assert_eq!(entry.status, TableStatus::Completed);
        assert_eq!(entry.insert_data_query, "INSERT INTO t1 VALUES(1)");
    }

    #[tokio::test]
    async fn reprovision_replaces_table() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        let entry = provisioner
            .provision("t1", "CREATE TABLE t1(id INTEGER)", "INSERT INTO t1 VALUES(1)")
            .await
            .unwrap();

        let entry = provisioner
            .reprovision(
                &entry,
                "CREATE TABLE t1(id INTEGER, name TEXT)",
                "INSERT INTO t1 (id, name) VALUES(2, 'b')",
            )
            .await
            .unwrap();

        assert_eq!(entry.status, TableStatus::Completed);

        let rows = db.fetch_all("SELECT id, name FROM t1").await.unwrap();
        assert_eq!(rows, vec![json!({"id": 2, "name": "b"})]);
    }

    #[tokio::test]
    async fn reprovision_checks_columns_and_name() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        let entry = provisioner
            .provision("t1", "CREATE TABLE t1(id INTEGER)", "INSERT INTO t1 VALUES(1)")
            .await
            .unwrap();

        let err = provisioner
            .reprovision(
                &entry,
                "CREATE TABLE t1(id INTEGER)",
                "INSERT INTO t1 (id, email) VALUES(1, 'x')",
            )
            .await
            .unwrap_err();
        assert_eq!(err, error::COLUMN_MISMATCH);

        let err = provisioner
            .reprovision(&entry, "CREATE TABLE t2(id INTEGER)", "INSERT INTO t2 VALUES(1)")
            .await
            .unwrap_err();
        assert_eq!(err, error::TABLE_NAME_MISMATCH);

        let rows = db.fetch_all("SELECT * FROM t1").await.unwrap();
        assert_eq!(rows, vec![json!({"id": 1})]);
    }

    #[tokio::test]
    async fn deprovision_twice_is_safe() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        provisioner
            .provision("t1", "CREATE TABLE t1(id INTEGER)", "INSERT INTO t1 VALUES(1)")
            .await
            .unwrap();

        provisioner.deprovision("t1").await.unwrap();
        provisioner.deprovision("t1").await.unwrap();

        assert!(db.fetch_all("SELECT * FROM t1").await.is_err());
        assert!(!Registry::new(&db).exists("t1").await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_provisions_of_one_name_create_it_once() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        let (first, second) = tokio::join!(
            provisioner.provision("t1", "CREATE TABLE t1(id INTEGER)", "INSERT INTO t1 VALUES(1)"),
            provisioner.provision("t1", "CREATE TABLE t1(id INTEGER)", "INSERT INTO t1 VALUES(2)"),
        );

        let results = [first, second];
        let completed: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        let rejected: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();

        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].status, TableStatus::Completed);
        assert_eq!(rejected, vec![&error::DUPLICATE_TABLE]);

        let rows = db.fetch_all("SELECT * FROM t1").await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn deprovision_releases_the_table_lock() {
        let db = memory_database().await;
        let locks = TableLocks::new();
        let provisioner = Provisioner::new(&db, &locks);

        provisioner
            .provision("t1", "CREATE TABLE t1(id INTEGER)", "INSERT INTO t1 VALUES(1)")
            .await
            .unwrap();
        assert_eq!(locks.len(), 1);

        provisioner.deprovision("t1").await.unwrap();

        assert_eq!(locks.len(), 0);
    }
}
