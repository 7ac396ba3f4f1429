use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, JsonValue, RuntimeErr};
use serde_json::{json, Map};
use sqlx::{
    postgres::PgRow, sqlite::SqliteRow, Column, ColumnIndex, Decode, PgPool, Row, SqlitePool,
    Type, TypeInfo, ValueRef,
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Virtual machine instructions between two deadline checks on sqlite.
const PROGRESS_OPS: i32 = 1000;

/// `query_canceled`, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";

/// Executes raw statement text against a database.
///
/// Rows come back as JSON objects with one key per result column. A column whose value cannot be
/// represented is an error, never a missing key. Tests substitute their own implementation.
#[async_trait]
pub trait SqlEngine: Send + Sync {
    /// Runs a single statement and returns its rows.
    ///
    /// With a `limit` the database aborts the statement once it has run that long, so an abandoned
    /// statement does not keep its connection busy.
    async fn fetch_limited(
        &self,
        sql: &str,
        limit: Option<Duration>,
    ) -> Result<Vec<JsonValue>, DbErr>;

    async fn fetch_all(&self, sql: &str) -> Result<Vec<JsonValue>, DbErr> {
        self.fetch_limited(sql, None).await
    }

    /// Runs one or more statements, discarding any rows.
    async fn execute_sql(&self, sql: &str) -> Result<(), DbErr>;
}

pub fn timed_out(limit: Duration) -> DbErr {
    DbErr::Custom(format!(
        "statement timed out after {} ms",
        limit.as_millis()
    ))
}

fn sqlx_error(err: sqlx::Error) -> DbErr {
    DbErr::Query(RuntimeErr::SqlxError(err))
}

fn unconvertible(column: &str, type_name: &str) -> DbErr {
    DbErr::Type(format!(
        "column `{}` has type {} which cannot be converted",
        column, type_name
    ))
}

#[async_trait]
impl SqlEngine for DatabaseConnection {
    async fn fetch_limited(
        &self,
        sql: &str,
        limit: Option<Duration>,
    ) -> Result<Vec<JsonValue>, DbErr> {
        match self {
            DatabaseConnection::SqlxSqlitePoolConnection(_) => {
                fetch_sqlite(self.get_sqlite_connection_pool(), sql, limit).await
            }
            DatabaseConnection::SqlxPostgresPoolConnection(_) => {
                fetch_postgres(self.get_postgres_connection_pool(), sql, limit).await
            }
            #[allow(clippy::match_wildcard_for_single_variants)]
            _ => Err(DbErr::Custom("unsupported database connection".to_owned())),
        }
    }

    async fn execute_sql(&self, sql: &str) -> Result<(), DbErr> {
        self.execute_unprepared(sql).await?;
        Ok(())
    }
}

/// Turns the progress handler into a no-op once the fetch is over, even when the fetch is dropped
/// before it could remove the handler itself.
struct Disarm(Arc<AtomicBool>);

impl Drop for Disarm {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

async fn fetch_sqlite(
    pool: &SqlitePool,
    sql: &str,
    limit: Option<Duration>,
) -> Result<Vec<JsonValue>, DbErr> {
    let mut conn = pool.acquire().await.map_err(sqlx_error)?;

    let Some(limit) = limit else {
        let rows = sqlx::query(sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(sqlx_error)?;
        return rows.iter().map(sqlite_row).collect();
    };

    let armed = Arc::new(AtomicBool::new(true));
    let expired = Arc::new(AtomicBool::new(false));
    let deadline = Instant::now() + limit;

    {
        let armed = armed.clone();
        let expired = expired.clone();
        let mut handle = conn.lock_handle().await.map_err(sqlx_error)?;

        // returning false interrupts the running statement
        handle.set_progress_handler(PROGRESS_OPS, move || {
            if !armed.load(Ordering::Relaxed) || Instant::now() < deadline {
                return true;
            }
            expired.store(true, Ordering::Relaxed);
            false
        });
    }
    let _disarm = Disarm(armed);

    let result = sqlx::query(sql).fetch_all(&mut *conn).await;

    match conn.lock_handle().await {
        Ok(mut handle) => handle.remove_progress_handler(),
        Err(err) => warn!("failed to remove progress handler: {}", err),
    }

    match result {
        Ok(rows) => rows.iter().map(sqlite_row).collect(),
        Err(_) if expired.load(Ordering::Relaxed) => Err(timed_out(limit)),
        Err(err) => Err(sqlx_error(err)),
    }
}

async fn fetch_postgres(
    pool: &PgPool,
    sql: &str,
    limit: Option<Duration>,
) -> Result<Vec<JsonValue>, DbErr> {
    let Some(limit) = limit else {
        let rows = sqlx::query(sql).fetch_all(pool).await.map_err(sqlx_error)?;
        return rows.iter().map(postgres_row).collect();
    };

    let mut txn = pool.begin().await.map_err(sqlx_error)?;

    // zero would disable the timeout
    let set_timeout = format!(
        "SET LOCAL statement_timeout = {}",
        limit.as_millis().max(1)
    );
    sqlx::query(&set_timeout)
        .execute(&mut *txn)
        .await
        .map_err(sqlx_error)?;

    let rows = match sqlx::query(sql).fetch_all(&mut *txn).await {
        Ok(rows) => rows,
        Err(sqlx::Error::Database(err)) if err.code().as_deref() == Some(QUERY_CANCELED) => {
            return Err(timed_out(limit))
        }
        Err(err) => return Err(sqlx_error(err)),
    };

    txn.commit().await.map_err(sqlx_error)?;

    rows.iter().map(postgres_row).collect()
}

fn decode<'r, R, T>(row: &'r R, index: usize) -> Result<T, DbErr>
where
    R: Row,
    usize: ColumnIndex<R>,
    T: Decode<'r, R::Database> + Type<R::Database>,
{
    row.try_get(index).map_err(sqlx_error)
}

// sqlite types values, not columns: the storage class decides, the declared type only marks booleans
fn sqlite_row(row: &SqliteRow) -> Result<JsonValue, DbErr> {
    let mut map = Map::new();

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index).map_err(sqlx_error)?;

        let value = if raw.is_null() {
            JsonValue::Null
        } else {
            let storage = raw.type_info().name().to_owned();

            match (column.type_info().name(), storage.as_str()) {
                ("BOOLEAN", "INTEGER") => json!(decode::<_, bool>(row, index)?),
                (_, "INTEGER") => json!(decode::<_, i64>(row, index)?),
                (_, "REAL") => json!(decode::<_, f64>(row, index)?),
                (_, "TEXT") => json!(decode::<_, String>(row, index)?),
                (_, "BLOB") => json!(decode::<_, Vec<u8>>(row, index)?),
                (_, other) => return Err(unconvertible(column.name(), other)),
            }
        };

        map.insert(column.name().to_owned(), value);
    }

    Ok(JsonValue::Object(map))
}

fn postgres_row(row: &PgRow) -> Result<JsonValue, DbErr> {
    let mut map = Map::new();

    for column in row.columns() {
        let index = column.ordinal();

        if row.try_get_raw(index).map_err(sqlx_error)?.is_null() {
            map.insert(column.name().to_owned(), JsonValue::Null);
            continue;
        }

        let value = match column.type_info().name() {
            "BOOL" => json!(decode::<_, bool>(row, index)?),
            "INT2" => json!(decode::<_, i16>(row, index)?),
            "INT4" => json!(decode::<_, i32>(row, index)?),
            "INT8" => json!(decode::<_, i64>(row, index)?),
            "FLOAT4" => json!(decode::<_, f32>(row, index)?),
            "FLOAT8" => json!(decode::<_, f64>(row, index)?),
            // rendered as text so no digits are lost
            "NUMERIC" => json!(decode::<_, Decimal>(row, index)?.normalize().to_string()),
            "TEXT" | "VARCHAR" | "CHAR" | "NAME" => json!(decode::<_, String>(row, index)?),
            "DATE" => json!(decode::<_, NaiveDate>(row, index)?),
            "TIME" => json!(decode::<_, NaiveTime>(row, index)?),
            "TIMESTAMP" => json!(decode::<_, NaiveDateTime>(row, index)?),
            "TIMESTAMPTZ" => json!(decode::<_, DateTime<Utc>>(row, index)?),
            "JSON" | "JSONB" => decode::<_, JsonValue>(row, index)?,
            "BYTEA" => json!(decode::<_, Vec<u8>>(row, index)?),
            other => match row.try_get::<String, _>(index) {
                Ok(text) => json!(text),
                Err(_) => return Err(unconvertible(column.name(), other)),
            },
        };

        map.insert(column.name().to_owned(), value);
    }

    Ok(JsonValue::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::memory_database;
    use serde_json::json;

    const RUNAWAY: &str = "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM c WHERE x < 100000000) SELECT count(*) AS n FROM c";

    #[tokio::test]
    async fn fetch_all_returns_rows_as_objects() {
        let db = memory_database().await;

        db.execute_sql("CREATE TABLE t1(id INTEGER, name TEXT); INSERT INTO t1 VALUES (1, 'a'), (2, 'b')")
            .await
            .unwrap();

        let rows = db.fetch_all("SELECT id, name FROM t1 ORDER BY id").await.unwrap();

        assert_eq!(
            rows,
            vec![json!({"id": 1, "name": "a"}), json!({"id": 2, "name": "b"})]
        );
    }

    #[tokio::test]
    async fn fetch_all_keeps_every_column() {
        let db = memory_database().await;

        db.execute_sql(
            "CREATE TABLE emp(id INTEGER, salary DECIMAL(10,2), born DATE, ok BOOLEAN); \
             INSERT INTO emp VALUES (1, 1200.50, '2020-01-01', TRUE), (2, NULL, '2021-06-30', FALSE)",
        )
        .await
        .unwrap();

        let rows = db
            .fetch_all("SELECT id, salary, born, ok FROM emp ORDER BY id")
            .await
            .unwrap();

        assert_eq!(
            rows,
            vec![
                json!({"id": 1, "salary": 1200.5, "born": "2020-01-01", "ok": true}),
                json!({"id": 2, "salary": null, "born": "2021-06-30", "ok": false}),
            ]
        );
    }

    #[tokio::test]
    async fn computed_decimal_columns_are_kept() {
        let db = memory_database().await;

        db.execute_sql(
            "CREATE TABLE emp(id INTEGER, salary DECIMAL(10,2)); INSERT INTO emp VALUES (1, 100.25)",
        )
        .await
        .unwrap();

        let rows = db
            .fetch_all("SELECT id, salary * 3 AS salary, x'00ff' AS raw FROM emp")
            .await
            .unwrap();

        assert_eq!(rows, vec![json!({"id": 1, "salary": 300.75, "raw": [0, 255]})]);
    }

    #[tokio::test]
    async fn fetch_all_surfaces_driver_errors() {
        let db = memory_database().await;

        let result = db.fetch_all("SELECT * FROM missing_table").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn limit_interrupts_runaway_statement() {
        let db = memory_database().await;
        let limit = Duration::from_millis(50);

        let err = db.fetch_limited(RUNAWAY, Some(limit)).await.unwrap_err();

        assert_eq!(err.to_string(), timed_out(limit).to_string());
    }

    #[tokio::test]
    async fn connection_is_usable_after_interrupt() {
        let db = memory_database().await;

        db.fetch_limited(RUNAWAY, Some(Duration::from_millis(50)))
            .await
            .unwrap_err();

        let start = Instant::now();
        let rows = db.fetch_all("SELECT 1 AS one").await.unwrap();

        assert_eq!(rows, vec![json!({"one": 1})]);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn limit_leaves_fast_statements_alone() {
        let db = memory_database().await;

        let rows = db
            .fetch_limited("SELECT 2 AS two", Some(Duration::from_secs(5)))
            .await
            .unwrap();

        assert_eq!(rows, vec![json!({"two": 2})]);

        // the handler is gone once the limited fetch returned
        let rows = db.fetch_all("SELECT 3 AS three").await.unwrap();
        assert_eq!(rows, vec![json!({"three": 3})]);
    }
}
