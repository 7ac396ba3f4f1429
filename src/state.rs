use crate::{config::Config, engine::SqlEngine, jwt::Jwt, schema::TableLocks};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DbConn, StreamTrait, TransactionTrait,
};
use std::sync::Arc;
use tracing::log::LevelFilter;

pub trait StateTrait: Send + Sync + Clone + 'static {
    type Db: ConnectionTrait + TransactionTrait + StreamTrait + SqlEngine + Clone + Send + Sync;

    fn db(&self) -> &Self::Db;
    fn jwt(&self) -> &Jwt;
    fn config(&self) -> &Config;
    fn table_locks(&self) -> &TableLocks;
}

pub struct State {
    database: DbConn,
    jwt: Jwt,
    config: Config,
    table_locks: TableLocks,
}

impl State {
    pub async fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let conn = Self::connect_database(&config.database_url).await?;
        Ok(Self::with_database(config, conn))
    }

    pub fn with_database(config: Config, conn: DbConn) -> Arc<Self> {
        Arc::new(Self {
            database: conn,
            jwt: Jwt::new(&config.jwt_secret),
            config,
            table_locks: TableLocks::new(),
        })
    }

    async fn connect_database(url: &str) -> anyhow::Result<DbConn> {
        info!("Trying to connect to database");

        let mut opts = ConnectOptions::new(url.to_owned());
        opts.sqlx_logging_level(LevelFilter::Debug);

        let db = Database::connect(opts)
            .await
            .inspect_err(|err| error!("failed to connect to database: {}", err))?;

        info!("Connected to database");

        Ok(db)
    }
}

impl StateTrait for Arc<State> {
    type Db = DbConn;

    fn db(&self) -> &Self::Db {
        &self.database
    }

    fn jwt(&self) -> &Jwt {
        &self.jwt
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn table_locks(&self) -> &TableLocks {
        &self.table_locks
    }
}
