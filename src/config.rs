use anyhow::{bail, Context};
use std::{env, str::FromStr, time::Duration};

const DEFAULT_PORT: u16 = 3002;
const DEFAULT_STATEMENT_TIMEOUT_MS: u64 = 5000;

/// How graded result sets are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComparisonMode {
    /// Rows must match one by one, in the order the engine returned them.
    #[default]
    Ordered,
    /// Rows must match as a multiset.
    Unordered,
}

impl FromStr for ComparisonMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(Self::Ordered),
            "unordered" => Ok(Self::Unordered),
            other => bail!("unknown comparison mode: {other:?}, expected ordered or unordered"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub statement_timeout: Duration,
    pub comparison_mode: ComparisonMode,
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name)
        .inspect_err(|_| error!("{} is not set", name))
        .with_context(|| format!("{name} is not set"))
}

fn optional<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|err| anyhow::anyhow!("invalid value for {name}: {err}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            port: optional("PORT", DEFAULT_PORT)?,
            statement_timeout: Duration::from_millis(optional(
                "STATEMENT_TIMEOUT_MS",
                DEFAULT_STATEMENT_TIMEOUT_MS,
            )?),
            comparison_mode: optional("RESULT_COMPARISON", ComparisonMode::default())?,
        })
    }

    /// Settings for tests and embedding, everything except the secrets uses the defaults.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            port: DEFAULT_PORT,
            statement_timeout: Duration::from_millis(DEFAULT_STATEMENT_TIMEOUT_MS),
            comparison_mode: ComparisonMode::default(),
        }
    }
}
