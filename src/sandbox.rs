use crate::{
    engine::{timed_out, SqlEngine},
    error::driver_message,
};
use sea_orm::JsonValue;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Extra time the engine gets to abort a statement itself before the future is abandoned.
const BACKSTOP_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub rows: Option<Vec<JsonValue>>,
    pub error: Option<String>,
    pub run_time_ms: i64,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}

/// Runs user supplied statements.
///
/// A failing or slow statement is an outcome, not an error: [`Sandbox::run`] never fails.
/// The engine enforces the timeout, a slightly longer timer covers engines that cannot.
pub struct Sandbox<'a, E: ?Sized> {
    engine: &'a E,
    timeout: Duration,
}

impl<'a, E: SqlEngine + ?Sized> Sandbox<'a, E> {
    pub fn new(engine: &'a E, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    pub async fn run(&self, statement: &str) -> RunOutcome {
        let start = Instant::now();
        let result = tokio::time::timeout(
            self.timeout + BACKSTOP_GRACE,
            self.engine.fetch_limited(statement, Some(self.timeout)),
        )
        .await;
        let run_time_ms = i64::try_from(start.elapsed().as_millis()).unwrap_or(i64::MAX);

        match result {
            Ok(Ok(rows)) => RunOutcome {
                status: RunStatus::Success,
                rows: Some(rows),
                error: None,
                run_time_ms,
            },
            Ok(Err(err)) => {
                debug!("statement failed: {}", err);
                RunOutcome {
                    status: RunStatus::Error,
                    rows: None,
                    error: Some(driver_message(&err)),
                    run_time_ms,
                }
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "statement timed out");
                RunOutcome {
                    status: RunStatus::Error,
                    rows: None,
                    error: Some(driver_message(&timed_out(self.timeout))),
                    run_time_ms,
                }
            }
        }
    }
}
