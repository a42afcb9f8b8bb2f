//! Embedded PostgreSQL bootstrap for repository integration tests.
//!
//! Each test gets its own cluster and a uniquely named database with the
//! crate's migrations applied through `run_pending_migrations`, so suites
//! never share rows.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip these tests where the cluster binaries
//! cannot be downloaded or started.

use std::time::Duration;

use donations::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Retries for transient download or startup failures.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries, doubled on each attempt.
const RETRY_DELAY_MS: u64 = 500;

/// A migrated scratch database on a private embedded cluster.
///
/// Field order matters: the database is dropped before its cluster.
pub struct TestDatabase {
    database: TemporaryDatabase,
    _cluster: TestCluster,
}

impl TestDatabase {
    /// Start a cluster, create a fresh database and migrate it.
    ///
    /// Must be called outside a Tokio runtime; `runtime` drives the
    /// migration run.
    pub fn provision(runtime: &Runtime) -> Result<Self, String> {
        let cluster = start_cluster()?;
        let name = format!("donations_{}", Uuid::new_v4().simple());
        let database = cluster
            .temporary_database(name.as_str())
            .map_err(|err| format!("create database: {err:?}"))?;
        runtime
            .block_on(run_pending_migrations(database.url()))
            .map_err(|err| err.to_string())?;
        Ok(Self {
            database,
            _cluster: cluster,
        })
    }

    /// Connection URL for the scratch database.
    pub fn url(&self) -> &str {
        self.database.url()
    }
}

fn is_transient_error(err: &str) -> bool {
    let transient_patterns = [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "temporarily unavailable",
        "dns error",
    ];

    let err_lower = err.to_lowercase();
    transient_patterns
        .iter()
        .any(|pattern| err_lower.contains(pattern))
}

fn start_cluster() -> Result<TestCluster, String> {
    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt < MAX_RETRIES && is_transient_error(&last_error) {
                    std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * (1 << attempt)));
                } else {
                    break;
                }
            }
        }
    }
    Err(last_error)
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is truthy, otherwise fail loudly.
#[expect(clippy::print_stderr, reason = "skip marker for test logs")]
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
