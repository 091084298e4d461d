//! Embedded PostgreSQL helpers for integration tests.
//!
//! Every test gets its own temporary database on a process-wide cluster. The
//! databases are cloned from a template migrated once through the same entry
//! point the server uses at startup.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use user_service::outbound::persistence::run_pending_migrations;
use uuid::Uuid;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);
const TEMPLATE_NAME: &str = "user_service_template";

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Returns the process-wide embedded cluster, retrying transient bootstrap
/// failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt} failed, retrying: {error:?}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// Creates a fresh database on `cluster` holding the latest schema.
///
/// The database is dropped when the returned guard goes out of scope.
pub fn provision_migrated_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    ensure_template_database(cluster)?;
    let name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(name.as_str(), TEMPLATE_NAME)
        .map_err(|error| format!("create database {name} from template: {error:?}"))
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<(), String> {
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(TEMPLATE_NAME)
        .map_err(|error| format!("template check: {error:?}"))?;
    if !exists {
        cluster
            .create_database(TEMPLATE_NAME)
            .map_err(|error| format!("create template: {error:?}"))?;
        let url = cluster.connection().database_url(TEMPLATE_NAME);
        run_pending_migrations(&url).map_err(|error| error.to_string())?;
    }
    Ok(())
}

/// Pins `PG_PASSWORD` so a reused data directory keeps accepting the
/// password it was initialised with.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster spawns threads; the library's
        // shared-handle singleton serialises bootstrap.
        unsafe {
            std::env::set_var("PG_PASSWORD", "user_service_embedded_test");
        }
    }
}
