//! Embedded PostgreSQL bootstrap shared by integration tests.
//!
//! The cluster is opt-in: tests return early unless `RUN_PG_EMBEDDED=1`.
//! Installation and data directories default to unique folders under the
//! cargo target directory so parallel runs never share state.

use std::path::PathBuf;
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

/// True when the caller opted in to embedded PostgreSQL tests.
pub fn embedded_postgres_enabled() -> bool {
    let enabled = std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1");
    if !enabled {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
    }
    enabled
}

fn scratch_dirs() -> std::io::Result<(PathBuf, PathBuf)> {
    let target = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target"));
    let base = target
        .join("pg-embed")
        .join(format!("{}-{}", std::process::id(), Uuid::new_v4()));
    let install = base.join("install");
    let data = base.join("data");
    std::fs::create_dir_all(&install)?;
    std::fs::create_dir_all(&data)?;
    Ok((install, data))
}

/// Start a throwaway cluster, retrying transient download failures.
pub fn start_cluster() -> Result<TestCluster, String> {
    let _env = if std::env::var_os("PG_RUNTIME_DIR").is_none()
        || std::env::var_os("PG_DATA_DIR").is_none()
    {
        let (install, data) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(install.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..MAX_ATTEMPTS {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                eprintln!("pg-embed: attempt {} failed: {last_error}", attempt + 1);
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS << attempt));
            }
        }
    }
    Err(last_error)
}
