//! gridpaneld: the GridPanel daemon.
//!
//! Wires the state store to the admin dashboard and serves it over HTTP.
//! The binary in `main.rs` is a thin CLI around this library so the full
//! router can be exercised in tests.

pub mod config;
pub mod telemetry;

use std::path::Path;

use axum::Router;
use gridpanel_dashboard::{DashboardState, admin_router};
use gridpanel_state::{Snapshot, StateStore};
use tracing::info;

/// The daemon's HTTP surface: the server admin pages under `/admin`.
pub fn build_router(store: StateStore) -> Router {
    let dashboard_state = DashboardState { store };
    Router::new().nest("/admin", admin_router(dashboard_state))
}

/// Load a JSON snapshot into `store`. Returns the number of records written.
pub fn import_snapshot(store: &StateStore, path: &Path) -> anyhow::Result<usize> {
    let snapshot = Snapshot::from_file(path)?;
    store.import(&snapshot)?;

    info!(
        path = %path.display(),
        servers = snapshot.servers.len(),
        nodes = snapshot.nodes.len(),
        allocations = snapshot.allocations.len(),
        nests = snapshot.nests.len(),
        eggs = snapshot.eggs.len(),
        mounts = snapshot.mounts.len(),
        "snapshot imported"
    );
    Ok(snapshot.record_count())
}
