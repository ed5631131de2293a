//! gridpanel-dashboard: server-rendered admin pages for GridPanel.
//!
//! Provides axum route handlers that load a server and its page inputs
//! from the state store, assemble the page payload with `gridpanel-view`
//! and render an Askama template.
//!
//! # Routes
//!
//! Relative to where the router is nested (the daemon uses `/admin`):
//!
//! | Route | Handler |
//! |---|---|
//! | `/servers/view/{id}` | About |
//! | `/servers/view/{id}/details` | Details |
//! | `/servers/view/{id}/build` | Build configuration (allocations) |
//! | `/servers/view/{id}/startup` | Startup command and variables |
//! | `/servers/view/{id}/database` | Databases |
//! | `/servers/view/{id}/mounts` | Mounts |
//! | `/servers/view/{id}/manage` | Reinstall / transfer |
//! | `/servers/view/{id}/delete` | Delete confirmation |

pub mod error;
pub mod pages;
pub mod script;
pub mod views;

use axum::Router;
use axum::routing::get;
use gridpanel_state::StateStore;

pub use error::DashboardError;

/// Shared state for dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub store: StateStore,
}

/// Build the server admin router.
pub fn admin_router(state: DashboardState) -> Router {
    Router::new()
        .route("/servers/view/{id}", get(pages::index))
        .route("/servers/view/{id}/details", get(pages::details))
        .route("/servers/view/{id}/build", get(pages::build))
        .route("/servers/view/{id}/startup", get(pages::startup))
        .route("/servers/view/{id}/database", get(pages::database))
        .route("/servers/view/{id}/mounts", get(pages::mounts))
        .route("/servers/view/{id}/manage", get(pages::manage))
        .route("/servers/view/{id}/delete", get(pages::delete))
        .with_state(state)
}
