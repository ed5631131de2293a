//! gridpanel-state: embedded state store for GridPanel.
//!
//! Backed by [redb](https://docs.rs/redb), holds the records the admin
//! panel reads: servers, nodes, allocations, locations, the nest/egg
//! catalog, startup variables, database hosts, databases and mounts.
//!
//! # Architecture
//!
//! All domain types are JSON-serialized into redb's `&[u8]` value columns.
//! Child records use composite keys (`{parent_id}:{child_id}`) so a node's
//! allocations or an egg's variables come back from one prefix scan.
//!
//! The `StateStore` is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`)
//! and can be shared across request handlers. Writers are the external
//! provisioning workflows and the [`Snapshot`] importer.

pub mod error;
pub mod snapshot;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StateError, StateResult};
pub use snapshot::Snapshot;
pub use store::StateStore;
pub use types::*;
