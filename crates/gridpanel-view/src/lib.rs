//! GridPanel read model: view-ready projections of a server's state.
//!
//! This crate does not own persistence. Callers fetch snapshots from the
//! state store and pass them in; every function here is a pure function of
//! its inputs, safe to call from any number of request handlers at once.
//!
//! # Components
//!
//! - **`allocations`**: Split a node's allocations into assigned/unassigned
//! - **`transfer`**: Transfer eligibility and the unrecoverable-install guard
//! - **`startup`**: Nest → Egg catalog projection for the startup page
//! - **`assemble`**: Per-page payload assembly

pub mod allocations;
pub mod assemble;
pub mod error;
pub mod startup;
pub mod transfer;

pub use allocations::{AllocationPartition, partition};
pub use assemble::{
    BuildPayload, DatabasePayload, ManagePayload, MountsPayload, PageInputs, PageKind,
    StartupPayload, ViewPayload, assemble,
};
pub use error::{UnrecoverableStateError, ViewError};
pub use startup::{NestProjection, ProjectedCatalog, StartupProjection, project};
pub use transfer::{AllocationOption, NodeOption, assert_manageable, can_transfer, node_options};
