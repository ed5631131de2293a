//! Error types for page assembly.

use gridpanel_state::ServerId;
use thiserror::Error;

use crate::assemble::PageKind;

/// The server's install failed for good; only deletion helps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "This server is in a failed install state and cannot be recovered. Please delete and re-create the server."
)]
pub struct UnrecoverableStateError {
    pub server_id: ServerId,
}

/// Errors raised while assembling a page payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Unrecoverable(#[from] UnrecoverableStateError),

    #[error("{kind} page cannot be assembled from {given} inputs")]
    InputMismatch { kind: PageKind, given: &'static str },
}
