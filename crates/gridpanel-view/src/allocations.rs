//! Allocation partitioning for the build page.
//!
//! A node's allocations fall into three groups relative to one server:
//! bound to it, free, or bound to some other server. Only the first two
//! are shown; the third is neither the server's nor available to it.

use std::cmp::Ordering;

use serde::Serialize;

use gridpanel_state::{Allocation, ServerId};

/// Allocations split relative to one server, each side sorted by IP then port.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationPartition {
    pub assigned: Vec<Allocation>,
    pub unassigned: Vec<Allocation>,
}

/// Split `allocations` into those bound to `server_id` and those bound to nobody.
pub fn partition(allocations: &[Allocation], server_id: ServerId) -> AllocationPartition {
    let mut assigned: Vec<Allocation> = allocations
        .iter()
        .filter(|a| a.server_id == Some(server_id))
        .cloned()
        .collect();
    let mut unassigned: Vec<Allocation> = allocations
        .iter()
        .filter(|a| a.server_id.is_none())
        .cloned()
        .collect();

    sort_allocations(&mut assigned);
    sort_allocations(&mut unassigned);

    AllocationPartition {
        assigned,
        unassigned,
    }
}

/// Stable sort by IP (string order), then port (numeric order).
fn sort_allocations(allocations: &mut [Allocation]) {
    allocations.sort_by(compare_allocations);
}

pub(crate) fn compare_allocations(a: &Allocation, b: &Allocation) -> Ordering {
    a.ip.cmp(&b.ip).then(a.port.cmp(&b.port))
}
