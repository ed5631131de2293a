//! Manage-page decisions: whether a server can be managed at all, whether
//! a node transfer can be offered, and the node picker data for the
//! transfer form.

use serde::Serialize;
use tracing::warn;

use gridpanel_state::{
    Allocation, AllocationId, InstallState, LocationId, Node, NodeId, ServerId,
};

use crate::allocations::compare_allocations;
use crate::error::UnrecoverableStateError;

/// Minimum number of nodes in the cluster before a transfer is offered.
pub const MIN_TRANSFER_NODES: usize = 2;

/// A transfer needs somewhere to go: at least two nodes in the cluster.
///
/// The count is the raw cluster size; the server's current node is not
/// subtracted.
pub fn can_transfer(node_count: usize) -> bool {
    node_count >= MIN_TRANSFER_NODES
}

/// Refuse to manage a server whose install has failed for good.
pub fn assert_manageable(
    server_id: ServerId,
    install_state: InstallState,
) -> Result<(), UnrecoverableStateError> {
    if install_state == InstallState::Failed {
        warn!(server_id, "server is in an unrecoverable install state");
        return Err(UnrecoverableStateError { server_id });
    }
    Ok(())
}

/// One entry of the transfer form's node picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeOption {
    pub id: NodeId,
    pub text: String,
    pub location_id: LocationId,
    pub allocations: Vec<AllocationOption>,
}

/// A free allocation the server could be moved onto.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationOption {
    pub id: AllocationId,
    pub text: String,
}

/// Build picker entries for every node, each listing its free allocations.
///
/// `allocations` may span any number of nodes; entries are matched to
/// nodes by `node_id`. Output is ordered by node id.
pub fn node_options(nodes: &[Node], allocations: &[Allocation]) -> Vec<NodeOption> {
    let mut options: Vec<NodeOption> = nodes
        .iter()
        .map(|node| {
            let mut free: Vec<&Allocation> = allocations
                .iter()
                .filter(|a| a.node_id == node.id && a.server_id.is_none())
                .collect();
            free.sort_by(|a, b| compare_allocations(a, b));

            NodeOption {
                id: node.id,
                text: node.name.clone(),
                location_id: node.location_id,
                allocations: free
                    .into_iter()
                    .map(|a| AllocationOption {
                        id: a.id,
                        text: allocation_text(a),
                    })
                    .collect(),
            }
        })
        .collect();
    options.sort_by_key(|o| o.id);
    options
}

fn allocation_text(allocation: &Allocation) -> String {
    match &allocation.ip_alias {
        Some(alias) => format!("{alias} ({}):{}", allocation.ip, allocation.port),
        None => format!("{}:{}", allocation.ip, allocation.port),
    }
}
