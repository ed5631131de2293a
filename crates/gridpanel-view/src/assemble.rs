//! Per-page payload assembly.
//!
//! | Page | Inputs | Payload |
//! |---|---|---|
//! | index / details / delete | none | server |
//! | build | node's allocations | server, assigned, unassigned |
//! | startup | nests with eggs, server variables | server, projected catalog + variables |
//! | database | all database hosts, server database | server, hosts, database |
//! | mounts | mounts offered to the server | server, mounts |
//! | manage | all nodes, all locations, all allocations | server, locations, can_transfer, node picker data |
//!
//! Assembly only delegates to the other modules. Inputs that do not belong
//! to the requested page are a caller bug and come back as
//! [`ViewError::InputMismatch`].

use std::fmt;

use serde::Serialize;
use tracing::debug;

use gridpanel_state::{
    Allocation, Database, DatabaseHost, Location, Mount, NestWithEggs, Node, Server,
    StartupVariable,
};

use crate::allocations::{AllocationPartition, partition};
use crate::error::ViewError;
use crate::startup::{StartupProjection, project};
use crate::transfer::{NodeOption, assert_manageable, can_transfer, node_options};

/// The admin pages of a single server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Index,
    Details,
    Build,
    Startup,
    Database,
    Mounts,
    Manage,
    Delete,
}

impl PageKind {
    /// Tab order on the server view.
    pub const ALL: [PageKind; 8] = [
        PageKind::Index,
        PageKind::Details,
        PageKind::Build,
        PageKind::Startup,
        PageKind::Database,
        PageKind::Mounts,
        PageKind::Manage,
        PageKind::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Index => "index",
            PageKind::Details => "details",
            PageKind::Build => "build",
            PageKind::Startup => "startup",
            PageKind::Database => "database",
            PageKind::Mounts => "mounts",
            PageKind::Manage => "manage",
            PageKind::Delete => "delete",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageKind::Index => "About",
            PageKind::Details => "Details",
            PageKind::Build => "Build Configuration",
            PageKind::Startup => "Startup",
            PageKind::Database => "Database",
            PageKind::Mounts => "Mounts",
            PageKind::Manage => "Manage",
            PageKind::Delete => "Delete",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collaborator data fetched for one page.
#[derive(Debug, Clone)]
pub enum PageInputs {
    /// Index, details and delete need nothing beyond the server.
    None,
    Build {
        /// Every allocation on the server's node.
        allocations: Vec<Allocation>,
    },
    Startup {
        nests: Vec<NestWithEggs>,
        variables: Vec<StartupVariable>,
    },
    Database {
        hosts: Vec<DatabaseHost>,
        database: Option<Database>,
    },
    Mounts {
        mounts: Vec<Mount>,
    },
    Manage {
        nodes: Vec<Node>,
        locations: Vec<Location>,
        /// Allocations across all nodes, for the transfer picker.
        allocations: Vec<Allocation>,
    },
}

impl PageInputs {
    fn name(&self) -> &'static str {
        match self {
            PageInputs::None => "empty",
            PageInputs::Build { .. } => "build",
            PageInputs::Startup { .. } => "startup",
            PageInputs::Database { .. } => "database",
            PageInputs::Mounts { .. } => "mounts",
            PageInputs::Manage { .. } => "manage",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildPayload {
    pub server: Server,
    pub assigned: Vec<Allocation>,
    pub unassigned: Vec<Allocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupPayload {
    pub server: Server,
    pub startup: StartupProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabasePayload {
    pub server: Server,
    pub hosts: Vec<DatabaseHost>,
    pub database: Option<Database>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountsPayload {
    pub server: Server,
    pub mounts: Vec<Mount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagePayload {
    pub server: Server,
    pub locations: Vec<Location>,
    pub can_transfer: bool,
    pub node_data: Vec<NodeOption>,
}

/// A page's complete, render-ready data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum ViewPayload {
    Index { server: Server },
    Details { server: Server },
    Build(BuildPayload),
    Startup(StartupPayload),
    Database(DatabasePayload),
    Mounts(MountsPayload),
    Manage(ManagePayload),
    Delete { server: Server },
}

impl ViewPayload {
    pub fn kind(&self) -> PageKind {
        match self {
            ViewPayload::Index { .. } => PageKind::Index,
            ViewPayload::Details { .. } => PageKind::Details,
            ViewPayload::Build(_) => PageKind::Build,
            ViewPayload::Startup(_) => PageKind::Startup,
            ViewPayload::Database(_) => PageKind::Database,
            ViewPayload::Mounts(_) => PageKind::Mounts,
            ViewPayload::Manage(_) => PageKind::Manage,
            ViewPayload::Delete { .. } => PageKind::Delete,
        }
    }

    pub fn server(&self) -> &Server {
        match self {
            ViewPayload::Index { server }
            | ViewPayload::Details { server }
            | ViewPayload::Delete { server } => server,
            ViewPayload::Build(p) => &p.server,
            ViewPayload::Startup(p) => &p.server,
            ViewPayload::Database(p) => &p.server,
            ViewPayload::Mounts(p) => &p.server,
            ViewPayload::Manage(p) => &p.server,
        }
    }
}

/// Package a server and its page inputs into the payload for `kind`.
///
/// The manage page checks [`assert_manageable`] before anything else.
pub fn assemble(kind: PageKind, server: Server, inputs: PageInputs) -> Result<ViewPayload, ViewError> {
    let server_id = server.id;

    let payload = match (kind, inputs) {
        (PageKind::Index, PageInputs::None) => ViewPayload::Index { server },
        (PageKind::Details, PageInputs::None) => ViewPayload::Details { server },
        (PageKind::Delete, PageInputs::None) => ViewPayload::Delete { server },
        (PageKind::Build, PageInputs::Build { allocations }) => {
            debug_assert!(
                allocations.iter().all(|a| a.node_id == server.node_id),
                "build page given allocations from a node other than {}",
                server.node_id
            );
            let AllocationPartition {
                assigned,
                unassigned,
            } = partition(&allocations, server.id);
            ViewPayload::Build(BuildPayload {
                server,
                assigned,
                unassigned,
            })
        }
        (PageKind::Startup, PageInputs::Startup { nests, variables }) => {
            ViewPayload::Startup(StartupPayload {
                startup: project(&nests, &variables),
                server,
            })
        }
        (PageKind::Database, PageInputs::Database { hosts, database }) => {
            ViewPayload::Database(DatabasePayload {
                server,
                hosts,
                database,
            })
        }
        (PageKind::Mounts, PageInputs::Mounts { mounts }) => {
            ViewPayload::Mounts(MountsPayload { server, mounts })
        }
        (
            PageKind::Manage,
            PageInputs::Manage {
                nodes,
                locations,
                allocations,
            },
        ) => {
            assert_manageable(server.id, server.install_state)?;
            ViewPayload::Manage(ManagePayload {
                can_transfer: can_transfer(nodes.len()),
                node_data: node_options(&nodes, &allocations),
                server,
                locations,
            })
        }
        (kind, inputs) => {
            return Err(ViewError::InputMismatch {
                kind,
                given: inputs.name(),
            });
        }
    };

    debug!(server_id, page = %kind, "page assembled");
    Ok(payload)
}
