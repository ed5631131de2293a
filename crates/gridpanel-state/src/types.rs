//! Domain types for the GridPanel state store.
//!
//! These are the records the admin panel reads: servers, nodes and their
//! allocations, the nest/egg catalog, startup variables, database hosts,
//! mounts and locations. All types serialize to JSON for storage in redb
//! tables and for import snapshots.

use serde::{Deserialize, Serialize};

pub type ServerId = u64;
pub type NodeId = u64;
pub type AllocationId = u64;
pub type LocationId = u64;
pub type NestId = u64;
pub type EggId = u64;
pub type VariableId = u64;
pub type DatabaseHostId = u64;
pub type DatabaseId = u64;
pub type MountId = u64;

// ── Server ────────────────────────────────────────────────────────

/// A game/application server instance managed by the panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Server {
    pub id: ServerId,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub install_state: InstallState,
    pub node_id: NodeId,
    pub nest_id: NestId,
    pub egg_id: EggId,
    /// Primary allocation the server binds to.
    pub allocation_id: AllocationId,
    #[serde(default)]
    pub database_id: Option<DatabaseId>,
    #[serde(default)]
    pub mount_ids: Vec<MountId>,
    pub limits: BuildLimits,
    pub startup: String,
    pub image: String,
    /// Unix timestamp (seconds) when the server was created.
    #[serde(default)]
    pub created_at: u64,
    /// Unix timestamp (seconds) of the last change.
    #[serde(default)]
    pub updated_at: u64,
}

/// Resource limits applied to a server's container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BuildLimits {
    /// Memory in MiB, 0 = unlimited.
    pub memory: u64,
    /// Swap in MiB, -1 = unlimited.
    pub swap: i64,
    /// Disk in MiB, 0 = unlimited.
    pub disk: u64,
    /// Block IO weight (10–1000).
    pub io: u32,
    /// CPU limit in percent of one core, 0 = unlimited.
    pub cpu: u32,
    #[serde(default)]
    pub database_limit: Option<u32>,
    #[serde(default)]
    pub allocation_limit: Option<u32>,
}

/// Provisioning state of a server.
///
/// Serializes as a snake_case name. Deserializes from either the name or
/// the legacy integer install code used by panel exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "InstallStateRepr")]
pub enum InstallState {
    Pending,
    Installed,
    /// The install was attempted more than once and never succeeded.
    Failed,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InstallStateRepr {
    Code(u64),
    Name(InstallStateName),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum InstallStateName {
    Pending,
    Installed,
    Failed,
}

impl From<InstallStateRepr> for InstallState {
    fn from(repr: InstallStateRepr) -> Self {
        match repr {
            InstallStateRepr::Code(code) => InstallState::from_code(code),
            InstallStateRepr::Name(InstallStateName::Pending) => InstallState::Pending,
            InstallStateRepr::Name(InstallStateName::Installed) => InstallState::Installed,
            InstallStateRepr::Name(InstallStateName::Failed) => InstallState::Failed,
        }
    }
}

impl InstallState {
    /// Map the legacy integer install code (`0`, `1`, anything above).
    pub fn from_code(code: u64) -> Self {
        match code {
            0 => InstallState::Pending,
            1 => InstallState::Installed,
            _ => InstallState::Failed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstallState::Pending => "Installing",
            InstallState::Installed => "Installed",
            InstallState::Failed => "Install Failed",
        }
    }
}

// ── Node & Allocation ─────────────────────────────────────────────

/// A host machine offering a pool of allocations to servers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location_id: LocationId,
    pub fqdn: String,
    /// "http" or "https".
    pub scheme: String,
    #[serde(default = "default_true")]
    pub public: bool,
    /// Total memory in MiB.
    pub memory: u64,
    /// Overallocation percentage, -1 disables the check.
    #[serde(default)]
    pub memory_overallocate: i32,
    /// Total disk in MiB.
    pub disk: u64,
    #[serde(default)]
    pub disk_overallocate: i32,
    pub daemon_listen: u16,
}

fn default_true() -> bool {
    true
}

/// A bindable (IP, port) pair on a node, optionally assigned to a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Allocation {
    pub id: AllocationId,
    pub node_id: NodeId,
    pub ip: String,
    #[serde(default)]
    pub ip_alias: Option<String>,
    pub port: u16,
    /// `None` while the allocation is free.
    #[serde(default)]
    pub server_id: Option<ServerId>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Allocation {
    /// `ip:port`, preferring the alias when one is set.
    pub fn address(&self) -> String {
        match &self.ip_alias {
            Some(alias) => format!("{alias}:{}", self.port),
            None => format!("{}:{}", self.ip, self.port),
        }
    }
}

/// A named datacenter/region grouping nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub short: String,
    #[serde(default)]
    pub long: String,
}

// ── Nest / Egg catalog ────────────────────────────────────────────

/// A family of server templates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Nest {
    pub id: NestId,
    pub uuid: String,
    pub author: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A deployable server template and its startup contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Egg {
    pub id: EggId,
    pub uuid: String,
    pub nest_id: NestId,
    pub author: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub docker_image: String,
    pub startup: String,
}

/// A nest together with the eggs it owns, as loaded from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NestWithEggs {
    pub nest: Nest,
    pub eggs: Vec<Egg>,
}

/// A startup variable declared by an egg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EggVariable {
    pub id: VariableId,
    pub egg_id: EggId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub env_variable: String,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub user_viewable: bool,
    #[serde(default)]
    pub user_editable: bool,
    /// Validation rules, e.g. `required|string|max:20`.
    #[serde(default)]
    pub rules: String,
}

/// A server's persisted value for one egg variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerVariable {
    pub server_id: ServerId,
    pub variable_id: VariableId,
    pub value: String,
}

/// An egg variable joined with a server's stored value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartupVariable {
    pub id: VariableId,
    pub egg_id: EggId,
    pub name: String,
    pub description: String,
    pub env_variable: String,
    pub default_value: String,
    /// `None` when the server never overrode the default.
    pub server_value: Option<String>,
    pub rules: String,
    pub user_viewable: bool,
    pub user_editable: bool,
}

impl StartupVariable {
    pub fn from_parts(variable: EggVariable, server_value: Option<String>) -> Self {
        Self {
            id: variable.id,
            egg_id: variable.egg_id,
            name: variable.name,
            description: variable.description,
            env_variable: variable.env_variable,
            default_value: variable.default_value,
            server_value,
            rules: variable.rules,
            user_viewable: variable.user_viewable,
            user_editable: variable.user_editable,
        }
    }

    /// The value the server actually starts with.
    pub fn effective_value(&self) -> &str {
        self.server_value.as_deref().unwrap_or(&self.default_value)
    }
}

// ── Databases & mounts ────────────────────────────────────────────

/// A database server that can host per-server databases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseHost {
    pub id: DatabaseHostId,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub max_databases: Option<u32>,
    /// Node this host is linked to, if any.
    #[serde(default)]
    pub node_id: Option<NodeId>,
}

/// A database provisioned for a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Database {
    pub id: DatabaseId,
    pub server_id: ServerId,
    pub database_host_id: DatabaseHostId,
    pub database: String,
    pub username: String,
    /// Allowed remote hosts, `%` for any.
    pub remote: String,
    #[serde(default)]
    pub max_connections: u32,
}

/// A host directory that can be bind-mounted into servers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mount {
    pub id: MountId,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub user_mountable: bool,
    /// Eggs this mount may be used with.
    #[serde(default)]
    pub egg_ids: Vec<EggId>,
    /// Nodes this mount is available on.
    #[serde(default)]
    pub node_ids: Vec<NodeId>,
}

impl Mount {
    /// A mount is offered to a server only when both its egg and node are linked.
    pub fn applies_to(&self, server: &Server) -> bool {
        self.egg_ids.contains(&server.egg_id) && self.node_ids.contains(&server.node_id)
    }
}

// ── Composite keys ────────────────────────────────────────────────

impl Allocation {
    /// Build the composite key for the allocations table.
    pub fn table_key(&self) -> String {
        format!("{}:{}", self.node_id, self.id)
    }
}

impl Egg {
    /// Build the composite key for the eggs table.
    pub fn table_key(&self) -> String {
        format!("{}:{}", self.nest_id, self.id)
    }
}

impl EggVariable {
    /// Build the composite key for the egg variables table.
    pub fn table_key(&self) -> String {
        format!("{}:{}", self.egg_id, self.id)
    }
}

impl ServerVariable {
    /// Build the composite key for the server variables table.
    pub fn table_key(&self) -> String {
        format!("{}:{}", self.server_id, self.variable_id)
    }
}
