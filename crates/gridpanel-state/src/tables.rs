//! redb table definitions for the GridPanel state store.
//!
//! Values are JSON-serialized domain types. Entities owned by a parent use
//! `&str` composite keys of the form `{parent_id}:{child_id}` so that all
//! children of one parent can be found with a prefix scan.

use redb::TableDefinition;

/// Servers keyed by server id.
pub const SERVERS: TableDefinition<u64, &[u8]> = TableDefinition::new("servers");

/// Nodes keyed by node id.
pub const NODES: TableDefinition<u64, &[u8]> = TableDefinition::new("nodes");

/// Allocations keyed by `{node_id}:{allocation_id}`.
pub const ALLOCATIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("allocations");

/// Locations keyed by location id.
pub const LOCATIONS: TableDefinition<u64, &[u8]> = TableDefinition::new("locations");

/// Nests keyed by nest id.
pub const NESTS: TableDefinition<u64, &[u8]> = TableDefinition::new("nests");

/// Eggs keyed by `{nest_id}:{egg_id}`.
pub const EGGS: TableDefinition<&str, &[u8]> = TableDefinition::new("eggs");

/// Egg variables keyed by `{egg_id}:{variable_id}`.
pub const EGG_VARIABLES: TableDefinition<&str, &[u8]> = TableDefinition::new("egg_variables");

/// Server variable values keyed by `{server_id}:{variable_id}`.
pub const SERVER_VARIABLES: TableDefinition<&str, &[u8]> =
    TableDefinition::new("server_variables");

/// Database hosts keyed by host id.
pub const DATABASE_HOSTS: TableDefinition<u64, &[u8]> = TableDefinition::new("database_hosts");

/// Server databases keyed by database id.
pub const DATABASES: TableDefinition<u64, &[u8]> = TableDefinition::new("databases");

/// Mounts keyed by mount id.
pub const MOUNTS: TableDefinition<u64, &[u8]> = TableDefinition::new("mounts");
