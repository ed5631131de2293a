//! StateStore: redb-backed state persistence for GridPanel.
//!
//! Provides typed reads and writes over every panel entity plus the
//! repository-style queries the admin pages need (a node's allocations,
//! the nest catalog with eggs, a server's variables with values, the mounts
//! offered to a server). All values are JSON-serialized into redb's `&[u8]`
//! value columns. The store supports both on-disk and in-memory backends
//! (the latter for testing).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use redb::{Database as RedbDatabase, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::snapshot::Snapshot;
use crate::tables::*;
use crate::types::*;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

type IdTable = TableDefinition<'static, u64, &'static [u8]>;
type KeyedTable = TableDefinition<'static, &'static str, &'static [u8]>;

/// Thread-safe state store backed by redb.
#[derive(Clone)]
pub struct StateStore {
    db: Arc<RedbDatabase>,
}

impl StateStore {
    /// Open (or create) a persistent state store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = RedbDatabase::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "state store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory state store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = RedbDatabase::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory state store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        for def in [SERVERS, NODES, LOCATIONS, NESTS, DATABASE_HOSTS, DATABASES, MOUNTS] {
            txn.open_table(def).map_err(map_err!(Table))?;
        }
        for def in [ALLOCATIONS, EGGS, EGG_VARIABLES, SERVER_VARIABLES] {
            txn.open_table(def).map_err(map_err!(Table))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Servers ───────────────────────────────────────────────────

    /// Insert or update a server.
    pub fn put_server(&self, server: &Server) -> StateResult<()> {
        self.write(|txn| insert_by_id(txn, SERVERS, server.id, server))?;
        debug!(server_id = server.id, "server stored");
        Ok(())
    }

    /// Get a server by id.
    pub fn get_server(&self, id: ServerId) -> StateResult<Option<Server>> {
        self.get_by_id(SERVERS, id)
    }

    /// List all servers, ordered by id.
    pub fn list_servers(&self) -> StateResult<Vec<Server>> {
        self.list_by_id(SERVERS)
    }

    // ── Nodes & allocations ───────────────────────────────────────

    /// Insert or update a node.
    pub fn put_node(&self, node: &Node) -> StateResult<()> {
        self.write(|txn| insert_by_id(txn, NODES, node.id, node))
    }

    /// Get a node by id.
    pub fn get_node(&self, id: NodeId) -> StateResult<Option<Node>> {
        self.get_by_id(NODES, id)
    }

    /// List all nodes, ordered by id.
    pub fn list_nodes(&self) -> StateResult<Vec<Node>> {
        self.list_by_id(NODES)
    }

    /// Insert or update an allocation.
    pub fn put_allocation(&self, allocation: &Allocation) -> StateResult<()> {
        self.write(|txn| insert_by_key(txn, ALLOCATIONS, &allocation.table_key(), allocation))
    }

    /// List every allocation that belongs to a node.
    pub fn list_allocations_for_node(&self, node_id: NodeId) -> StateResult<Vec<Allocation>> {
        self.list_with_prefix(ALLOCATIONS, &format!("{node_id}:"))
    }

    /// List allocations across all nodes.
    pub fn list_allocations(&self) -> StateResult<Vec<Allocation>> {
        self.list_with_prefix(ALLOCATIONS, "")
    }

    // ── Locations ─────────────────────────────────────────────────

    /// Insert or update a location.
    pub fn put_location(&self, location: &Location) -> StateResult<()> {
        self.write(|txn| insert_by_id(txn, LOCATIONS, location.id, location))
    }

    /// List all locations, ordered by id.
    pub fn list_locations(&self) -> StateResult<Vec<Location>> {
        self.list_by_id(LOCATIONS)
    }

    // ── Nest / Egg catalog ────────────────────────────────────────

    /// Insert or update a nest.
    pub fn put_nest(&self, nest: &Nest) -> StateResult<()> {
        self.write(|txn| insert_by_id(txn, NESTS, nest.id, nest))
    }

    /// Insert or update an egg.
    pub fn put_egg(&self, egg: &Egg) -> StateResult<()> {
        self.write(|txn| insert_by_key(txn, EGGS, &egg.table_key(), egg))
    }

    /// Get an egg by nest and egg id.
    pub fn get_egg(&self, nest_id: NestId, egg_id: EggId) -> StateResult<Option<Egg>> {
        self.get_by_key(EGGS, &format!("{nest_id}:{egg_id}"))
    }

    /// Load every nest with its eggs, nests and eggs ordered by id.
    pub fn list_nests_with_eggs(&self) -> StateResult<Vec<NestWithEggs>> {
        let nests: Vec<Nest> = self.list_by_id(NESTS)?;
        let mut eggs_by_nest: HashMap<NestId, Vec<Egg>> = HashMap::new();
        for egg in self.list_with_prefix::<Egg>(EGGS, "")? {
            eggs_by_nest.entry(egg.nest_id).or_default().push(egg);
        }

        Ok(nests
            .into_iter()
            .map(|nest| {
                let mut eggs = eggs_by_nest.remove(&nest.id).unwrap_or_default();
                eggs.sort_by_key(|e| e.id);
                NestWithEggs { nest, eggs }
            })
            .collect())
    }

    // ── Startup variables ─────────────────────────────────────────

    /// Insert or update an egg variable definition.
    pub fn put_egg_variable(&self, variable: &EggVariable) -> StateResult<()> {
        self.write(|txn| insert_by_key(txn, EGG_VARIABLES, &variable.table_key(), variable))
    }

    /// List the variables an egg declares, ordered by id.
    pub fn list_egg_variables(&self, egg_id: EggId) -> StateResult<Vec<EggVariable>> {
        let mut vars: Vec<EggVariable> =
            self.list_with_prefix(EGG_VARIABLES, &format!("{egg_id}:"))?;
        vars.sort_by_key(|v| v.id);
        Ok(vars)
    }

    /// Insert or update a server's value for an egg variable.
    pub fn put_server_variable(&self, variable: &ServerVariable) -> StateResult<()> {
        self.write(|txn| insert_by_key(txn, SERVER_VARIABLES, &variable.table_key(), variable))
    }

    /// The server's egg variables joined with the server's stored values.
    ///
    /// Variables the server never set carry `server_value: None`.
    pub fn variables_with_values(&self, server_id: ServerId) -> StateResult<Vec<StartupVariable>> {
        let server = self
            .get_server(server_id)?
            .ok_or_else(|| StateError::NotFound(format!("server {server_id}")))?;

        let values: HashMap<VariableId, String> = self
            .list_with_prefix::<ServerVariable>(SERVER_VARIABLES, &format!("{server_id}:"))?
            .into_iter()
            .map(|sv| (sv.variable_id, sv.value))
            .collect();

        Ok(self
            .list_egg_variables(server.egg_id)?
            .into_iter()
            .map(|var| {
                let value = values.get(&var.id).cloned();
                StartupVariable::from_parts(var, value)
            })
            .collect())
    }

    // ── Databases ─────────────────────────────────────────────────

    /// Insert or update a database host.
    pub fn put_database_host(&self, host: &DatabaseHost) -> StateResult<()> {
        self.write(|txn| insert_by_id(txn, DATABASE_HOSTS, host.id, host))
    }

    /// List all database hosts, ordered by id.
    pub fn list_database_hosts(&self) -> StateResult<Vec<DatabaseHost>> {
        self.list_by_id(DATABASE_HOSTS)
    }

    /// Insert or update a server database.
    pub fn put_database(&self, database: &Database) -> StateResult<()> {
        self.write(|txn| insert_by_id(txn, DATABASES, database.id, database))
    }

    /// Get a server database by id.
    pub fn get_database(&self, id: DatabaseId) -> StateResult<Option<Database>> {
        self.get_by_id(DATABASES, id)
    }

    // ── Mounts ────────────────────────────────────────────────────

    /// Insert or update a mount.
    pub fn put_mount(&self, mount: &Mount) -> StateResult<()> {
        self.write(|txn| insert_by_id(txn, MOUNTS, mount.id, mount))
    }

    /// List all mounts, ordered by id.
    pub fn list_mounts(&self) -> StateResult<Vec<Mount>> {
        self.list_by_id(MOUNTS)
    }

    /// Mounts linked to both the server's egg and the server's node.
    pub fn list_mounts_for_server(&self, server: &Server) -> StateResult<Vec<Mount>> {
        Ok(self
            .list_mounts()?
            .into_iter()
            .filter(|m| m.applies_to(server))
            .collect())
    }

    // ── Snapshot import ───────────────────────────────────────────

    /// Write every record of a snapshot in a single transaction.
    pub fn import(&self, snapshot: &Snapshot) -> StateResult<()> {
        self.write(|txn| {
            for location in &snapshot.locations {
                insert_by_id(txn, LOCATIONS, location.id, location)?;
            }
            for node in &snapshot.nodes {
                insert_by_id(txn, NODES, node.id, node)?;
            }
            for allocation in &snapshot.allocations {
                insert_by_key(txn, ALLOCATIONS, &allocation.table_key(), allocation)?;
            }
            for nest in &snapshot.nests {
                insert_by_id(txn, NESTS, nest.id, nest)?;
            }
            for egg in &snapshot.eggs {
                insert_by_key(txn, EGGS, &egg.table_key(), egg)?;
            }
            for variable in &snapshot.egg_variables {
                insert_by_key(txn, EGG_VARIABLES, &variable.table_key(), variable)?;
            }
            for server in &snapshot.servers {
                insert_by_id(txn, SERVERS, server.id, server)?;
            }
            for variable in &snapshot.server_variables {
                insert_by_key(txn, SERVER_VARIABLES, &variable.table_key(), variable)?;
            }
            for host in &snapshot.database_hosts {
                insert_by_id(txn, DATABASE_HOSTS, host.id, host)?;
            }
            for database in &snapshot.databases {
                insert_by_id(txn, DATABASES, database.id, database)?;
            }
            for mount in &snapshot.mounts {
                insert_by_id(txn, MOUNTS, mount.id, mount)?;
            }
            Ok(())
        })?;
        debug!(records = snapshot.record_count(), "snapshot imported");
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────

    /// Run `f` inside one write transaction and commit it.
    fn write<F>(&self, f: F) -> StateResult<()>
    where
        F: FnOnce(&WriteTransaction) -> StateResult<()>,
    {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        f(&txn)?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    fn get_by_id<T: DeserializeOwned>(&self, def: IdTable, id: u64) -> StateResult<Option<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(def).map_err(map_err!(Table))?;
        match table.get(id).map_err(map_err!(Read))? {
            Some(guard) => {
                let value = serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn get_by_key<T: DeserializeOwned>(&self, def: KeyedTable, key: &str) -> StateResult<Option<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(def).map_err(map_err!(Table))?;
        match table.get(key).map_err(map_err!(Read))? {
            Some(guard) => {
                let value = serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn list_by_id<T: DeserializeOwned>(&self, def: IdTable) -> StateResult<Vec<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(def).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            results.push(serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?);
        }
        Ok(results)
    }

    /// Scan a composite-key table, keeping entries whose key starts with `prefix`.
    fn list_with_prefix<T: DeserializeOwned>(
        &self,
        def: KeyedTable,
        prefix: &str,
    ) -> StateResult<Vec<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(def).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (key, value) = entry.map_err(map_err!(Read))?;
            if key.value().starts_with(prefix) {
                results.push(serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?);
            }
        }
        Ok(results)
    }
}

fn insert_by_id<T: Serialize>(
    txn: &WriteTransaction,
    def: IdTable,
    id: u64,
    value: &T,
) -> StateResult<()> {
    let bytes = serde_json::to_vec(value).map_err(map_err!(Serialize))?;
    let mut table = txn.open_table(def).map_err(map_err!(Table))?;
    table.insert(id, bytes.as_slice()).map_err(map_err!(Write))?;
    Ok(())
}

fn insert_by_key<T: Serialize>(
    txn: &WriteTransaction,
    def: KeyedTable,
    key: &str,
    value: &T,
) -> StateResult<()> {
    let bytes = serde_json::to_vec(value).map_err(map_err!(Serialize))?;
    let mut table = txn.open_table(def).map_err(map_err!(Table))?;
    table.insert(key, bytes.as_slice()).map_err(map_err!(Write))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server(id: ServerId, node_id: NodeId, egg_id: EggId) -> Server {
        Server {
            id,
            uuid: format!("uuid-{id}"),
            name: format!("server-{id}"),
            description: String::new(),
            install_state: InstallState::Installed,
            node_id,
            nest_id: 1,
            egg_id,
            allocation_id: 1,
            database_id: None,
            mount_ids: Vec::new(),
            limits: BuildLimits {
                memory: 1024,
                swap: 0,
                disk: 5120,
                io: 500,
                cpu: 100,
                database_limit: Some(1),
                allocation_limit: Some(2),
            },
            startup: "java -jar {{SERVER_JARFILE}}".to_string(),
            image: "ghcr.io/panel/yolks:java_17".to_string(),
            created_at: 1000,
            updated_at: 1000,
        }
    }

    fn test_node(id: NodeId) -> Node {
        Node {
            id,
            uuid: format!("node-uuid-{id}"),
            name: format!("node-{id}"),
            description: String::new(),
            location_id: 1,
            fqdn: format!("node{id}.example.com"),
            scheme: "https".to_string(),
            public: true,
            memory: 16384,
            memory_overallocate: 0,
            disk: 102400,
            disk_overallocate: 0,
            daemon_listen: 8080,
        }
    }

    fn test_allocation(id: AllocationId, node_id: NodeId, port: u16, server_id: Option<ServerId>) -> Allocation {
        Allocation {
            id,
            node_id,
            ip: "10.0.0.1".to_string(),
            ip_alias: None,
            port,
            server_id,
            notes: None,
        }
    }

    fn test_variable(id: VariableId, egg_id: EggId, env: &str, default: &str) -> EggVariable {
        EggVariable {
            id,
            egg_id,
            name: env.to_lowercase(),
            description: String::new(),
            env_variable: env.to_string(),
            default_value: default.to_string(),
            user_viewable: true,
            user_editable: true,
            rules: "required|string".to_string(),
        }
    }

    fn test_mount(id: MountId, egg_ids: Vec<EggId>, node_ids: Vec<NodeId>) -> Mount {
        Mount {
            id,
            uuid: format!("mount-{id}"),
            name: format!("mount-{id}"),
            description: String::new(),
            source: "/srv/shared".to_string(),
            target: "/mnt/shared".to_string(),
            read_only: true,
            user_mountable: false,
            egg_ids,
            node_ids,
        }
    }

    // ── Servers ───────────────────────────────────────────────────

    #[test]
    fn server_put_and_get() {
        let store = StateStore::open_in_memory().unwrap();
        let server = test_server(7, 1, 1);

        store.put_server(&server).unwrap();
        assert_eq!(store.get_server(7).unwrap(), Some(server));
    }

    #[test]
    fn server_get_nonexistent_returns_none() {
        let store = StateStore::open_in_memory().unwrap();
        assert!(store.get_server(42).unwrap().is_none());
    }

    #[test]
    fn server_update_in_place() {
        let store = StateStore::open_in_memory().unwrap();
        let mut server = test_server(1, 1, 1);
        store.put_server(&server).unwrap();

        server.install_state = InstallState::Failed;
        store.put_server(&server).unwrap();

        let servers = store.list_servers().unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].install_state, InstallState::Failed);
    }

    #[test]
    fn nodes_listed_in_id_order() {
        let store = StateStore::open_in_memory().unwrap();
        store.put_node(&test_node(3)).unwrap();
        store.put_node(&test_node(1)).unwrap();
        store.put_node(&test_node(2)).unwrap();

        let ids: Vec<NodeId> = store.list_nodes().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn allocations_scoped_to_node() {
        let store = StateStore::open_in_memory().unwrap();
        store.put_allocation(&test_allocation(1, 1, 25565, Some(7))).unwrap();
        store.put_allocation(&test_allocation(2, 1, 25566, None)).unwrap();
        store.put_allocation(&test_allocation(3, 11, 25565, None)).unwrap();

        let node_one = store.list_allocations_for_node(1).unwrap();
        assert_eq!(node_one.len(), 2);
        assert!(node_one.iter().all(|a| a.node_id == 1));

        let node_eleven = store.list_allocations_for_node(11).unwrap();
        assert_eq!(node_eleven.len(), 1);

        assert_eq!(store.list_allocations().unwrap().len(), 3);
    }

    // ── Catalog ───────────────────────────────────────────────────

    #[test]
    fn nests_loaded_with_their_eggs() {
        let store = StateStore::open_in_memory().unwrap();
        for id in [1, 2] {
            store
                .put_nest(&Nest {
                    id,
                    uuid: format!("nest-{id}"),
                    author: "support@example.com".to_string(),
                    name: format!("Nest {id}"),
                    description: String::new(),
                })
                .unwrap();
        }
        for (id, nest_id) in [(10, 1), (3, 1), (4, 2)] {
            store
                .put_egg(&Egg {
                    id,
                    uuid: format!("egg-{id}"),
                    nest_id,
                    author: "support@example.com".to_string(),
                    name: format!("Egg {id}"),
                    description: String::new(),
                    docker_image: "ghcr.io/panel/yolks:debian".to_string(),
                    startup: "./start.sh".to_string(),
                })
                .unwrap();
        }

        let catalog = store.list_nests_with_eggs().unwrap();
        assert_eq!(catalog.len(), 2);
        let first_eggs: Vec<EggId> = catalog[0].eggs.iter().map(|e| e.id).collect();
        assert_eq!(first_eggs, vec![3, 10]);
        assert_eq!(catalog[1].eggs.len(), 1);
        assert!(store.get_egg(1, 10).unwrap().is_some());
        assert!(store.get_egg(2, 10).unwrap().is_none());
    }

    // ── Variables ─────────────────────────────────────────────────

    #[test]
    fn variables_with_values_joins_server_overrides() {
        let store = StateStore::open_in_memory().unwrap();
        store.put_server(&test_server(7, 1, 5)).unwrap();
        store.put_egg_variable(&test_variable(1, 5, "SERVER_JARFILE", "server.jar")).unwrap();
        store.put_egg_variable(&test_variable(2, 5, "VERSION", "latest")).unwrap();
        store.put_egg_variable(&test_variable(3, 6, "OTHER_EGG", "x")).unwrap();
        store
            .put_server_variable(&ServerVariable {
                server_id: 7,
                variable_id: 2,
                value: "1.20.4".to_string(),
            })
            .unwrap();

        let vars = store.variables_with_values(7).unwrap();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].env_variable, "SERVER_JARFILE");
        assert_eq!(vars[0].server_value, None);
        assert_eq!(vars[0].effective_value(), "server.jar");
        assert_eq!(vars[1].server_value.as_deref(), Some("1.20.4"));
    }

    #[test]
    fn variables_with_values_unknown_server_is_not_found() {
        let store = StateStore::open_in_memory().unwrap();
        let err = store.variables_with_values(99).unwrap_err();
        assert!(matches!(err, StateError::NotFound(_)));
    }

    // ── Mounts ────────────────────────────────────────────────────

    #[test]
    fn mounts_for_server_require_egg_and_node_link() {
        let store = StateStore::open_in_memory().unwrap();
        let server = test_server(7, 1, 5);
        store.put_mount(&test_mount(1, vec![5], vec![1])).unwrap();
        store.put_mount(&test_mount(2, vec![5], vec![2])).unwrap();
        store.put_mount(&test_mount(3, vec![6], vec![1])).unwrap();
        store.put_mount(&test_mount(4, vec![5, 6], vec![1, 2])).unwrap();

        let ids: Vec<MountId> = store
            .list_mounts_for_server(&server)
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 4]);
    }

    // ── Snapshot import ───────────────────────────────────────────

    #[test]
    fn import_writes_every_collection() {
        let store = StateStore::open_in_memory().unwrap();
        let snapshot = Snapshot {
            nodes: vec![test_node(1), test_node(2)],
            allocations: vec![test_allocation(1, 1, 25565, Some(7))],
            servers: vec![test_server(7, 1, 5)],
            mounts: vec![test_mount(1, vec![5], vec![1])],
            ..Snapshot::default()
        };

        store.import(&snapshot).unwrap();

        assert_eq!(store.list_nodes().unwrap().len(), 2);
        assert_eq!(store.list_allocations_for_node(1).unwrap().len(), 1);
        assert!(store.get_server(7).unwrap().is_some());
        assert_eq!(store.list_mounts().unwrap().len(), 1);
    }

    // ── Persistence (on-disk) ─────────────────────────────────────

    #[test]
    fn persistence_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.redb");

        {
            let store = StateStore::open(&db_path).unwrap();
            store.put_server(&test_server(1, 1, 1)).unwrap();
        }

        // Reopen the same database file.
        let store = StateStore::open(&db_path).unwrap();
        let server = store.get_server(1).unwrap();
        assert_eq!(server.map(|s| s.name), Some("server-1".to_string()));
    }

    #[test]
    fn database_and_hosts_roundtrip() {
        let store = StateStore::open_in_memory().unwrap();
        store
            .put_database_host(&DatabaseHost {
                id: 1,
                name: "primary".to_string(),
                host: "db.internal".to_string(),
                port: 3306,
                username: "panel".to_string(),
                max_databases: Some(10),
                node_id: None,
            })
            .unwrap();
        let database = Database {
            id: 4,
            server_id: 7,
            database_host_id: 1,
            database: "s7_world".to_string(),
            username: "u7_abc".to_string(),
            remote: "%".to_string(),
            max_connections: 0,
        };
        store.put_database(&database).unwrap();

        assert_eq!(store.get_database(4).unwrap(), Some(database));
        assert!(store.get_database(5).unwrap().is_none());
        assert_eq!(store.list_database_hosts().unwrap().len(), 1);
    }

    // ── Edge cases ────────────────────────────────────────────────

    #[test]
    fn empty_store_operations() {
        let store = StateStore::open_in_memory().unwrap();

        assert!(store.list_servers().unwrap().is_empty());
        assert!(store.list_nodes().unwrap().is_empty());
        assert!(store.list_locations().unwrap().is_empty());
        assert!(store.list_allocations_for_node(1).unwrap().is_empty());
        assert!(store.list_nests_with_eggs().unwrap().is_empty());
        assert!(store.list_database_hosts().unwrap().is_empty());
        assert!(store.get_database(1).unwrap().is_none());
    }
}
