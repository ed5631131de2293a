//! JSON snapshots used to seed a store from an external panel export.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StateError, StateResult};
use crate::types::*;

/// A full dump of panel records. Every collection is optional in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Snapshot {
    pub locations: Vec<Location>,
    pub nodes: Vec<Node>,
    pub allocations: Vec<Allocation>,
    pub nests: Vec<Nest>,
    pub eggs: Vec<Egg>,
    pub egg_variables: Vec<EggVariable>,
    pub servers: Vec<Server>,
    pub server_variables: Vec<ServerVariable>,
    pub database_hosts: Vec<DatabaseHost>,
    pub databases: Vec<Database>,
    pub mounts: Vec<Mount>,
}

impl Snapshot {
    pub fn from_file(path: &Path) -> StateResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StateError::Snapshot(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content).map_err(|e| StateError::Deserialize(e.to_string()))
    }

    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.locations.len()
            + self.nodes.len()
            + self.allocations.len()
            + self.nests.len()
            + self.eggs.len()
            + self.egg_variables.len()
            + self.servers.len()
            + self.server_variables.len()
            + self.database_hosts.len()
            + self.databases.len()
            + self.mounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_partial_snapshot() {
        let json = r#"{
            "locations": [{ "id": 1, "short": "eu-west" }],
            "allocations": [
                { "id": 1, "node_id": 1, "ip": "10.0.0.1", "port": 25565 },
                { "id": 2, "node_id": 1, "ip": "10.0.0.1", "port": 25566, "server_id": 7 }
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.locations[0].long, "");
        assert_eq!(snapshot.allocations[0].server_id, None);
        assert_eq!(snapshot.allocations[1].server_id, Some(7));
        assert!(snapshot.servers.is_empty());
        assert_eq!(snapshot.record_count(), 3);
    }

    #[test]
    fn from_file_missing_path_is_snapshot_error() {
        let err = Snapshot::from_file(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(matches!(err, StateError::Snapshot(_)));
    }

    #[test]
    fn from_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, r#"{ "nodes": [] }"#).unwrap();

        let snapshot = Snapshot::from_file(&path).unwrap();
        assert_eq!(snapshot.record_count(), 0);
    }
}
