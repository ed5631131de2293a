//! Startup page projection.
//!
//! The client-side egg picker looks nests and eggs up by id, so the
//! one-to-many Nest → Egg relation is flattened into nested maps:
//!
//! ```text
//! { <nest_id>: { id, uuid, author, name, description,
//!                eggs: { <egg_id>: { id, uuid, nest_id, ... } } } }
//! ```
//!
//! Maps are ordered by id. Consumers treat them as lookups, but the fixed
//! order keeps repeated projections of the same input identical.

use std::collections::BTreeMap;

use serde::Serialize;

use gridpanel_state::{Egg, EggId, Nest, NestId, NestWithEggs, StartupVariable};

/// Nest id → nest with its eggs keyed by egg id.
pub type ProjectedCatalog = BTreeMap<NestId, NestProjection>;

/// A nest's own fields with its eggs embedded as a lookup map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestProjection {
    #[serde(flatten)]
    pub nest: Nest,
    pub eggs: BTreeMap<EggId, Egg>,
}

/// Everything the startup page needs besides the server itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupProjection {
    pub catalog: ProjectedCatalog,
    /// The server's variables exactly as the store returned them.
    pub variables: Vec<StartupVariable>,
}

impl StartupProjection {
    /// Env key → the value the server starts with.
    pub fn environment(&self) -> BTreeMap<String, String> {
        self.variables
            .iter()
            .map(|v| (v.env_variable.clone(), v.effective_value().to_string()))
            .collect()
    }
}

/// Denormalize the catalog and carry the variables alongside it.
///
/// Variable values are not checked against egg rules here.
pub fn project(nests: &[NestWithEggs], variables: &[StartupVariable]) -> StartupProjection {
    let catalog = nests
        .iter()
        .map(|entry| {
            let eggs = entry
                .eggs
                .iter()
                .map(|egg| (egg.id, egg.clone()))
                .collect();
            (
                entry.nest.id,
                NestProjection {
                    nest: entry.nest.clone(),
                    eggs,
                },
            )
        })
        .collect();

    StartupProjection {
        catalog,
        variables: variables.to_vec(),
    }
}
