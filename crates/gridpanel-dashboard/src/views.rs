//! View types for dashboard template rendering.
//!
//! These types are purpose-built for Askama templates: they carry
//! pre-formatted strings and computed fields so templates stay simple.

use gridpanel_state::{
    Allocation, AllocationId, Database, DatabaseHost, InstallState, Location, Mount, Server,
    ServerId, StartupVariable,
};
use gridpanel_view::{NestProjection, PageKind};

/// Where the daemon mounts the server pages.
pub const SERVER_VIEW_PREFIX: &str = "/admin/servers/view";

// ── Server ──────────────────────────────────────────────────────

pub struct ServerView {
    pub id: ServerId,
    pub uuid: String,
    pub short_uuid: String,
    pub name: String,
    pub description: String,
    pub install_label: &'static str,
    pub install_color: &'static str,
    pub node_id: u64,
    pub image: String,
    pub startup: String,
    pub memory_display: String,
    pub swap_display: String,
    pub disk_display: String,
    pub cpu_display: String,
    pub io: u32,
    pub database_limit_display: String,
    pub allocation_limit_display: String,
    pub created_display: String,
    pub updated_display: String,
}

impl ServerView {
    pub fn from_server(server: &Server) -> Self {
        let limits = &server.limits;
        Self {
            id: server.id,
            uuid: server.uuid.clone(),
            short_uuid: server.uuid.chars().take(8).collect(),
            name: server.name.clone(),
            description: server.description.clone(),
            install_label: server.install_state.label(),
            install_color: install_color(server.install_state),
            node_id: server.node_id,
            image: server.image.clone(),
            startup: server.startup.clone(),
            memory_display: format_megabytes(limits.memory),
            swap_display: format_swap(limits.swap),
            disk_display: format_megabytes(limits.disk),
            cpu_display: if limits.cpu == 0 {
                "Unlimited".to_string()
            } else {
                format!("{}%", limits.cpu)
            },
            io: limits.io,
            database_limit_display: format_limit(limits.database_limit),
            allocation_limit_display: format_limit(limits.allocation_limit),
            created_display: format_timestamp(server.created_at),
            updated_display: format_timestamp(server.updated_at),
        }
    }
}

// ── Tabs ────────────────────────────────────────────────────────

pub struct TabView {
    pub href: String,
    pub title: &'static str,
    pub active: bool,
    pub danger: bool,
}

/// The per-server tab bar with `active` highlighted.
pub fn server_tabs(server_id: ServerId, active: PageKind) -> Vec<TabView> {
    PageKind::ALL
        .iter()
        .map(|&kind| TabView {
            href: page_href(server_id, kind),
            title: kind.title(),
            active: kind == active,
            danger: kind == PageKind::Delete,
        })
        .collect()
}

pub fn page_href(server_id: ServerId, kind: PageKind) -> String {
    match kind {
        PageKind::Index => format!("{SERVER_VIEW_PREFIX}/{server_id}"),
        other => format!("{SERVER_VIEW_PREFIX}/{server_id}/{}", other.as_str()),
    }
}

// ── Allocations ─────────────────────────────────────────────────

pub struct AllocationView {
    pub id: AllocationId,
    pub address: String,
    pub notes: String,
    pub is_primary: bool,
}

impl AllocationView {
    pub fn from_allocation(allocation: &Allocation, primary: AllocationId) -> Self {
        Self {
            id: allocation.id,
            address: allocation.address(),
            notes: allocation.notes.clone().unwrap_or_default(),
            is_primary: allocation.id == primary,
        }
    }
}

// ── Startup ─────────────────────────────────────────────────────

pub struct VariableView {
    pub name: String,
    pub description: String,
    pub env_variable: String,
    pub value: String,
    pub default_value: String,
    pub is_default: bool,
    pub rules: String,
    pub access_display: &'static str,
}

impl VariableView {
    pub fn from_variable(variable: &StartupVariable) -> Self {
        let access_display = match (variable.user_viewable, variable.user_editable) {
            (true, true) => "Users can view and edit",
            (true, false) => "Users can view",
            (false, _) => "Hidden from users",
        };
        Self {
            name: variable.name.clone(),
            description: variable.description.clone(),
            env_variable: variable.env_variable.clone(),
            value: variable.effective_value().to_string(),
            default_value: variable.default_value.clone(),
            is_default: variable.server_value.is_none(),
            rules: variable.rules.clone(),
            access_display,
        }
    }
}

/// A nest and its eggs as rendered in the server-side egg picker.
pub struct NestOptionView {
    pub id: u64,
    pub name: String,
    pub eggs: Vec<EggOptionView>,
}

pub struct EggOptionView {
    pub id: u64,
    pub name: String,
    pub selected: bool,
}

impl NestOptionView {
    pub fn from_projection(projection: &NestProjection, server: &Server) -> Self {
        Self {
            id: projection.nest.id,
            name: projection.nest.name.clone(),
            eggs: projection
                .eggs
                .values()
                .map(|egg| EggOptionView {
                    id: egg.id,
                    name: egg.name.clone(),
                    selected: egg.id == server.egg_id,
                })
                .collect(),
        }
    }
}

// ── Databases ───────────────────────────────────────────────────

pub struct DatabaseHostView {
    pub name: String,
    pub address: String,
    pub username: String,
    pub max_databases_display: String,
    pub linked_node_display: String,
}

impl DatabaseHostView {
    pub fn from_host(host: &DatabaseHost) -> Self {
        Self {
            name: host.name.clone(),
            address: format!("{}:{}", host.host, host.port),
            username: host.username.clone(),
            max_databases_display: format_limit(host.max_databases),
            linked_node_display: host
                .node_id
                .map(|n| format!("Node {n}"))
                .unwrap_or_else(|| "None".to_string()),
        }
    }
}

pub struct DatabaseView {
    pub database: String,
    pub username: String,
    pub remote: String,
    pub host_display: String,
    pub max_connections_display: String,
}

impl DatabaseView {
    pub fn from_database(database: &Database, hosts: &[DatabaseHost]) -> Self {
        let host_display = hosts
            .iter()
            .find(|h| h.id == database.database_host_id)
            .map(|h| format!("{}:{}", h.host, h.port))
            .unwrap_or_else(|| format!("host #{}", database.database_host_id));
        Self {
            database: database.database.clone(),
            username: database.username.clone(),
            remote: database.remote.clone(),
            host_display,
            max_connections_display: if database.max_connections == 0 {
                "Unlimited".to_string()
            } else {
                database.max_connections.to_string()
            },
        }
    }
}

// ── Mounts ──────────────────────────────────────────────────────

pub struct MountView {
    pub name: String,
    pub description: String,
    pub source: String,
    pub target: String,
    pub read_only: bool,
    pub attached: bool,
}

impl MountView {
    pub fn from_mount(mount: &Mount, server: &Server) -> Self {
        Self {
            name: mount.name.clone(),
            description: mount.description.clone(),
            source: mount.source.clone(),
            target: mount.target.clone(),
            read_only: mount.read_only,
            attached: server.mount_ids.contains(&mount.id),
        }
    }
}

// ── Locations ───────────────────────────────────────────────────

pub struct LocationView {
    pub id: u64,
    pub short: String,
    pub long: String,
}

impl LocationView {
    pub fn from_location(location: &Location) -> Self {
        Self {
            id: location.id,
            short: location.short.clone(),
            long: location.long.clone(),
        }
    }
}

// ── Format Helpers ──────────────────────────────────────────────

/// Format a MiB quantity, `0` meaning no limit.
pub fn format_megabytes(megabytes: u64) -> String {
    if megabytes == 0 {
        return "Unlimited".to_string();
    }
    format_bytes(megabytes.saturating_mul(1024 * 1024))
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.0} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn format_swap(swap: i64) -> String {
    match swap {
        i64::MIN..=-1 => "Unlimited".to_string(),
        0 => "Disabled".to_string(),
        mb => format_megabytes(mb.unsigned_abs()),
    }
}

fn format_limit(limit: Option<u32>) -> String {
    match limit {
        Some(n) => n.to_string(),
        None => "Unlimited".to_string(),
    }
}

pub fn format_timestamp(timestamp_secs: u64) -> String {
    if timestamp_secs == 0 {
        return "unknown".to_string();
    }
    chrono::DateTime::from_timestamp(timestamp_secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn install_color(state: InstallState) -> &'static str {
    match state {
        InstallState::Installed => "text-emerald-400",
        InstallState::Pending => "text-sky-400",
        InstallState::Failed => "text-rose-400",
    }
}
