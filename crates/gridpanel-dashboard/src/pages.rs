//! Server admin page handlers.
//!
//! Every handler follows the same path: load the server (404 if absent),
//! fetch the inputs its page needs from the store, assemble the payload
//! and render the page's Askama template.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::Html;
use tracing::info_span;

use gridpanel_state::{Server, ServerId, StateResult, StateStore};
use gridpanel_view::{PageInputs, PageKind, ViewPayload, assemble};

use crate::DashboardState;
use crate::error::DashboardError;
use crate::script::ScriptContext;
use crate::views::*;

type PageResult = Result<Html<String>, DashboardError>;

pub async fn index(State(state): State<DashboardState>, Path(id): Path<ServerId>) -> PageResult {
    show(&state, id, PageKind::Index)
}

pub async fn details(State(state): State<DashboardState>, Path(id): Path<ServerId>) -> PageResult {
    show(&state, id, PageKind::Details)
}

pub async fn build(State(state): State<DashboardState>, Path(id): Path<ServerId>) -> PageResult {
    show(&state, id, PageKind::Build)
}

pub async fn startup(State(state): State<DashboardState>, Path(id): Path<ServerId>) -> PageResult {
    show(&state, id, PageKind::Startup)
}

pub async fn database(State(state): State<DashboardState>, Path(id): Path<ServerId>) -> PageResult {
    show(&state, id, PageKind::Database)
}

pub async fn mounts(State(state): State<DashboardState>, Path(id): Path<ServerId>) -> PageResult {
    show(&state, id, PageKind::Mounts)
}

pub async fn manage(State(state): State<DashboardState>, Path(id): Path<ServerId>) -> PageResult {
    show(&state, id, PageKind::Manage)
}

pub async fn delete(State(state): State<DashboardState>, Path(id): Path<ServerId>) -> PageResult {
    show(&state, id, PageKind::Delete)
}

fn show(state: &DashboardState, id: ServerId, kind: PageKind) -> PageResult {
    let _span = info_span!("server_page", server_id = id, page = %kind).entered();

    let server = state
        .store
        .get_server(id)?
        .ok_or(DashboardError::ServerNotFound(id))?;
    let inputs = fetch_inputs(&state.store, kind, &server)?;
    let payload = assemble(kind, server, inputs)?;
    render_payload(&payload)
}

/// Load what `kind` needs from the store.
fn fetch_inputs(store: &StateStore, kind: PageKind, server: &Server) -> StateResult<PageInputs> {
    let inputs = match kind {
        PageKind::Index | PageKind::Details | PageKind::Delete => PageInputs::None,
        PageKind::Build => PageInputs::Build {
            allocations: store.list_allocations_for_node(server.node_id)?,
        },
        PageKind::Startup => PageInputs::Startup {
            nests: store.list_nests_with_eggs()?,
            variables: store.variables_with_values(server.id)?,
        },
        PageKind::Database => PageInputs::Database {
            hosts: store.list_database_hosts()?,
            database: match server.database_id {
                Some(database_id) => store.get_database(database_id)?,
                None => None,
            },
        },
        PageKind::Mounts => PageInputs::Mounts {
            mounts: store.list_mounts_for_server(server)?,
        },
        PageKind::Manage => PageInputs::Manage {
            nodes: store.list_nodes()?,
            locations: store.list_locations()?,
            allocations: store.list_allocations()?,
        },
    };
    Ok(inputs)
}

// ── Templates ───────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "servers/index.html")]
struct IndexTemplate {
    page_title: &'static str,
    server: ServerView,
    tabs: Vec<TabView>,
}

#[derive(Template)]
#[template(path = "servers/details.html")]
struct DetailsTemplate {
    page_title: &'static str,
    server: ServerView,
    tabs: Vec<TabView>,
}

#[derive(Template)]
#[template(path = "servers/build.html")]
struct BuildTemplate {
    page_title: &'static str,
    server: ServerView,
    tabs: Vec<TabView>,
    assigned: Vec<AllocationView>,
    unassigned: Vec<AllocationView>,
}

#[derive(Template)]
#[template(path = "servers/startup.html")]
struct StartupTemplate {
    page_title: &'static str,
    server: ServerView,
    tabs: Vec<TabView>,
    nests: Vec<NestOptionView>,
    variables: Vec<VariableView>,
    script: String,
}

#[derive(Template)]
#[template(path = "servers/database.html")]
struct DatabaseTemplate {
    page_title: &'static str,
    server: ServerView,
    tabs: Vec<TabView>,
    hosts: Vec<DatabaseHostView>,
    database: Option<DatabaseView>,
}

#[derive(Template)]
#[template(path = "servers/mounts.html")]
struct MountsTemplate {
    page_title: &'static str,
    server: ServerView,
    tabs: Vec<TabView>,
    mounts: Vec<MountView>,
}

#[derive(Template)]
#[template(path = "servers/manage.html")]
struct ManageTemplate {
    page_title: &'static str,
    server: ServerView,
    tabs: Vec<TabView>,
    locations: Vec<LocationView>,
    can_transfer: bool,
    script: String,
}

#[derive(Template)]
#[template(path = "servers/delete.html")]
struct DeleteTemplate {
    page_title: &'static str,
    server: ServerView,
    tabs: Vec<TabView>,
}

fn render_payload(payload: &ViewPayload) -> PageResult {
    let kind = payload.kind();
    let page_title = kind.title();
    let server = ServerView::from_server(payload.server());
    let tabs = server_tabs(server.id, kind);

    let html = match payload {
        ViewPayload::Index { .. } => IndexTemplate {
            page_title,
            server,
            tabs,
        }
        .render()?,
        ViewPayload::Details { .. } => DetailsTemplate {
            page_title,
            server,
            tabs,
        }
        .render()?,
        ViewPayload::Build(build) => {
            let primary = build.server.allocation_id;
            BuildTemplate {
                page_title,
                server,
                tabs,
                assigned: build
                    .assigned
                    .iter()
                    .map(|a| AllocationView::from_allocation(a, primary))
                    .collect(),
                unassigned: build
                    .unassigned
                    .iter()
                    .map(|a| AllocationView::from_allocation(a, primary))
                    .collect(),
            }
            .render()?
        }
        ViewPayload::Startup(startup) => {
            let script = ScriptContext::new()
                .put("server", &startup.server)?
                .put("server_variables", &startup.startup.environment())?
                .put("nests", &startup.startup.catalog)?;
            StartupTemplate {
                page_title,
                server,
                tabs,
                nests: startup
                    .startup
                    .catalog
                    .values()
                    .map(|n| NestOptionView::from_projection(n, &startup.server))
                    .collect(),
                variables: startup
                    .startup
                    .variables
                    .iter()
                    .map(VariableView::from_variable)
                    .collect(),
                script: script.to_script_json(),
            }
            .render()?
        }
        ViewPayload::Database(db) => DatabaseTemplate {
            page_title,
            server,
            tabs,
            hosts: db.hosts.iter().map(DatabaseHostView::from_host).collect(),
            database: db
                .database
                .as_ref()
                .map(|d| DatabaseView::from_database(d, &db.hosts)),
        }
        .render()?,
        ViewPayload::Mounts(m) => MountsTemplate {
            page_title,
            server,
            tabs,
            mounts: m
                .mounts
                .iter()
                .map(|mount| MountView::from_mount(mount, &m.server))
                .collect(),
        }
        .render()?,
        ViewPayload::Manage(manage) => {
            let script = ScriptContext::new().put("nodeData", &manage.node_data)?;
            ManageTemplate {
                page_title,
                server,
                tabs,
                locations: manage
                    .locations
                    .iter()
                    .map(LocationView::from_location)
                    .collect(),
                can_transfer: manage.can_transfer,
                script: script.to_script_json(),
            }
            .render()?
        }
        ViewPayload::Delete { .. } => DeleteTemplate {
            page_title,
            server,
            tabs,
        }
        .render()?,
    };

    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use gridpanel_state::*;

    fn test_state() -> DashboardState {
        let store = StateStore::open_in_memory().unwrap();
        DashboardState { store }
    }

    fn test_server(id: ServerId, install_state: InstallState) -> Server {
        Server {
            id,
            uuid: format!("0000000{id}-aaaa-bbbb-cccc-dddddddddddd"),
            name: format!("server-{id}"),
            description: "A test server".to_string(),
            install_state,
            node_id: 1,
            nest_id: 1,
            egg_id: 1,
            allocation_id: 3,
            database_id: None,
            mount_ids: Vec::new(),
            limits: BuildLimits {
                memory: 1024,
                swap: 0,
                disk: 10240,
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
            uuid: format!("node-{id}"),
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

    fn test_allocation(id: AllocationId, ip: &str, port: u16, server_id: Option<ServerId>) -> Allocation {
        Allocation {
            id,
            node_id: 1,
            ip: ip.to_string(),
            ip_alias: None,
            port,
            server_id,
            notes: None,
        }
    }

    async fn body_of(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn index_renders_server() {
        let state = test_state();
        state.store.put_server(&test_server(7, InstallState::Installed)).unwrap();

        let resp = index(State(state), Path(7)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("server-7"));
        assert!(body.contains("/admin/servers/view/7/build"));
    }

    #[tokio::test]
    async fn unknown_server_is_not_found() {
        let state = test_state();
        let resp = details(State(state), Path(404)).await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn build_lists_assigned_before_free_in_address_order() {
        let state = test_state();
        state.store.put_server(&test_server(7, InstallState::Installed)).unwrap();
        for alloc in [
            test_allocation(1, "10.0.0.2", 100, None),
            test_allocation(2, "10.0.0.1", 200, Some(7)),
            test_allocation(3, "10.0.0.1", 50, Some(7)),
            test_allocation(4, "10.0.0.3", 300, Some(8)),
        ] {
            state.store.put_allocation(&alloc).unwrap();
        }

        let resp = build(State(state), Path(7)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;

        let first = body.find("10.0.0.1:50").unwrap();
        let second = body.find("10.0.0.1:200").unwrap();
        let free = body.find("10.0.0.2:100").unwrap();
        assert!(first < second && second < free);
        assert!(!body.contains("10.0.0.3:300"));
    }

    #[tokio::test]
    async fn startup_injects_script_context() {
        let state = test_state();
        state.store.put_server(&test_server(7, InstallState::Installed)).unwrap();
        state
            .store
            .put_nest(&Nest {
                id: 1,
                uuid: "nest-1".to_string(),
                author: "support@example.com".to_string(),
                name: "Minecraft".to_string(),
                description: String::new(),
            })
            .unwrap();
        state
            .store
            .put_egg(&Egg {
                id: 1,
                uuid: "egg-1".to_string(),
                nest_id: 1,
                author: "support@example.com".to_string(),
                name: "Paper".to_string(),
                description: String::new(),
                docker_image: "ghcr.io/panel/yolks:java_17".to_string(),
                startup: "java -jar {{SERVER_JARFILE}}".to_string(),
            })
            .unwrap();
        state
            .store
            .put_egg_variable(&EggVariable {
                id: 1,
                egg_id: 1,
                name: "Server Jar File".to_string(),
                description: String::new(),
                env_variable: "SERVER_JARFILE".to_string(),
                default_value: "server.jar".to_string(),
                user_viewable: true,
                user_editable: true,
                rules: "required|string".to_string(),
            })
            .unwrap();

        let resp = startup(State(state), Path(7)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("window.Panel"));
        assert!(body.contains("\"server_variables\":{\"SERVER_JARFILE\":\"server.jar\"}"));
        assert!(body.contains("Paper"));
    }

    #[tokio::test]
    async fn database_page_shows_hosts_and_server_database() {
        let state = test_state();
        let mut server = test_server(7, InstallState::Installed);
        server.database_id = Some(1);
        state.store.put_server(&server).unwrap();
        state
            .store
            .put_database_host(&DatabaseHost {
                id: 1,
                name: "primary".to_string(),
                host: "db.internal".to_string(),
                port: 3306,
                username: "panel".to_string(),
                max_databases: None,
                node_id: Some(1),
            })
            .unwrap();
        state
            .store
            .put_database(&Database {
                id: 1,
                server_id: 7,
                database_host_id: 1,
                database: "s7_world".to_string(),
                username: "u7_abc".to_string(),
                remote: "%".to_string(),
                max_connections: 0,
            })
            .unwrap();

        let resp = database(State(state), Path(7)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("db.internal:3306"));
        assert!(body.contains("s7_world"));
    }

    #[tokio::test]
    async fn mounts_page_lists_applicable_mounts() {
        let state = test_state();
        let mut server = test_server(7, InstallState::Installed);
        server.mount_ids = vec![1];
        state.store.put_server(&server).unwrap();
        for (id, egg) in [(1, 1), (2, 9)] {
            state
                .store
                .put_mount(&Mount {
                    id,
                    uuid: format!("mount-{id}"),
                    name: format!("shared-{id}"),
                    description: String::new(),
                    source: "/srv/shared".to_string(),
                    target: "/mnt/shared".to_string(),
                    read_only: false,
                    user_mountable: false,
                    egg_ids: vec![egg],
                    node_ids: vec![1],
                })
                .unwrap();
        }

        let resp = mounts(State(state), Path(7)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("shared-1"));
        assert!(!body.contains("shared-2"));
    }

    #[tokio::test]
    async fn manage_single_node_hides_transfer() {
        let state = test_state();
        state.store.put_server(&test_server(7, InstallState::Installed)).unwrap();
        state.store.put_node(&test_node(1)).unwrap();

        let resp = manage(State(state), Path(7)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("requires more than one node"));
        assert!(body.contains("nodeData"));
    }

    #[tokio::test]
    async fn manage_two_nodes_offers_transfer() {
        let state = test_state();
        state.store.put_server(&test_server(7, InstallState::Installed)).unwrap();
        state.store.put_node(&test_node(1)).unwrap();
        state.store.put_node(&test_node(2)).unwrap();
        state
            .store
            .put_location(&Location {
                id: 1,
                short: "eu-west".to_string(),
                long: "Amsterdam".to_string(),
            })
            .unwrap();

        let resp = manage(State(state), Path(7)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("Transfer Server"));
        assert!(body.contains("eu-west"));
        assert!(!body.contains("requires more than one node"));
    }

    #[tokio::test]
    async fn manage_failed_install_is_user_visible_error() {
        let state = test_state();
        state.store.put_server(&test_server(7, InstallState::Failed)).unwrap();
        state.store.put_node(&test_node(1)).unwrap();
        state.store.put_node(&test_node(2)).unwrap();

        let resp = manage(State(state), Path(7)).await.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_of(resp).await;
        assert!(body.contains("failed install state and cannot be recovered"));
        assert!(!body.contains("Transfer Server"));
    }

    #[tokio::test]
    async fn delete_renders_for_failed_install() {
        let state = test_state();
        state.store.put_server(&test_server(7, InstallState::Failed)).unwrap();

        let resp = delete(State(state), Path(7)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("Install Failed"));
    }
}
