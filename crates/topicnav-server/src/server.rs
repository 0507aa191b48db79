//! Development server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use topicnav_navigator::{FsSource, LogOpener, Navigator, Session};
use topicnav_static::{AssetPipeline, Context, SiteInfo, TemplateEngine};
use topicnav_topics::{load_topics, TOPICS_FILE};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{reload_client_script, ReloadHub, ReloadMessage};

const RELOAD_PATH: &str = "/__reload";
const RELOAD_SCRIPT_PATH: &str = "/__reload.js";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Site directory holding topics.json and the page fragments
    pub site_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Target pre-loaded into the content pane
    pub home: Option<String>,

    /// Shell settings
    pub site: SiteInfo,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            home: None,
            site: SiteInfo {
                title: "Documentation".to_string(),
                base_url: "/".to_string(),
                ..Default::default()
            },
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}: {1}")]
    AddressError(String, String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
struct ServerState {
    config: DevServerConfig,
    hub: ReloadHub,
    templates: TemplateEngine,
}

type SharedState = Arc<RwLock<ServerState>>;

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Address the server binds to.
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        let raw = format!("{}:{}", self.config.host, self.config.port);
        raw.parse()
            .map_err(|e: std::net::AddrParseError| ServerError::AddressError(raw, e.to_string()))
    }

    /// Start the development server. Runs until the process is stopped.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = self.addr()?;

        let state = Arc::new(RwLock::new(ServerState {
            config: self.config.clone(),
            hub: ReloadHub::new(),
            templates: TemplateEngine::new(),
        }));

        let (watcher, mut rx) = FileWatcher::new(&[self.config.site_dir.clone()])
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let watch_state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&watch_state, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config.site_dir);

        tracing::info!("Starting dev server at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

fn router(state: SharedState, site_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/assets/main.css", get(css_handler))
        .route("/assets/main.js", get(js_handler))
        .route(RELOAD_PATH, get(ws_handler))
        .route(RELOAD_SCRIPT_PATH, get(reload_script_handler))
        .fallback_service(ServeDir::new(site_dir))
        .with_state(state)
}

/// Handle file watch events.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    let state = state.read().await;

    match event {
        WatchEvent::TopicsModified(path) => {
            tracing::info!("Topics modified: {}", path.display());

            match load_topics(&path) {
                Ok(topics) => {
                    tracing::debug!("{} top-level topics", topics.len());
                    state.hub.send(ReloadMessage::Reload);
                }
                Err(e) => {
                    tracing::warn!("{} is invalid: {}", TOPICS_FILE, e);
                    state.hub.send(ReloadMessage::TopicsInvalid {
                        message: e.to_string(),
                    });
                }
            }
        }

        WatchEvent::PageModified(path) => {
            tracing::info!("Page modified: {}", path.display());
            state.hub.send(ReloadMessage::Reload);
        }

        other => {
            tracing::debug!("Changed: {}", other.path().display());
            state.hub.send(ReloadMessage::Reload);
        }
    }
}

/// Render the shell for the current state of the site directory.
async fn render_index(config: &DevServerConfig, templates: &TemplateEngine) -> Result<String, String> {
    let navigator = Navigator::new(FsSource::new(&config.site_dir), Arc::new(LogOpener));
    let mut session = Session::start(navigator).await;

    if let Some(home) = &config.home {
        session.navigate(home, false).await;
    }

    let mut context = Context::from_session(&session, &config.site);
    context.live_reload = Some(RELOAD_SCRIPT_PATH.to_string());

    templates.render_shell(&context).map_err(|e| e.to_string())
}

async fn index_handler(State(state): State<SharedState>) -> Response {
    let state = state.read().await;

    match render_index(&state.config, &state.templates).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render shell: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

async fn css_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], AssetPipeline::generate_css())
}

async fn js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        AssetPipeline::generate_js(),
    )
}

/// Handler for the live reload WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Forward hub messages to one browser until it disconnects.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = {
        let state = state.read().await;
        state.hub.subscribe()
    };

    if send_message(&mut socket, &ReloadMessage::Connected).await.is_err() {
        return;
    }

    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ReloadMessage) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(msg) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to encode reload message: {}", e);
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}

async fn reload_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        reload_client_script(RELOAD_PATH),
    )
}
