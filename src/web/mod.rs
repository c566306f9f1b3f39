mod assets;
mod session;

pub use session::{Session, SessionId, SessionInit, SessionStore, SliderSpec, MAX_SESSIONS};

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    boundary::Command,
    config::Config,
    controller::UiEvent,
    resources::WorldReport,
};

#[derive(Clone)]
struct AppState {
    sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    /// Locks the store, taking the guard back if a handler panicked while holding it.
    fn sessions(&self) -> MutexGuard<'_, SessionStore> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct WebServerConfig {
    pub config: Config,
    pub host: String,
    pub port: u16,
}

pub fn router(config: &Config) -> Result<Router> {
    let controller = config.build_controller()?;
    let template = Session::new(
        controller,
        config.slider.minimum,
        config.slider.maximum,
        config.slider.initial,
    );
    let state = AppState {
        sessions: Arc::new(Mutex::new(SessionStore::new(template))),
    };

    Ok(Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/api/session", post(open_session))
        .route("/api/events", post(dispatch_event))
        .route("/api/continents", get(continents))
        .route("/api/projection", get(projection))
        .with_state(state))
}

pub async fn run(server: WebServerConfig) -> Result<()> {
    let WebServerConfig { config, host, port } = server;
    let router = router(&config)?;

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("population explorer live at http://{addr} (Ctrl+C to stop)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down web UI");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], assets::STYLES_CSS)
}

async fn script() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        assets::APP_JS,
    )
}

async fn open_session(State(state): State<AppState>) -> Json<SessionInit> {
    Json(state.sessions().open())
}

#[derive(Deserialize)]
struct EventRequest {
    session: SessionId,
    event: UiEvent,
}

async fn dispatch_event(
    State(state): State<AppState>,
    Json(request): Json<EventRequest>,
) -> Result<Json<Vec<Command>>, StatusCode> {
    match state.sessions().dispatch(request.session, &request.event) {
        Some(commands) => Ok(Json(commands)),
        None => {
            warn!(session = request.session, "event for unknown session");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

#[derive(Deserialize)]
struct PopulationQuery {
    population: i64,
}

async fn continents(
    State(state): State<AppState>,
    Query(query): Query<PopulationQuery>,
) -> Json<WorldReport> {
    let sessions = state.sessions();
    let controller = sessions.template();
    Json(WorldReport::compute(
        controller.continents(),
        query.population.max(0),
        controller.growth().params.initial_population,
    ))
}

#[derive(Deserialize)]
struct YearQuery {
    year: i64,
}

#[derive(Serialize)]
struct ProjectionResponse {
    year: i64,
    population: i64,
}

async fn projection(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Json<ProjectionResponse> {
    let sessions = state.sessions();
    Json(ProjectionResponse {
        year: query.year,
        population: sessions
            .template()
            .growth()
            .predicted_population_for_year(query.year),
    })
}
