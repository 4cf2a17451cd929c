use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use server_api::{catalog::PortalCatalog, list_projects, login, submit_briefing};
use shared::{
    domain::{ProjectQuery, TagFilter},
    draft::Draft,
    error::{ApiError, ErrorCode},
    protocol::{
        BriefingAccepted, LoginRequest, LoginResponse, ProjectListing, ProjectsQuery,
        BRIEFING_ROUTE, INVALID_REQUEST_BODY, LOGIN_ROUTE, PROJECTS_ROUTE,
    },
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::{build_mailer, load_settings};

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let catalog = PortalCatalog::load(&settings.catalog_path)
        .with_context(|| format!("failed to load portal catalogue '{}'", settings.catalog_path))?;
    info!(
        clients = catalog.clients.len(),
        projects = catalog.projects.len(),
        "portal catalogue loaded"
    );
    let mailer = build_mailer(&settings)?;
    let state = AppState::assemble(&settings, catalog, mailer)?;
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(BRIEFING_ROUTE, post(http_submit_briefing))
        .route(LOGIN_ROUTE, post(http_login))
        .route(PROJECTS_ROUTE, get(http_list_projects))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn reject(err: ApiError) -> HttpError {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err))
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, HttpError> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, "rejected unparsable request body");
        reject(ApiError::new(ErrorCode::Validation, INVALID_REQUEST_BODY))
    })
}

async fn http_submit_briefing(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<BriefingAccepted>, HttpError> {
    let draft: Draft = parse_body(&body)?;
    let accepted = submit_briefing(&state.api, &draft).await.map_err(reject)?;
    Ok(Json(accepted))
}

async fn http_login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<LoginResponse>, HttpError> {
    let req: LoginRequest = parse_body(&body)?;
    let response = login(&state.api, &req.access_code).map_err(reject)?;
    Ok(Json(response))
}

async fn http_list_projects(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(q): Query<ProjectsQuery>,
) -> Result<Json<ProjectListing>, HttpError> {
    let tag = match q.tag.as_deref() {
        None => TagFilter::All,
        Some(raw) => TagFilter::parse(raw).ok_or_else(|| {
            reject(ApiError::new(
                ErrorCode::Validation,
                format!("Unknown tag: {raw}"),
            ))
        })?,
    };
    let query = ProjectQuery {
        search: q.search,
        tag,
    };
    let listing =
        list_projects(&state.api, bearer_token(&headers), &query).map_err(reject)?;
    Ok(Json(listing))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
