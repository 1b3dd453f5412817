//! HTTP surface.
//!
//! ```text
//! /robots.txt           - disallow all crawlers
//! /updateRepo/{*path}   - fetch origin into a mirror, answers OK or FAIL
//! /<identifier>/<rev>   - redirect to the tracker or browser, or the portal page
//! ```
//!
//! Every request gets an answer below 500; failures end on the portal page.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use revlink_config::Config;
use revlink_core::{CoreResult, Resolution, Resolver};
use revlink_git::GitInspector;
use tracing::{info, warn};

/// Body served at `/robots.txt`.
pub const ROBOTS_TXT: &str = "User-agent: *\nDisallow: /";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<Resolver>,
    inspector: Arc<GitInspector>,
    request_timeout: Duration,
}

impl AppState {
    /// Creates state from prepared parts.
    #[must_use]
    pub fn new(resolver: Resolver, inspector: GitInspector, request_timeout: Duration) -> Self {
        Self {
            resolver: Arc::new(resolver),
            inspector: Arc::new(inspector),
            request_timeout,
        }
    }

    /// Builds the resolver and mirror inspector from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver cannot be wired.
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        Ok(Self::new(
            Resolver::from_config(config)?,
            GitInspector::new(&config.storage.repositories_root),
            config.server.request_timeout(),
        ))
    }
}

/// Builds the router.
///
/// Resolution is the fallback so identifiers of any depth reach it; methods
/// other than `GET` on the fixed routes land there as well.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/robots.txt", get(robots).fallback(resolve))
        .route("/updateRepo/{*path}", get(update_repo).fallback(resolve))
        .fallback(resolve)
        .with_state(state)
}

async fn robots() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], ROBOTS_TXT)
}

async fn update_repo(State(state): State<AppState>, Path(suffix): Path<String>) -> impl IntoResponse {
    let inspector = Arc::clone(&state.inspector);
    let target = suffix.clone();
    let outcome = tokio::task::spawn_blocking(move || inspector.refresh_mirror(&target)).await;

    let body = match outcome {
        Ok(Ok(())) => "OK",
        Ok(Err(e)) => {
            warn!(path = %suffix, error = %e, "mirror refresh failed");
            "FAIL"
        }
        Err(e) => {
            warn!(path = %suffix, error = %e, "mirror refresh task failed");
            "FAIL"
        }
    };

    ([(header::CONTENT_TYPE, TEXT_PLAIN)], body)
}

async fn resolve(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return portal_page(&state);
    }

    let Some((identifier, revision)) = uri.path().trim_start_matches('/').rsplit_once('/') else {
        return portal_page(&state);
    };

    let resolver = Arc::clone(&state.resolver);
    let (id, rev) = (identifier.to_string(), revision.to_string());
    let task = tokio::task::spawn_blocking(move || resolver.resolve(&id, &rev));

    let resolution = match tokio::time::timeout(state.request_timeout, task).await {
        Ok(Ok(resolution)) => resolution,
        Ok(Err(e)) => {
            warn!(identifier, revision, error = %e, "resolution task failed");
            Resolution::Portal
        }
        Err(_) => {
            warn!(
                identifier,
                revision,
                timeout_secs = state.request_timeout.as_secs(),
                "resolution timed out"
            );
            Resolution::Portal
        }
    };

    info!(identifier, revision, outcome = resolution.kind(), "resolved commit reference");

    match resolution {
        Resolution::Portal => portal_page(&state),
        found => redirect(&state, &state.resolver.urls().render(&found)),
    }
}

fn redirect(state: &AppState, url: &str) -> Response {
    match HeaderValue::try_from(url) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            warn!(url, error = %e, "redirect target is not a valid header value");
            portal_page(state)
        }
    }
}

fn portal_page(state: &AppState) -> Response {
    (StatusCode::OK, Html(state.resolver.urls().portal_page())).into_response()
}
