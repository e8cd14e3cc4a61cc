//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! A thin HTTP front for the renderer. Every request carries its own notation
//! string and is answered from a single parse/resolve/layout pass; nothing is
//! kept between requests apart from the startup [`Config`].

use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::layout::{self, ConnectorStyle, LayoutOptions};
use crate::notation::{self, Resolution, Token};
use crate::{NotationError, RenderError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config: Arc::new(config) }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/render", get(render_svg))
        .route("/resolve", get(resolve_links))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    #[serde(default)]
    pub notation: String,
    pub style: Option<ConnectorStyle>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub boxes: Option<bool>,
}

impl RenderQuery {
    /// Layout options for this request, falling back to the server config.
    #[must_use]
    pub fn layout_options(&self, config: &Config) -> LayoutOptions {
        let base = config.layout_options();
        LayoutOptions {
            width: self.width.filter(|w| layout::is_valid_size(*w)).unwrap_or(base.width),
            height: self.height.filter(|h| layout::is_valid_size(*h)).unwrap_or(base.height),
            style: self.style.unwrap_or(base.style),
            group_boxes: self.boxes.unwrap_or(base.group_boxes),
            ..base
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    #[serde(default)]
    pub notation: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub tokens: Vec<Token>,
    #[serde(flatten)]
    pub resolution: Resolution,
}

/// `GET /render?notation=...` — SVG document for the notation.
pub async fn render_svg(State(state): State<AppState>, Query(query): Query<RenderQuery>) -> Response {
    let options = query.layout_options(&state.config);
    match crate::render(&query.notation, &options) {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(RenderError::Notation(e)) => notation_error_response(&query.notation, &e),
        Err(e @ RenderError::Write(_)) => {
            tracing::error!(error = %e, "svg rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /resolve?notation=...` — tokens, sender/receiver lists and links.
pub async fn resolve_links(Query(query): Query<ResolveQuery>) -> Response {
    match notation::resolve_str(&query.notation) {
        Ok((tokens, resolution)) => Json(ResolveResponse { tokens, resolution }).into_response(),
        Err(e) => notation_error_response(&query.notation, &e),
    }
}

pub(crate) fn notation_error_response(notation: &str, err: &NotationError) -> Response {
    tracing::warn!(%notation, error = %err, "rejected notation");
    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response()
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
