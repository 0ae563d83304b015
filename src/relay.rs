//! HTTP relay in front of the CNB feed.
//!
//! Browsers cannot read the bank's text feed directly because of CORS. The
//! relay fetches it server side, returns the body verbatim and adds CORS and
//! caching headers.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use serde_json::json;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, error, info};

pub const RELAY_PATH: &str = "/api/cnb-rates";

const USER_AGENT: &str = "cnb-rates-calculator-proxy";
const CACHE_POLICY: &str = "s-maxage=300, stale-while-revalidate=600";

#[derive(Clone)]
pub struct RelayState {
    upstream_url: Option<String>,
    client: reqwest::Client,
}

impl RelayState {
    pub fn new(upstream_url: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(RelayState {
            upstream_url,
            client,
        })
    }
}

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route(RELAY_PATH, any(relay_rates))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}

/// Binds `bind` and serves the relay until Ctrl-C.
pub async fn serve(bind: &str, state: RelayState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind relay to {bind}"))?;
    info!(
        "Relay listening on http://{}{}",
        listener.local_addr()?,
        RELAY_PATH
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down relay");
        })
        .await
        .context("Relay server failed")
}

async fn relay_rates(State(state): State<RelayState>, method: Method) -> Response {
    debug!(%method, "Relay request");

    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    if method != Method::GET {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let Some(upstream_url) = state.upstream_url.as_deref() else {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "CNB API URL is not configured",
        );
    };

    match fetch_upstream(&state.client, upstream_url).await {
        Ok((status, body)) if status.is_success() => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, CACHE_POLICY),
            ],
            body,
        )
            .into_response(),
        Ok((status, body)) => {
            debug!(%status, "Forwarding upstream failure");
            (status, body).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch CNB rates");
            error_response(StatusCode::BAD_GATEWAY, "Failed to fetch CNB rates")
        }
    }
}

async fn fetch_upstream(
    client: &reqwest::Client,
    url: &str,
) -> Result<(StatusCode, String), reqwest::Error> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
