// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP routes.

pub mod estimate;
pub mod health;
pub mod options;

use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post, MethodRouter},
    Router,
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// A routed endpoint, as listed by the API information endpoint.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    handler: fn() -> MethodRouter<AppState>,
}

/// Every endpoint below the root, in the order they are listed.
pub const ENDPOINTS: &[EndpointInfo] = &[
    EndpointInfo {
        method: "GET",
        path: "/api/v1/health",
        description: "Health check endpoint",
        handler: || get(health::check),
    },
    EndpointInfo {
        method: "GET",
        path: "/api/v1/options",
        description: "Categories, standards and option lists",
        handler: || get(options::list),
    },
    EndpointInfo {
        method: "POST",
        path: "/api/v1/estimate",
        description: "Baseline and improved energy per category",
        handler: || post(estimate::estimate_energy),
    },
    EndpointInfo {
        method: "POST",
        path: "/api/v1/report",
        description: "Plain-text assessment report",
        handler: || post(estimate::report),
    },
];

/// Builds the application router with its middleware stack.
pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    // Root endpoint - API information
    let routes = ENDPOINTS
        .iter()
        .fold(Router::new().route("/", get(health::info)), |router, endpoint| {
            router.route(endpoint.path, (endpoint.handler)())
        });

    routes
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_body_kb * 1024))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins, config.cors_permissive()))
        .with_state(state)
}

fn cors_layer(origins: &[String], permissive: bool) -> CorsLayer {
    if permissive {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
