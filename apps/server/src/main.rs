// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM4ENERGY Server - building energy estimation over HTTP.
//!
//! Loads one intensity table at startup and serves estimates computed from
//! form-style JSON parameters.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `GET /api/v1/options` - Categories, standards and option lists
//! - `POST /api/v1/estimate` - Baseline and improved energy per category (JSON)
//! - `POST /api/v1/report` - Plain-text assessment report

use anyhow::Context;
use bim4energy_core::IntensityTable;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod types;

use config::Config;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<IntensityTable>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,bim4energy_server=debug"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    }

    tracing::info!(
        port = config.port,
        table_path = ?config.table_path,
        max_body_kb = config.max_body_kb,
        request_timeout_secs = config.request_timeout_secs,
        "Starting BIM4ENERGY Server"
    );

    let table = load_table(&config);
    tracing::info!(
        categories = table.categories().len(),
        standards = ?table.standard_names(),
        "Intensity table ready"
    );

    let state = AppState {
        table: Arc::new(table),
        config: Arc::new(config.clone()),
    };
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Reads the configured table, falling back to the built-in profile.
fn load_table(config: &Config) -> IntensityTable {
    let Some(path) = config.table_path.as_deref() else {
        return IntensityTable::builtin();
    };

    match IntensityTable::from_path(path) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(
                error = %e,
                path = %path,
                "Failed to load intensity table, using built-in profile"
            );
            IntensityTable::builtin()
        }
    }
}
