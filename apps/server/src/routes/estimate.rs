// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Estimate and report endpoints.

use crate::error::ApiError;
use crate::types::{EstimateResponse, ReportRequest};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bim4energy_core::{estimate, BuildingParameters, ParameterInput, Report};

/// Suggested file name of a downloaded report.
const REPORT_FILE_NAME: &str = "BIM4ENERGY_Report.txt";

/// POST /api/v1/estimate - Baseline and improved energy per category.
pub async fn estimate_energy(
    State(state): State<AppState>,
    body: Result<Json<ParameterInput>, JsonRejection>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let Json(input) = body?;
    let params = BuildingParameters::try_from(input)?;
    let breakdown = estimate(&params, &state.table)?;

    tracing::info!(
        standard = %params.standard(),
        area = params.gross_floor_area(),
        total_baseline = breakdown.total_baseline,
        "Estimate computed"
    );

    Ok(Json(EstimateResponse::new(&params, breakdown)))
}

/// POST /api/v1/report - Plain-text assessment report.
pub async fn report(
    State(state): State<AppState>,
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let params = BuildingParameters::try_from(request.parameters)?;
    let breakdown = estimate(&params, &state.table)?;
    let text = Report::new(&request.project, &breakdown).to_string();

    tracing::info!(
        project = %request.project.project_name,
        size = text.len(),
        "Report generated"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILE_NAME),
            ),
        ],
        text,
    ))
}
