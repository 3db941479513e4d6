// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bim4energy_core::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Estimate(#[from] bim4energy_core::Error),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Estimate(err) => match err.kind() {
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                ErrorKind::Configuration => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "CONFIGURATION_ERROR")
                }
            },
            // Well-formed JSON whose fields fail to convert, such as
            // out-of-range coordinates.
            ApiError::InvalidBody(JsonRejection::JsonDataError(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "INVALID_BODY"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        tracing::debug!(error = %self, code, "Request rejected");

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bim4energy_core::Error;

    #[test]
    fn maps_error_kinds_to_status() {
        let validation = ApiError::from(Error::InvalidFloorArea(-1.0));
        assert_eq!(
            validation.status(),
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        );

        let config = ApiError::from(Error::MissingStandard("TEK17".into()));
        assert_eq!(
            config.status(),
            (StatusCode::UNPROCESSABLE_ENTITY, "CONFIGURATION_ERROR")
        );

        assert_eq!(
            config.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
