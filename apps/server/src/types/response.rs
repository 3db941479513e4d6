// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use bim4energy_core::{BuildingParameters, CompassPoint, EnergyBreakdown, OptionEntry, OptionGroup};
use serde::{Deserialize, Serialize};

/// Result of an estimate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    /// Standard the estimate was computed for (after defaulting).
    pub standard: String,
    /// Gross floor area in m².
    pub gross_floor_area: f64,
    /// Normalized rotation in degrees.
    pub rotation_degrees: u16,
    /// Compass point of the rotation.
    pub compass_point: CompassPoint,
    /// Per-category energy and totals.
    pub breakdown: EnergyBreakdown,
}

impl EstimateResponse {
    pub fn new(params: &BuildingParameters, breakdown: EnergyBreakdown) -> Self {
        Self {
            standard: params.standard().to_string(),
            gross_floor_area: params.gross_floor_area(),
            rotation_degrees: params.rotation_degrees(),
            compass_point: params.rotation().compass_point(),
            breakdown,
        }
    }
}

/// Selectable values exposed to form clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    /// Ordered energy categories.
    pub categories: Vec<String>,
    /// Standards with an intensity profile.
    pub standards: Vec<String>,
    /// Option lists in document order.
    pub groups: Vec<OptionGroupInfo>,
}

/// One option group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionGroupInfo {
    pub group: OptionGroup,
    pub options: Vec<OptionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}
