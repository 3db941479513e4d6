// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validated building parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::orientation::Orientation;

/// Standard used when the caller leaves the era blank.
pub const DEFAULT_STANDARD: &str = "TEK87";

/// Immutable, validated input of a single estimate.
///
/// Categorical selections are kept as given; they are resolved against the
/// option lists of the table at estimate time. A selection left unset means
/// the first option of its list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingParameters {
    gross_floor_area: f64,
    standard: String,
    wall_insulation: Option<String>,
    glazing: Option<String>,
    photovoltaic: Option<String>,
    city: Option<String>,
    rotation: Orientation,
    improvement_percent: f64,
}

impl BuildingParameters {
    /// Starts a builder for a building with the given gross floor area (m²).
    pub fn builder(gross_floor_area: f64) -> BuildingParametersBuilder {
        BuildingParametersBuilder {
            gross_floor_area,
            ..Default::default()
        }
    }

    pub fn gross_floor_area(&self) -> f64 {
        self.gross_floor_area
    }

    pub fn standard(&self) -> &str {
        &self.standard
    }

    pub fn wall_insulation(&self) -> Option<&str> {
        self.wall_insulation.as_deref()
    }

    pub fn glazing(&self) -> Option<&str> {
        self.glazing.as_deref()
    }

    pub fn photovoltaic(&self) -> Option<&str> {
        self.photovoltaic.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn rotation(&self) -> Orientation {
        self.rotation
    }

    pub fn rotation_degrees(&self) -> u16 {
        self.rotation.degrees()
    }

    /// Reduction applied to the baseline, in `[0, 100]`.
    pub fn improvement_percent(&self) -> f64 {
        self.improvement_percent
    }

    /// Returns a copy with a different improvement percentage.
    pub fn with_improvement_percent(&self, percent: f64) -> Result<Self> {
        Ok(Self {
            improvement_percent: clamp_improvement(percent)?,
            ..self.clone()
        })
    }

    /// Returns a copy with a different gross floor area.
    pub fn with_gross_floor_area(&self, area: f64) -> Result<Self> {
        Ok(Self {
            gross_floor_area: check_area(area)?,
            ..self.clone()
        })
    }
}

/// Builder for [`BuildingParameters`].
#[derive(Debug, Clone, Default)]
pub struct BuildingParametersBuilder {
    gross_floor_area: f64,
    standard: Option<String>,
    wall_insulation: Option<String>,
    glazing: Option<String>,
    photovoltaic: Option<String>,
    city: Option<String>,
    rotation_degrees: i32,
    improvement_percent: f64,
}

impl BuildingParametersBuilder {
    pub fn standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    pub fn wall_insulation(mut self, option: impl Into<String>) -> Self {
        self.wall_insulation = Some(option.into());
        self
    }

    pub fn glazing(mut self, option: impl Into<String>) -> Self {
        self.glazing = Some(option.into());
        self
    }

    pub fn photovoltaic(mut self, option: impl Into<String>) -> Self {
        self.photovoltaic = Some(option.into());
        self
    }

    pub fn city(mut self, option: impl Into<String>) -> Self {
        self.city = Some(option.into());
        self
    }

    /// Any integer is accepted and wrapped into `[0, 360)`.
    pub fn rotation_degrees(mut self, degrees: i32) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    pub fn improvement_percent(mut self, percent: f64) -> Self {
        self.improvement_percent = percent;
        self
    }

    pub fn build(self) -> Result<BuildingParameters> {
        let standard = self
            .standard
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STANDARD.to_string());

        Ok(BuildingParameters {
            gross_floor_area: check_area(self.gross_floor_area)?,
            standard,
            wall_insulation: self.wall_insulation,
            glazing: self.glazing,
            photovoltaic: self.photovoltaic,
            city: self.city,
            rotation: Orientation::from_degrees(self.rotation_degrees),
            improvement_percent: clamp_improvement(self.improvement_percent)?,
        })
    }
}

/// Raw form fields as submitted by a client, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParameterInput {
    pub gross_floor_area: f64,
    #[serde(default)]
    pub standard: Option<String>,
    #[serde(default)]
    pub wall_insulation: Option<String>,
    #[serde(default)]
    pub glazing: Option<String>,
    #[serde(default)]
    pub photovoltaic: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub rotation_degrees: i32,
    #[serde(default)]
    pub improvement_percent: f64,
}

impl TryFrom<ParameterInput> for BuildingParameters {
    type Error = Error;

    fn try_from(input: ParameterInput) -> Result<Self> {
        let mut builder = BuildingParameters::builder(input.gross_floor_area)
            .rotation_degrees(input.rotation_degrees)
            .improvement_percent(input.improvement_percent);
        builder.standard = input.standard;
        builder.wall_insulation = input.wall_insulation;
        builder.glazing = input.glazing;
        builder.photovoltaic = input.photovoltaic;
        builder.city = input.city;
        builder.build()
    }
}

fn check_area(area: f64) -> Result<f64> {
    if area.is_finite() && area > 0.0 {
        Ok(area)
    } else {
        Err(Error::InvalidFloorArea(area))
    }
}

fn clamp_improvement(percent: f64) -> Result<f64> {
    if percent.is_nan() {
        return Err(Error::InvalidImprovement(percent));
    }
    Ok(percent.clamp(0.0, 100.0))
}
