// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project metadata and the plain-text assessment report.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::breakdown::EnergyBreakdown;
use crate::error::{Error, Result};

/// Report title line.
pub const REPORT_TITLE: &str = "BIM4ENERGY Assessment Report";

/// WGS84 position of the project site.
///
/// Deserializes from `{ "latitude": .., "longitude": .. }` or from
/// `"lat, lon"` text, range-checked either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinates {
    Text(String),
    Pair { latitude: f64, longitude: f64 },
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = Error;

    fn try_from(raw: RawCoordinates) -> Result<Self> {
        match raw {
            RawCoordinates::Text(text) => Self::parse(&text),
            RawCoordinates::Pair {
                latitude,
                longitude,
            } => Self::new(latitude, longitude),
        }
    }
}

impl Coordinates {
    /// Central Oslo.
    pub const DEFAULT: Coordinates = Coordinates {
        latitude: 59.9139,
        longitude: 10.7522,
    };

    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidCoordinates(format!(
                "latitude {} out of range",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinates(format!(
                "longitude {} out of range",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses `"lat, lon"`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.split(',').map(str::trim);
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::InvalidCoordinates(format!(
                "expected 'lat, lon', got '{}'",
                text
            )));
        };
        let number = |s: &str| {
            s.parse::<f64>()
                .map_err(|_| Error::InvalidCoordinates(format!("'{}' is not a number", s)))
        };
        Self::new(number(lat)?, number(lon)?)
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Extracts the country from a reverse-geocoded address: the last
/// comma-separated component.
pub fn country_from_address(address: &str) -> Option<&str> {
    address
        .rsplit(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingType {
    #[default]
    Residential,
    Commercial,
    Educational,
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildingType::Residential => "Residential",
            BuildingType::Commercial => "Commercial",
            BuildingType::Educational => "Educational",
        })
    }
}

/// Descriptive project fields shown alongside an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub project_name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub building_type: BuildingType,
    pub year_of_completion: u16,
    pub number_of_users: u32,
    /// m²
    pub conditioned_area: f64,
    pub floors_above_ground: u32,
    pub floors_below_ground: u32,
    /// m
    pub floor_to_ceiling_height: f64,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            project_name: "My Project 1".to_string(),
            country: "Norway".to_string(),
            coordinates: Coordinates::DEFAULT,
            building_type: BuildingType::Residential,
            year_of_completion: 1950,
            number_of_users: 4,
            conditioned_area: 150.0,
            floors_above_ground: 2,
            floors_below_ground: 0,
            floor_to_ceiling_height: 3.0,
        }
    }
}

/// Plain-text assessment report of one estimate.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    project: &'a ProjectInfo,
    breakdown: &'a EnergyBreakdown,
}

impl<'a> Report<'a> {
    pub fn new(project: &'a ProjectInfo, breakdown: &'a EnergyBreakdown) -> Self {
        Self { project, breakdown }
    }

    /// Report lines without trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        let p = self.project;
        let b = self.breakdown;
        let mut lines = vec![
            REPORT_TITLE.to_string(),
            format!("Project Name: {}", p.project_name),
            format!("Country: {}", p.country),
            format!("Coordinates: {}", p.coordinates),
            format!("Building Type: {}", p.building_type),
            format!("Year of Construction Completion: {}", p.year_of_completion),
            format!("Number of Building Users: {}", p.number_of_users),
        ];
        for (category, kwh) in b.baseline.iter() {
            lines.push(format!("{}: {} kWh", category, kwh));
        }
        lines.push(format!("Total: {} kWh", b.total_baseline));
        if b.improvement_percent > 0.0 {
            lines.push(format!("Improved ({}% reduction):", b.improvement_percent));
            for (category, kwh) in b.improved.iter() {
                lines.push(format!("{}: {} kWh", category, kwh));
            }
            lines.push(format!("Total: {} kWh", b.total_improved));
        }
        lines
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
