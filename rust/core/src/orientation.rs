// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building rotation relative to north.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Eight-point compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    const CLOCKWISE: [CompassPoint; 8] = [
        CompassPoint::N,
        CompassPoint::NE,
        CompassPoint::E,
        CompassPoint::SE,
        CompassPoint::S,
        CompassPoint::SW,
        CompassPoint::W,
        CompassPoint::NW,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clockwise rotation from north in whole degrees, always in `[0, 360)`.
///
/// Serialized as a bare number; deserialized values are normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "u16")]
pub struct Orientation(u16);

impl From<i32> for Orientation {
    fn from(degrees: i32) -> Self {
        Self::from_degrees(degrees)
    }
}

impl From<Orientation> for u16 {
    fn from(orientation: Orientation) -> Self {
        orientation.0
    }
}

impl Orientation {
    pub fn from_degrees(degrees: i32) -> Self {
        Self(degrees.rem_euclid(360) as u16)
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Nearest compass point; each point covers a 45° sector centred on it.
    pub fn compass_point(self) -> CompassPoint {
        let sector = ((u32::from(self.0) + 22) / 45) % 8;
        CompassPoint::CLOCKWISE[sector as usize]
    }

    /// Direction of the building's local north axis as `(cos θ, sin θ)`.
    pub fn north_vector(self) -> (f64, f64) {
        let theta = f64::from(self.0).to_radians();
        (theta.cos(), theta.sin())
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° ({})", self.0, self.compass_point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalizes_degrees() {
        assert_eq!(Orientation::from_degrees(0).degrees(), 0);
        assert_eq!(Orientation::from_degrees(359).degrees(), 359);
        assert_eq!(Orientation::from_degrees(360).degrees(), 0);
        assert_eq!(Orientation::from_degrees(-1).degrees(), 359);
    }

    #[test]
    fn compass_sectors() {
        let point = |d| Orientation::from_degrees(d).compass_point();
        assert_eq!(point(0), CompassPoint::N);
        assert_eq!(point(22), CompassPoint::N);
        assert_eq!(point(23), CompassPoint::NE);
        assert_eq!(point(90), CompassPoint::E);
        assert_eq!(point(180), CompassPoint::S);
        assert_eq!(point(270), CompassPoint::W);
        assert_eq!(point(337), CompassPoint::NW);
        assert_eq!(point(338), CompassPoint::N);
    }

    #[test]
    fn north_vector_rotates() {
        let (x, y) = Orientation::default().north_vector();
        assert_relative_eq!(x, 1.0);
        assert_relative_eq!(y, 0.0);

        let (x, y) = Orientation::from_degrees(90).north_vector();
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 1.0);
    }

    #[test]
    fn deserializes_normalized() {
        let o: Orientation = serde_json::from_str("450").unwrap();
        assert_eq!(o.degrees(), 90);
        let o: Orientation = serde_json::from_str("-90").unwrap();
        assert_eq!(o.degrees(), 270);
        assert_eq!(serde_json::to_string(&o).unwrap(), "270");
    }

    #[test]
    fn displays_degrees_and_point() {
        assert_eq!(Orientation::from_degrees(135).to_string(), "135° (SE)");
    }
}
