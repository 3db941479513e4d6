// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BIM4ENERGY Core
//!
//! Parametric building energy estimation.
//!
//! ## Overview
//!
//! - **Intensity tables**: base energy intensities (kWh/m²/year) per
//!   construction standard and end-use category, loaded from JSON or the
//!   built-in Norwegian TEK87/TEK97 profile
//! - **Option modifiers**: wall insulation, glazing and other categorical
//!   choices scale categories by their ordinal level in an option list
//! - **Estimation**: a pure function from validated parameters to a
//!   per-category baseline and improved breakdown
//! - **Reports**: project metadata and a plain-text assessment summary
//!
//! ## Quick Start
//!
//! ```rust
//! use bim4energy_core::{estimate, BuildingParameters, IntensityTable};
//!
//! let table = IntensityTable::builtin();
//! let params = BuildingParameters::builder(200.0)
//!     .standard("TEK87")
//!     .wall_insulation("100mm")
//!     .improvement_percent(25.0)
//!     .build()?;
//!
//! let breakdown = estimate(&params, &table)?;
//! for (category, kwh) in breakdown.baseline.iter() {
//!     println!("{}: {} kWh", category, kwh);
//! }
//! # Ok::<(), bim4energy_core::Error>(())
//! ```
//!
//! ## Concurrency
//!
//! [`estimate`] touches no shared mutable state. A table is immutable once
//! loaded and can be shared across threads behind an `Arc`.

pub mod breakdown;
pub mod error;
pub mod estimator;
pub mod options;
pub mod orientation;
pub mod params;
pub mod report;
pub mod table;

pub use breakdown::{CategoryEnergy, CategoryValues, EnergyBreakdown};
pub use error::{Error, ErrorKind, Result};
pub use estimator::estimate;
pub use options::{OptionCatalog, OptionEntry, OptionGroup, OptionList};
pub use orientation::{CompassPoint, Orientation};
pub use params::{BuildingParameters, BuildingParametersBuilder, ParameterInput, DEFAULT_STANDARD};
pub use report::{country_from_address, BuildingType, Coordinates, ProjectInfo, Report};
pub use table::{IntensityProfile, IntensityTable, NORWEGIAN_CATEGORIES};
