// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intensity tables: base energy intensities per standard and category,
//! plus the option catalog and modifier weights.
//!
//! A table is loaded once (from JSON or the built-in profile), validated,
//! and then only read. Document schema:
//!
//! ```json
//! {
//!   "categories": ["Space Heating", "Internal Lighting"],
//!   "standards": { "TEK87": { "Space Heating": 100, "Internal Lighting": 24 } },
//!   "options": { "Wall": { "options": ["No Change", "50mm"], "default": "No Change" } },
//!   "modifiers": { "Wall": { "Space Heating": -0.08 } }
//! }
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::{OptionCatalog, OptionGroup, OptionList};

/// Category names of the built-in Norwegian residential profile.
pub const NORWEGIAN_CATEGORIES: [&str; 5] = [
    "Space Heating",
    "Service Water Heating",
    "Fans and Pumps",
    "Internal Lighting",
    "Miscellaneous",
];

/// Base intensities in kWh/m²/year keyed by category name.
pub type IntensityProfile = FxHashMap<String, f64>;

/// Per-category base intensities and modifier configuration.
///
/// Deserializing a table validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct IntensityTable {
    categories: Vec<String>,
    standards: FxHashMap<String, IntensityProfile>,
    options: OptionCatalog,
    modifiers: FxHashMap<OptionGroup, FxHashMap<String, f64>>,
}

/// Document form, before validation.
#[derive(Deserialize)]
struct RawTable {
    categories: Vec<String>,
    standards: FxHashMap<String, IntensityProfile>,
    #[serde(default)]
    options: OptionCatalog,
    #[serde(default)]
    modifiers: FxHashMap<OptionGroup, FxHashMap<String, f64>>,
}

impl TryFrom<RawTable> for IntensityTable {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        let table = IntensityTable {
            categories: raw.categories,
            standards: raw.standards,
            options: raw.options,
            modifiers: raw.modifiers,
        };
        table.validate()?;
        Ok(table)
    }
}

impl IntensityTable {
    /// Creates an empty table over an ordered category set.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            standards: FxHashMap::default(),
            options: OptionCatalog::new(),
            modifiers: FxHashMap::default(),
        }
    }

    /// Adds or replaces the intensity profile of a standard.
    pub fn with_standard<I, S>(mut self, standard: impl Into<String>, intensities: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.standards.insert(
            standard.into(),
            intensities.into_iter().map(|(c, v)| (c.into(), v)).collect(),
        );
        self
    }

    pub fn with_options(mut self, group: OptionGroup, list: OptionList) -> Self {
        self.options.insert(group, list);
        self
    }

    /// Sets the weight `group` applies to `category`.
    pub fn with_modifier(
        mut self,
        group: OptionGroup,
        category: impl Into<String>,
        weight: f64,
    ) -> Self {
        self.modifiers
            .entry(group)
            .or_default()
            .insert(category.into(), weight);
        self
    }

    /// Parses and validates a JSON table document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        // Parse the raw form so validation errors keep their own variant.
        let raw: RawTable = serde_json::from_str(json)?;
        let table = Self::try_from(raw)?;
        tracing::debug!(
            categories = table.categories.len(),
            standards = table.standards.len(),
            "Loaded intensity table"
        );
        Ok(table)
    }

    /// Reads and validates a JSON table document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "Read intensity table");
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Norwegian single-family profiles for TEK87 and TEK97.
    pub fn builtin() -> Self {
        let [heating, water, fans, lighting, misc] = NORWEGIAN_CATEGORIES;
        Self::new(NORWEGIAN_CATEGORIES)
            .with_standard(
                "TEK87",
                [
                    (heating, 100.0),
                    (water, 20.0),
                    (fans, 6.0),
                    (lighting, 24.0),
                    (misc, 25.0),
                ],
            )
            .with_standard(
                "TEK97",
                [
                    (heating, 93.0),
                    (water, 31.0),
                    (fans, 8.0),
                    (lighting, 18.0),
                    (misc, 24.0),
                ],
            )
            .with_options(OptionGroup::Case, OptionList::new(["Single Family"]))
            .with_options(
                OptionGroup::Cities,
                OptionList::new(["Oslo", "Bergen", "Trondheim", "Tromsø"]).with_default("Oslo"),
            )
            .with_options(OptionGroup::Rotation, OptionList::new(["0", "90", "180", "270"]))
            .with_options(
                OptionGroup::Wall,
                OptionList::new(["No Change", "50mm", "100mm", "150mm"]).with_default("No Change"),
            )
            .with_options(
                OptionGroup::Glazing,
                OptionList::new(["No Change", "Double", "Triple"]).with_default("No Change"),
            )
            .with_options(
                OptionGroup::Photovoltaic,
                OptionList::new(["None", "Partial Roof", "Full Roof"]).with_default("None"),
            )
            .with_modifier(OptionGroup::Wall, heating, -0.08)
            .with_modifier(OptionGroup::Glazing, heating, -0.05)
            .with_modifier(OptionGroup::Photovoltaic, misc, -0.25)
    }

    /// Ordered category names.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Standard names in lexical order.
    pub fn standard_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.standards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn options(&self) -> &OptionCatalog {
        &self.options
    }

    /// Returns the intensity profile of a standard.
    pub fn profile(&self, standard: &str) -> Result<&IntensityProfile> {
        self.standards
            .get(standard)
            .ok_or_else(|| Error::MissingStandard(standard.to_string()))
    }

    /// Base intensity of `category` under `standard` (kWh/m²/year).
    pub fn base_intensity(&self, standard: &str, category: &str) -> Result<f64> {
        self.profile(standard)?
            .get(category)
            .copied()
            .ok_or_else(|| Error::MissingIntensity {
                standard: standard.to_string(),
                category: category.to_string(),
            })
    }

    /// Modifier weights that apply to `category`, in group order.
    pub fn modifier_weights<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = (OptionGroup, f64)> + 'a {
        OptionGroup::ALL.into_iter().filter_map(move |group| {
            self.modifiers
                .get(&group)
                .and_then(|weights| weights.get(category))
                .map(|&w| (group, w))
        })
    }

    /// Checks the table for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::InvalidTable("no categories".into()));
        }
        for (i, category) in self.categories.iter().enumerate() {
            if self.categories[..i].contains(category) {
                return Err(Error::InvalidTable(format!(
                    "category '{}' is listed twice",
                    category
                )));
            }
        }

        if self.standards.is_empty() {
            return Err(Error::InvalidTable("no standards".into()));
        }
        for (standard, profile) in &self.standards {
            for category in &self.categories {
                match profile.get(category) {
                    Some(v) if v.is_finite() && *v >= 0.0 => {}
                    Some(v) => {
                        return Err(Error::InvalidTable(format!(
                            "standard '{}' has invalid intensity {} for '{}'",
                            standard, v, category
                        )))
                    }
                    None => {
                        return Err(Error::MissingIntensity {
                            standard: standard.clone(),
                            category: category.clone(),
                        })
                    }
                }
            }
            if let Some(extra) = profile.keys().find(|k| !self.categories.contains(*k)) {
                return Err(Error::InvalidTable(format!(
                    "standard '{}' lists unknown category '{}'",
                    standard, extra
                )));
            }
        }

        self.options.validate()?;

        for (&group, weights) in &self.modifiers {
            if !group.accepts_modifiers() {
                return Err(Error::InvalidTable(format!(
                    "{} cannot carry modifier weights",
                    group
                )));
            }
            let list = self.options.get(group).ok_or_else(|| {
                Error::InvalidTable(format!("{} modifiers have no option list", group))
            })?;
            // The factor is linear in the level, so the extremes bound it.
            let (lo, hi) = list.level_range().unwrap_or((0.0, 0.0));
            for (category, &weight) in weights {
                if !self.categories.contains(category) {
                    return Err(Error::InvalidTable(format!(
                        "{} modifier references unknown category '{}'",
                        group, category
                    )));
                }
                if !weight.is_finite() {
                    return Err(Error::InvalidTable(format!(
                        "{} weight for '{}' is not finite",
                        group, category
                    )));
                }
                if 1.0 + weight * lo < 0.0 || 1.0 + weight * hi < 0.0 {
                    return Err(Error::InvalidTable(format!(
                        "{} weight {} makes '{}' negative",
                        group, weight, category
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for IntensityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid() {
        let table = IntensityTable::builtin();
        table.validate().unwrap();
        assert_eq!(table.categories().len(), 5);
        assert_eq!(table.standard_names(), vec!["TEK87", "TEK97"]);
        assert_eq!(table.base_intensity("TEK97", "Space Heating").unwrap(), 93.0);
    }

    #[test]
    fn missing_standard_and_category() {
        let table = IntensityTable::builtin();
        assert!(matches!(
            table.base_intensity("TEK17", "Space Heating"),
            Err(Error::MissingStandard(_))
        ));
        assert!(matches!(
            table.base_intensity("TEK87", "Cooling"),
            Err(Error::MissingIntensity { .. })
        ));
    }

    #[test]
    fn modifier_weights_follow_group_order() {
        let table = IntensityTable::builtin();
        let weights: Vec<_> = table.modifier_weights("Space Heating").collect();
        assert_eq!(
            weights,
            vec![(OptionGroup::Wall, -0.08), (OptionGroup::Glazing, -0.05)]
        );
        assert_eq!(table.modifier_weights("Fans and Pumps").count(), 0);
    }

    #[test]
    fn json_document_round_trip() {
        let table = IntensityTable::builtin();
        let json = table.to_json().unwrap();
        let parsed = IntensityTable::from_json_str(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn rejects_incomplete_standard() {
        let json = r#"{
            "categories": ["Heating", "Lighting"],
            "standards": { "TEK87": { "Heating": 100 } }
        }"#;
        let err = IntensityTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::MissingIntensity { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn rejects_modifier_on_unknown_category() {
        let table = IntensityTable::new(["Heating"])
            .with_standard("A", [("Heating", 1.0)])
            .with_options(OptionGroup::Wall, OptionList::new(["x", "y"]))
            .with_modifier(OptionGroup::Wall, "Cooling", 0.1);
        assert!(table.validate().is_err());
    }

    #[test]
    fn rejects_negative_factor() {
        let table = IntensityTable::new(["Heating"])
            .with_standard("A", [("Heating", 1.0)])
            .with_options(OptionGroup::Wall, OptionList::new(["a", "b", "c"]))
            .with_modifier(OptionGroup::Wall, "Heating", -0.6);
        assert!(matches!(table.validate(), Err(Error::InvalidTable(_))));
    }

    #[test]
    fn rejects_modifier_on_rotation() {
        let table = IntensityTable::new(["Heating"])
            .with_standard("A", [("Heating", 1.0)])
            .with_options(OptionGroup::Rotation, OptionList::new(["0", "90"]))
            .with_modifier(OptionGroup::Rotation, "Heating", 0.1);
        assert!(table.validate().is_err());
    }

    #[test]
    fn deserializing_validates() {
        let json = r#"{
            "categories": ["Heating"],
            "standards": { "TEK87": { "Heating": 100 } },
            "options": { "Wall": { "options": [] } }
        }"#;
        let err = serde_json::from_str::<IntensityTable>(json).unwrap_err();
        assert!(err.to_string().contains("Wall option list is empty"));

        let err = IntensityTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::InvalidTable(_)));
    }

    #[test]
    fn malformed_json_is_configuration_error() {
        let err = IntensityTable::from_json_str("{ \"categories\": 3 }").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let err = IntensityTable::from_path("/nonexistent/table.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.is_configuration());
    }
}
