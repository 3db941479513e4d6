// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parametric energy estimation.
//!
//! For every category `c` of the table:
//!
//! ```text
//! factor_g    = 1 + weight(c, g) * level(selection_g)
//! baseline[c] = intensity(standard, c) * area * Π factor_g
//! improved[c] = baseline[c] * (1 - improvement / 100)
//! ```
//!
//! `level` is the position of the selection in its option list unless the
//! option declares an explicit level, so the first option never adjusts.

use crate::breakdown::{CategoryValues, EnergyBreakdown};
use crate::error::{Error, Result};
use crate::options::OptionGroup;
use crate::params::BuildingParameters;
use crate::table::IntensityTable;

/// Selection of `params` feeding modifier `group`.
fn selection(params: &BuildingParameters, group: OptionGroup) -> Option<&str> {
    match group {
        OptionGroup::Wall => params.wall_insulation(),
        OptionGroup::Glazing => params.glazing(),
        OptionGroup::Photovoltaic => params.photovoltaic(),
        OptionGroup::Cities => params.city(),
        OptionGroup::Case | OptionGroup::Rotation => None,
    }
}

/// Computes the per-category baseline and improved energy of a building.
///
/// Fails without a partial result when the standard or a category intensity
/// is missing from `table`, when a selection is unknown and its option list
/// has no default, or when the area is too large for finite energy values.
pub fn estimate(params: &BuildingParameters, table: &IntensityTable) -> Result<EnergyBreakdown> {
    let standard = params.standard();
    let profile = table.profile(standard)?;

    // Resolve each modifier selection once, up front.
    let mut levels = [0.0_f64; OptionGroup::MODIFIERS.len()];
    for (slot, group) in levels.iter_mut().zip(OptionGroup::MODIFIERS) {
        if table.options().get(group).is_some() {
            *slot = table.options().resolve(group, selection(params, group))?;
        }
    }
    let level_of = |group: OptionGroup| {
        OptionGroup::MODIFIERS
            .iter()
            .position(|&g| g == group)
            .map_or(0.0, |i| levels[i])
    };

    let area = params.gross_floor_area();
    let mut baseline = CategoryValues::with_capacity(table.categories().len());
    for category in table.categories() {
        let intensity = profile
            .get(category)
            .copied()
            .ok_or_else(|| Error::MissingIntensity {
                standard: standard.to_string(),
                category: category.clone(),
            })?;

        let factor: f64 = table
            .modifier_weights(category)
            .map(|(group, weight)| 1.0 + weight * level_of(group))
            .product();
        if !intensity.is_finite() || !factor.is_finite() {
            return Err(Error::InvalidTable(format!(
                "'{}' under '{}' has a non-finite intensity or modifier",
                category, standard
            )));
        }

        let kwh = intensity * area * factor;
        if !kwh.is_finite() {
            return Err(Error::FloorAreaTooLarge(area));
        }
        baseline.push(category.as_str(), kwh);
    }

    let breakdown = EnergyBreakdown::from_baseline(baseline, params.improvement_percent());
    if !breakdown.total_baseline.is_finite() {
        return Err(Error::FloorAreaTooLarge(area));
    }

    tracing::debug!(
        standard = %standard,
        area,
        total_baseline = breakdown.total_baseline,
        total_improved = breakdown.total_improved,
        "Estimated energy consumption"
    );

    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionList;
    use approx::assert_relative_eq;

    fn wall_table() -> IntensityTable {
        IntensityTable::new(["Heating", "Lighting"])
            .with_standard("TEK87", [("Heating", 80.0), ("Lighting", 10.0)])
            .with_options(
                OptionGroup::Wall,
                OptionList::new(["No Change", "50mm", "100mm"]),
            )
            .with_modifier(OptionGroup::Wall, "Heating", 0.1)
    }

    #[test]
    fn wall_position_scales_heating() {
        let params = BuildingParameters::builder(100.0)
            .wall_insulation("100mm")
            .build()
            .unwrap();
        let result = estimate(&params, &wall_table()).unwrap();
        assert_relative_eq!(result.baseline.get("Heating").unwrap(), 9600.0);
        assert_eq!(result.baseline.get("Lighting"), Some(1000.0));
    }

    #[test]
    fn first_option_does_not_adjust() {
        let params = BuildingParameters::builder(100.0)
            .wall_insulation("No Change")
            .build()
            .unwrap();
        let result = estimate(&params, &wall_table()).unwrap();
        assert_eq!(result.baseline.get("Heating"), Some(8000.0));
    }

    #[test]
    fn unset_selection_does_not_adjust() {
        let params = BuildingParameters::builder(100.0).build().unwrap();
        let result = estimate(&params, &wall_table()).unwrap();
        assert_eq!(result.baseline.get("Heating"), Some(8000.0));
    }

    #[test]
    fn unknown_selection_without_default_fails() {
        let params = BuildingParameters::builder(100.0)
            .wall_insulation("300mm")
            .build()
            .unwrap();
        let err = estimate(&params, &wall_table()).unwrap_err();
        assert!(matches!(err, Error::UnknownOption { group: OptionGroup::Wall, .. }));
    }

    #[test]
    fn unknown_selection_uses_default() {
        let table = wall_table().with_options(
            OptionGroup::Wall,
            OptionList::new(["No Change", "50mm", "100mm"]).with_default("50mm"),
        );
        let params = BuildingParameters::builder(100.0)
            .wall_insulation("300mm")
            .build()
            .unwrap();
        let result = estimate(&params, &table).unwrap();
        assert_relative_eq!(result.baseline.get("Heating").unwrap(), 8800.0);
    }

    #[test]
    fn modifiers_multiply() {
        let table = wall_table()
            .with_options(OptionGroup::Glazing, OptionList::new(["Single", "Double"]))
            .with_modifier(OptionGroup::Glazing, "Heating", -0.5);
        let params = BuildingParameters::builder(1.0)
            .wall_insulation("50mm")
            .glazing("Double")
            .build()
            .unwrap();
        let result = estimate(&params, &table).unwrap();
        assert_relative_eq!(result.baseline.get("Heating").unwrap(), 80.0 * 1.1 * 0.5);
    }

    #[test]
    fn missing_standard_fails() {
        let params = BuildingParameters::builder(100.0)
            .standard("TEK17")
            .build()
            .unwrap();
        let err = estimate(&params, &wall_table()).unwrap_err();
        assert!(matches!(err, Error::MissingStandard(ref s) if s == "TEK17"));
    }

    #[test]
    fn overflowing_area_is_rejected() {
        let params = BuildingParameters::builder(f64::MAX)
            .improvement_percent(100.0)
            .build()
            .unwrap();
        let err = estimate(&params, &IntensityTable::builtin()).unwrap_err();
        assert!(matches!(err, Error::FloorAreaTooLarge(a) if a == f64::MAX));
        assert!(err.is_validation());

        // Each category stays finite but their sum does not.
        let table =
            IntensityTable::new(["A", "B"]).with_standard("TEK87", [("A", 1.0), ("B", 1.0)]);
        let params = BuildingParameters::builder(f64::MAX).build().unwrap();
        let err = estimate(&params, &table).unwrap_err();
        assert!(matches!(err, Error::FloorAreaTooLarge(_)));
    }

    #[test]
    fn large_finite_area_keeps_invariant() {
        let params = BuildingParameters::builder(1e300)
            .improvement_percent(100.0)
            .build()
            .unwrap();
        let result = estimate(&params, &IntensityTable::builtin()).unwrap();
        assert!(result.total_baseline.is_finite());
        assert!(result.total_improved <= result.total_baseline);
    }

    #[test]
    fn empty_option_list_is_configuration_error() {
        let table = IntensityTable::new(["Heating"])
            .with_standard("TEK87", [("Heating", 80.0)])
            .with_options(OptionGroup::Wall, OptionList::new(Vec::<String>::new()));
        let params = BuildingParameters::builder(100.0).build().unwrap();
        let err = estimate(&params, &table).unwrap_err();
        assert!(matches!(err, Error::InvalidTable(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn missing_intensity_fails() {
        // Built without validation: the profile lacks "Lighting".
        let table = IntensityTable::new(["Heating", "Lighting"])
            .with_standard("TEK87", [("Heating", 80.0)]);
        let params = BuildingParameters::builder(100.0).build().unwrap();
        let err = estimate(&params, &table).unwrap_err();
        assert!(matches!(err, Error::MissingIntensity { .. }));
    }
}
