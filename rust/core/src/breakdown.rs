// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Estimate results.

use serde::{Deserialize, Serialize};

/// Annual energy of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEnergy {
    pub category: String,
    /// kWh/year
    pub kwh: f64,
}

/// Category values in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryValues(Vec<CategoryEnergy>);

impl CategoryValues {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub(crate) fn push(&mut self, category: impl Into<String>, kwh: f64) {
        self.0.push(CategoryEnergy {
            category: category.into(),
            kwh,
        });
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.kwh)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|e| (e.category.as_str(), e.kwh))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|e| e.kwh)
    }

    /// Sum over all categories, accumulated in order.
    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Baseline and improved annual energy per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    pub baseline: CategoryValues,
    pub improved: CategoryValues,
    pub total_baseline: f64,
    pub total_improved: f64,
    pub improvement_percent: f64,
}

impl EnergyBreakdown {
    /// Builds the improved values and totals from a baseline.
    pub(crate) fn from_baseline(baseline: CategoryValues, improvement_percent: f64) -> Self {
        let retained = 1.0 - improvement_percent / 100.0;
        let mut improved = CategoryValues::with_capacity(baseline.len());
        for (category, kwh) in baseline.iter() {
            improved.push(category, kwh * retained);
        }

        Self {
            total_baseline: baseline.total(),
            total_improved: improved.total(),
            baseline,
            improved,
            improvement_percent,
        }
    }

    /// Energy saved per year.
    pub fn savings(&self) -> f64 {
        self.total_baseline - self.total_improved
    }
}
