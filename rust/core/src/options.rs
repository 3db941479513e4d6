// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Enumerated option groups and ordinal option lookup.
//!
//! Every categorical input is chosen from an ordered option list. Modifier
//! factors scale with the *level* of the chosen option, which is its position
//! in the list unless the option declares an explicit level.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The recognized top-level option groups of a table document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionGroup {
    Case,
    Cities,
    Rotation,
    Wall,
    Glazing,
    Photovoltaic,
}

impl OptionGroup {
    /// All groups in document order.
    pub const ALL: [OptionGroup; 6] = [
        OptionGroup::Case,
        OptionGroup::Cities,
        OptionGroup::Rotation,
        OptionGroup::Wall,
        OptionGroup::Glazing,
        OptionGroup::Photovoltaic,
    ];

    /// Groups backed by a categorical parameter, and therefore allowed to
    /// carry modifier weights.
    pub const MODIFIERS: [OptionGroup; 4] = [
        OptionGroup::Cities,
        OptionGroup::Wall,
        OptionGroup::Glazing,
        OptionGroup::Photovoltaic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionGroup::Case => "Case",
            OptionGroup::Cities => "Cities",
            OptionGroup::Rotation => "Rotation",
            OptionGroup::Wall => "Wall",
            OptionGroup::Glazing => "Glazing",
            OptionGroup::Photovoltaic => "Photovoltaic",
        }
    }

    #[inline]
    pub fn accepts_modifiers(self) -> bool {
        Self::MODIFIERS.contains(&self)
    }
}

impl fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single selectable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawOptionEntry")]
pub struct OptionEntry {
    pub name: String,
    /// Explicit scaling level. Falls back to the list position when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
}

/// Document form: either a bare name or `{ "name": ..., "level": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOptionEntry {
    Name(String),
    Detailed { name: String, level: Option<f64> },
}

impl From<RawOptionEntry> for OptionEntry {
    fn from(raw: RawOptionEntry) -> Self {
        match raw {
            RawOptionEntry::Name(name) => OptionEntry { name, level: None },
            RawOptionEntry::Detailed { name, level } => OptionEntry { name, level },
        }
    }
}

impl OptionEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
        }
    }

    pub fn with_level(name: impl Into<String>, level: f64) -> Self {
        Self {
            name: name.into(),
            level: Some(level),
        }
    }
}

/// An ordered list of options with an optional fallback for unknown input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionList {
    #[serde(rename = "options")]
    entries: Vec<OptionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<String>,
}

impl OptionList {
    /// Creates a list from plain option names, without a default.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names.into_iter().map(OptionEntry::new).collect(),
            default: None,
        }
    }

    pub fn from_entries(entries: Vec<OptionEntry>) -> Self {
        Self {
            entries,
            default: None,
        }
    }

    /// Sets the option used in place of unknown selections.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn entries(&self) -> &[OptionEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn default_option(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of `name` in the list.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Scaling level of the option at `index`.
    #[inline]
    fn level_at(&self, index: usize) -> f64 {
        self.entries[index].level.unwrap_or(index as f64)
    }

    /// Resolves a selection to its scaling level.
    ///
    /// Unknown selections resolve through the list's default; without one
    /// they are rejected.
    pub fn resolve(&self, group: OptionGroup, selection: &str) -> Result<f64> {
        if let Some(index) = self.position(selection) {
            return Ok(self.level_at(index));
        }

        match self.default.as_deref().and_then(|d| self.position(d)) {
            Some(index) => {
                tracing::debug!(
                    group = %group,
                    selection = %selection,
                    fallback = %self.entries[index].name,
                    "Unknown option, using default"
                );
                Ok(self.level_at(index))
            }
            None => Err(Error::UnknownOption {
                group,
                value: selection.to_string(),
            }),
        }
    }

    /// Smallest and largest level any option in the list can resolve to.
    pub(crate) fn level_range(&self) -> Option<(f64, f64)> {
        (0..self.entries.len())
            .map(|i| self.level_at(i))
            .fold(None, |acc, level| match acc {
                None => Some((level, level)),
                Some((lo, hi)) => Some((lo.min(level), hi.max(level))),
            })
    }

    pub(crate) fn validate(&self, group: OptionGroup) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::InvalidTable(format!("{} option list is empty", group)));
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|e| e.name == entry.name) {
                return Err(Error::InvalidTable(format!(
                    "{} option '{}' is listed twice",
                    group, entry.name
                )));
            }
            if entry.level.is_some_and(|l| !l.is_finite()) {
                return Err(Error::InvalidTable(format!(
                    "{} option '{}' has a non-finite level",
                    group, entry.name
                )));
            }
        }
        if let Some(default) = &self.default {
            if self.position(default).is_none() {
                return Err(Error::InvalidTable(format!(
                    "{} default '{}' is not one of its options",
                    group, default
                )));
            }
        }
        Ok(())
    }
}

/// Option lists keyed by group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionCatalog {
    groups: FxHashMap<OptionGroup, OptionList>,
}

impl OptionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: OptionGroup, list: OptionList) -> Option<OptionList> {
        self.groups.insert(group, list)
    }

    pub fn get(&self, group: OptionGroup) -> Option<&OptionList> {
        self.groups.get(&group)
    }

    /// Iterates over the configured groups in document order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionGroup, &OptionList)> {
        OptionGroup::ALL
            .into_iter()
            .filter_map(|g| self.groups.get(&g).map(|list| (g, list)))
    }

    /// Resolves `selection` within `group`.
    ///
    /// A missing selection resolves to the first option's level. A group
    /// with no configured list, or an empty one, cannot be resolved.
    pub fn resolve(&self, group: OptionGroup, selection: Option<&str>) -> Result<f64> {
        let list = self.get(group).ok_or_else(|| {
            Error::InvalidTable(format!("no option list configured for {}", group))
        })?;
        if list.is_empty() {
            return Err(Error::InvalidTable(format!("{} option list is empty", group)));
        }
        match selection {
            Some(value) => list.resolve(group, value),
            None => Ok(list.level_at(0)),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (group, list) in self.iter() {
            list.validate(group)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> OptionList {
        OptionList::new(["No Change", "50mm", "100mm"])
    }

    #[test]
    fn resolves_by_position() {
        let list = wall();
        assert_eq!(list.resolve(OptionGroup::Wall, "No Change").unwrap(), 0.0);
        assert_eq!(list.resolve(OptionGroup::Wall, "100mm").unwrap(), 2.0);
    }

    #[test]
    fn unknown_without_default_is_rejected() {
        let err = wall().resolve(OptionGroup::Wall, "300mm").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn unknown_with_default_falls_back() {
        let list = wall().with_default("50mm");
        assert_eq!(list.resolve(OptionGroup::Wall, "300mm").unwrap(), 1.0);
    }

    #[test]
    fn explicit_level_replaces_position() {
        let list = OptionList::from_entries(vec![
            OptionEntry::new("Single"),
            OptionEntry::with_level("Double", 1.5),
            OptionEntry::new("Triple"),
        ]);
        assert_eq!(list.resolve(OptionGroup::Glazing, "Double").unwrap(), 1.5);
        assert_eq!(list.resolve(OptionGroup::Glazing, "Triple").unwrap(), 2.0);
        assert_eq!(list.level_range(), Some((0.0, 2.0)));
    }

    #[test]
    fn missing_selection_uses_first_option() {
        let mut catalog = OptionCatalog::new();
        catalog.insert(OptionGroup::Photovoltaic, OptionList::new(["None", "Roof"]));
        assert_eq!(catalog.resolve(OptionGroup::Photovoltaic, None).unwrap(), 0.0);
        assert!(catalog
            .resolve(OptionGroup::Cities, Some("Oslo"))
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn empty_list_cannot_be_resolved() {
        let mut catalog = OptionCatalog::new();
        catalog.insert(OptionGroup::Wall, OptionList::new(Vec::<String>::new()));
        for selection in [None, Some("50mm")] {
            let err = catalog.resolve(OptionGroup::Wall, selection).unwrap_err();
            assert!(matches!(err, Error::InvalidTable(_)));
        }
    }

    #[test]
    fn rejects_duplicates_and_foreign_default() {
        let dup = OptionList::new(["A", "B", "A"]);
        assert!(dup.validate(OptionGroup::Case).is_err());

        let foreign = OptionList::new(["A", "B"]).with_default("C");
        assert!(foreign.validate(OptionGroup::Case).is_err());

        assert!(OptionList::default().validate(OptionGroup::Case).is_err());
    }

    #[test]
    fn deserializes_mixed_entries() {
        let list: OptionList = serde_json::from_str(
            r#"{ "options": ["Single", { "name": "Double", "level": 3.0 }], "default": "Single" }"#,
        )
        .unwrap();
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["Single", "Double"]);
        assert_eq!(list.entries()[1].level, Some(3.0));
        assert_eq!(list.default_option(), Some("Single"));
    }
}
