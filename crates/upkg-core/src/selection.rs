//! Dependency selection over a registry catalog

use serde::Serialize;

use crate::manifest::Dependency;
use crate::{Error, Result};

/// A package known to the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyCatalogEntry {
    pub name: String,
    pub display_name: String,
    pub latest_version: String,
}

impl DependencyCatalogEntry {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        latest_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            latest_version: latest_version.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySelection {
    pub entry: DependencyCatalogEntry,
    pub selected: bool,
    pub version_override: String,
}

impl From<DependencyCatalogEntry> for DependencySelection {
    fn from(entry: DependencyCatalogEntry) -> Self {
        Self {
            version_override: entry.latest_version.clone(),
            selected: false,
            entry,
        }
    }
}

/// Ordered list of catalog entries and the user's choices over them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selections: Vec<DependencySelection>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one unselected entry per catalog entry. Existing entries are kept,
    /// so ingesting the same catalog twice lists every package twice.
    pub fn ingest<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = DependencyCatalogEntry>,
    {
        self.selections
            .extend(entries.into_iter().map(DependencySelection::from));
    }

    /// Drop everything, then ingest
    pub fn replace<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = DependencyCatalogEntry>,
    {
        self.selections.clear();
        self.ingest(entries);
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<()> {
        self.get_mut(index)?.selected = selected;
        Ok(())
    }

    pub fn set_version_override(&mut self, index: usize, version: impl Into<String>) -> Result<()> {
        self.get_mut(index)?.version_override = version.into();
        Ok(())
    }

    /// Selected entries in list order, with their (possibly overridden) versions
    pub fn to_dependency_list(&self) -> Vec<Dependency> {
        self.selections
            .iter()
            .filter(|s| s.selected)
            .map(|s| Dependency::new(s.entry.name.clone(), s.version_override.clone()))
            .collect()
    }

    /// First entry whose display name contains `query`, ignoring case
    pub fn find(&self, query: &str) -> Result<usize> {
        if query.is_empty() {
            return Err(Error::NotFound("empty search query".to_string()));
        }
        let needle = query.to_lowercase();
        self.selections
            .iter()
            .position(|s| s.entry.display_name.to_lowercase().contains(&needle))
            .ok_or_else(|| Error::NotFound(format!("no package matching '{}'", query)))
    }

    /// First entry with exactly this package name
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.selections.iter().position(|s| s.entry.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&DependencySelection> {
        self.selections.get(index)
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut DependencySelection> {
        let len = self.selections.len();
        self.selections
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencySelection> {
        self.selections.iter()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
