//! Collaborator traits for the package registry and the host project

use std::path::Path;

use async_trait::async_trait;

use crate::Result;
use crate::selection::DependencyCatalogEntry;

/// Source of packages that can be chosen as dependencies
#[async_trait]
pub trait RegistryQuery: Send + Sync {
    /// Packages already present in the project
    async fn list_installed(&self) -> Result<Vec<DependencyCatalogEntry>>;

    /// Every package the registry offers
    async fn search_all(&self) -> Result<Vec<DependencyCatalogEntry>>;
}

/// Makes a freshly written package known to the host project
#[async_trait]
pub trait PackageRegistrar: Send + Sync {
    /// Reference the package at `path` from the project. Completes once recorded.
    async fn add_local(&self, path: &Path) -> Result<()>;

    /// Ask the host to re-resolve dependencies. Returns without waiting for the
    /// resolution itself; only a failure to start it is reported.
    fn resolve(&self) -> Result<()>;
}
