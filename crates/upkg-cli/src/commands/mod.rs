pub mod completions;
pub mod config;
pub mod new;
pub mod search;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use upkg_config::Config;
use upkg_core::{CatalogRefresher, RegistryQuery};
use upkg_registry::HttpRegistry;

/// Use `explicit` if given, otherwise find the Unity project around the current directory.
/// The result is always absolute.
pub fn resolve_project_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return std::path::absolute(&path)
            .with_context(|| format!("Cannot resolve project path {}", path.display()));
    }
    upkg_config::find_project_root()?.context(
        "Not inside a Unity project (no directory with Assets/ and ProjectSettings/); pass --project",
    )
}

/// Registry-backed refresher configured from `config`
pub fn catalog_refresher(
    config: &Config,
    project_root: Option<PathBuf>,
) -> Result<CatalogRefresher> {
    let mut registry = HttpRegistry::new(&config.registry.url)?
        .with_search(&config.registry.search_text, config.registry.search_size);
    if let Some(root) = project_root {
        registry = registry.with_project(root);
    }
    let registry: Arc<dyn RegistryQuery> = Arc::new(registry);

    Ok(CatalogRefresher::new(registry)
        .with_poll_interval(Duration::from_secs(config.registry.poll_interval_secs.max(1))))
}
