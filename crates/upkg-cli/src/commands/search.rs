use std::path::PathBuf;

use anyhow::Result;
use upkg_config::Config;
use upkg_core::SelectionSet;

use super::{catalog_refresher, resolve_project_root};

pub async fn handle(
    query: Option<String>,
    include_installed: bool,
    format: &str,
    project: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let include_installed = include_installed || config.registry.include_installed;
    // Installed packages come from the project manifest, so only then is a project required
    let project_root = if include_installed {
        Some(resolve_project_root(project)?)
    } else {
        project
    };

    let mut refresher = catalog_refresher(config, project_root)?;
    let mut catalog = SelectionSet::new();
    refresher.refresh(&mut catalog, include_installed).await?;

    let entries: Vec<_> = match query.as_deref() {
        Some(query) => {
            let index = catalog.find(query)?;
            catalog.iter().skip(index).take(1).map(|s| &s.entry).collect()
        }
        None => catalog.iter().map(|s| &s.entry).collect(),
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            if entries.is_empty() {
                println!("No packages found.");
            }
            for entry in entries {
                println!("{} ({}) {}", entry.display_name, entry.name, entry.latest_version);
            }
        }
    }

    Ok(())
}
