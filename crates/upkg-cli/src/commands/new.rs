use std::sync::Arc;

use anyhow::{Context, Result};
use upkg_config::Config;
use upkg_core::{
    DependencyCatalogEntry, FormChange, IdentifierField, ScaffoldForm, ScaffoldWriter,
    apply_field_change,
};
use upkg_registry::ProjectRegistrar;

use super::{catalog_refresher, resolve_project_root};
use crate::cli::NewArgs;

/// `NAME` or `NAME@VERSION`
#[derive(Debug, PartialEq, Eq)]
struct DepSpec {
    name: String,
    version: Option<String>,
}

fn parse_dep_spec(spec: &str) -> Result<DepSpec> {
    let (name, version) = match spec.split_once('@') {
        Some((name, version)) => (name, Some(version)),
        None => (spec, None),
    };
    if name.is_empty() {
        anyhow::bail!("Invalid dependency '{}': missing package name", spec);
    }
    if version.is_some_and(str::is_empty) {
        anyhow::bail!("Invalid dependency '{}': empty version", spec);
    }
    Ok(DepSpec {
        name: name.to_string(),
        version: version.map(String::from),
    })
}

fn override_changes(field: IdentifierField, value: Option<String>) -> Vec<FormChange> {
    match value {
        Some(value) => vec![
            FormChange::OverrideToggled(field, true),
            FormChange::OverrideValue(field, value),
        ],
        None => Vec::new(),
    }
}

pub async fn handle(args: NewArgs, config: &Config) -> Result<()> {
    let project_root = resolve_project_root(args.project)?;
    tracing::debug!("Using Unity project at {}", project_root.display());
    let company = args
        .company
        .or_else(|| config.defaults.company.clone())
        .context("No company given; pass --company or set defaults.company in the config")?;

    let mut changes = vec![
        FormChange::Author(args.author.unwrap_or_else(|| config.defaults.author.clone())),
        FormChange::Description(args.description.unwrap_or_default()),
        FormChange::UnityVersion(args.unity.unwrap_or_else(|| config.defaults.unity.clone())),
        FormChange::Target(args.target.unwrap_or(config.defaults.target)),
    ];
    changes.extend(override_changes(IdentifierField::FullyQualifiedName, args.id));
    changes.extend(override_changes(IdentifierField::DisplayName, args.display_name));
    changes.extend(override_changes(IdentifierField::RootNamespace, args.namespace));

    let mut form = changes
        .into_iter()
        .try_fold(ScaffoldForm::new(company, args.name), apply_field_change)?;

    let specs = args
        .deps
        .iter()
        .map(|d| parse_dep_spec(d))
        .collect::<Result<Vec<_>>>()?;

    if !specs.is_empty() {
        if args.offline {
            let entries = specs
                .iter()
                .map(|spec| {
                    let version = spec.version.clone().with_context(|| {
                        format!("--offline needs a version for {}", spec.name)
                    })?;
                    Ok(DependencyCatalogEntry::new(&spec.name, &spec.name, version))
                })
                .collect::<Result<Vec<_>>>()?;
            form.selections.ingest(entries);
        } else {
            let include_installed = args.include_installed || config.registry.include_installed;
            let mut refresher = catalog_refresher(config, Some(project_root.clone()))?;
            refresher
                .refresh(&mut form.selections, include_installed)
                .await?;
        }

        for spec in specs {
            let index = form.selections.position_by_name(&spec.name).with_context(|| {
                format!("Package {} not found in the registry catalog", spec.name)
            })?;
            form = apply_field_change(form, FormChange::DependencySelected(index, true))?;
            if let Some(version) = spec.version {
                form = apply_field_change(form, FormChange::DependencyVersion(index, version))?;
            }
        }
    }

    let registrar = ProjectRegistrar::new(&project_root)
        .with_resolve_command(config.resolve.command.clone());
    let writer = ScaffoldWriter::new(&project_root, Arc::new(registrar));
    let request = form.to_request();

    if args.dry_run {
        let plan = writer.plan(&request)?;
        println!("Would create {} package at {}", plan.target, plan.destination.display());
        for file in plan.files {
            println!("\n--- {}", file.path.display());
            println!("{}", file.contents);
        }
        return Ok(());
    }

    let outcome = writer.write(&request).await?;

    println!("✓ Created package: {}", request.manifest.name);
    println!("  Location: {}", outcome.destination.display());
    for path in &outcome.written {
        println!("  Wrote {}", path.display());
    }
    if outcome.registered {
        println!("  Added to Packages/manifest.json");
    }
    if !request.manifest.dependencies.is_empty() {
        println!("  Dependencies:");
        for dep in &request.manifest.dependencies {
            println!("    {} {}", dep.name, dep.version);
        }
    }

    Ok(())
}
