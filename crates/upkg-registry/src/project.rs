//! Unity project manifest (`Packages/manifest.json`)
//!
//! Unity reads its package references from this file and re-resolves when it
//! changes, so adding a `file:` dependency here is how a local package gets
//! installed.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use upkg_core::scaffold::MANIFEST_FILE;
use upkg_core::target::PACKAGES_DIR;
use upkg_core::{DependencyCatalogEntry, Error, PackageRegistrar, Result};

pub const PROJECT_MANIFEST_FILE: &str = "manifest.json";

/// In-memory view of `Packages/manifest.json`. Unknown keys are kept as-is and
/// key order is preserved on save.
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    path: PathBuf,
    root: Map<String, Value>,
}

impl ProjectManifest {
    pub fn path_for(project_root: &Path) -> PathBuf {
        project_root.join(PACKAGES_DIR).join(PROJECT_MANIFEST_FILE)
    }

    pub async fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path_for(project_root);
        let content = tokio::fs::read_to_string(&path).await?;
        let root = match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => map,
            _ => {
                return Err(Error::Other(anyhow::anyhow!(
                    "{} is not a JSON object",
                    path.display()
                )));
            }
        };
        Ok(Self { path, root })
    }

    /// `(name, version-or-reference)` pairs in file order
    pub fn dependencies(&self) -> Vec<(String, String)> {
        self.root
            .get("dependencies")
            .and_then(Value::as_object)
            .map(|deps| {
                deps.iter()
                    .map(|(name, version)| {
                        let version = version.as_str().unwrap_or_default().to_string();
                        (name.clone(), version)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Insert or replace a dependency. New names go at the end.
    pub fn set_dependency(&mut self, name: &str, reference: &str) {
        let deps = self
            .root
            .entry("dependencies")
            .or_insert_with(|| Value::Object(Map::new()));
        if !deps.is_object() {
            *deps = Value::Object(Map::new());
        }
        if let Value::Object(deps) = deps {
            deps.insert(name.to_string(), Value::String(reference.to_string()));
        }
    }

    pub async fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.root)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| Error::FileWrite {
                path: self.path.clone(),
                source,
            })
    }
}

/// Packages referenced by the project manifest, as catalog entries
pub async fn installed_packages(project_root: &Path) -> Result<Vec<DependencyCatalogEntry>> {
    let manifest = ProjectManifest::load(project_root).await?;
    Ok(manifest
        .dependencies()
        .into_iter()
        .map(|(name, version)| DependencyCatalogEntry::new(name.clone(), name, version))
        .collect())
}

/// `file:` reference Unity accepts on every platform
pub fn file_reference(path: &Path) -> String {
    format!("file:{}", path.display().to_string().replace('\\', "/"))
}

/// Registers packages by editing the project manifest
pub struct ProjectRegistrar {
    project_root: PathBuf,
    resolve_command: Option<Vec<String>>,
}

impl ProjectRegistrar {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            resolve_command: None,
        }
    }

    /// Program and arguments to launch on `resolve`
    pub fn with_resolve_command(mut self, command: Option<Vec<String>>) -> Self {
        self.resolve_command = command.filter(|c| !c.is_empty());
        self
    }
}

#[async_trait]
impl PackageRegistrar for ProjectRegistrar {
    async fn add_local(&self, path: &Path) -> Result<()> {
        let package_manifest = path.join(MANIFEST_FILE);
        let content = tokio::fs::read_to_string(&package_manifest)
            .await
            .map_err(|e| {
                Error::Registration(format!(
                    "cannot read {}: {}",
                    package_manifest.display(),
                    e
                ))
            })?;
        let value: Value = serde_json::from_str(&content)?;
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                Error::Registration(format!("{} has no name", package_manifest.display()))
            })?;

        let mut project = ProjectManifest::load(&self.project_root)
            .await
            .map_err(|e| Error::Registration(format!("cannot load project manifest: {}", e)))?;
        // Unity resolves relative `file:` paths from Packages/, not the working directory
        let absolute = std::path::absolute(path).map_err(|e| {
            Error::Registration(format!("cannot resolve {}: {}", path.display(), e))
        })?;
        let reference = file_reference(&absolute);
        project.set_dependency(name, &reference);
        project.save().await?;

        info!("Added {} -> {}", name, reference);
        Ok(())
    }

    fn resolve(&self) -> Result<()> {
        let Some((program, args)) = self
            .resolve_command
            .as_ref()
            .and_then(|c| c.split_first())
        else {
            info!("Unity will resolve packages the next time the editor gains focus");
            return Ok(());
        };

        let mut child = tokio::process::Command::new(program)
            .args(args)
            .current_dir(&self.project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| Error::Registration(format!("failed to start {}: {}", program, e)))?;

        debug!("Started resolve command {}", program);
        let program = program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!("{} finished", program),
                Ok(status) => warn!("{} exited with {}", program, status),
                Err(e) => warn!("{} failed: {}", program, e),
            }
        });
        Ok(())
    }
}
