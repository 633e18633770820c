//! Scaffold writer
//!
//! Lays out a package directory:
//!
//! ```text
//! <destination>/
//!   Editor/<Company>.<Package>.Editor.asmdef
//!   Runtime/<Company>.<Package>.Runtime.asmdef
//!   package.json
//! ```
//!
//! Steps run in order and stop at the first failure. Nothing already written
//! is removed, so a failed run leaves a partial directory behind that has to be
//! deleted before retrying.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::asmdef::{AssemblyDescriptor, serialize_assembly_descriptor};
use crate::manifest::{PackageManifest, serialize_manifest};
use crate::registry::PackageRegistrar;
use crate::target::DeploymentTarget;
use crate::{Error, Result};

pub const MANIFEST_FILE: &str = "package.json";
pub const EDITOR_DIR: &str = "Editor";
pub const RUNTIME_DIR: &str = "Runtime";

/// Everything needed to lay out one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub manifest: PackageManifest,
    pub company: String,
    pub package: String,
    pub root_namespace: String,
    pub target: DeploymentTarget,
}

impl ScaffoldRequest {
    pub fn validate(&self) -> Result<()> {
        require("package name", &self.package)?;
        require("company name", &self.company)?;
        require("fully qualified name", &self.manifest.name)?;
        if self.manifest.version.is_empty() {
            return Err(Error::Validation("version must not be empty".to_string()));
        }
        if self.root_namespace.is_empty() {
            return Err(Error::Validation(
                "root namespace must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// `Company.Package`
    pub fn assembly_stem(&self) -> String {
        format!("{}.{}", self.company, self.package)
    }

    pub fn editor_assembly(&self) -> AssemblyDescriptor {
        AssemblyDescriptor::editor(&self.assembly_stem(), &self.root_namespace)
    }

    pub fn runtime_assembly(&self) -> AssemblyDescriptor {
        AssemblyDescriptor::runtime(&self.assembly_stem(), &self.root_namespace)
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Validation(format!("{} must not be empty", field)));
    }
    if value.contains(['/', '\\']) {
        return Err(Error::Validation(format!(
            "{} must not contain path separators: {}",
            field, value
        )));
    }
    Ok(())
}

/// A file the scaffold will write, with its full contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// The complete on-disk result of a scaffold, computed without touching disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub destination: PathBuf,
    pub target: DeploymentTarget,
    pub files: Vec<PlannedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    pub destination: PathBuf,
    pub written: Vec<PathBuf>,
    pub registered: bool,
}

pub struct ScaffoldWriter {
    project_root: PathBuf,
    registrar: Arc<dyn PackageRegistrar>,
}

impl ScaffoldWriter {
    pub fn new(project_root: impl Into<PathBuf>, registrar: Arc<dyn PackageRegistrar>) -> Self {
        Self {
            project_root: project_root.into(),
            registrar,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Validate the request and render every file without writing anything
    pub fn plan(&self, request: &ScaffoldRequest) -> Result<ScaffoldPlan> {
        request.validate()?;

        let destination = request
            .target
            .destination(&self.project_root, &request.manifest.name);

        let editor = request.editor_assembly();
        let runtime = request.runtime_assembly();

        let files = vec![
            PlannedFile {
                path: destination.join(EDITOR_DIR).join(editor.file_name()),
                contents: serialize_assembly_descriptor(&editor)?,
            },
            PlannedFile {
                path: destination.join(RUNTIME_DIR).join(runtime.file_name()),
                contents: serialize_assembly_descriptor(&runtime)?,
            },
            PlannedFile {
                path: destination.join(MANIFEST_FILE),
                contents: serialize_manifest(&request.manifest)?,
            },
        ];

        Ok(ScaffoldPlan {
            destination,
            target: request.target,
            files,
        })
    }

    /// Write the package and register it with the project
    pub async fn write(&self, request: &ScaffoldRequest) -> Result<ScaffoldOutcome> {
        let plan = self.plan(request)?;
        let destination = plan.destination.clone();

        if let Some(parent) = destination.parent() {
            create_dir(parent).await?;
        }
        tokio::fs::create_dir(&destination)
            .await
            .map_err(|e| Error::DirectoryCreate {
                path: destination.clone(),
                reason: if e.kind() == std::io::ErrorKind::AlreadyExists {
                    "destination already exists".to_string()
                } else {
                    e.to_string()
                },
            })?;
        info!("Creating package at {}", destination.display());

        let mut written = Vec::with_capacity(plan.files.len());
        for file in plan.files {
            if let Some(parent) = file.path.parent() {
                create_dir(parent).await?;
            }
            tokio::fs::write(&file.path, &file.contents)
                .await
                .map_err(|source| Error::FileWrite {
                    path: file.path.clone(),
                    source,
                })?;
            debug!("Wrote {}", file.path.display());
            written.push(file.path);
        }

        let registered = plan.target.needs_registration();
        if registered {
            self.registrar.add_local(&destination).await?;
            info!("Registered {} with the project", request.manifest.name);
        }
        self.registrar.resolve()?;

        Ok(ScaffoldOutcome {
            destination,
            written,
            registered,
        })
    }
}

async fn create_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| Error::DirectoryCreate {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
