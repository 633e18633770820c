use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Directory under the project root that Unity scans for embedded packages
pub const PACKAGES_DIR: &str = "Packages";

/// Where, relative to the project, a generated package is placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTarget {
    /// Sibling of the project's `Assets`, referenced through a `file:` dependency
    #[default]
    Local,
    /// Inside `Packages/`, picked up by Unity without an explicit reference
    Embedded,
}

impl DeploymentTarget {
    pub fn destination(&self, project_root: &Path, fully_qualified_name: &str) -> PathBuf {
        match self {
            DeploymentTarget::Local => project_root.join(fully_qualified_name),
            DeploymentTarget::Embedded => project_root.join(PACKAGES_DIR).join(fully_qualified_name),
        }
    }

    /// Whether the package must be added to the project manifest explicitly
    pub fn needs_registration(&self) -> bool {
        matches!(self, DeploymentTarget::Local)
    }
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentTarget::Local => write!(f, "local"),
            DeploymentTarget::Embedded => write!(f, "embedded"),
        }
    }
}

impl FromStr for DeploymentTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(DeploymentTarget::Local),
            "embedded" => Ok(DeploymentTarget::Embedded),
            other => Err(Error::Validation(format!(
                "Unknown deployment target '{}', expected 'local' or 'embedded'",
                other
            ))),
        }
    }
}
