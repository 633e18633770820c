use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use upkg_core::DeploymentTarget;

/// Configuration for upkg
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub resolve: ResolveConfig,
}

/// Values used when the matching command-line flag is omitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub unity: String,

    #[serde(default)]
    pub target: DeploymentTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Search text sent to the registry; Unity packages share the `com.unity` prefix
    #[serde(default = "default_search_text")]
    pub search_text: String,

    #[serde(default = "default_search_size")]
    pub search_size: usize,

    #[serde(default)]
    pub include_installed: bool,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

/// Command spawned after registration to make Unity re-resolve packages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveConfig {
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            search_text: default_search_text(),
            search_size: default_search_size(),
            include_installed: false,
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_registry_url() -> String {
    "https://packages.unity.com".to_string()
}

fn default_search_text() -> String {
    "com.unity".to_string()
}

fn default_search_size() -> usize {
    250
}

fn default_poll_interval() -> u64 {
    1
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, writing the defaults there first if it is missing
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "upkg", "upkg") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.upkg/config.toml")
        }
    }
}

/// Find the Unity project containing `start` by walking up to the first
/// directory with both `Assets/` and `ProjectSettings/`
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join("Assets").is_dir() && current.join("ProjectSettings").is_dir() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find the Unity project containing the current directory
pub fn find_project_root() -> anyhow::Result<Option<PathBuf>> {
    let current = std::env::current_dir()?;
    Ok(find_project_root_from(&current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.registry.url, "https://packages.unity.com");
        assert_eq!(config.registry.poll_interval_secs, 1);
        assert_eq!(config.defaults.target, DeploymentTarget::Local);
        assert!(config.resolve.command.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.registry.search_size, config.registry.search_size);
    }

    #[test]
    fn test_partial_config_parse() {
        let toml_str = r#"
[defaults]
company = "Acme"
target = "embedded"

[registry]
include_installed = true

[resolve]
command = ["unity", "-batchmode", "-quit"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.defaults.company.as_deref(), Some("Acme"));
        assert_eq!(config.defaults.target, DeploymentTarget::Embedded);
        assert!(config.registry.include_installed);
        assert_eq!(config.registry.search_size, 250);
        assert_eq!(config.resolve.command.unwrap().len(), 3);
    }

    #[test]
    fn test_load_from_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.registry.search_text, "com.unity");
    }

    #[test]
    fn test_find_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Game");
        std::fs::create_dir_all(project.join("Assets").join("Scripts")).unwrap();
        std::fs::create_dir_all(project.join("ProjectSettings")).unwrap();

        let found = find_project_root_from(&project.join("Assets").join("Scripts"));
        assert_eq!(found, Some(project));
        assert_eq!(find_project_root_from(dir.path()), None);
    }
}
