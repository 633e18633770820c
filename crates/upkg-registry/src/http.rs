//! npm-compatible registry client
//!
//! Unity's package registry speaks the npm registry protocol, so the search
//! endpoint `/-/v1/search` lists what can be added as a dependency.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use upkg_core::{DependencyCatalogEntry, Error, RegistryQuery, Result};

use crate::project::installed_packages;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    objects: Vec<SearchObject>,
}

#[derive(Debug, Deserialize)]
struct SearchObject {
    package: SearchPackage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPackage {
    name: String,
    version: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl From<SearchPackage> for DependencyCatalogEntry {
    fn from(package: SearchPackage) -> Self {
        let display_name = package
            .display_name
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| package.name.clone());
        DependencyCatalogEntry::new(package.name, display_name, package.version)
    }
}

fn parse_search_response(body: &str) -> Result<Vec<DependencyCatalogEntry>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .objects
        .into_iter()
        .map(|o| DependencyCatalogEntry::from(o.package))
        .collect())
}

pub struct HttpRegistry {
    client: reqwest::Client,
    base_url: String,
    search_text: String,
    search_size: usize,
    project_root: Option<PathBuf>,
}

impl HttpRegistry {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("upkg/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::RegistryQuery(format!("Failed to create HTTP client: {}", e)))?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            search_text: "com.unity".to_string(),
            search_size: 250,
            project_root: None,
        })
    }

    pub fn with_search(mut self, text: impl Into<String>, size: usize) -> Self {
        self.search_text = text.into();
        self.search_size = size;
        self
    }

    /// Project whose manifest answers `list_installed`
    pub fn with_project(mut self, project_root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(project_root.into());
        self
    }

    fn search_url(&self) -> String {
        format!("{}/-/v1/search", self.base_url)
    }
}

#[async_trait]
impl RegistryQuery for HttpRegistry {
    async fn list_installed(&self) -> Result<Vec<DependencyCatalogEntry>> {
        match &self.project_root {
            Some(root) => installed_packages(root).await.map_err(|e| {
                Error::RegistryQuery(format!("cannot list installed packages: {}", e))
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn search_all(&self) -> Result<Vec<DependencyCatalogEntry>> {
        let url = self.search_url();
        let size = self.search_size.to_string();
        debug!("GET {} text={}", url, self.search_text);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("text", self.search_text.as_str()),
                ("size", size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::RegistryQuery(format!("Failed to reach {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::RegistryQuery(format!(
                "HTTP error {}: {}",
                response.status().as_u16(),
                url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::RegistryQuery(format!("Failed to read response: {}", e)))?;

        parse_search_response(&body)
    }
}
