//! package.json model
//!
//! Write-only: the manifest is emitted once at scaffold time and never read back.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::Result;

/// Version stamped on every freshly scaffolded package
pub const INITIAL_VERSION: &str = "0.0.1";

/// A `name -> version` entry in the manifest's dependency object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Unity package manifest. Field order here is the emitted key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(rename = "unity", skip_serializing_if = "String::is_empty")]
    pub unity_min_version: String,
    #[serde(
        serialize_with = "serialize_dependencies",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dependencies: Vec<Dependency>,
}

impl PackageManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: INITIAL_VERSION.to_string(),
            display_name: String::new(),
            description: String::new(),
            author: String::new(),
            unity_min_version: String::new(),
            dependencies: Vec::new(),
        }
    }
}

// Emitted as an object keyed by name, in selection order.
fn serialize_dependencies<S>(
    dependencies: &[Dependency],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(dependencies.len()))?;
    for dependency in dependencies {
        map.serialize_entry(&dependency.name, &dependency.version)?;
    }
    map.end()
}

/// Render the manifest as indented JSON
pub fn serialize_manifest(manifest: &PackageManifest) -> Result<String> {
    Ok(serde_json::to_string_pretty(manifest)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(json: &str) -> Vec<String> {
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_minimal_manifest_has_only_name_and_version() {
        let json = serialize_manifest(&PackageManifest::new("com.acme.foo")).unwrap();
        assert_eq!(keys(&json), vec!["name", "version"]);
        assert!(json.contains("\"version\": \"0.0.1\""));
    }

    #[test]
    fn test_field_order_is_fixed() {
        let manifest = PackageManifest {
            display_name: "Acme.Foo".into(),
            description: "Does foo".into(),
            author: "Jane".into(),
            unity_min_version: "2022.3".into(),
            dependencies: vec![Dependency::new("com.unity.textmeshpro", "3.0.6")],
            ..PackageManifest::new("com.acme.foo")
        };
        let json = serialize_manifest(&manifest).unwrap();
        assert_eq!(
            keys(&json),
            vec![
                "name",
                "version",
                "displayName",
                "description",
                "author",
                "unity",
                "dependencies"
            ]
        );
    }

    #[test]
    fn test_dependency_order_preserved() {
        let manifest = PackageManifest {
            dependencies: vec![
                Dependency::new("com.x.b", "2.1.0"),
                Dependency::new("com.x.a", "1.0.0"),
            ],
            ..PackageManifest::new("com.acme.foo")
        };
        let json = serialize_manifest(&manifest).unwrap();
        let b = json.find("\"com.x.b\"").unwrap();
        let a = json.find("\"com.x.a\"").unwrap();
        assert!(b < a);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dependencies"]["com.x.a"], "1.0.0");
        assert_eq!(value["dependencies"]["com.x.b"], "2.1.0");
    }

    #[test]
    fn test_empty_author_omitted_but_description_kept() {
        let manifest = PackageManifest {
            description: "Does foo".into(),
            ..PackageManifest::new("com.acme.foo")
        };
        let json = serialize_manifest(&manifest).unwrap();
        assert_eq!(keys(&json), vec!["name", "version", "description"]);
    }
}
