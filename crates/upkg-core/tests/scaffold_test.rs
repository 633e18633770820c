use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use upkg_core::{
    CatalogRefresher, DependencyCatalogEntry, DeploymentTarget, Error, FormChange,
    PackageRegistrar, RegistryQuery, Result, ScaffoldForm, ScaffoldWriter, apply_field_change,
};

struct StaticRegistry;

#[async_trait]
impl RegistryQuery for StaticRegistry {
    async fn list_installed(&self) -> Result<Vec<DependencyCatalogEntry>> {
        Ok(Vec::new())
    }

    async fn search_all(&self) -> Result<Vec<DependencyCatalogEntry>> {
        Ok(vec![
            DependencyCatalogEntry::new("com.x.a", "X A", "1.0.0"),
            DependencyCatalogEntry::new("com.x.b", "X B", "2.0.0"),
        ])
    }
}

#[derive(Default)]
struct RecordingRegistrar {
    added: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl PackageRegistrar for RecordingRegistrar {
    async fn add_local(&self, path: &Path) -> Result<()> {
        self.added.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn resolve(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_local_scaffold_end_to_end() {
    let project = tempfile::tempdir().unwrap();
    let registrar = Arc::new(RecordingRegistrar::default());

    let mut form = ScaffoldForm::new("Acme", "Foo");
    let mut refresher = CatalogRefresher::new(Arc::new(StaticRegistry));
    refresher.refresh(&mut form.selections, false).await.unwrap();

    let form = [
        FormChange::DependencySelected(0, true),
        FormChange::DependencySelected(1, true),
        FormChange::DependencyVersion(1, "2.1.0".into()),
        FormChange::Description("Foo tools".into()),
    ]
    .into_iter()
    .try_fold(form, apply_field_change)
    .unwrap();

    let writer = ScaffoldWriter::new(project.path(), registrar.clone());
    let outcome = writer.write(&form.to_request()).await.unwrap();

    let root = project.path().join("com.acme.foo");
    assert_eq!(outcome.destination, root);
    assert!(root.join("Editor").join("Acme.Foo.Editor.asmdef").is_file());
    assert!(root.join("Runtime").join("Acme.Foo.Runtime.asmdef").is_file());

    let manifest = std::fs::read_to_string(root.join("package.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(value["name"], "com.acme.foo");
    assert_eq!(value["version"], "0.0.1");
    assert_eq!(value["displayName"], "Acme.Foo");
    assert_eq!(value["description"], "Foo tools");
    assert!(value.get("author").is_none());
    assert!(value.get("unity").is_none());

    let deps: Vec<(&String, &serde_json::Value)> =
        value["dependencies"].as_object().unwrap().iter().collect();
    assert_eq!(deps.len(), 2);
    assert_eq!(deps[0].0, "com.x.a");
    assert_eq!(deps[1].0, "com.x.b");
    assert_eq!(deps[1].1, "2.1.0");

    let editor = std::fs::read_to_string(root.join("Editor").join("Acme.Foo.Editor.asmdef")).unwrap();
    let editor: serde_json::Value = serde_json::from_str(&editor).unwrap();
    assert_eq!(editor["rootNamespace"], "Acme.Foo.Editor");
    assert_eq!(editor["includePlatforms"], serde_json::json!(["Editor"]));

    assert_eq!(*registrar.added.lock().unwrap(), vec![root]);
}

#[tokio::test]
async fn test_second_run_fails_without_touching_files() {
    let project = tempfile::tempdir().unwrap();
    let writer = ScaffoldWriter::new(project.path(), Arc::new(RecordingRegistrar::default()));

    let form = apply_field_change(
        ScaffoldForm::new("Acme", "Foo"),
        FormChange::Target(DeploymentTarget::Embedded),
    )
    .unwrap();
    writer.write(&form.to_request()).await.unwrap();

    let manifest_path = project
        .path()
        .join("Packages")
        .join("com.acme.foo")
        .join("package.json");
    let before = std::fs::read_to_string(&manifest_path).unwrap();

    let changed = apply_field_change(form, FormChange::Author("Someone".into())).unwrap();
    let err = writer.write(&changed.to_request()).await.unwrap_err();
    assert!(matches!(err, Error::DirectoryCreate { .. }));
    assert_eq!(std::fs::read_to_string(&manifest_path).unwrap(), before);
}
