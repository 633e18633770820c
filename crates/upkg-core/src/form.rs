//! Scaffold form state
//!
//! All user input for one package lives in a `ScaffoldForm`. Front ends feed
//! edits through [`apply_field_change`] and read the form back; nothing here
//! knows about widgets.

use crate::Result;
use crate::identity::{Overridable, PackageIdentity};
use crate::manifest::PackageManifest;
use crate::scaffold::ScaffoldRequest;
use crate::selection::SelectionSet;
use crate::target::DeploymentTarget;

/// One of the three identifiers that can be pinned by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierField {
    FullyQualifiedName,
    DisplayName,
    RootNamespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormChange {
    Company(String),
    Package(String),
    Author(String),
    Description(String),
    UnityVersion(String),
    Target(DeploymentTarget),
    OverrideToggled(IdentifierField, bool),
    OverrideValue(IdentifierField, String),
    DependencySelected(usize, bool),
    DependencyVersion(usize, String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldForm {
    pub identity: PackageIdentity,
    pub author: String,
    pub description: String,
    pub unity_min_version: String,
    pub target: DeploymentTarget,
    pub selections: SelectionSet,
}

impl ScaffoldForm {
    pub fn new(company: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            identity: PackageIdentity::new(company, package),
            ..Default::default()
        }
    }

    fn identifier_mut(&mut self, field: IdentifierField) -> &mut Overridable {
        match field {
            IdentifierField::FullyQualifiedName => &mut self.identity.fully_qualified_name,
            IdentifierField::DisplayName => &mut self.identity.display_name,
            IdentifierField::RootNamespace => &mut self.identity.root_namespace,
        }
    }

    pub fn fully_qualified_name(&self) -> &str {
        self.identity.fully_qualified_name.value()
    }

    pub fn display_name(&self) -> &str {
        self.identity.display_name.value()
    }

    pub fn root_namespace(&self) -> &str {
        self.identity.root_namespace.value()
    }

    pub fn manifest(&self) -> PackageManifest {
        PackageManifest {
            display_name: self.display_name().to_string(),
            description: self.description.clone(),
            author: self.author.clone(),
            unity_min_version: self.unity_min_version.clone(),
            dependencies: self.selections.to_dependency_list(),
            ..PackageManifest::new(self.fully_qualified_name())
        }
    }

    pub fn to_request(&self) -> ScaffoldRequest {
        ScaffoldRequest {
            manifest: self.manifest(),
            company: self.identity.company_name().to_string(),
            package: self.identity.package_name().to_string(),
            root_namespace: self.root_namespace().to_string(),
            target: self.target,
        }
    }
}

/// Apply one edit and return the updated form. Fails only for dependency
/// edits that point past the end of the list.
pub fn apply_field_change(mut form: ScaffoldForm, change: FormChange) -> Result<ScaffoldForm> {
    match change {
        FormChange::Company(value) => form.identity.set_company_name(value),
        FormChange::Package(value) => form.identity.set_package_name(value),
        FormChange::Author(value) => form.author = value,
        FormChange::Description(value) => form.description = value,
        FormChange::UnityVersion(value) => form.unity_min_version = value,
        FormChange::Target(target) => form.target = target,
        FormChange::OverrideToggled(field, on) => form.identifier_mut(field).set_overridden(on),
        FormChange::OverrideValue(field, value) => {
            form.identifier_mut(field).set_override_value(value);
        }
        FormChange::DependencySelected(index, selected) => {
            form.selections.set_selected(index, selected)?
        }
        FormChange::DependencyVersion(index, version) => {
            form.selections.set_version_override(index, version)?
        }
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::manifest::Dependency;
    use crate::selection::DependencyCatalogEntry;

    fn apply_all(form: ScaffoldForm, changes: Vec<FormChange>) -> Result<ScaffoldForm> {
        changes.into_iter().try_fold(form, apply_field_change)
    }

    #[test]
    fn test_request_from_form() {
        let form = apply_all(
            ScaffoldForm::default(),
            vec![
                FormChange::Company("Acme".into()),
                FormChange::Package("Foo".into()),
                FormChange::Author("Jane".into()),
                FormChange::Target(DeploymentTarget::Embedded),
            ],
        )
        .unwrap();

        let request = form.to_request();
        assert_eq!(request.manifest.name, "com.acme.foo");
        assert_eq!(request.manifest.display_name, "Acme.Foo");
        assert_eq!(request.manifest.author, "Jane");
        assert_eq!(request.root_namespace, "Acme.Foo");
        assert_eq!(request.target, DeploymentTarget::Embedded);
        assert_eq!(request.editor_assembly().name, "Acme.Foo.Editor");
    }

    #[test]
    fn test_pinned_namespace_survives_rename() {
        let form = apply_all(
            ScaffoldForm::new("Acme", "Foo"),
            vec![
                FormChange::OverrideToggled(IdentifierField::RootNamespace, true),
                FormChange::OverrideValue(IdentifierField::RootNamespace, "Acme.Tools".into()),
                FormChange::Package("Bar".into()),
            ],
        )
        .unwrap();

        assert_eq!(form.root_namespace(), "Acme.Tools");
        assert_eq!(form.fully_qualified_name(), "com.acme.bar");

        let form = apply_field_change(
            form,
            FormChange::OverrideToggled(IdentifierField::RootNamespace, false),
        )
        .unwrap();
        assert_eq!(form.root_namespace(), "Acme.Bar");
    }

    #[test]
    fn test_dependency_edits() {
        let mut form = ScaffoldForm::new("Acme", "Foo");
        form.selections.ingest(vec![
            DependencyCatalogEntry::new("a", "A", "1.0"),
            DependencyCatalogEntry::new("b", "B", "2.0"),
        ]);

        let form = apply_all(
            form,
            vec![
                FormChange::DependencySelected(1, true),
                FormChange::DependencyVersion(1, "2.1".into()),
            ],
        )
        .unwrap();
        assert_eq!(form.manifest().dependencies, vec![Dependency::new("b", "2.1")]);

        let err = apply_field_change(form, FormChange::DependencySelected(9, true)).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { index: 9, len: 2 }));
    }
}
