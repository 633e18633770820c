//! Core model and logic for upkg
//!
//! This crate contains:
//! - Identifier derivation and override handling
//! - package.json and .asmdef models with their JSON encoding
//! - Dependency selection over a registry catalog
//! - The scaffold writer and the single-flight catalog refresher

pub mod asmdef;
pub mod error;
pub mod form;
pub mod identity;
pub mod manifest;
pub mod refresh;
pub mod registry;
pub mod scaffold;
pub mod selection;
pub mod target;

pub use asmdef::{AssemblyDescriptor, serialize_assembly_descriptor};
pub use error::{Error, Result};
pub use form::{FormChange, IdentifierField, ScaffoldForm, apply_field_change};
pub use identity::{PackageIdentity, derive_display_name, derive_fully_qualified_name};
pub use manifest::{Dependency, INITIAL_VERSION, PackageManifest, serialize_manifest};
pub use refresh::CatalogRefresher;
pub use registry::{PackageRegistrar, RegistryQuery};
pub use scaffold::{ScaffoldOutcome, ScaffoldPlan, ScaffoldRequest, ScaffoldWriter};
pub use selection::{DependencyCatalogEntry, DependencySelection, SelectionSet};
pub use target::DeploymentTarget;
