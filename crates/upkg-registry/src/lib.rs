//! Registry and project collaborators for upkg
//!
//! - `HttpRegistry`: npm-compatible package registry search
//! - `ProjectRegistrar`: adds packages to a Unity project's `Packages/manifest.json`

pub mod http;
pub mod project;

pub use http::HttpRegistry;
pub use project::{ProjectManifest, ProjectRegistrar, installed_packages};
