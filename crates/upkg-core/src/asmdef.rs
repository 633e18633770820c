//! Assembly definition (.asmdef) model

use serde::Serialize;

use crate::Result;

/// Platform name Unity uses for editor-only assemblies
pub const EDITOR_PLATFORM: &str = "Editor";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyDescriptor {
    pub name: String,
    pub root_namespace: String,
    #[serde(serialize_with = "empty_array")]
    references: (),
    #[serde(serialize_with = "empty_array")]
    optional_unity_references: (),
    #[serde(serialize_with = "empty_array")]
    exclude_platforms: (),
    #[serde(serialize_with = "empty_array")]
    precompiled_references: (),
    #[serde(serialize_with = "empty_array")]
    define_constraints: (),
    pub include_platforms: Vec<String>,
}

fn empty_array<S>(_: &(), serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(std::iter::empty::<&str>())
}

impl AssemblyDescriptor {
    pub fn new(
        name: impl Into<String>,
        root_namespace: impl Into<String>,
        include_platforms: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            root_namespace: root_namespace.into(),
            references: (),
            optional_unity_references: (),
            exclude_platforms: (),
            precompiled_references: (),
            define_constraints: (),
            include_platforms,
        }
    }

    /// `<stem>.Editor`, restricted to the editor platform
    pub fn editor(stem: &str, root_namespace: &str) -> Self {
        Self::new(
            format!("{}.Editor", stem),
            format!("{}.Editor", root_namespace),
            vec![EDITOR_PLATFORM.to_string()],
        )
    }

    /// `<stem>.Runtime`, all platforms
    pub fn runtime(stem: &str, root_namespace: &str) -> Self {
        Self::new(format!("{}.Runtime", stem), root_namespace, Vec::new())
    }

    pub fn file_name(&self) -> String {
        format!("{}.asmdef", self.name)
    }
}

pub fn serialize_assembly_descriptor(descriptor: &AssemblyDescriptor) -> Result<String> {
    Ok(serde_json::to_string_pretty(descriptor)?)
}
