use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `uisync.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional so defaults can evolve.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UisyncConfigV1 {
    /// Optional schema string for tooling (`uisync.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub pack: PackConfig,

    #[serde(default)]
    pub nocheck: NocheckConfig,
}

/// Manifest synchronizer settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PackConfig {
    /// Directory holding built UI assets, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_dir: Option<String>,

    /// ResX manifest to rewrite, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,

    /// Path prefix written into each entry value ahead of the asset path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_prefix: Option<String>,

    /// `type` attribute of each `data` entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,

    /// Type descriptor appended to each entry value after `;`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_descriptor: Option<String>,

    /// `abort` (default) or `continue`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_build_failure: Option<String>,

    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BuildConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Working directory for the build, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

/// Suppression-marker applier settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NocheckConfig {
    /// Line prepended to files lacking the directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    /// Substring that counts as "already present" on the first non-blank line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,

    /// Globs matched against root-relative paths. Empty means the built-in defaults.
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}
