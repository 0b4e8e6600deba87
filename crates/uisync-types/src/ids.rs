//! Stable identifiers and historical defaults.
//!
//! Every value here is a default only; `uisync.toml` and CLI flags override them.

pub const TOOL_NAME: &str = "uisync";

pub const SCHEMA_CONFIG_V1: &str = "uisync.config.v1";

// Manifest synchronizer
pub const DEFAULT_ASSET_DIR: &str = "UiResources";
pub const DEFAULT_MANIFEST: &str = "UiResources.resx";
pub const DEFAULT_ENTRY_TYPE: &str = "System.Resources.ResXFileRef, System.Windows.Forms";
pub const DEFAULT_TYPE_DESCRIPTOR: &str =
    "System.Byte[], mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";
// `npm` is a batch script on Windows and must be named with its extension.
#[cfg(windows)]
pub const DEFAULT_BUILD_PROGRAM: &str = "npm.cmd";
#[cfg(not(windows))]
pub const DEFAULT_BUILD_PROGRAM: &str = "npm";
pub const DEFAULT_BUILD_ARGS: &[&str] = &["run", "build", "--prefix", "../ui"];

/// Element name of a manifest entry.
pub const DATA_ELEMENT: &str = "data";
/// Element name of the text node nested in each entry.
pub const VALUE_ELEMENT: &str = "value";

// Suppression-marker applier
pub const DEFAULT_MARKER: &str = "// @ts-nocheck";
pub const DEFAULT_DIRECTIVE: &str = "@ts-nocheck";
pub const DEFAULT_INCLUDE: &[&str] = &["*.ts", "*.tsx"];
