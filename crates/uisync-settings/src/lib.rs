//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{BuildConfig, NocheckConfig, PackConfig, UisyncConfigV1};
pub use resolve::{
    BuildCommand, BuildFailurePolicy, NocheckOverrides, PackOverrides, ResolvedNocheck,
    ResolvedPack, parse_build_failure_policy, resolve_nocheck, resolve_pack,
};

/// Parse `uisync.toml` (or equivalent) into a typed model.
///
/// Empty or whitespace-only input yields the default model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<UisyncConfigV1> {
    if input.trim().is_empty() {
        return Ok(UisyncConfigV1::default());
    }
    let cfg: UisyncConfigV1 = toml::from_str(input)?;
    if let Some(schema) = cfg.schema.as_deref()
        && schema != uisync_types::ids::SCHEMA_CONFIG_V1
    {
        anyhow::bail!(
            "unsupported config schema: {schema} (expected {})",
            uisync_types::ids::SCHEMA_CONFIG_V1
        );
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_default() {
        assert_eq!(parse_config_toml("  \n").expect("parse"), UisyncConfigV1::default());
    }

    #[test]
    fn parses_full_config() {
        let cfg = parse_config_toml(
            r#"schema = "uisync.config.v1"

[pack]
asset_dir = "dist"
manifest = "Ui.resx"
on_build_failure = "continue"

[pack.build]
enabled = false
program = "pnpm"
args = ["build"]

[nocheck]
include = ["src/**/*.ts"]
exclude = ["**/*.d.ts"]
"#,
        )
        .expect("parse");

        assert_eq!(cfg.pack.asset_dir.as_deref(), Some("dist"));
        assert_eq!(cfg.pack.build.enabled, Some(false));
        assert_eq!(cfg.pack.build.args, Some(vec!["build".to_string()]));
        assert_eq!(cfg.nocheck.exclude, vec!["**/*.d.ts".to_string()]);
    }

    #[test]
    fn rejects_unknown_schema() {
        let err = parse_config_toml("schema = \"uisync.config.v9\"\n").unwrap_err();
        assert!(err.to_string().contains("unsupported config schema"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(parse_config_toml("[pack\nasset_dir = 1").is_err());
    }
}
