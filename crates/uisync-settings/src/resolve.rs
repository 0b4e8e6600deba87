use crate::model::UisyncConfigV1;
use anyhow::Context;
use camino::Utf8PathBuf;
use globset::Glob;
use uisync_types::{AssetPath, ids};

/// What to do when the build command fails before a manifest rewrite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildFailurePolicy {
    #[default]
    Abort,
    Continue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Relative to the project root; `None` means the project root itself.
    pub working_dir: Option<Utf8PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct PackOverrides {
    pub asset_dir: Option<Utf8PathBuf>,
    pub manifest: Option<Utf8PathBuf>,
    pub skip_build: bool,
    pub on_build_failure: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPack {
    pub asset_dir: Utf8PathBuf,
    pub manifest: Utf8PathBuf,
    pub value_prefix: String,
    pub entry_type: String,
    pub type_descriptor: String,
    /// `None` when the build step is disabled.
    pub build: Option<BuildCommand>,
    pub on_build_failure: BuildFailurePolicy,
}

#[derive(Clone, Debug, Default)]
pub struct NocheckOverrides {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedNocheck {
    pub marker: String,
    pub directive: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

pub fn resolve_pack(
    cfg: &UisyncConfigV1,
    overrides: PackOverrides,
) -> anyhow::Result<ResolvedPack> {
    let pack = &cfg.pack;

    let asset_dir = overrides
        .asset_dir
        .or_else(|| pack.asset_dir.clone().map(Utf8PathBuf::from))
        .unwrap_or_else(|| Utf8PathBuf::from(ids::DEFAULT_ASSET_DIR));
    let manifest = overrides
        .manifest
        .or_else(|| pack.manifest.clone().map(Utf8PathBuf::from))
        .unwrap_or_else(|| Utf8PathBuf::from(ids::DEFAULT_MANIFEST));

    // Entry values reference assets through the asset directory unless told otherwise.
    let value_prefix = pack
        .value_prefix
        .clone()
        .unwrap_or_else(|| AssetPath::from(asset_dir.as_path()).to_string());

    let on_build_failure = match overrides
        .on_build_failure
        .as_deref()
        .or(pack.on_build_failure.as_deref())
    {
        Some(v) => parse_build_failure_policy(v)?,
        None => BuildFailurePolicy::default(),
    };

    let build_enabled = !overrides.skip_build && pack.build.enabled.unwrap_or(true);
    let build = if build_enabled {
        let program = pack
            .build
            .program
            .clone()
            .unwrap_or_else(|| ids::DEFAULT_BUILD_PROGRAM.to_string());
        if program.trim().is_empty() {
            anyhow::bail!("pack.build.program must not be empty");
        }
        let args = pack.build.args.clone().unwrap_or_else(|| {
            ids::DEFAULT_BUILD_ARGS
                .iter()
                .map(|s| s.to_string())
                .collect()
        });
        Some(BuildCommand {
            program,
            args,
            working_dir: pack.build.working_dir.clone().map(Utf8PathBuf::from),
        })
    } else {
        None
    };

    Ok(ResolvedPack {
        asset_dir,
        manifest,
        value_prefix,
        entry_type: pack
            .entry_type
            .clone()
            .unwrap_or_else(|| ids::DEFAULT_ENTRY_TYPE.to_string()),
        type_descriptor: pack
            .type_descriptor
            .clone()
            .unwrap_or_else(|| ids::DEFAULT_TYPE_DESCRIPTOR.to_string()),
        build,
        on_build_failure,
    })
}

pub fn resolve_nocheck(
    cfg: &UisyncConfigV1,
    overrides: NocheckOverrides,
) -> anyhow::Result<ResolvedNocheck> {
    let nocheck = &cfg.nocheck;

    let marker = nocheck
        .marker
        .clone()
        .unwrap_or_else(|| ids::DEFAULT_MARKER.to_string());
    let directive = nocheck
        .directive
        .clone()
        .unwrap_or_else(|| ids::DEFAULT_DIRECTIVE.to_string());

    if directive.trim().is_empty() {
        anyhow::bail!("nocheck.directive must not be empty");
    }
    if marker.contains('\n') || marker.contains('\r') {
        anyhow::bail!("nocheck.marker must be a single line");
    }
    // Otherwise every run would prepend the marker again.
    if !marker.contains(&directive) {
        anyhow::bail!("nocheck.marker {marker:?} does not contain directive {directive:?}");
    }

    let include = if !overrides.include.is_empty() {
        overrides.include
    } else if !nocheck.include.is_empty() {
        nocheck.include.clone()
    } else {
        ids::DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect()
    };
    let mut exclude = nocheck.exclude.clone();
    exclude.extend(overrides.exclude);

    validate_globs("include", &include)?;
    validate_globs("exclude", &exclude)?;

    Ok(ResolvedNocheck {
        marker,
        directive,
        include,
        exclude,
    })
}

fn validate_globs(field: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid {field} glob: {pattern}"))?;
    }
    Ok(())
}

pub fn parse_build_failure_policy(v: &str) -> anyhow::Result<BuildFailurePolicy> {
    match v {
        "abort" => Ok(BuildFailurePolicy::Abort),
        "continue" => Ok(BuildFailurePolicy::Continue),
        other => anyhow::bail!("unknown on_build_failure: {other} (expected abort|continue)"),
    }
}
