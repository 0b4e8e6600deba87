//! The `pack` use case: rebuild the resource manifest from the asset directory.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use time::OffsetDateTime;
use uisync_manifest::{EntrySpec, ManifestEntry};
use uisync_settings::{BuildFailurePolicy, ResolvedPack};
use uisync_types::{
    AssetPath, BuildStatus, PackData, PackReportV1, PackedEntry, ReportEnvelope, ToolMeta,
    SCHEMA_PACK_REPORT_V1,
};

/// Input for the pack use case.
#[derive(Clone, Debug)]
pub struct PackInput<'a> {
    /// Directory the asset and manifest paths are relative to.
    pub project_root: &'a Utf8Path,
    pub settings: &'a ResolvedPack,
    /// Outcome of the build step the caller ran (or skipped) beforehand.
    pub build: BuildStatus,
}

#[derive(Clone, Debug)]
pub struct PackOutput {
    pub report: PackReportV1,
    pub entries: Vec<ManifestEntry>,
    pub manifest_path: Utf8PathBuf,
    /// False when the regenerated manifest was byte-identical and left alone.
    pub changed: bool,
}

/// Run the pack use case.
///
/// All entries and the full replacement document are computed before the manifest is
/// touched; a failure anywhere leaves the file as it was.
pub fn run_pack(input: PackInput<'_>) -> anyhow::Result<PackOutput> {
    let started_at = OffsetDateTime::now_utc();
    let settings = input.settings;

    if let BuildStatus::Failed { message, .. } = &input.build
        && settings.on_build_failure == BuildFailurePolicy::Abort
    {
        anyhow::bail!("build step failed ({message}); manifest left untouched");
    }

    let manifest_rel = AssetPath::from(settings.manifest.as_path());
    let walked: Vec<AssetPath> =
        uisync_repo::list_asset_files(input.project_root, &settings.asset_dir)
            .context("enumerate assets")?
            .into_iter()
            // The manifest never lists itself when it lives among the assets.
            .filter(|p| *p != manifest_rel)
            .collect();

    let spec = EntrySpec {
        asset_dir: AssetPath::from(settings.asset_dir.as_path()),
        value_prefix: settings.value_prefix.clone(),
        entry_type: settings.entry_type.clone(),
        type_descriptor: settings.type_descriptor.clone(),
    };
    let entries = uisync_manifest::build_entries(&walked, &spec).context("build entries")?;

    let manifest_path = input.project_root.join(&settings.manifest);
    let original = uisync_repo::read_text(&manifest_path).context("load manifest")?;
    let rewrite = uisync_manifest::rewrite_manifest(&original, &entries)
        .with_context(|| format!("rewrite {}", manifest_path))?;

    let changed = rewrite.xml != original;
    if changed {
        uisync_repo::write_atomic(&manifest_path, rewrite.xml.as_bytes())
            .context("write manifest")?;
    }

    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    let report = ReportEnvelope {
        schema: SCHEMA_PACK_REPORT_V1.to_string(),
        tool: ToolMeta::current(),
        started_at,
        finished_at,
        duration_ms,
        data: PackData {
            asset_dir: settings.asset_dir.to_string(),
            manifest: settings.manifest.to_string(),
            build: input.build,
            entries_removed: rewrite.removed as u32,
            entries: entries
                .iter()
                .map(|e| PackedEntry {
                    name: e.name.clone(),
                    value: e.value.clone(),
                })
                .collect(),
        },
    };

    Ok(PackOutput {
        report,
        entries,
        manifest_path,
        changed,
    })
}
