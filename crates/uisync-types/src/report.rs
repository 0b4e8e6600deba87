use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifiers for uisync run reports.
pub const SCHEMA_PACK_REPORT_V1: &str = "uisync.pack.report.v1";
pub const SCHEMA_NOCHECK_REPORT_V1: &str = "uisync.nocheck.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

impl ToolMeta {
    pub fn current() -> Self {
        Self {
            name: crate::ids::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Outer shape shared by every report; `data` is use-case specific.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub duration_ms: u64,
    pub data: TData,
}

pub type PackReportV1 = ReportEnvelope<PackData>;
pub type NocheckReportV1 = ReportEnvelope<NocheckData>;

/// What happened to the external build step before the manifest rewrite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildStatus {
    Skipped,
    Succeeded,
    /// Non-zero exit or spawn failure, with the policy continuing anyway.
    Failed {
        #[serde(skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackedEntry {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackData {
    pub asset_dir: String,
    pub manifest: String,
    pub build: BuildStatus,
    pub entries_removed: u32,
    pub entries: Vec<PackedEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MarkerOutcome {
    Added,
    AlreadyPresent,
    /// Check mode only: the marker would have been added.
    Missing,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileOutcome {
    /// Path as walked from the scanned directory, unnormalized.
    pub path: String,
    pub outcome: MarkerOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MarkerCounts {
    pub added: u32,
    pub already_present: u32,
    pub missing: u32,
    pub failed: u32,
}

impl MarkerCounts {
    pub fn record(&mut self, outcome: MarkerOutcome) {
        match outcome {
            MarkerOutcome::Added => self.added += 1,
            MarkerOutcome::AlreadyPresent => self.already_present += 1,
            MarkerOutcome::Missing => self.missing += 1,
            MarkerOutcome::Failed => self.failed += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NocheckData {
    pub root: String,
    pub check_only: bool,
    pub counts: MarkerCounts,
    pub files: Vec<FileOutcome>,
}
