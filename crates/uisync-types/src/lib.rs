//! Stable DTOs and identifiers used across the uisync workspace.
//!
//! This crate is intentionally boring:
//! - canonical forward-slash path handling
//! - default values for every former hard-coded constant
//! - the JSON run reports emitted by `--report-out`

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod report;

pub use path::AssetPath;
pub use report::{
    BuildStatus, FileOutcome, MarkerCounts, MarkerOutcome, NocheckData, NocheckReportV1,
    PackData, PackReportV1, PackedEntry, ReportEnvelope, ToolMeta, SCHEMA_NOCHECK_REPORT_V1,
    SCHEMA_PACK_REPORT_V1,
};
