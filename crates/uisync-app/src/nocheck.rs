//! The `nocheck` use case: prepend the suppression marker to matching source files.

use camino::Utf8Path;
use time::OffsetDateTime;
use uisync_marker::Marker;
use uisync_repo::{Discovered, SourceFile, SourceFilter};
use uisync_settings::ResolvedNocheck;
use uisync_types::{
    FileOutcome, MarkerCounts, MarkerOutcome, NocheckData, NocheckReportV1, ReportEnvelope,
    ToolMeta, SCHEMA_NOCHECK_REPORT_V1,
};

#[derive(Clone, Debug)]
pub struct NocheckInput<'a> {
    /// Directory to scan. The caller validates that it exists.
    pub root: &'a Utf8Path,
    pub settings: &'a ResolvedNocheck,
    /// Report missing markers without writing anything.
    pub check_only: bool,
}

#[derive(Clone, Debug)]
pub struct NocheckOutput {
    pub report: NocheckReportV1,
}

/// Run the nocheck use case.
///
/// Per-file failures (unreadable, not UTF-8, unwritable) become `Failed` outcomes and the
/// traversal carries on. Only a bad filter aborts the run.
///
/// `on_outcome` sees each outcome as soon as it is decided, so callers can stream output.
pub fn run_nocheck(
    input: NocheckInput<'_>,
    mut on_outcome: impl FnMut(&FileOutcome),
) -> anyhow::Result<NocheckOutput> {
    let started_at = OffsetDateTime::now_utc();
    let settings = input.settings;

    let filter = SourceFilter::new(&settings.include, &settings.exclude)?;
    let marker = Marker::new(settings.marker.clone(), settings.directive.clone());

    let mut counts = MarkerCounts::default();
    let mut files = Vec::new();

    for found in uisync_repo::discover_sources(input.root, &filter) {
        let outcome = match found {
            Discovered::File(file) => {
                let path = file.path.to_string();
                match process_file(&file, &marker, input.check_only) {
                    Ok(outcome) => FileOutcome {
                        path,
                        outcome,
                        message: None,
                    },
                    Err(err) => FileOutcome {
                        path,
                        outcome: MarkerOutcome::Failed,
                        message: Some(format!("{err:#}")),
                    },
                }
            }
            Discovered::Unreadable { path, message } => FileOutcome {
                path,
                outcome: MarkerOutcome::Failed,
                message: Some(message),
            },
        };
        counts.record(outcome.outcome);
        on_outcome(&outcome);
        files.push(outcome);
    }

    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    Ok(NocheckOutput {
        report: ReportEnvelope {
            schema: SCHEMA_NOCHECK_REPORT_V1.to_string(),
            tool: ToolMeta::current(),
            started_at,
            finished_at,
            duration_ms,
            data: NocheckData {
                root: input.root.to_string(),
                check_only: input.check_only,
                counts,
                files,
            },
        },
    })
}

fn process_file(
    file: &SourceFile,
    marker: &Marker,
    check_only: bool,
) -> anyhow::Result<MarkerOutcome> {
    let bytes = uisync_repo::read_bytes(&file.path)?;
    let content = uisync_marker::decode(bytes)?;

    let Some(marked) = marker.apply(&content) else {
        return Ok(MarkerOutcome::AlreadyPresent);
    };
    if check_only {
        return Ok(MarkerOutcome::Missing);
    }
    uisync_repo::write_atomic(&file.path, marked.as_bytes())?;
    Ok(MarkerOutcome::Added)
}

/// Exit code for a finished run: 2 for missing markers in check mode, or for failures when
/// `fail_on_error` is set; 0 otherwise.
pub fn nocheck_exit_code(counts: &MarkerCounts, fail_on_error: bool) -> i32 {
    if counts.missing > 0 || (fail_on_error && counts.failed > 0) {
        2
    } else {
        0
    }
}
