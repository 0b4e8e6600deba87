use serde::Serialize;

/// Pretty JSON with a trailing newline, ready to write to `--report-out`.
pub fn serialize_report<T: Serialize>(report: &T) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}
