//! Shared test utilities for the uisync workspace.
//!
//! Kept as a normal crate (not `#[cfg(test)]`) so integration tests in several crates can
//! build the same temp trees and compare reports the same way.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

/// UTF-8 view of a temp directory root.
pub fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 temp path")
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Utf8Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

pub fn read_file(path: &Utf8Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("read {path}: {e}"))
}

/// Minimal ResX document with the headers a designer-generated file carries.
pub fn sample_resx() -> String {
    r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <resheader name="resmimetype">
    <value>text/microsoft-resx</value>
  </resheader>
  <data name="stale.js" type="System.Resources.ResXFileRef, System.Windows.Forms">
    <value>UiResources\stale.js;System.Byte[], mscorlib</value>
  </data>
</root>
"#
    .to_string()
}

/// Normalize non-deterministic JSON fields for report comparison.
///
/// `tool.version` is replaced only at the root of a report envelope (an object with
/// `schema`, `tool` and `data`). Timestamps and `duration_ms` are normalized at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope =
            obj.contains_key("schema") && obj.contains_key("tool") && obj.contains_key("data");
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
