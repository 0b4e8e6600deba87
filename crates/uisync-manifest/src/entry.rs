use thiserror::Error;
use uisync_types::AssetPath;

/// A walked path that cannot be turned into a manifest key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("path `{path}` is too short to strip the `{prefix}` prefix")]
    TooShort { path: String, prefix: String },
    #[error("path `{path}` does not start with the `{prefix}` prefix")]
    PrefixMismatch { path: String, prefix: String },
}

/// Fixed strings that shape every generated entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntrySpec {
    /// Directory the walked paths live under, e.g. `UiResources`.
    pub asset_dir: AssetPath,
    /// Written in front of the relative path inside `value`.
    pub value_prefix: String,
    pub entry_type: String,
    pub type_descriptor: String,
}

/// One `<data>` element of the manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Asset path relative to the asset directory, forward slashes.
    pub name: String,
    pub entry_type: String,
    pub value: String,
}

/// Strip `prefix` plus one `/` separator from `path`.
///
/// The remainder must be non-empty: the asset directory itself is not an entry. A prefix of
/// `.` (or nothing) means the paths are already relative to the asset directory.
pub fn strip_fixed_prefix<'a>(path: &'a str, prefix: &str) -> Result<&'a str, EntryError> {
    let prefix = prefix.trim_end_matches('/');
    if is_current_dir(prefix) {
        if path.is_empty() || is_current_dir(path) {
            return Err(EntryError::TooShort {
                path: path.to_string(),
                prefix: prefix.to_string(),
            });
        }
        return Ok(path);
    }
    let min_len = prefix.len() + 1;
    if path.len() <= min_len {
        return Err(EntryError::TooShort {
            path: path.to_string(),
            prefix: prefix.to_string(),
        });
    }
    match path.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('/')) {
        Some(rest) => Ok(rest),
        None => Err(EntryError::PrefixMismatch {
            path: path.to_string(),
            prefix: prefix.to_string(),
        }),
    }
}

/// Build one entry per walked file, sorted by entry name.
///
/// `walked` holds paths that still carry the asset directory prefix. The whole set is
/// validated before anything is returned so a bad path never yields a partial entry list.
pub fn build_entries(
    walked: &[AssetPath],
    spec: &EntrySpec,
) -> Result<Vec<ManifestEntry>, EntryError> {
    let prefix = spec.asset_dir.as_str();
    let mut names = walked
        .iter()
        .map(|p| strip_fixed_prefix(p.as_str(), prefix).map(AssetPath::new))
        .collect::<Result<Vec<_>, _>>()?;

    // Stable order.
    names.sort();
    names.dedup();

    let value_prefix = spec
        .value_prefix
        .trim_end_matches(['/', '\\'])
        .replace('/', "\\");

    Ok(names
        .into_iter()
        .map(|name| {
            let value = if is_current_dir(&value_prefix) {
                format!("{};{}", name.to_windows_string(), spec.type_descriptor)
            } else {
                format!(
                    "{}\\{};{}",
                    value_prefix,
                    name.to_windows_string(),
                    spec.type_descriptor
                )
            };
            ManifestEntry {
                name: name.as_str().to_string(),
                entry_type: spec.entry_type.clone(),
                value,
            }
        })
        .collect())
}

fn is_current_dir(prefix: &str) -> bool {
    prefix.is_empty() || prefix == "."
}
