use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Canonical relative path used in manifest entries and reports.
///
/// Normalization rules are simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - an empty input becomes `.`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetPath(String);

impl Default for AssetPath {
    fn default() -> Self {
        AssetPath::new(".")
    }
}

impl AssetPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Same path with `\` separators, as ResX file references expect.
    pub fn to_windows_string(&self) -> String {
        self.0.replace('/', "\\")
    }

    pub fn join(&self, segment: &str) -> AssetPath {
        let base = Utf8Path::new(self.as_str());
        AssetPath::new(base.join(segment).as_str())
    }
}

impl std::fmt::Display for AssetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for AssetPath {
    fn from(value: &Utf8Path) -> Self {
        AssetPath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for AssetPath {
    fn from(value: Utf8PathBuf) -> Self {
        AssetPath::new(value.as_str())
    }
}
