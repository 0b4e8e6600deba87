use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use uisync_types::AssetPath;
use walkdir::WalkDir;

/// Include/exclude globs matched against root-relative paths.
#[derive(Clone, Debug)]
pub struct SourceFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl SourceFilter {
    pub fn new(include: &[String], exclude: &[String]) -> anyhow::Result<Self> {
        Ok(Self {
            include: build_globset(include).context("compile include globset")?,
            exclude: build_globset(exclude).context("compile exclude globset")?,
        })
    }

    pub fn matches(&self, rel: &str) -> bool {
        self.include.is_match(rel) && !self.exclude.is_match(rel)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// Root-joined path as walked (relative when the root is).
    pub path: Utf8PathBuf,
    pub rel: AssetPath,
}

/// One traversal result. Unreadable entries are reported instead of aborting the walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Discovered {
    File(SourceFile),
    Unreadable { path: String, message: String },
}

/// Walk `root` and yield the files accepted by `filter`, in file-name order per directory.
pub fn discover_sources(root: &Utf8Path, filter: &SourceFilter) -> Vec<Discovered> {
    let mut out = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.to_string());
                out.push(Discovered::Unreadable {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let walked = match Utf8PathBuf::from_path_buf(entry.path().to_path_buf()) {
            Ok(walked) => walked,
            Err(path) => {
                let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                // Only worth reporting when it would have been selected.
                if filter.matches(&rel.to_string_lossy().replace('\\', "/")) {
                    out.push(Discovered::Unreadable {
                        path: path.display().to_string(),
                        message: "path is not valid UTF-8".to_string(),
                    });
                }
                continue;
            }
        };

        let rel = AssetPath::from(walked.strip_prefix(root).unwrap_or(&walked));
        if filter.matches(rel.as_str()) {
            out.push(Discovered::File(SourceFile { path: walked, rel }));
        }
    }

    out
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p).with_context(|| format!("invalid glob: {p}"))?);
    }
    Ok(b.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uisync_test_util::{utf8_root, write_file};

    fn ts_filter() -> SourceFilter {
        SourceFilter::new(&["*.ts".to_string(), "*.tsx".to_string()], &[]).expect("filter")
    }

    fn rel_paths(found: &[Discovered]) -> Vec<&str> {
        found
            .iter()
            .filter_map(|d| match d {
                Discovered::File(f) => Some(f.rel.as_str()),
                Discovered::Unreadable { .. } => None,
            })
            .collect()
    }

    #[test]
    fn finds_matching_extensions_recursively() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("b.tsx"), "");
        write_file(&root.join("a.ts"), "");
        write_file(&root.join("notes.md"), "");
        write_file(&root.join("src/lib/util.ts"), "");
        write_file(&root.join("src/types.d.ts"), "");
        write_file(&root.join("src/app.js"), "");

        let found = discover_sources(&root, &ts_filter());
        assert_eq!(
            rel_paths(&found),
            vec!["a.ts", "b.tsx", "src/lib/util.ts", "src/types.d.ts"]
        );
    }

    #[test]
    fn excludes_win_over_includes() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("src/a.ts"), "");
        write_file(&root.join("src/a.d.ts"), "");
        write_file(&root.join("node_modules/x/index.ts"), "");

        let filter = SourceFilter::new(
            &["*.ts".to_string()],
            &["**/*.d.ts".to_string(), "node_modules/**".to_string()],
        )
        .expect("filter");
        let found = discover_sources(&root, &filter);
        assert_eq!(rel_paths(&found), vec!["src/a.ts"]);
    }

    #[test]
    fn extension_match_is_a_suffix_match() {
        let filter = ts_filter();
        assert!(filter.matches(".ts"));
        assert!(filter.matches("deep/dir/x.tsx"));
        assert!(!filter.matches("x.ts.bak"));
        assert!(!filter.matches("x.mts"));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let err = SourceFilter::new(&["[".to_string()], &[]).unwrap_err();
        assert!(err.to_string().contains("compile include globset"));
    }

    #[test]
    fn missing_root_is_reported_not_panicked() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp).join("nope");
        let found = discover_sources(&root, &ts_filter());
        assert!(matches!(found.as_slice(), [Discovered::Unreadable { .. }]));
    }
}
