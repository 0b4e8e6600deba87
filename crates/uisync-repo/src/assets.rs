use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use uisync_types::AssetPath;
use walkdir::WalkDir;

/// Every regular file below `asset_dir`, as `asset_dir/<relative path>`.
///
/// `asset_dir` is resolved against `project_root` when relative. The returned paths keep
/// `asset_dir` exactly as configured so callers can strip it again. Order is sorted.
pub fn list_asset_files(
    project_root: &Utf8Path,
    asset_dir: &Utf8Path,
) -> anyhow::Result<Vec<AssetPath>> {
    let walk_root = project_root.join(asset_dir);
    if !walk_root.is_dir() {
        anyhow::bail!("asset directory does not exist: {}", walk_root);
    }

    let prefix = AssetPath::from(asset_dir);
    let mut out = Vec::new();

    for entry in WalkDir::new(&walk_root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", walk_root))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let abs = Utf8PathBuf::from_path_buf(entry.path().to_path_buf()).map_err(|p| {
            anyhow::anyhow!("asset path is not valid UTF-8: {}", p.display())
        })?;
        let rel = abs
            .strip_prefix(&walk_root)
            .with_context(|| format!("{} is outside {}", abs, walk_root))?;
        out.push(prefix.join(rel.as_str()));
    }

    // Stable order.
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uisync_test_util::{utf8_root, write_file};

    #[test]
    fn lists_nested_files_with_prefix() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("UiResources/index.html"), "<html/>");
        write_file(&root.join("UiResources/assets/b.js"), "");
        write_file(&root.join("UiResources/assets/a.css"), "");
        write_file(&root.join("elsewhere.txt"), "");

        let files = list_asset_files(&root, Utf8Path::new("UiResources")).expect("list");
        let paths: Vec<&str> = files.iter().map(|p| p.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "UiResources/assets/a.css",
                "UiResources/assets/b.js",
                "UiResources/index.html"
            ]
        );
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        std::fs::create_dir_all(root.join("UiResources/empty")).expect("mkdir");

        let files = list_asset_files(&root, Utf8Path::new("UiResources")).expect("list");
        assert!(files.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let err = list_asset_files(&root, Utf8Path::new("UiResources")).unwrap_err();
        assert!(err.to_string().contains("asset directory does not exist"));
    }

    #[test]
    fn dot_prefixed_asset_dir_is_normalized() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("dist/app.js"), "");

        let files = list_asset_files(&root, Utf8Path::new("./dist")).expect("list");
        assert_eq!(files, vec![AssetPath::new("dist/app.js")]);
    }
}
