use anyhow::Context;
use camino::Utf8Path;
use std::io::Write;

pub fn read_bytes(path: &Utf8Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read {}", path))
}

pub fn read_text(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {}", path))
}

/// Replace `path` with `contents` via a temp file in the same directory and a rename.
///
/// Readers see either the old or the new file, never a partial one. Permissions of an
/// existing file are carried over to the replacement.
pub fn write_atomic(path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir))?;
    tmp.write_all(contents)
        .with_context(|| format!("write temp file for {}", path))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("sync temp file for {}", path))?;

    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .with_context(|| format!("copy permissions of {}", path))?;
    }

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("replace {}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uisync_test_util::{read_file, utf8_root, write_file};

    #[test]
    fn write_atomic_replaces_contents() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let path = root.join("UiResources.resx");
        write_file(&path, "<root/>");

        write_atomic(&path, b"<root></root>\n").expect("write");
        assert_eq!(read_file(&path), "<root></root>\n");

        // No temp files left behind.
        let leftovers = std::fs::read_dir(&root).expect("read dir").count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn write_atomic_creates_missing_file() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let path = root.join("new.ts");
        write_atomic(&path, b"x").expect("write");
        assert_eq!(read_file(&path), "x");
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let path = root.join("script.ts");
        write_file(&path, "a");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).expect("chmod");

        write_atomic(&path, b"b").expect("write");
        let mode = std::fs::metadata(&path).expect("meta").permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn read_errors_name_the_path() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let err = read_text(&root.join("missing.resx")).unwrap_err();
        assert!(err.to_string().contains("missing.resx"));
    }
}
