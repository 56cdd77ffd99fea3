use std::path::{Component, Path, PathBuf};

pub fn sanitize_filename(name: &str) -> String {
    let mut s = name.trim().to_string();
    let invalid = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];
    for ch in invalid {
        s = s.replace(ch, "-");
    }
    s = s.replace(' ', "_");
    if s.len() > 100 {
        let mut cut = 100;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
    }
    if s.is_empty() || s.chars().all(|c| c == '.') {
        s = "file.bin".into();
    }
    s
}

/// `<stem>_<timestamp>.<ext>` for a sanitised original name.
pub fn timestamped_name(original: &str, ts: &str) -> String {
    let safe = sanitize_filename(original);
    let (stem, ext) = split_name(&safe);
    if ext.is_empty() {
        format!("{}_{}", stem, ts)
    } else {
        format!("{}_{}.{}", stem, ts, ext)
    }
}

/// `<stem>-<n>.<ext>`, used when a name is already taken.
pub fn numbered_name(name: &str, n: u32) -> String {
    let (stem, ext) = split_name(name);
    if ext.is_empty() {
        format!("{}-{}", stem, n)
    } else {
        format!("{}-{}.{}", stem, n, ext)
    }
}

fn split_name(name: &str) -> (String, String) {
    let p = Path::new(name);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("file")
        .to_string();
    let ext = p
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string();
    (stem, ext)
}

pub fn relative_from_uploads(uploads_root: &Path, full: &Path) -> String {
    match full.strip_prefix(uploads_root) {
        Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
        Err(_) => full.to_string_lossy().replace('\\', "/"),
    }
}

/// Joins `rel` onto `root`, rejecting absolute paths and traversal.
pub fn join_under_root(root: &Path, rel: &str) -> anyhow::Result<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => continue,
            _ => anyhow::bail!("forbidden"),
        }
    }
    if relative.as_os_str().is_empty() {
        anyhow::bail!("forbidden");
    }
    Ok(root.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_separators_and_spaces() {
        assert_eq!(sanitize_filename("../a b/c.png"), "..-a_b-c.png");
        assert_eq!(sanitize_filename("   "), "file.bin");
        assert_eq!(sanitize_filename(".."), "file.bin");
    }

    #[test]
    fn builds_timestamped_and_numbered_names() {
        assert_eq!(timestamped_name("cat.jpg", "20240101-000000"), "cat_20240101-000000.jpg");
        assert_eq!(timestamped_name("README", "t"), "README_t");
        assert_eq!(numbered_name("cat_t.jpg", 2), "cat_t-2.jpg");
    }

    #[test]
    fn rejects_traversal() {
        let root = Path::new("/srv/uploads");
        assert!(join_under_root(root, "../etc/passwd").is_err());
        assert!(join_under_root(root, "/etc/passwd").is_err());
        assert!(join_under_root(root, "").is_err());
        assert_eq!(
            join_under_root(root, "./profile/a.png").unwrap(),
            PathBuf::from("/srv/uploads/profile/a.png")
        );
    }
}
