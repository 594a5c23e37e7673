use crate::error::ScanError;
use crate::types::{Census, EntryKind, ScanResult, TreeEntry};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;
use walkdir::WalkDir;

pub fn scan(root: &Path) -> Result<ScanResult, ScanError> {
    probe_root(root)?;

    debug!("starting scan of '{}'", root.display());
    let started = Instant::now();

    // min_depth(1) keeps the root itself out of the folder count
    let entries = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                // Unreadable subdirectories are skipped, not fatal
                debug!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter_map(|e| {
            let kind = if e.file_type().is_dir() {
                EntryKind::Dir
            } else if e.file_type().is_file() {
                EntryKind::File
            } else {
                return None; // symlinks, sockets, etc.
            };

            let size = match kind {
                EntryKind::File => e.metadata().map(|m| m.len()).unwrap_or(0),
                EntryKind::Dir => 0,
            };

            Some(TreeEntry {
                name: e.file_name().to_string_lossy().into_owned(),
                kind,
                size,
            })
        });

    let census = tally(entries);
    let elapsed = started.elapsed();

    debug!(
        "scan finished: {} files, {} folders in {:.2}s",
        census.files,
        census.folders,
        elapsed.as_secs_f64()
    );

    Ok(ScanResult { census, elapsed })
}

fn probe_root(root: &Path) -> Result<(), ScanError> {
    match fs::read_dir(root) {
        Ok(_) => Ok(()),
        Err(e) if matches!(e.kind(), ErrorKind::PermissionDenied | ErrorKind::NotFound) => {
            Err(ScanError::Inaccessible {
                path: root.to_path_buf(),
                source: e,
            })
        }
        Err(e) => Err(ScanError::Io(e)),
    }
}

#[must_use]
pub fn tally<I>(entries: I) -> Census
where
    I: IntoIterator<Item = TreeEntry>,
{
    let mut census = Census::default();

    for entry in entries {
        match entry.kind {
            EntryKind::Dir => census.folders += 1,
            EntryKind::File => {
                census.files += 1;
                census.bytes += entry.size;
                let stat = census
                    .by_extension
                    .entry(extension_of(&entry.name))
                    .or_default();
                stat.files += 1;
                stat.bytes += entry.size;
            }
        }
    }

    census
}

#[must_use]
pub fn extension_of(name: &str) -> String {
    // A run of leading dots is part of the name, not a separator,
    // so ".bashrc" has no extension while ".tar.gz" has ".gz"
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(i) => name[stem_start + i..].to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_file(name: &str, size: u64) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            kind: EntryKind::File,
            size,
        }
    }

    fn make_dir(name: &str) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            kind: EntryKind::Dir,
            size: 0,
        }
    }

    #[test]
    fn test_extension_rule() {
        assert_eq!(extension_of("a.TXT"), ".txt");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of(".tar.gz"), ".gz");
        assert_eq!(extension_of("archive.tar.GZ"), ".gz");
        assert_eq!(extension_of("trailing."), ".");
        assert_eq!(extension_of("..config"), "");
    }

    #[test]
    fn test_tally_file_count_matches_extension_sum() {
        let entries = vec![
            make_file("a.txt", 10),
            make_file("b.TXT", 20),
            make_file("notes.md", 5),
            make_file("README", 1),
            make_dir("sub"),
            make_dir("sub2"),
        ];

        let census = tally(entries);

        assert_eq!(census.files, 4);
        assert_eq!(census.folders, 2);
        assert_eq!(census.bytes, 36);

        let sum: u64 = census.by_extension.values().map(|s| s.files).sum();
        assert_eq!(sum, census.files);

        let txt = census.by_extension.get(".txt").unwrap();
        assert_eq!(txt.files, 2);
        assert_eq!(txt.bytes, 30);
        assert_eq!(census.by_extension.get("").unwrap().files, 1);
    }

    #[test]
    fn test_tally_keys_are_lowercase_and_dot_prefixed() {
        let entries = vec![
            make_file("A.PNG", 0),
            make_file("b.Jpg", 0),
            make_file("plain", 0),
        ];

        let census = tally(entries);

        for key in census.by_extension.keys() {
            assert_eq!(key, &key.to_lowercase());
            assert!(key.is_empty() || key.starts_with('.'));
        }
    }

    #[test]
    fn test_scan_mixed_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.TXT"), b"hello").unwrap();
        fs::write(dir.path().join("b.txt"), b"world!").unwrap();
        fs::write(dir.path().join("README"), b"r").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let result = scan(dir.path()).unwrap();
        let census = &result.census;

        assert_eq!(census.files, 3);
        assert_eq!(census.folders, 1);
        assert_eq!(census.bytes, 12);
        assert_eq!(census.by_extension.len(), 2);
        assert_eq!(census.by_extension.get(".txt").unwrap().files, 2);
        assert_eq!(census.by_extension.get("").unwrap().files, 1);
    }

    #[test]
    fn test_scan_counts_nested_folders() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        fs::write(dir.path().join("a/b/deep.log"), b"x").unwrap();

        let result = scan(dir.path()).unwrap();

        // a, a/b and a/b/c are discovered; the root is not counted
        assert_eq!(result.census.folders, 3);
        assert_eq!(result.census.files, 1);
        assert_eq!(result.census.by_extension.get(".log").unwrap().files, 1);
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = tempfile::tempdir().unwrap();

        let result = scan(dir.path()).unwrap();

        assert_eq!(result.census.files, 0);
        assert_eq!(result.census.folders, 0);
        assert!(result.census.by_extension.is_empty());
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does_not_exist");

        let err = scan(&missing).unwrap_err();
        assert!(matches!(err, ScanError::Inaccessible { .. }));
    }

    #[test]
    fn test_scan_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.rs"), b"fn main() {}").unwrap();
        fs::write(dir.path().join("two.rs"), b"mod x;").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/three.toml"), b"[a]").unwrap();

        let first = scan(dir.path()).unwrap();
        let second = scan(dir.path()).unwrap();

        assert_eq!(first.census, second.census);
    }
}
