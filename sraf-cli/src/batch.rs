//! Collecting and scanning the files of a batch run

use anyhow::{bail, Result};
use ignore::WalkBuilder;
use rayon::prelude::*;
use sraf_parser::{Document, DocumentStatistics, Scanner};
use std::path::{Path, PathBuf};

/// List the files to scan under `root`, in file-name order
///
/// A plain file is returned as-is. Hidden files and ignore files are not special:
/// every regular file in a filing directory is a filing.
pub fn collect_paths(root: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        bail!("input path '{}' does not exist", root.display());
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut paths = Vec::new();
    for entry in builder.build() {
        if limit.is_some_and(|limit| paths.len() >= limit) {
            break;
        }
        match entry {
            Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                paths.push(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "skipping unreadable directory entry"),
        }
    }
    Ok(paths)
}

/// Read and scan every path in parallel, keeping input order
///
/// Files that cannot be read are logged and left out of the result.
pub fn scan_paths(scanner: &Scanner<'_>, paths: &[PathBuf]) -> Vec<DocumentStatistics> {
    paths
        .par_iter()
        .filter_map(|path| match Document::from_path(path) {
            Ok(document) => {
                let stats = scanner.scan(&document);
                if stats.is_empty() {
                    tracing::debug!(path = %path.display(), "no lexicon words found");
                }
                tracing::info!(path = %path.display(), words = stats.word_count, "scanned");
                Some(stats)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable file");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sraf_parser::{Category, Lexicon};
    use std::fs;

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "BAD").unwrap();
        fs::write(dir.path().join("a.txt"), "GOOD").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "GOOD GOOD").unwrap();
        fs::create_dir(dir.path().join("qtr2")).unwrap();
        fs::write(dir.path().join("qtr2").join("c.txt"), "GOOD BAD").unwrap();
        dir
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn walks_every_file_in_name_order() {
        let dir = corpus();
        let paths = collect_paths(dir.path(), None).unwrap();
        assert_eq!(names(&paths), vec![".hidden.txt", "a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn stops_at_limit() {
        let dir = corpus();
        let paths = collect_paths(dir.path(), Some(2)).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn single_file_is_its_own_batch() {
        let dir = corpus();
        let file = dir.path().join("a.txt");
        assert_eq!(collect_paths(&file, None).unwrap(), vec![file]);
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(collect_paths(Path::new("/nonexistent/filings"), None).is_err());
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let dir = corpus();
        let lexicon = Lexicon::builder()
            .word("GOOD", &[Category::Positive], 1)
            .unwrap()
            .word("BAD", &[Category::Negative], 1)
            .unwrap()
            .build();
        let scanner = Scanner::new(&lexicon).unwrap();
        let paths = vec![
            dir.path().join("a.txt"),
            dir.path().join("missing.txt"),
            dir.path().join("b.txt"),
        ];

        let rows = scan_paths(&scanner, &paths);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].positive, 100.0);
        assert_eq!(rows[1].negative, 100.0);
    }
}
