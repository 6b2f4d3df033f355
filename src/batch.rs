//! Batch driver: scan a routes directory and scaffold every outline in it.
//!
//! Walks a source directory recursively; every regular `.yml`/`.yaml` file
//! becomes one directory-scaffold invocation. The output folder for an
//! outline is derived from where the file sits: `routes/docs/guides.yml`
//! scaffolds under `content/docs/guides/`. The relative path is stripped of
//! its extension and passed through `routify`, so directory names with
//! spaces or `&` come out as clean route segments.
//!
//! Failures are per-file, not fatal: a malformed outline or unreadable entry
//! is reported and its siblings still run. The caller gets a
//! [`BatchSummary`] of what happened.

use crate::slug::routify;
use crate::tree::ContentTree;
use std::path::Path;
use walkdir::WalkDir;

/// Outcome of one batch run: scaffolded outline paths plus per-file
/// failures (path, error text).
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Scaffold directories for every outline found under `routes_dir`.
///
/// Outline files sitting directly in the scan root are skipped: only files
/// at least one directory deep are picked up, since the enclosing directory
/// is what names the output folder. Whether root-level outlines should map
/// to the content root instead is an open question inherited from the
/// previous ingest pipeline; the skip is kept as observed behavior.
pub fn process_outlines(routes_dir: &Path, content_base: &Path) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for entry in WalkDir::new(routes_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| routes_dir.display().to_string());
                summary.failed.push((path, e.to_string()));
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_outline(entry.path()) {
            continue;
        }
        // depth 1 = directly in the scan root
        if entry.depth() <= 1 {
            continue;
        }

        let display = entry.path().display().to_string();
        match scaffold_one(entry.path(), routes_dir, content_base) {
            Ok(()) => summary.processed.push(display),
            Err(e) => summary.failed.push((display, e.to_string())),
        }
    }

    summary
}

fn is_outline(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
        .unwrap_or(false)
}

fn scaffold_one(
    outline_path: &Path,
    routes_dir: &Path,
    content_base: &Path,
) -> Result<(), crate::tree::TreeError> {
    let tree = ContentTree::from_yaml_file(outline_path)?;
    let folder = output_folder(outline_path, routes_dir);
    tree.create_dirs(content_base, &folder)
}

/// Derive the output folder from an outline's location under the scan root:
/// relative path, extension(s) cut at the first dot, then routified.
fn output_folder(outline_path: &Path, routes_dir: &Path) -> String {
    let rel = outline_path
        .strip_prefix(routes_dir)
        .unwrap_or(outline_path)
        .to_string_lossy()
        .replace('\\', "/");
    let stem = rel.split('.').next().unwrap_or(&rel);
    routify(stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const OUTLINE: &str = "\
title: Guides
folderSet:
  - folders:
      - title: Setup
";

    fn setup(routes: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("routes");
        for (rel, content) in routes {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        tmp
    }

    #[test]
    fn outline_scaffolds_under_its_directory_path() {
        let tmp = setup(&[("docs/guides.yml", OUTLINE)]);
        let summary = process_outlines(&tmp.path().join("routes"), &tmp.path().join("content"));

        assert!(summary.is_clean());
        assert_eq!(summary.processed.len(), 1);
        assert!(tmp.path().join("content/docs/guides/setup").is_dir());
    }

    #[test]
    fn root_level_outlines_are_skipped() {
        let tmp = setup(&[("top.yml", OUTLINE), ("docs/nested.yaml", OUTLINE)]);
        let summary = process_outlines(&tmp.path().join("routes"), &tmp.path().join("content"));

        assert_eq!(summary.processed.len(), 1);
        assert!(summary.processed[0].contains("nested"));
        assert!(!tmp.path().join("content/top").exists());
    }

    #[test]
    fn non_yaml_files_are_ignored() {
        let tmp = setup(&[("docs/readme.md", "# hi"), ("docs/guides.yml", OUTLINE)]);
        let summary = process_outlines(&tmp.path().join("routes"), &tmp.path().join("content"));
        assert_eq!(summary.processed.len(), 1);
    }

    #[test]
    fn malformed_outline_does_not_abort_siblings() {
        let tmp = setup(&[
            ("docs/bad.yml", "title: [unclosed"),
            ("docs/good.yml", OUTLINE),
        ]);
        let summary = process_outlines(&tmp.path().join("routes"), &tmp.path().join("content"));

        assert_eq!(summary.processed.len(), 1);
        assert_eq!(summary.failed.len(), 1);
        assert!(summary.failed[0].0.contains("bad.yml"));
        assert!(tmp.path().join("content/docs/good/setup").is_dir());
    }

    #[test]
    fn output_folder_strips_extension_and_routifies() {
        let routes = Path::new("routes");
        assert_eq!(
            output_folder(Path::new("routes/docs/My Guides.yml"), routes),
            "docs/my-guides"
        );
        assert_eq!(
            output_folder(Path::new("routes/a/b.x.yaml"), routes),
            "a/b"
        );
    }

    #[test]
    fn missing_scan_root_is_reported_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let summary = process_outlines(&tmp.path().join("no-routes"), &tmp.path().join("content"));
        assert_eq!(summary.failed.len(), 1);
        assert!(summary.processed.is_empty());
    }
}
