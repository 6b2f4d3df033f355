//! CLI output formatting.
//!
//! Display is information-centric, not file-centric: the primary line for
//! every entity is its title, with slugs and counts as secondary context.
//! Each view has a `format_*` function returning `Vec<String>` (pure, no
//! I/O, unit-testable) and a `print_*` wrapper that writes to stdout.
//!
//! ## Outline view
//!
//! ```text
//! Guides
//!     [Basics]
//!     Setup (2 files)
//!     Usage
//! ```
//!
//! ## Generation summary
//!
//! ```text
//! Generated content/
//!     4 folders, 3 files
//!     Manifest: content/routesMeta.json
//! ```

use crate::batch::BatchSummary;
use crate::tree::{ContentTree, RoutesMeta};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an outline tree: one line per node, section headers bracketed,
/// file counts appended where a node owns files.
pub fn format_outline(tree: &ContentTree) -> Vec<String> {
    let mut lines = Vec::new();
    outline_node(tree, 0, &mut lines);
    lines
}

fn outline_node(node: &ContentTree, depth: usize, lines: &mut Vec<String>) {
    let header = if node.files.is_empty() {
        format!("{}{}", indent(depth), node.title)
    } else {
        format!("{}{} ({} files)", indent(depth), node.title, node.files.len())
    };
    lines.push(header);
    for set in &node.folder_set {
        if let Some(section) = &set.section_header {
            lines.push(format!("{}[{}]", indent(depth + 1), section));
        }
        for folder in &set.folders {
            outline_node(folder, depth + 1, lines);
        }
    }
}

pub fn print_outline(tree: &ContentTree) {
    for line in format_outline(tree) {
        println!("{line}");
    }
}

/// Format the post-generation summary: folder/file counts plus the manifest
/// location.
pub fn format_generate_summary(meta: &RoutesMeta, base_dir: &Path) -> Vec<String> {
    let (folders, files) = count_meta(meta);
    vec![
        format!("Generated {}", base_dir.display()),
        format!("{}{} folders, {} files", indent(1), folders, files),
        format!(
            "{}Manifest: {}",
            indent(1),
            base_dir.join("routesMeta.json").display()
        ),
    ]
}

fn count_meta(meta: &RoutesMeta) -> (usize, usize) {
    let mut folders = 1;
    let mut files = meta.files.len();
    if let Some(sets) = &meta.folder_set {
        for set in sets {
            for child in &set.folders {
                let (f, n) = count_meta(child);
                folders += f;
                files += n;
            }
        }
    }
    (folders, files)
}

pub fn print_generate_summary(meta: &RoutesMeta, base_dir: &Path) {
    for line in format_generate_summary(meta, base_dir) {
        println!("{line}");
    }
}

/// Format a batch run: one line per outline, failures marked, totals last.
pub fn format_batch_summary(summary: &BatchSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for path in &summary.processed {
        lines.push(path.clone());
    }
    for (path, error) in &summary.failed {
        lines.push(format!("{path} FAILED"));
        lines.push(format!("{}{}", indent(1), error));
    }
    lines.push(format!(
        "Scaffolded {} outlines, {} failed",
        summary.processed.len(),
        summary.failed.len()
    ));
    lines
}

pub fn print_batch_summary(summary: &BatchSummary) {
    for line in format_batch_summary(summary) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline() -> ContentTree {
        ContentTree::from_yaml_str(
            r#"
title: Guides
folderSet:
  - sectionHeader: Basics
    folders:
      - title: Setup
        files:
          - title: Install
          - title: Upgrade
      - title: Usage
"#,
        )
        .unwrap()
    }

    #[test]
    fn outline_view_indents_and_counts() {
        let lines = format_outline(&outline());
        assert_eq!(
            lines,
            vec![
                "Guides",
                "    [Basics]",
                "    Setup (2 files)",
                "    Usage",
            ]
        );
    }

    #[test]
    fn generate_summary_counts_recursively() {
        let tmp = tempfile::TempDir::new().unwrap();
        let meta = outline().generate(tmp.path(), "content").unwrap();
        let lines = format_generate_summary(&meta, &tmp.path().join("content"));
        assert!(lines[1].contains("3 folders, 2 files"));
    }

    #[test]
    fn batch_summary_marks_failures() {
        let summary = BatchSummary {
            processed: vec!["routes/docs/a.yml".to_string()],
            failed: vec![("routes/docs/b.yml".to_string(), "bad yaml".to_string())],
        };
        let lines = format_batch_summary(&summary);
        assert!(lines.iter().any(|l| l.ends_with("FAILED")));
        assert_eq!(lines.last().unwrap(), "Scaffolded 1 outlines, 1 failed");
    }
}
