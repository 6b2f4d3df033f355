//! Filesystem primitives for scaffold output.
//!
//! Three write disciplines coexist in a generated tree and each helper pins
//! one down:
//!
//! - **Idempotent**: directories (`create_folder`) — already-exists is fine.
//! - **Overwrite**: `index.md` landing stubs and `routesMeta.json` — these
//!   are derived entirely from the outline and refreshed every run.
//! - **Write-once**: content stubs (`create_md_file`) — a `<slug>.md` may
//!   have been edited by a human since the last run, so an existing file is
//!   treated as already satisfied and never touched again.

use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Create a directory and any missing parents. Pre-existing is not an error.
pub fn create_folder(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Write the `index.md` landing stub for a route-bearing folder.
///
/// Front-matter carries the title only; regenerated on every run.
pub fn create_index_file(dir: &Path, title: &str) -> io::Result<()> {
    let content = format!("---\ntitle: {title}\n---\n");
    fs::write(dir.join("index.md"), content)
}

/// Write a content stub at `<dir>/<stem>.md`, only if it does not already
/// exist.
///
/// Front-matter has the title plus empty `summary`/`image`/`tags` slots for
/// the author to fill in. `AlreadyExists` is swallowed; any other I/O error
/// propagates.
pub fn create_md_file(dir: &Path, stem: &str, title: &str) -> io::Result<()> {
    let content = format!("---\ntitle: {title}\nsummary: \nimage: \ntags: []\n---\n");
    let path = dir.join(format!("{stem}.md"));
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(mut file) => file.write_all(content.as_bytes()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// Serialize a value as pretty-printed JSON to `path`. Overwrites.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_folder_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");
        create_folder(&dir).unwrap();
        create_folder(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn index_file_has_title_front_matter() {
        let tmp = TempDir::new().unwrap();
        create_index_file(tmp.path(), "Guides").unwrap();
        let content = fs::read_to_string(tmp.path().join("index.md")).unwrap();
        assert_eq!(content, "---\ntitle: Guides\n---\n");
    }

    #[test]
    fn index_file_is_refreshed() {
        let tmp = TempDir::new().unwrap();
        create_index_file(tmp.path(), "Old").unwrap();
        create_index_file(tmp.path(), "New").unwrap();
        let content = fs::read_to_string(tmp.path().join("index.md")).unwrap();
        assert!(content.contains("title: New"));
    }

    #[test]
    fn md_file_written_with_stub_front_matter() {
        let tmp = TempDir::new().unwrap();
        create_md_file(tmp.path(), "install", "Install").unwrap();
        let content = fs::read_to_string(tmp.path().join("install.md")).unwrap();
        assert!(content.starts_with("---\ntitle: Install\n"));
        assert!(content.contains("tags: []"));
    }

    #[test]
    fn md_file_never_overwrites() {
        let tmp = TempDir::new().unwrap();
        let md = tmp.path().join("install.md");
        fs::write(&md, "edited by hand").unwrap();

        create_md_file(tmp.path(), "install", "Install").unwrap();

        assert_eq!(fs::read_to_string(&md).unwrap(), "edited by hand");
    }

    #[test]
    fn md_file_other_io_errors_propagate() {
        // Parent directory does not exist
        let result = create_md_file(Path::new("/nonexistent-dir-xyz"), "file", "X");
        assert!(result.is_err());
    }

    #[test]
    fn json_file_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("meta.json");
        let value = serde_json::json!({"id": "x", "files": []});
        write_json_file(&path, &value).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["id"], "x");
    }
}
