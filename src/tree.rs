//! The content-hierarchy tree model and its traversals.
//!
//! A [`ContentTree`] is one node of the outline: a display title, optional
//! icon, whether the node is a route-bearing folder (`isRoute`), ordered
//! groups of child folders (`folderSet`), and the markdown files the node
//! owns directly (`files`). The whole tree deserializes straight from a YAML
//! document and is never mutated into a cycle — children are exclusively
//! owned, order is meaningful everywhere (navigation and on-disk sibling
//! order follow declaration order).
//!
//! ## Traversals
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`ContentTree::create_dirs`] | directories only, idempotent |
//! | [`ContentTree::generate`] | full pass: dirs, index stubs, content stubs, `routesMeta.json` |
//! | [`ContentTree::navigation`] | depth-bounded menu projection |
//! | [`ContentTree::flat_routes`] | pre-order route list for bulk registration |
//! | [`ContentTree::routes_meta`] | read-only manifest hydrated from the content store |
//!
//! ## Identifiers
//!
//! Manifest nodes carry hierarchical ids: the root is `x`, and a child gets
//! `<parent>-<group_index>-<child_index>`, e.g. `x-0-1`. File entries get
//! fresh UUIDs instead — they have no positional identity across runs.

use crate::fsops;
use crate::slug::{join_route, slugify, unique_path};
use crate::store::{Article, ContentStore, StoreError};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

fn default_true() -> bool {
    true
}

/// One node of the content hierarchy, deserialized from a YAML outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTree {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Route-bearing folders receive an `index.md` landing stub; structural
    /// sections do not.
    #[serde(default = "default_true")]
    pub is_route: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub folder_set: Vec<FolderSet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileSpec>,
}

/// An ordered group of sibling folders, optionally labeled with a section
/// header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_header: Option<String>,
    #[serde(default)]
    pub folders: Vec<ContentTree>,
}

/// A markdown file declared directly on a folder node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSpec {
    pub title: String,
    /// Preferred over `title` as the slug source when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Vec<String>>,
}

// ============================================================================
// Manifest output types (routesMeta.json, camelCase on the wire)
// ============================================================================

/// Denormalized manifest node mirroring the tree shape.
///
/// A transient projection: built once per generation pass, serialized to
/// `routesMeta.json`, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesMeta {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Content-root-relative path; empty for the root, `/setup` style below.
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_set: Option<Vec<SubRoutesMeta>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubRoutesMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_header: Option<String>,
    pub folders: Vec<RoutesMeta>,
}

/// Manifest entry for one markdown file.
///
/// Synthesized from a [`FileSpec`] during generation, or hydrated from a
/// store [`Article`] during the read-only manifest pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    pub route: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Vec<String>>,
}

impl FileMeta {
    /// Project a store article into a manifest entry.
    ///
    /// `icon`/`shortcut`/`features` live in the article's free-form meta
    /// blob; tags arrive already resolved to names.
    fn from_article(article: Article, base: &str) -> Self {
        let meta = &article.meta;
        let str_field = |key: &str| {
            meta.get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };
        let features = meta.get("features").and_then(|v| v.as_array()).map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        });
        FileMeta {
            id: article.id,
            title: article.title,
            icon: str_field("icon"),
            shortcut: str_field("shortcut"),
            route: format!("{base}{}", article.segment),
            date: article.date,
            publisher_id: article.publisher_id,
            tag: Some(article.tags),
            feature: features,
        }
    }
}

// ============================================================================
// Navigation projection
// ============================================================================

/// Depth-bounded menu entry. `href` is the slug of the node's own title, not
/// a full path — callers join as needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub title: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Placeholder, always empty — never derived from content.
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu: Vec<NavigationSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_header: Option<String>,
    pub navigation: Vec<NavItem>,
}

impl ContentTree {
    /// Parse an outline from a YAML file. All-or-nothing: read or parse
    /// failure propagates, no partial tree.
    pub fn from_yaml_file(path: &Path) -> Result<Self, TreeError> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_yaml_str(&contents)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Depth-first collection of all leaf nodes (empty or absent folder set),
    /// in declaration order. A tree with no folder set is its own only leaf.
    pub fn leaves(&self) -> Vec<&ContentTree> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ContentTree>) {
        if self.folder_set.is_empty() {
            out.push(self);
            return;
        }
        for set in &self.folder_set {
            for folder in &set.folders {
                folder.collect_leaves(out);
            }
        }
    }

    /// Splice an external sub-tree onto the first leaf whose title matches
    /// `sub.title` exactly, replacing that leaf's folder set.
    ///
    /// Returns `false` (and changes nothing) when no leaf matches; the
    /// caller decides how severe that is.
    pub fn graft(&mut self, sub: &ContentTree) -> bool {
        match self.find_leaf_mut(&sub.title) {
            Some(leaf) => {
                leaf.folder_set = sub.folder_set.clone();
                true
            }
            None => false,
        }
    }

    fn find_leaf_mut(&mut self, title: &str) -> Option<&mut ContentTree> {
        if self.folder_set.is_empty() {
            return (self.title == title).then_some(self);
        }
        for set in &mut self.folder_set {
            for folder in &mut set.folders {
                if let Some(found) = folder.find_leaf_mut(title) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Directory-only pass: create `slug(title)` directories for every child
    /// in every folder set, depth-first, under `<base>/<root>`.
    ///
    /// No files, no manifest. Idempotent — a re-run creates nothing new and
    /// raises no errors.
    pub fn create_dirs(&self, base: &Path, root: &str) -> Result<(), TreeError> {
        self.create_dirs_at(&base.join(root))
    }

    fn create_dirs_at(&self, dir: &Path) -> Result<(), TreeError> {
        for set in &self.folder_set {
            for folder in &set.folders {
                let child_dir = dir.join(slugify(&folder.title));
                fsops::create_folder(&child_dir)?;
                folder.create_dirs_at(&child_dir)?;
            }
        }
        Ok(())
    }

    /// The full generation pass rooted at `<base>/<root>`.
    ///
    /// Creates folders, `index.md` landing stubs for route-bearing nodes,
    /// write-once content stubs for declared files, and serializes the
    /// accumulated manifest to `<base>/<root>/routesMeta.json`. The manifest
    /// is also returned.
    pub fn generate(&self, base: &Path, root: &str) -> Result<RoutesMeta, TreeError> {
        let base_dir = base.join(root);
        let meta = self.travel(&base_dir, "", "x")?;
        fsops::write_json_file(&base_dir.join("routesMeta.json"), &meta)?;
        Ok(meta)
    }

    /// Depth-first pre-order worker for [`generate`](Self::generate).
    ///
    /// `dir` is the node's on-disk directory, `route` its content-root
    /// relative path (empty at the root, `/setup` style below). Siblings are
    /// processed strictly in declaration order so on-disk creation order is
    /// deterministic.
    fn travel(&self, dir: &Path, route: &str, id: &str) -> Result<RoutesMeta, TreeError> {
        // The root create is idempotent; deeper dirs are genuinely new.
        fsops::create_folder(dir)?;
        if self.is_route {
            fsops::create_index_file(dir, &self.title)?;
        }

        let mut meta = RoutesMeta {
            id: id.to_string(),
            title: self.title.clone(),
            icon: self.icon.clone(),
            route: route.to_string(),
            feature: self.feature.clone(),
            folder_set: None,
            files: Vec::new(),
        };

        if !self.folder_set.is_empty() {
            let mut sets = Vec::with_capacity(self.folder_set.len());
            for (i, set) in self.folder_set.iter().enumerate() {
                let mut folders = Vec::with_capacity(set.folders.len());
                for (j, folder) in set.folders.iter().enumerate() {
                    let child_slug = slugify(&folder.title);
                    let child_dir = dir.join(&child_slug);
                    let child_route = format!("{route}/{child_slug}");
                    let child_id = format!("{id}-{i}-{j}");
                    folders.push(folder.travel(&child_dir, &child_route, &child_id)?);
                }
                sets.push(SubRoutesMeta {
                    section_header: set.section_header.clone(),
                    folders,
                });
            }
            meta.folder_set = Some(sets);
        }

        if !self.files.is_empty() {
            // Collision registry is scoped to this node's files only.
            let mut seen = HashSet::new();
            for file in &self.files {
                let candidate = slugify(file.shortcut.as_deref().unwrap_or(&file.title));
                let stem = unique_path(&candidate, &mut seen);
                fsops::create_md_file(dir, &stem, &file.title)?;
                meta.files.push(FileMeta {
                    id: Uuid::new_v4().to_string(),
                    title: file.title.clone(),
                    icon: self.icon.clone(),
                    shortcut: file.shortcut.clone(),
                    route: format!("{route}/{stem}"),
                    date: Utc::now(),
                    publisher_id: None,
                    tag: None,
                    feature: file.feature.clone(),
                });
            }
        }

        Ok(meta)
    }

    /// Depth-bounded navigation projection.
    ///
    /// A node at depth `d` is included iff `d < max_depth`, so
    /// `navigation(0)` is `None` and `navigation(2)` covers the root and its
    /// children but no grandchild menus.
    pub fn navigation(&self, max_depth: usize) -> Option<NavItem> {
        self.nav_at(0, max_depth)
    }

    fn nav_at(&self, depth: usize, max_depth: usize) -> Option<NavItem> {
        if depth >= max_depth {
            return None;
        }
        let menu = self
            .folder_set
            .iter()
            .map(|set| NavigationSet {
                section_header: set.section_header.clone(),
                navigation: set
                    .folders
                    .iter()
                    .filter_map(|folder| folder.nav_at(depth + 1, max_depth))
                    .collect(),
            })
            .collect();
        Some(NavItem {
            title: self.title.clone(),
            href: slugify(&self.title),
            icon: self.icon.clone(),
            description: String::new(),
            menu,
        })
    }

    /// Pre-order list of every slugified route path reachable from this
    /// node, root first.
    pub fn flat_routes(&self, base: &str) -> Vec<String> {
        let path = join_route(base, &slugify(&self.title));
        let mut out = vec![path.clone()];
        for set in &self.folder_set {
            for folder in &set.folders {
                out.extend(folder.flat_routes(&path));
            }
        }
        out
    }

    /// Register every reachable route with the store in one bulk insert.
    ///
    /// Run before content generation so a later create pass can skip-insert
    /// without producing duplicates.
    pub fn register_routes(
        &self,
        store: &mut dyn ContentStore,
        base: &str,
    ) -> Result<(), StoreError> {
        store.insert_routes(&self.flat_routes(base))
    }

    /// Read-only manifest pass hydrated from the content store.
    ///
    /// Instead of synthesizing file entries from the outline, each node
    /// looks up published articles under its route path. No directories or
    /// files are touched. Sibling folders are resolved in parallel — lookups
    /// have no ordering dependency and write nothing.
    pub fn routes_meta(
        &self,
        store: &dyn ContentStore,
        base: &str,
    ) -> Result<RoutesMeta, TreeError> {
        self.routes_meta_at(store, base, "x")
    }

    fn routes_meta_at(
        &self,
        store: &dyn ContentStore,
        base: &str,
        id: &str,
    ) -> Result<RoutesMeta, TreeError> {
        let path = join_route(base, &slugify(&self.title));
        let articles = store.articles_by_route_path(&path)?;
        let files = articles
            .into_iter()
            .map(|article| FileMeta::from_article(article, &path))
            .collect();

        let folder_set = if self.folder_set.is_empty() {
            None
        } else {
            let sets = self
                .folder_set
                .par_iter()
                .enumerate()
                .map(|(i, set)| {
                    let folders = set
                        .folders
                        .par_iter()
                        .enumerate()
                        .map(|(j, folder)| {
                            folder.routes_meta_at(store, &path, &format!("{id}-{i}-{j}"))
                        })
                        .collect::<Result<Vec<_>, TreeError>>()?;
                    Ok(SubRoutesMeta {
                        section_header: set.section_header.clone(),
                        folders,
                    })
                })
                .collect::<Result<Vec<_>, TreeError>>()?;
            Some(sets)
        };

        Ok(RoutesMeta {
            id: id.to_string(),
            title: self.title.clone(),
            icon: self.icon.clone(),
            route: path,
            feature: self.feature.clone(),
            folder_set,
            files,
        })
    }
}
