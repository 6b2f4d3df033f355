//! # Scaffold MD
//!
//! A markdown content-tree scaffolder. Declarative YAML outlines describe a
//! hierarchy of folders, sections, and files; scaffold-md materializes them
//! as a directory tree of markdown stubs plus a `routesMeta.json`
//! navigation/metadata manifest.
//!
//! # Architecture: One-Shot Batch Transform
//!
//! ```text
//! routes/**/*.yml  →  ContentTree  →  content/**  +  routesMeta.json
//! ```
//!
//! There is no watch mode and no incremental update: every run is a full
//! top-to-bottom pass over static input. Three write disciplines keep
//! re-runs safe:
//!
//! - directories are created idempotently,
//! - `index.md` landing stubs and the manifest are regenerated every run,
//! - content stubs are write-once — a file an author has edited is never
//!   touched again.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | The recursive content-hierarchy model and all of its traversals |
//! | [`batch`] | Recursive outline discovery under `routes/`, best-effort per-file processing |
//! | [`store`] | Content-store seam: route registration and article lookup |
//! | [`slug`] | `slugify`/`routify`/collision-resolution string transforms |
//! | [`fsops`] | Filesystem primitives with the three write disciplines above |
//! | [`output`] | CLI display formatting — pure `format_*` functions plus print wrappers |
//!
//! # Design Decisions
//!
//! ## One Node Type, Not a Class Hierarchy
//!
//! Folders that own files and purely structural sections are the same
//! [`tree::ContentTree`] type with optional fields, because every traversal
//! treats them uniformly. Children are exclusively owned `Vec`s — the trees
//! are small and built once from YAML, so there is no sharing to model.
//!
//! ## Typed Errors Over Null Fallbacks
//!
//! Library calls propagate typed errors ([`tree::TreeError`],
//! [`store::StoreError`]) all the way up. The only swallowed conditions are
//! directory-already-exists and content-stub-already-exists, which are the
//! expected outcomes of a re-run. The batch driver is the single place that
//! catches: one bad outline is reported and its siblings still run.
//!
//! ## Caller-Scoped Collision Registries
//!
//! Slug collisions among a node's files are resolved against a set that
//! lives for exactly one node's file pass. Nothing is process-global, so
//! repeated runs and independent top-level invocations cannot interfere.

pub mod batch;
pub mod fsops;
pub mod output;
pub mod slug;
pub mod store;
pub mod tree;
