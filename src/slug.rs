//! Centralized slug and route-path transforms.
//!
//! Every name that ends up on disk or in a route goes through this module,
//! so folder names, file stems, and manifest routes all agree on one
//! restricted character set.
//!
//! ## Transform rules
//!
//! - `slugify`: display title → single path segment. `"Hello & World!!"`
//!   becomes `"hello-and-world"`.
//! - `routify`: like `slugify` but separator-preserving, for names that
//!   already carry hierarchy. `"Docs\Guides & Tips"` becomes
//!   `"docs/guides-and-tips"`.
//!
//! Both are pure, total over any input, and idempotent.

use std::collections::HashSet;

/// Turn a display title into a URL/filesystem-safe path segment.
///
/// Lowercase, trim, whitespace runs → `-`, `&` → `-and-`, everything outside
/// `[a-z0-9_-]` dropped, repeated `-` collapsed to one.
pub fn slugify(text: &str) -> String {
    transform(text, false)
}

/// Like [`slugify`], but preserves hierarchy separators.
///
/// Backslashes become forward slashes, `/` survives the character filter,
/// and repeated `/` collapse to one. Used for path segments derived from
/// nested directory names, where `slugify` would destroy the separators.
pub fn routify(text: &str) -> String {
    transform(text, true)
}

fn transform(text: &str, keep_separators: bool) -> String {
    let lowered = text.to_lowercase();
    let trimmed = lowered.trim();

    let mut out = String::with_capacity(trimmed.len());
    let mut pending_space = false;
    for c in trimmed.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push('-');
            pending_space = false;
        }
        match c {
            '&' => out.push_str("-and-"),
            '\\' if keep_separators => out.push('/'),
            '/' if keep_separators => out.push('/'),
            c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => out.push(c),
            _ => {}
        }
    }

    collapse_runs(&out, keep_separators)
}

/// Collapse `--+` → `-` and (when separators are kept) `//+` → `/`.
fn collapse_runs(s: &str, keep_separators: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    for c in s.chars() {
        let repeated_dash = c == '-' && prev == Some('-');
        let repeated_slash = keep_separators && c == '/' && prev == Some('/');
        if !(repeated_dash || repeated_slash) {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Resolve a path collision against a caller-scoped registry.
///
/// Returns `candidate` if unseen, otherwise `candidate-1`, `candidate-2`, …
/// until a free path is found. The winner is inserted into `seen` before
/// returning, so the set is the registry of claimed paths for one batch.
pub fn unique_path(candidate: &str, seen: &mut HashSet<String>) -> String {
    let mut unique = candidate.to_string();
    let mut counter = 1;
    while seen.contains(&unique) {
        unique = format!("{candidate}-{counter}");
        counter += 1;
    }
    seen.insert(unique.clone());
    unique
}

/// Join two route segments with a single forward slash.
///
/// Routes are `/`-separated strings regardless of platform separator; this
/// avoids `\` leaking into manifests on Windows. An empty side yields the
/// other unchanged.
pub fn join_route(base: &str, segment: &str) -> String {
    if base.is_empty() {
        return segment.to_string();
    }
    if segment.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), segment.trim_start_matches('/'))
}
