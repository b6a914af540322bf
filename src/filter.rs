// src/filter.rs
// =============================================================================
// This module decides which files from a repository tree are worth fetching.
//
// The rules, in order:
// 1. Skip anything under dependency or build-output directories
//    (node_modules, dist, build)
// 2. Keep only blob entries (actual files, not directories)
// 3. Compute an "extension key" for the file name and keep the file only if
//    the key is on the allow-list below
// 4. Stop after 100 files, keeping the tree's original order
//
// The extension key is everything from the last '.' of the file name onward
// (".py", ".tar"), or the bare file name when there is no dot at all - which
// is how exact names like "Dockerfile" get matched.
//
// Everything here is a pure function over the tree entries: no I/O, no state.
//
// Rust concepts:
// - Iterator chains: filter() + take() + collect() instead of manual loops
// - Slices of &str: Cheap constant lookup tables
// - Lifetimes: extension_key borrows from the path instead of allocating
// =============================================================================

use crate::github::{EntryKind, TreeEntry};

// Extension keys we consider relevant: language sources, common config,
// markup and docs, plus a couple of exact file names.
//
// Note: ".env.example" can never actually match - the extension key for a
// file named ".env.example" is ".example" (last dot onward). Kept anyway to
// stay faithful to the deployed filter; see the test pinning this.
const RELEVANT_EXTENSIONS: &[&str] = &[
    ".js",
    ".jsx",
    ".ts",
    ".tsx",
    ".py",
    ".md",
    ".json",
    ".html",
    ".css",
    ".scss",
    "Dockerfile",
    ".yml",
    ".yaml",
    ".sh",
    ".env.example",
    ".xml",
    ".java",
    ".go",
    ".php",
    ".dart",
    ".lua",
];

// Substrings that mark a path as dependency or build output.
//
// Matched anywhere in the path string, not just as a whole path segment, so
// "src/distance/util.py" is excluded too ("dist" is a substring). Coarse on
// purpose - cheap and good enough for typical repositories.
const EXCLUDED_PATH_MARKERS: &[&str] = &["node_modules", "dist", "build"];

/// Upper bound on how many files we select from one repository
pub const MAX_SELECTED_FILES: usize = 100;

// Selects the relevant files from a repository tree
//
// Parameters:
//   entries: the full tree as reported by GitHub (files and directories mixed)
//
// Returns: up to MAX_SELECTED_FILES blob entries, in original tree order
pub fn select_relevant_files(entries: Vec<TreeEntry>) -> Vec<TreeEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::Blob && is_relevant_path(&entry.path))
        .take(MAX_SELECTED_FILES)
        .collect()
}

// Checks whether a path passes the exclusion and allow-list rules
fn is_relevant_path(path: &str) -> bool {
    if EXCLUDED_PATH_MARKERS
        .iter()
        .any(|marker| path.contains(marker))
    {
        return false;
    }

    RELEVANT_EXTENSIONS.contains(&extension_key(path))
}

// Computes the extension key for a path
//
// "src/app.py"     -> ".py"
// "a/b.c.tar"      -> ".tar"   (last dot wins)
// "a/b/Dockerfile" -> "Dockerfile" (no dot: bare file name)
// "a/.env.example" -> ".example"  (the leading dot counts like any other)
fn extension_key(path: &str) -> &str {
    let file_name = path.rsplit('/').next().unwrap_or(path);

    match file_name.rfind('.') {
        Some(idx) => &file_name[idx..],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds a blob entry with a throwaway sha
    fn blob(path: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: EntryKind::Blob,
            sha: format!("sha-{path}"),
        }
    }

    fn tree(path: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: EntryKind::Tree,
            sha: format!("sha-{path}"),
        }
    }

    #[test]
    fn test_selection_keeps_relevant_blobs_in_order() {
        let entries = vec![
            blob("src/a.py"),
            blob("node_modules/x.js"),
            blob("dist/y.js"),
            blob("README.md"),
            blob("LICENSE"),
            blob("Dockerfile"),
        ];

        let selected = select_relevant_files(entries);
        let paths: Vec<&str> = selected.iter().map(|e| e.path.as_str()).collect();

        // LICENSE has no dot and is not an exact allow-listed name, so it's out
        assert_eq!(paths, vec!["src/a.py", "README.md", "Dockerfile"]);
    }

    #[test]
    fn test_directories_are_never_selected() {
        let entries = vec![tree("src"), blob("src/main.py"), tree("docs.md")];
        let selected = select_relevant_files(entries);
        let paths: Vec<&str> = selected.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["src/main.py"]);
    }

    #[test]
    fn test_selection_caps_at_one_hundred() {
        let entries: Vec<TreeEntry> = (0..150).map(|i| blob(&format!("file_{i}.py"))).collect();

        let selected = select_relevant_files(entries);

        assert_eq!(selected.len(), MAX_SELECTED_FILES);
        // The first 100 in original order, not an arbitrary 100
        assert_eq!(selected[0].path, "file_0.py");
        assert_eq!(selected[99].path, "file_99.py");
    }

    #[test]
    fn test_exclusion_matches_anywhere_in_path() {
        // "dist" appears inside "distance", which is enough to exclude it
        assert!(!is_relevant_path("src/distance/util.py"));
        assert!(!is_relevant_path("frontend/build/index.html"));
        assert!(!is_relevant_path("node_modules/react/index.js"));
    }

    #[test]
    fn test_extension_key_variants() {
        assert_eq!(extension_key("src/app.py"), ".py");
        assert_eq!(extension_key("a/b.c.tar"), ".tar");
        assert_eq!(extension_key("a/b/Dockerfile"), "Dockerfile");
        assert_eq!(extension_key("LICENSE"), "LICENSE");
        assert_eq!(extension_key(".gitignore"), ".gitignore");
    }

    #[test]
    fn test_env_example_never_matches() {
        // The allow-list contains ".env.example" but the key for such a file
        // is ".example", so it can never match. Pinned, not fixed.
        assert_eq!(extension_key("config/.env.example"), ".example");
        assert!(!is_relevant_path("config/.env.example"));
    }

    #[test]
    fn test_exact_filename_match() {
        assert!(is_relevant_path("Dockerfile"));
        assert!(is_relevant_path("services/api/Dockerfile"));
        assert!(!is_relevant_path("LICENSE"));
    }
}
