// src/github/mod.rs
// =============================================================================
// This module handles everything GitHub-specific.
//
// Submodules:
// - url:     Parsing repository URLs into (owner, repo)
// - api:     The GitHub REST lookups (default branch, tree SHA, file tree)
// - content: Downloading raw file contents in parallel
// - fetch:   The orchestrator that runs the whole pipeline in order
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
pub mod api;
pub mod content;
pub mod fetch;
pub mod url;

// Re-export public items from submodules
// This lets users write `github::fetch_repo_documents()` instead of
// `github::fetch::fetch_repo_documents()`
pub use api::{EntryKind, TreeEntry};
pub use content::{ContentRecord, RecordMetadata};
pub use fetch::{fetch_repo_documents, list_relevant_paths};
pub use url::{parse_repo_url, RepoRef};
