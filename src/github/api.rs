// src/github/api.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Three lookups, always in this order:
// 1. Repository metadata -> which branch is the default one
// 2. Branch metadata     -> the tree SHA of that branch's head commit
// 3. Recursive tree      -> every file path in the repository
//
// GitHub responds with loosely-shaped JSON, so every nested field we read is
// modeled as an Option. A missing field becomes a named error instead of a
// panic somewhere inside a deserializer.
//
// All requests are unauthenticated, which keeps us under GitHub's anonymous
// rate limits - fine for fetching a repository now and then, not for bulk use.
//
// Rust concepts:
// - serde Deserialize: Mapping JSON onto typed structs
// - Option chaining: and_then() walks nested maybe-missing fields
// - Generics: One get_json helper for all three response shapes
// =============================================================================

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::StageError;
use crate::github::url::RepoRef;

/// Base URL for the GitHub REST API
pub const API_BASE: &str = "https://api.github.com";

/// User-Agent sent with every request - GitHub rejects requests without one
pub const USER_AGENT: &str = concat!("repo-harvester/", env!("CARGO_PKG_VERSION"));

// --- Response shapes -------------------------------------------------------
// Every field we actually read is Optional, because the API owes us nothing.
// Fields we don't read are simply not declared; serde skips them.

/// Repository metadata from GET /repos/{owner}/{repo}
#[derive(Debug, Deserialize)]
pub struct RepoInfo {
    /// The branch the repository designates as primary
    pub default_branch: Option<String>,
}

/// Branch metadata from GET /repos/{owner}/{repo}/branches/{branch}
#[derive(Debug, Deserialize)]
pub struct BranchInfo {
    pub commit: Option<BranchCommit>,
}

/// The branch's head commit (outer wrapper)
#[derive(Debug, Deserialize)]
pub struct BranchCommit {
    /// The git commit object nested inside the API commit object
    pub commit: Option<CommitDetail>,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub tree: Option<TreeRef>,
}

/// Pointer to the tree snapshot a commit is built from
#[derive(Debug, Deserialize)]
pub struct TreeRef {
    pub sha: Option<String>,
}

/// Recursive tree from GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1
#[derive(Debug, Deserialize)]
pub struct TreeResponse {
    /// All entries, transitively - files and directories mixed together
    pub tree: Option<Vec<TreeEntry>>,
}

// One node in the repository's file tree, as reported by GitHub
//
// We keep the API's own ordering; nothing downstream re-sorts these.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the repository root, e.g. "src/main.py"
    pub path: String,
    /// Whether this entry is a file, a directory, or something else
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Content-addressed identifier for this entry
    pub sha: String,
}

// The kind of a tree entry
//
// GitHub also reports "commit" for submodules; anything we don't recognize
// lands in Other instead of failing the whole deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EntryKind {
    /// A file
    Blob,
    /// A directory
    Tree,
    /// Anything else (submodules, future entry types)
    Other,
}

impl From<String> for EntryKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "blob" => Self::Blob,
            "tree" => Self::Tree,
            _ => Self::Other,
        }
    }
}

// --- Lookups ---------------------------------------------------------------

// Resolves the default branch name for a repository
//
// One GET against the repository-info endpoint. Fails with BranchResolution
// if the request fails or the response has no default_branch field.
pub async fn resolve_default_branch(client: &Client, repo: &RepoRef) -> Result<String, StageError> {
    let url = format!("{API_BASE}/repos/{}/{}", repo.owner, repo.name);

    let info: RepoInfo =
        get_json(client, &url)
            .await
            .map_err(|failure| StageError::BranchResolution {
                status: failure.status,
                message: failure.message,
            })?;

    info.default_branch
        .ok_or_else(|| StageError::BranchResolution {
            status: None,
            message: "no default_branch field in repository metadata".to_string(),
        })
}

// Resolves the tree SHA for a branch's head commit
//
// One GET against the branch-info endpoint, then a walk down the nested
// commit -> commit -> tree -> sha fields. Any missing link in that chain
// fails with TreeShaResolution.
pub async fn resolve_tree_sha(
    client: &Client,
    repo: &RepoRef,
    branch: &str,
) -> Result<String, StageError> {
    let url = format!("{API_BASE}/repos/{}/{}/branches/{branch}", repo.owner, repo.name);

    let info: BranchInfo =
        get_json(client, &url)
            .await
            .map_err(|failure| StageError::TreeShaResolution {
                status: failure.status,
                message: failure.message,
            })?;

    info.commit
        .and_then(|branch_commit| branch_commit.commit)
        .and_then(|detail| detail.tree)
        .and_then(|tree| tree.sha)
        .ok_or_else(|| StageError::TreeShaResolution {
            status: None,
            message: "no commit tree SHA in branch metadata".to_string(),
        })
}

// Fetches the full recursive file tree for a tree SHA
//
// One GET with recursive=1, so a single call returns every entry in the
// repository. Fails with TreeFetch if the response has no tree collection.
pub async fn fetch_tree(
    client: &Client,
    repo: &RepoRef,
    tree_sha: &str,
) -> Result<Vec<TreeEntry>, StageError> {
    let url = format!(
        "{API_BASE}/repos/{}/{}/git/trees/{tree_sha}?recursive=1",
        repo.owner, repo.name
    );

    let response: TreeResponse =
        get_json(client, &url)
            .await
            .map_err(|failure| StageError::TreeFetch {
                status: failure.status,
                message: failure.message,
            })?;

    response.tree.ok_or_else(|| StageError::TreeFetch {
        status: None,
        message: "no tree collection in response".to_string(),
    })
}

// --- Shared plumbing -------------------------------------------------------

// What went wrong with an API request, before we know which stage it was for
//
// Each lookup maps this into its own StageError variant, so the taxonomy
// stays with the stages while the HTTP handling lives here once.
struct ApiFailure {
    status: Option<u16>,
    message: String,
}

impl From<reqwest::Error> for ApiFailure {
    fn from(err: reqwest::Error) -> Self {
        ApiFailure {
            status: err.status().map(|code| code.as_u16()),
            message: err.to_string(),
        }
    }
}

// GETs a URL and deserializes the JSON body into T
//
// Non-success status codes become failures carrying the status, before any
// attempt to read the body as JSON.
async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, ApiFailure> {
    let response = client.get(url).send().await.map_err(ApiFailure::from)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiFailure {
            status: Some(status.as_u16()),
            message: format!("GitHub API returned HTTP {status} for {url}"),
        });
    }

    response.json::<T>().await.map_err(ApiFailure::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_info_with_default_branch() {
        let info: RepoInfo =
            serde_json::from_str(r#"{"name": "rust", "default_branch": "master", "fork": false}"#)
                .unwrap();
        assert_eq!(info.default_branch.as_deref(), Some("master"));
    }

    #[test]
    fn test_repo_info_missing_default_branch() {
        let info: RepoInfo = serde_json::from_str(r#"{"name": "rust"}"#).unwrap();
        assert!(info.default_branch.is_none());
    }

    #[test]
    fn test_branch_info_nested_tree_sha() {
        let json = r#"{
            "name": "main",
            "commit": {
                "sha": "abc123",
                "commit": {
                    "message": "initial commit",
                    "tree": { "sha": "deadbeef", "url": "https://example" }
                }
            }
        }"#;
        let info: BranchInfo = serde_json::from_str(json).unwrap();
        let sha = info
            .commit
            .and_then(|c| c.commit)
            .and_then(|c| c.tree)
            .and_then(|t| t.sha);
        assert_eq!(sha.as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_branch_info_missing_tree() {
        let json = r#"{"name": "main", "commit": {"sha": "abc123", "commit": {"message": "hi"}}}"#;
        let info: BranchInfo = serde_json::from_str(json).unwrap();
        let sha = info
            .commit
            .and_then(|c| c.commit)
            .and_then(|c| c.tree)
            .and_then(|t| t.sha);
        assert!(sha.is_none());
    }

    #[test]
    fn test_tree_response_entries() {
        let json = r#"{
            "sha": "deadbeef",
            "tree": [
                {"path": "README.md", "type": "blob", "sha": "a1"},
                {"path": "src", "type": "tree", "sha": "b2"},
                {"path": "vendor/lib", "type": "commit", "sha": "c3"}
            ],
            "truncated": false
        }"#;
        let response: TreeResponse = serde_json::from_str(json).unwrap();
        let entries = response.tree.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, EntryKind::Blob);
        assert_eq!(entries[1].kind, EntryKind::Tree);
        // Unknown type strings map to Other instead of failing
        assert_eq!(entries[2].kind, EntryKind::Other);
    }

    #[test]
    fn test_tree_response_missing_tree() {
        let response: TreeResponse = serde_json::from_str(r#"{"sha": "deadbeef"}"#).unwrap();
        assert!(response.tree.is_none());
    }
}
