// src/github/content.rs
// =============================================================================
// This module downloads the raw contents of the selected files.
//
// Strategy:
// - Build one raw.githubusercontent.com URL per selected file
// - Fire all requests at once (no concurrency cap - the selection is already
//   capped at 100 files upstream, so this stays bounded)
// - Join fail-fast: the first failed fetch aborts the whole batch, and no
//   partial result ever escapes. Success means every file, failure means none.
//
// Why raw.githubusercontent.com?
// - It serves the file body directly, no JSON envelope to unwrap
// - No authentication needed for public repositories
//
// Rust concepts:
// - async move blocks: Each fetch future owns its own URL and client handle
// - try_join_all: Await many futures, short-circuiting on the first error
// - Ownership: Results are returned by value; the caller owns the list
// =============================================================================

use futures::future;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::StageError;
use crate::github::api::TreeEntry;
use crate::github::url::RepoRef;

/// Base URL for raw file contents
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

// One fetched file, paired with where it came from
//
// This is the unit handed to downstream consumers (indexers, embedders).
// The JSON field names are part of that contract: "pageContent" and
// "metadata.source", exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// The raw file text
    #[serde(rename = "pageContent")]
    pub page_content: String,
    /// Where the text came from
    pub metadata: RecordMetadata,
}

/// Source metadata for a fetched file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// The file's path inside the repository, exactly as the tree reported it
    pub source: String,
}

// Fetches the contents of every selected file, in parallel
//
// Parameters:
//   client: shared HTTP client (cloned into each fetch task)
//   repo:   the repository being fetched
//   branch: the branch the tree was resolved from
//   files:  the filtered selection, at most 100 entries
//
// Returns: one ContentRecord per file, in the same order as `files`, or the
//          first ContentFetch error if any single download fails
pub async fn fetch_contents(
    client: &Client,
    repo: &RepoRef,
    branch: &str,
    files: &[TreeEntry],
) -> Result<Vec<ContentRecord>, StageError> {
    let fetches = files.iter().map(|entry| {
        let client = client.clone();
        let url = format!(
            "{RAW_CONTENT_BASE}/{}/{}/{branch}/{}",
            repo.owner, repo.name, entry.path
        );
        let path = entry.path.clone();

        async move { fetch_one(client, url, path).await }
    });

    // All at once, first rejection wins - like Promise.all.
    // try_join_all preserves input order in the output Vec.
    future::try_join_all(fetches).await
}

// Fetches a single file and wraps it into a ContentRecord
async fn fetch_one(client: Client, url: String, path: String) -> Result<ContentRecord, StageError> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|err| StageError::ContentFetch {
            path: path.clone(),
            status: err.status().map(|code| code.as_u16()),
            message: err.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StageError::ContentFetch {
            path,
            status: Some(status.as_u16()),
            message: format!("HTTP {status}"),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|err| StageError::ContentFetch {
            path: path.clone(),
            status: err.status().map(|code| code.as_u16()),
            message: err.to_string(),
        })?;

    Ok(ContentRecord {
        page_content: text,
        metadata: RecordMetadata { source: path },
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is try_join_all?
//    - Takes many futures and awaits them all concurrently
//    - Like JavaScript's Promise.all: one Err cancels the wait and becomes
//      the result; on success you get a Vec in the original order
//    - Compare buffer_unordered(N), which caps concurrency and yields results
//      as they finish - we deliberately want the all-or-nothing version here
//
// 2. Why clone the client?
//    - Each async task needs its own handle to the client
//    - Client is cheap to clone (it's just a reference counter internally)
//    - This is a common pattern in async Rust
//
// 3. What is async move?
//    - An async block that takes ownership of the variables it uses
//    - Each fetch future owns its url and path, so the futures don't borrow
//      from the loop that created them
//
// 4. What is #[serde(rename = "...")]?
//    - Our Rust field is snake_case (page_content) but the JSON contract
//      says "pageContent", so serde translates between the two
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let record = ContentRecord {
            page_content: "fn main() {}".to_string(),
            metadata: RecordMetadata {
                source: "src/main.rs".to_string(),
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "pageContent": "fn main() {}",
                "metadata": { "source": "src/main.rs" }
            })
        );
    }

    #[test]
    fn test_source_path_is_verbatim() {
        // No normalization, no casing change - the path goes through untouched
        let path = "Docs/Read-Me.MD";
        let record = ContentRecord {
            page_content: String::new(),
            metadata: RecordMetadata {
                source: path.to_string(),
            },
        };
        assert_eq!(record.metadata.source, path);
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let json = r#"{"pageContent": "print('hi')", "metadata": {"source": "app.py"}}"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.page_content, "print('hi')");
        assert_eq!(record.metadata.source, "app.py");
    }
}
