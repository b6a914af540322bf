// src/github/fetch.rs
// =============================================================================
// This module is the pipeline orchestrator. It wires the stages together:
//
//   URL -> (owner, repo) -> default branch -> tree SHA -> tree entries
//       -> relevant selection -> file contents
//
// Each stage needs the previous stage's output, so stages run strictly in
// order; only the final content stage fans out into parallel requests.
//
// Error policy:
// - A bad URL fails here, before any network call, and reaches the caller
//   as-is
// - Every later failure is wrapped exactly once into the uniform
//   HarvestError envelope (fixed prefix + HTTP status when known + original
//   message), so callers see one error shape regardless of which stage broke
// - All-or-nothing: there is no partial success, and nothing is retried
//
// Rust concepts:
// - async orchestration: awaiting stages in sequence
// - ? operator: Each stage failure propagates without boilerplate
// - map_err: Converting the typed stage errors into the caller-facing one
// =============================================================================

use anyhow::Result;
use reqwest::Client;

use crate::error::{HarvestError, StageError};
use crate::filter::select_relevant_files;
use crate::github::api::{self, TreeEntry};
use crate::github::content::{fetch_contents, ContentRecord};
use crate::github::url::{parse_repo_url, RepoRef};

// Fetches the relevant text files of a GitHub repository
//
// This is the main entry point of the pipeline.
//
// Parameters:
//   repo_url: GitHub repository URL (e.g., "https://github.com/rust-lang/rust")
//
// Returns: Result<Vec<ContentRecord>>
//   Success: one record per selected file, in tree order (at most 100)
//   Error: invalid URL, any failed lookup, or a repository with no relevant
//          files - never a partial list
pub async fn fetch_repo_documents(repo_url: &str) -> Result<Vec<ContentRecord>> {
    println!("🔎 Fetching repo: {}", repo_url);

    // Parse the URL to extract owner and repo name.
    // An invalid URL is the caller's mistake, not an upstream failure, so it
    // is not wrapped into the envelope.
    let repo = parse_repo_url(repo_url)?;

    let client = build_client()?;

    let (branch, files) = resolve_selection(&client, &repo)
        .await
        .map_err(HarvestError::from)?;

    let records = fetch_contents(&client, &repo, &branch, &files)
        .await
        .map_err(HarvestError::from)?;

    Ok(records)
}

// Lists which files the pipeline would fetch, without downloading contents
//
// Runs everything up to and including the relevance filter, then stops.
// Issues three metadata requests and zero raw-content requests.
pub async fn list_relevant_paths(repo_url: &str) -> Result<Vec<String>> {
    println!("🔎 Inspecting repo: {}", repo_url);

    let repo = parse_repo_url(repo_url)?;

    let client = build_client()?;

    let (_, files) = resolve_selection(&client, &repo)
        .await
        .map_err(HarvestError::from)?;

    Ok(files.into_iter().map(|entry| entry.path).collect())
}

// Runs stages 2-4: branch resolution, tree resolution, relevance filtering
//
// Returns the branch name alongside the selection because the content stage
// needs both. Fails with NoRelevantFiles instead of returning an empty
// selection - an empty result list is never a success.
async fn resolve_selection(
    client: &Client,
    repo: &RepoRef,
) -> Result<(String, Vec<TreeEntry>), StageError> {
    let branch = api::resolve_default_branch(client, repo).await?;
    println!("🌿 Detected default branch: {}", branch);

    let tree_sha = api::resolve_tree_sha(client, repo, &branch).await?;
    let entries = api::fetch_tree(client, repo, &tree_sha).await?;

    let files = select_relevant_files(entries);
    if files.is_empty() {
        return Err(StageError::NoRelevantFiles);
    }

    println!("📄 Selected {} relevant file(s)", files.len());

    Ok((branch, files))
}

// Builds the HTTP client shared by every request in one invocation
//
// GitHub rejects requests without a User-Agent, so we always send ours.
fn build_client() -> Result<Client> {
    let client = Client::builder().user_agent(api::USER_AGENT).build()?;
    Ok(client)
}
