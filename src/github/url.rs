// src/github/url.rs
// =============================================================================
// This module parses GitHub repository URLs.
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo
//   - https://github.com/owner/repo/tree/main/src (extra segments ignored)
//
// Only the first two path segments after github.com matter - everything
// after them (deeper paths, ?query, #fragment) is ignored.
//
// This is pure string parsing: no network access happens here, so a bad URL
// fails before we ever talk to GitHub.
//
// Rust concepts:
// - String slicing: Working with &str without allocating
// - Pattern matching: split() and find() for structured extraction
// =============================================================================

use crate::error::StageError;

// A repository reference: who owns it and what it's called
//
// Derived once from the input URL and handed to every later stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// The account or organization that owns the repository
    pub owner: String,
    /// The repository name
    pub name: String,
}

// Parses a GitHub URL to extract owner and repository name
//
// Parameters:
//   url: the repository URL string
//
// Returns: RepoRef on success, StageError::InvalidUrl if the string does not
//          contain a recognizable github.com/owner/repo triple
//
// Example:
//   "https://github.com/rust-lang/rust" -> RepoRef { owner: "rust-lang", name: "rust" }
pub fn parse_repo_url(url: &str) -> Result<RepoRef, StageError> {
    // Remove common prefixes
    let url = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    // Should start with github.com/
    if !url.starts_with("github.com/") {
        return Err(StageError::InvalidUrl);
    }

    // Remove "github.com/" prefix, then drop any query string or fragment
    // so "repo?tab=readme" doesn't leak into the repository name
    let path = url.trim_start_matches("github.com/");
    let path = match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    };

    // Split by '/' to get owner and repo
    let mut segments = path.split('/');
    let owner = segments.next().unwrap_or("");
    let name = segments.next().unwrap_or("");

    if owner.is_empty() || name.is_empty() {
        return Err(StageError::InvalidUrl);
    }

    // Remove .git suffix if present
    let name = name.trim_end_matches(".git");
    if name.is_empty() {
        return Err(StageError::InvalidUrl);
    }

    Ok(RepoRef {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let repo = parse_repo_url("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let repo = parse_repo_url("https://github.com/user/repo.git").unwrap();
        assert_eq!(repo.owner, "user");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_parse_bare_host() {
        let repo = parse_repo_url("github.com/user/repo").unwrap();
        assert_eq!(repo.owner, "user");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_extra_path_segments_ignored() {
        let repo = parse_repo_url("https://github.com/user/repo/tree/main/src").unwrap();
        assert_eq!(repo.owner, "user");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let repo = parse_repo_url("https://github.com/user/repo?tab=readme#section").unwrap();
        assert_eq!(repo.owner, "user");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_parse_invalid_host() {
        let result = parse_repo_url("https://gitlab.com/user/repo");
        assert!(matches!(result, Err(StageError::InvalidUrl)));
    }

    #[test]
    fn test_parse_missing_repo() {
        let result = parse_repo_url("https://github.com/user");
        assert!(matches!(result, Err(StageError::InvalidUrl)));
    }

    #[test]
    fn test_parse_empty_segments() {
        let result = parse_repo_url("https://github.com//repo");
        assert!(matches!(result, Err(StageError::InvalidUrl)));
    }

    #[test]
    fn test_parse_not_a_url() {
        let result = parse_repo_url("just some text");
        assert!(matches!(result, Err(StageError::InvalidUrl)));
    }
}
