// src/error.rs
// =============================================================================
// This file defines the error types for the fetch pipeline.
//
// Two layers:
// - StageError: one named variant per thing that can go wrong inside the
//   pipeline (bad URL, branch lookup failed, no relevant files, ...)
// - HarvestError: the single error the caller sees. Every stage failure is
//   wrapped into this uniform envelope exactly once, at the pipeline
//   boundary, so callers never need to know about individual stages.
//
// We use the `thiserror` crate which generates Display and std::error::Error
// implementations from the #[error("...")] attributes.
//
// Rust concepts:
// - Enums with data: Each variant can carry its own fields
// - Derive macros: thiserror writes the boilerplate for us
// - Option<T>: The upstream HTTP status is only sometimes known
// =============================================================================

use thiserror::Error;

// Errors raised by individual pipeline stages.
//
// The HTTP-backed variants carry the upstream status code when one was
// observed (a non-success response) and None when the request failed before
// a status existed (connection refused, DNS failure, etc.)
#[derive(Debug, Error)]
pub enum StageError {
    /// The input string did not contain a recognizable owner/repo pair
    #[error("Invalid GitHub URL format. Use https://github.com/owner/repo")]
    InvalidUrl,

    /// Repository metadata lookup failed or had no default branch field
    #[error("Unable to detect default branch for this repository: {message}")]
    BranchResolution {
        status: Option<u16>,
        message: String,
    },

    /// Branch metadata was missing the nested commit tree SHA
    #[error("Unable to retrieve tree SHA for default branch: {message}")]
    TreeShaResolution {
        status: Option<u16>,
        message: String,
    },

    /// The recursive tree response had no tree collection
    #[error("Invalid tree response from GitHub API: {message}")]
    TreeFetch {
        status: Option<u16>,
        message: String,
    },

    /// The relevance filter matched zero files - nothing to process
    #[error("No relevant code or text files found in this repository")]
    NoRelevantFiles,

    /// One of the parallel raw-content fetches failed
    #[error("Failed to fetch {path}: {message}")]
    ContentFetch {
        path: String,
        status: Option<u16>,
        message: String,
    },
}

impl StageError {
    // Returns the upstream HTTP status code, if this failure had one
    //
    // Used when building the caller-facing envelope so the status can be
    // surfaced in the final message.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidUrl | Self::NoRelevantFiles => None,
            Self::BranchResolution { status, .. }
            | Self::TreeShaResolution { status, .. }
            | Self::TreeFetch { status, .. }
            | Self::ContentFetch { status, .. } => *status,
        }
    }
}

// Formats the optional status code for the envelope message
//
// Some(404) -> "404 " (with trailing space), None -> ""
// This mirrors how the status slot collapses to nothing when unknown.
fn status_fragment(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("{code} "),
        None => String::new(),
    }
}

// The uniform failure envelope returned by the pipeline.
//
// Carries a fixed prefix, the upstream HTTP status when known, and the
// original stage message. Stage names are never exposed - only this one
// shape reaches the caller.
#[derive(Debug, Error)]
#[error("Failed to fetch repository content: {}{message}", status_fragment(.status))]
pub struct HarvestError {
    /// Upstream HTTP status code, if one was observed
    pub status: Option<u16>,
    /// The original failure message from whichever stage failed
    pub message: String,
}

impl From<StageError> for HarvestError {
    fn from(err: StageError) -> Self {
        HarvestError {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two error types?
//    - StageError tells US what broke (useful in code and tests)
//    - HarvestError tells the CALLER that the fetch failed, with one stable
//      message shape - callers should not have to match on pipeline internals
//
// 2. What does thiserror generate?
//    - impl Display using the #[error("...")] format strings
//    - impl std::error::Error, so the types work with anyhow and ?
//
// 3. What is From for?
//    - From<StageError> for HarvestError is the single wrapping point
//    - Conversion logic in one place means no stage can invent its own
//      envelope format
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_includes_status_when_known() {
        let err = HarvestError::from(StageError::BranchResolution {
            status: Some(403),
            message: "GitHub API returned HTTP 403 Forbidden".to_string(),
        });
        let rendered = err.to_string();
        assert!(rendered.starts_with("Failed to fetch repository content: 403 "));
        assert!(rendered.contains("Unable to detect default branch"));
    }

    #[test]
    fn test_envelope_omits_status_when_unknown() {
        let err = HarvestError::from(StageError::NoRelevantFiles);
        assert_eq!(
            err.to_string(),
            "Failed to fetch repository content: No relevant code or text files found in this repository"
        );
    }

    #[test]
    fn test_content_fetch_status_carried_through() {
        let err = HarvestError::from(StageError::ContentFetch {
            path: "src/app.py".to_string(),
            status: Some(404),
            message: "HTTP 404 Not Found".to_string(),
        });
        assert_eq!(err.status, Some(404));
        assert!(err.to_string().contains("src/app.py"));
    }
}
