//! `text/uri-list` parsing.

use crate::{RelayError, RelayResult};

/// Media type the negotiation endpoint must declare.
pub const URI_LIST_CONTENT_TYPE: &str = "text/uri-list";

/// Candidate URIs in server order. Lines are CRLF-delimited; lines starting
/// with `#` are comments and blank lines carry no candidate.
pub fn candidates(body: &str) -> impl Iterator<Item = &str> {
    body.split("\r\n")
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// The first candidate, or [`RelayError::EmptyCandidateList`].
pub fn first_candidate(body: &str) -> RelayResult<&str> {
    candidates(body).next().ok_or(RelayError::EmptyCandidateList)
}
