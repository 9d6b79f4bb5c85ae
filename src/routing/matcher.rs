//! Path extraction.
//!
//! Request targets and rule source URLs go through the same URL parser, so
//! percent-encoding and dot segments are normalized identically on both sides.

use thiserror::Error;
use url::Url;

/// Origin prepended to origin-form request targets.
const REQUEST_ORIGIN: &str = "http://localhost";

#[derive(Debug, Error)]
#[error("cannot extract path from {input:?}: {source}")]
pub struct PathParseError {
    input: String,
    source: url::ParseError,
}

/// Path of a request target such as `/one?x=1`.
///
/// Absolute-form targets (`http://host/one`) are accepted too; their host is
/// ignored. An origin-form target is appended to a fixed origin rather than
/// resolved against it, so `//a/b` stays the path `//a/b`.
pub fn request_path(target: &str) -> Result<String, PathParseError> {
    let parsed = if target.starts_with('/') {
        Url::parse(&format!("{REQUEST_ORIGIN}{target}"))
    } else {
        Url::parse(target)
    };

    parsed
        .map(|url| url.path().to_string())
        .map_err(|source| PathParseError {
            input: target.to_string(),
            source,
        })
}

/// Path of an absolute rule URL such as `https://h/one`.
pub fn rule_path(source_url: &str) -> Result<String, PathParseError> {
    Url::parse(source_url)
        .map(|url| url.path().to_string())
        .map_err(|source| PathParseError {
            input: source_url.to_string(),
            source,
        })
}
