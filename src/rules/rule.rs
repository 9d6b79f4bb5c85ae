//! Redirect rule model and row validation.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use thiserror::Error;
use url::Url;

/// Column holding the URL whose path is matched against requests.
pub const SOURCE_URL_COLUMN: &str = "Source URL";
/// Column holding the redirect target.
pub const DESTINATION_URL_COLUMN: &str = "Destination URL";
/// Optional column holding the redirect status.
pub const STATUS_CODE_COLUMN: &str = "Status Code";

/// Status used when a row has no usable status code.
pub const DEFAULT_STATUS: StatusCode = StatusCode::MOVED_PERMANENTLY;

/// One untyped data row: column name → cell text.
pub type RawRow = BTreeMap<String, String>;

/// Why a row was rejected.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("invalid source URL {value:?}: {source}")]
    InvalidSourceUrl {
        value: String,
        source: url::ParseError,
    },

    #[error("invalid destination URL {value:?}: {source}")]
    InvalidDestinationUrl {
        value: String,
        source: url::ParseError,
    },

    #[error("status code {0:?} is not a number")]
    NonNumericStatus(String),

    #[error("status code {0} is not a redirect status")]
    NotARedirect(i64),
}

/// A validated redirect rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    /// Absolute URL; only its path takes part in matching.
    pub source_url: String,
    /// Absolute URL sent back verbatim as the `Location`.
    pub destination_url: String,
    /// Always a 3xx status.
    pub status: StatusCode,
}

impl RedirectRule {
    /// Build a rule, validating both URLs. `status` of `None` means 301.
    pub fn new(
        source_url: impl Into<String>,
        destination_url: impl Into<String>,
        status: Option<StatusCode>,
    ) -> Result<Self, RowError> {
        let source_url = source_url.into().trim().to_string();
        let destination_url = destination_url.into().trim().to_string();

        if let Err(source) = Url::parse(&source_url) {
            return Err(RowError::InvalidSourceUrl {
                value: source_url,
                source,
            });
        }
        if let Err(source) = Url::parse(&destination_url) {
            return Err(RowError::InvalidDestinationUrl {
                value: destination_url,
                source,
            });
        }

        Ok(Self {
            source_url,
            destination_url,
            status: status.unwrap_or(DEFAULT_STATUS),
        })
    }

    /// Coerce a raw row into a rule. Missing columns read as empty strings.
    ///
    /// URLs are checked before the status code.
    pub fn from_row(row: &RawRow) -> Result<Self, RowError> {
        let field = |name: &str| row.get(name).map(String::as_str).unwrap_or("");

        let rule = Self::new(field(SOURCE_URL_COLUMN), field(DESTINATION_URL_COLUMN), None)?;
        let status = parse_status(field(STATUS_CODE_COLUMN))?;
        Ok(Self {
            status: status.unwrap_or(DEFAULT_STATUS),
            ..rule
        })
    }
}

/// Empty or non-positive values fall back to the default.
fn parse_status(raw: &str) -> Result<Option<StatusCode>, RowError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let code = match raw.parse::<i64>() {
        Ok(code) => code,
        Err(_) => match raw.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
            _ => return Err(RowError::NonNumericStatus(raw.to_string())),
        },
    };

    if code <= 0 {
        return Ok(None);
    }

    u16::try_from(code)
        .ok()
        .and_then(|c| StatusCode::from_u16(c).ok())
        .filter(StatusCode::is_redirection)
        .map(Some)
        .ok_or(RowError::NotARedirect(code))
}

/// The rules available to one resolution attempt.
///
/// `Unavailable` is distinct from an empty rule list: an empty list is valid
/// and simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSet {
    Available(Vec<RedirectRule>),
    Unavailable,
}

impl RuleSet {
    pub fn rules(&self) -> Option<&[RedirectRule]> {
        match self {
            RuleSet::Available(rules) => Some(rules),
            RuleSet::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, RuleSet::Unavailable)
    }

    /// Number of rules; zero when unavailable.
    pub fn len(&self) -> usize {
        self.rules().map_or(0, <[RedirectRule]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<RedirectRule>> for RuleSet {
    fn from(rules: Vec<RedirectRule>) -> Self {
        RuleSet::Available(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_row_defaults_to_301() {
        let rule = RedirectRule::from_row(&row(&[
            (SOURCE_URL_COLUMN, "https://a.com/one"),
            (DESTINATION_URL_COLUMN, "https://b.com/one"),
        ]))
        .unwrap();

        assert_eq!(rule.source_url, "https://a.com/one");
        assert_eq!(rule.destination_url, "https://b.com/one");
        assert_eq!(rule.status, StatusCode::MOVED_PERMANENTLY);
    }

    #[test]
    fn test_explicit_status_code() {
        let rule = RedirectRule::from_row(&row(&[
            (SOURCE_URL_COLUMN, "https://a.com/one"),
            (DESTINATION_URL_COLUMN, "https://b.com/one"),
            (STATUS_CODE_COLUMN, "302"),
        ]))
        .unwrap();
        assert_eq!(rule.status, StatusCode::FOUND);

        let rule = RedirectRule::from_row(&row(&[
            (SOURCE_URL_COLUMN, "https://a.com/one"),
            (DESTINATION_URL_COLUMN, "https://b.com/one"),
            (STATUS_CODE_COLUMN, "308.0"),
        ]))
        .unwrap();
        assert_eq!(rule.status, StatusCode::PERMANENT_REDIRECT);
    }

    #[test]
    fn test_non_positive_status_falls_back() {
        for raw in ["0", "-5", " "] {
            let rule = RedirectRule::from_row(&row(&[
                (SOURCE_URL_COLUMN, "https://a.com/one"),
                (DESTINATION_URL_COLUMN, "https://b.com/one"),
                (STATUS_CODE_COLUMN, raw),
            ]))
            .unwrap();
            assert_eq!(rule.status, DEFAULT_STATUS, "status {raw:?}");
        }
    }

    #[test]
    fn test_rejects_non_redirect_status() {
        for raw in ["200", "404", "70000", "abc"] {
            let result = RedirectRule::from_row(&row(&[
                (SOURCE_URL_COLUMN, "https://a.com/one"),
                (DESTINATION_URL_COLUMN, "https://b.com/one"),
                (STATUS_CODE_COLUMN, raw),
            ]));
            assert!(result.is_err(), "status {raw:?} should be rejected");
        }
    }

    #[test]
    fn test_rejects_relative_urls() {
        let err = RedirectRule::from_row(&row(&[
            (SOURCE_URL_COLUMN, "not-a-url"),
            (DESTINATION_URL_COLUMN, "https://b.com/two"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RowError::InvalidSourceUrl { .. }));

        let err = RedirectRule::from_row(&row(&[
            (SOURCE_URL_COLUMN, "https://a.com/two"),
            (DESTINATION_URL_COLUMN, "/two"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RowError::InvalidDestinationUrl { .. }));
    }

    #[test]
    fn test_url_error_reported_before_status_error() {
        let err = RedirectRule::from_row(&row(&[
            (SOURCE_URL_COLUMN, "not-a-url"),
            (DESTINATION_URL_COLUMN, "https://b.com/two"),
            (STATUS_CODE_COLUMN, "abc"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RowError::InvalidSourceUrl { .. }));

        let err = RedirectRule::from_row(&row(&[
            (SOURCE_URL_COLUMN, "https://a.com/two"),
            (DESTINATION_URL_COLUMN, "/two"),
            (STATUS_CODE_COLUMN, "200"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RowError::InvalidDestinationUrl { .. }));
    }

    #[test]
    fn test_missing_columns_are_empty() {
        let err = RedirectRule::from_row(&RawRow::new()).unwrap_err();
        match err {
            RowError::InvalidSourceUrl { value, .. } => assert_eq!(value, ""),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unavailable_is_not_empty_rules() {
        let empty = RuleSet::from(Vec::new());
        assert!(!empty.is_unavailable());
        assert_eq!(empty.rules(), Some(&[][..]));

        assert!(RuleSet::Unavailable.is_unavailable());
        assert_eq!(RuleSet::Unavailable.rules(), None);
        assert_eq!(RuleSet::Unavailable.len(), 0);
    }
}
