//! Redirect resolution.
//!
//! # Responsibilities
//! - Short-circuit when rules are unavailable
//! - Compare the request path against each rule's source path, in order
//! - Return the first match as a redirect, otherwise not-found
//!
//! # Design Decisions
//! - Rule URLs are re-parsed here even though loading validated them; a rule
//!   that fails is skipped, never fatal
//! - An unparseable request target resolves to NotFound

use axum::http::StatusCode;

use crate::routing::matcher::{request_path, rule_path};
use crate::rules::RuleSet;

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Redirect { status: StatusCode, location: String },
    NotFound,
    Unavailable,
}

impl Decision {
    /// Label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Decision::Redirect { .. } => "redirect",
            Decision::NotFound => "not_found",
            Decision::Unavailable => "unavailable",
        }
    }
}

/// Resolve a raw request target (path plus optional query) against `rules`.
pub fn resolve(target: &str, rules: &RuleSet) -> Decision {
    let Some(rules) = rules.rules() else {
        tracing::error!("No rule source found or failed to read rules");
        return Decision::Unavailable;
    };

    tracing::trace!(request_url = %target, "Raw request URL");

    let req_path = match request_path(target) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(request_url = %target, error = %e, "Unparseable request target");
            tracing::info!(path = %target, "No matching rule, returning 404");
            return Decision::NotFound;
        }
    };

    let matched = rules.iter().find(|rule| match rule_path(&rule.source_url) {
        Ok(rule_path) => {
            tracing::debug!(rule_path = %rule_path, req_path = %req_path, "Comparing paths");
            rule_path == req_path
        }
        Err(e) => {
            tracing::warn!(source_url = %rule.source_url, error = %e, "Skipping invalid rule URL");
            false
        }
    });

    match matched {
        Some(rule) => {
            tracing::info!(
                source_url = %rule.source_url,
                destination_url = %rule.destination_url,
                status_code = rule.status.as_u16(),
                "Rule matched, redirecting"
            );
            Decision::Redirect {
                status: rule.status,
                location: rule.destination_url.clone(),
            }
        }
        None => {
            tracing::info!(path = %target, "No matching rule, returning 404");
            Decision::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::capture_logs;
    use crate::rules::RedirectRule;

    fn rules(pairs: &[(&str, &str)]) -> RuleSet {
        pairs
            .iter()
            .map(|(src, dst)| RedirectRule::new(*src, *dst, None).unwrap())
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_matching_rule_redirects() {
        let rules = rules(&[("https://h/one", "https://target.com/new")]);

        let (decision, logs) = capture_logs(|| resolve("/one?x=1", &rules));

        assert_eq!(
            decision,
            Decision::Redirect {
                status: StatusCode::MOVED_PERMANENTLY,
                location: "https://target.com/new".to_string(),
            }
        );
        assert!(logs.contains("Raw request URL"));
        assert!(logs.contains("Comparing paths"));
        assert!(logs.contains("Rule matched, redirecting"));
        assert!(logs.contains("status_code=301"));
    }

    #[test]
    fn test_no_match_is_not_found() {
        let rules = rules(&[("https://h/old", "https://target.com/old")]);

        let (decision, logs) = capture_logs(|| resolve("/one", &rules));

        assert_eq!(decision, Decision::NotFound);
        assert!(logs.contains("No matching rule, returning 404"));
    }

    #[test]
    fn test_unavailable_short_circuits() {
        for target in ["/", "/one", "/one?x=1"] {
            let (decision, logs) = capture_logs(|| resolve(target, &RuleSet::Unavailable));
            assert_eq!(decision, Decision::Unavailable);
            assert!(!logs.contains("Comparing paths"));
        }
    }

    #[test]
    fn test_empty_rules_match_nothing() {
        assert_eq!(resolve("/one", &RuleSet::Available(Vec::new())), Decision::NotFound);
    }

    #[test]
    fn test_first_match_wins() {
        let rules = rules(&[
            ("https://h/a", "https://first.com/"),
            ("https://other/a", "https://second.com/"),
        ]);

        for _ in 0..3 {
            assert_eq!(
                resolve("/a", &rules),
                Decision::Redirect {
                    status: StatusCode::MOVED_PERMANENTLY,
                    location: "https://first.com/".to_string(),
                }
            );
        }
    }

    #[test]
    fn test_host_and_query_of_rule_are_ignored() {
        let rules = rules(&[("https://localhost:3000/one?utm=x", "https://target.com/new")]);

        assert!(matches!(resolve("/one", &rules), Decision::Redirect { .. }));
        assert!(matches!(resolve("/one#frag", &rules), Decision::Redirect { .. }));
        assert_eq!(resolve("/one/", &rules), Decision::NotFound);
        assert_eq!(resolve("/ONE", &rules), Decision::NotFound);
    }

    #[test]
    fn test_double_slash_target_is_not_a_host() {
        let plain = rules(&[("https://h/one", "https://target.com/one")]);
        assert_eq!(resolve("//evil.com/one", &plain), Decision::NotFound);

        let legacy = rules(&[("https://h//legacy/x", "https://target.com/x")]);
        assert_eq!(
            resolve("//legacy/x", &legacy),
            Decision::Redirect {
                status: StatusCode::MOVED_PERMANENTLY,
                location: "https://target.com/x".to_string(),
            }
        );
    }

    #[test]
    fn test_unparseable_rule_is_skipped() {
        // Bypasses load-time validation on purpose.
        let rules = RuleSet::Available(vec![
            RedirectRule {
                source_url: "garbage".to_string(),
                destination_url: "https://nowhere.com/".to_string(),
                status: StatusCode::MOVED_PERMANENTLY,
            },
            RedirectRule::new("https://h/a", "https://target.com/a", Some(StatusCode::FOUND)).unwrap(),
        ]);

        let (decision, logs) = capture_logs(|| resolve("/a", &rules));

        assert_eq!(
            decision,
            Decision::Redirect {
                status: StatusCode::FOUND,
                location: "https://target.com/a".to_string(),
            }
        );
        assert!(logs.contains("Skipping invalid rule URL"));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Decision::NotFound.outcome(), "not_found");
        assert_eq!(Decision::Unavailable.outcome(), "unavailable");
    }
}
