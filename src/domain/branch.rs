use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AppError, AppResult};

lazy_static! {
    /// Branches created by automated dependency-update bots.
    static ref BOT_BRANCH_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^dependabot/").unwrap(),
        Regex::new(r"^renovate/").unwrap(),
        Regex::new(r"^greenkeeper/").unwrap(),
        Regex::new(r"^all-contributors/").unwrap(),
    ];
    /// Mainline and release-target branches that never carry ticket keys.
    static ref DEFAULT_BRANCH_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^master$").unwrap(),
        Regex::new(r"^main$").unwrap(),
        Regex::new(r"^develop$").unwrap(),
        Regex::new(r"^production$").unwrap(),
        Regex::new(r"^gh-pages$").unwrap(),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    BotBranch,
    DefaultBranch,
    IgnorePattern(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BotBranch => write!(f, "branch looks bot-authored"),
            SkipReason::DefaultBranch => write!(f, "branch is a default/protected branch"),
            SkipReason::IgnorePattern(pattern) => {
                write!(f, "branch matches skip-branches pattern '{pattern}'")
            }
        }
    }
}

/// Decides whether `branch` is exempt from processing, checking bot branches
/// first, then default branches, then the caller-supplied pattern. An empty
/// `ignore_pattern` never matches; a malformed one is a hard error rather
/// than being silently ignored.
pub fn skip_reason(branch: &str, ignore_pattern: &str) -> AppResult<Option<SkipReason>> {
    if BOT_BRANCH_PATTERNS.iter().any(|p| p.is_match(branch)) {
        return Ok(Some(SkipReason::BotBranch));
    }

    if DEFAULT_BRANCH_PATTERNS.iter().any(|p| p.is_match(branch)) {
        return Ok(Some(SkipReason::DefaultBranch));
    }

    if !ignore_pattern.is_empty() {
        let pattern =
            Regex::new(ignore_pattern).map_err(|source| AppError::InvalidIgnorePattern {
                pattern: ignore_pattern.to_string(),
                source,
            })?;
        if pattern.is_match(branch) {
            return Ok(Some(SkipReason::IgnorePattern(ignore_pattern.to_string())));
        }
    }

    Ok(None)
}

pub fn should_skip(branch: &str, ignore_pattern: &str) -> AppResult<bool> {
    Ok(skip_reason(branch, ignore_pattern)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_bot_branches() {
        assert!(should_skip("dependabot/npm_and_yarn/types/react-dom-16.9.6", "").unwrap());
        assert!(should_skip("renovate/tokio-1.x", "").unwrap());
        assert!(!should_skip("feature/add-dependabot-config", "").unwrap());
    }

    #[test]
    fn bot_branches_skip_regardless_of_ignore_pattern() {
        assert!(should_skip("dependabot/cargo/serde-1.0", "^never-matches$").unwrap());
    }

    #[test]
    fn recognizes_default_branches() {
        assert!(should_skip("master", "").unwrap());
        assert!(should_skip("main", "").unwrap());
        assert!(!should_skip("mainline", "").unwrap());
    }

    #[test]
    fn handles_custom_ignore_patterns() {
        assert!(should_skip("bar", "^bar").unwrap());
        assert!(!should_skip("foobar", "^bar").unwrap());

        assert!(!should_skip("bar", "[0-9]{2}").unwrap());
        assert!(!should_skip("bar", "").unwrap());
        assert!(should_skip("f00", "[0-9]{2}").unwrap());

        let release_pattern = r"^(production-release|master|release/v\d+)$";
        assert!(should_skip("production-release", release_pattern).unwrap());
        assert!(should_skip("master", release_pattern).unwrap());
        assert!(should_skip("release/v77", release_pattern).unwrap());
        assert!(!should_skip("release/very-important-feature", release_pattern).unwrap());

        assert!(!should_skip("", "").unwrap());
    }

    #[test]
    fn surfaces_malformed_ignore_patterns() {
        let err = should_skip("anything", "[unclosed").unwrap_err();
        assert!(matches!(err, AppError::InvalidIgnorePattern { .. }));
    }

    #[test]
    fn reports_the_matching_rule() {
        assert_eq!(
            skip_reason("dependabot/pip/requests-2.0", "").unwrap(),
            Some(SkipReason::BotBranch)
        );
        assert_eq!(
            skip_reason("main", "").unwrap(),
            Some(SkipReason::DefaultBranch)
        );
        assert_eq!(
            skip_reason("hotfix-1", "^hotfix").unwrap(),
            Some(SkipReason::IgnorePattern("^hotfix".to_string()))
        );
        assert_eq!(skip_reason("feature/es-1", "").unwrap(), None);
    }
}
