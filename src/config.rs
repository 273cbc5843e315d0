use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(AppError::Configuration(format!(
                "repository must be of the form owner/name, got '{raw}'"
            ))),
        }
    }
}

/// Immutable run configuration, built once at startup and passed by
/// parameter. The reconciliation core never reads the environment itself.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jira_base_url: String,
    pub jira_token: String,
    pub encode_jira_token: bool,
    pub github_token: String,
    pub repository: RepoSlug,
    pub pr_number: u64,
    pub event_name: String,
    pub branch_ignore_pattern: String,
}

pub struct RawInputs {
    pub jira_base_url: String,
    pub jira_token: String,
    pub encode_jira_token: bool,
    pub github_token: String,
    pub repository: String,
    pub pr_number: u64,
    pub event_name: String,
    pub branch_ignore_pattern: String,
}

impl AppConfig {
    pub fn from_inputs(inputs: RawInputs) -> AppResult<Self> {
        if inputs.jira_token.is_empty() {
            return Err(AppError::Configuration("jira-token must not be empty".to_string()));
        }
        if inputs.github_token.is_empty() {
            return Err(AppError::Configuration("github-token must not be empty".to_string()));
        }
        if inputs.jira_base_url.is_empty() {
            return Err(AppError::Configuration(
                "jira-base-url must not be empty".to_string(),
            ));
        }

        let repository = RepoSlug::parse(&inputs.repository)?;

        Ok(Self {
            jira_base_url: inputs.jira_base_url.trim_end_matches('/').to_string(),
            jira_token: inputs.jira_token,
            encode_jira_token: inputs.encode_jira_token,
            github_token: inputs.github_token,
            repository,
            pr_number: inputs.pr_number,
            event_name: inputs.event_name,
            branch_ignore_pattern: inputs.branch_ignore_pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RawInputs {
        RawInputs {
            jira_base_url: "https://company.atlassian.net/".to_string(),
            jira_token: "secret".to_string(),
            encode_jira_token: false,
            github_token: "ghs_token".to_string(),
            repository: "acme/widgets".to_string(),
            pr_number: 12,
            event_name: "pull_request".to_string(),
            branch_ignore_pattern: String::new(),
        }
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let config = AppConfig::from_inputs(inputs()).unwrap();
        assert_eq!(config.jira_base_url, "https://company.atlassian.net");
    }

    #[test]
    fn parses_repository_slug() {
        let slug = RepoSlug::parse("acme/widgets").unwrap();
        assert_eq!(slug.owner, "acme");
        assert_eq!(slug.name, "widgets");

        assert!(RepoSlug::parse("acme").is_err());
        assert!(RepoSlug::parse("/widgets").is_err());
        assert!(RepoSlug::parse("acme/widgets/extra").is_err());
    }

    #[test]
    fn rejects_empty_tokens() {
        let mut raw = inputs();
        raw.jira_token = String::new();
        assert!(matches!(
            AppConfig::from_inputs(raw),
            Err(AppError::Configuration(_))
        ));
    }
}
