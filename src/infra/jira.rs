use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Deserialize;

use crate::domain::ticket::{IssueType, Project, TicketDetails, TicketKey};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

pub struct JiraClient {
    http: Client,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    /// `token` is expected to be `base64(email:api_token)`; with
    /// `encode_token` set the caller supplies the raw `email:api_token` pair
    /// and the encoding happens here.
    pub fn new(base_url: String, token: &str, encode_token: bool) -> Self {
        let credentials = if encode_token {
            BASE64_STANDARD.encode(token)
        } else {
            token.to_string()
        };

        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {credentials}"),
        }
    }

    fn issue_endpoint(&self, key: &TicketKey) -> String {
        format!(
            "{}/rest/api/3/issue/{}?fields=summary,issuetype,project",
            self.base_url, key
        )
    }

    fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn ticket_details(&self, key: &TicketKey) -> AppResult<TicketDetails> {
        let response = self
            .http
            .get(self.issue_endpoint(key))
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => {
                return Err(AppError::TicketNotFound(key.to_string()));
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AppError::IssueTracker(format!(
                    "Jira rejected the token while fetching {key}: {status}"
                )));
            }
            _ if !status.is_success() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unable to read response>".to_string());
                return Err(AppError::IssueTracker(format!(
                    "Jira responded with {status}: {body}"
                )));
            }
            _ => {}
        }

        let payload: JiraIssueResponse = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Jira response: {err}"))
        })?;

        Ok(TicketDetails {
            url: self.browse_url(&payload.key),
            key: TicketKey::from_stamped(&payload.key),
            summary: payload.fields.summary,
            issue_type: IssueType {
                name: payload.fields.issuetype.name,
                icon_url: payload.fields.issuetype.icon_url,
            },
            project: Project {
                url: self.browse_url(&payload.fields.project.key),
                key: payload.fields.project.key,
                name: payload.fields.project.name,
            },
        })
    }
}

#[derive(Deserialize)]
struct JiraIssueResponse {
    key: String,
    fields: JiraIssueFields,
}

#[derive(Deserialize)]
struct JiraIssueFields {
    summary: String,
    issuetype: JiraIssueType,
    project: JiraProject,
}

#[derive(Deserialize)]
struct JiraIssueType {
    name: String,
    #[serde(rename = "iconUrl")]
    icon_url: String,
}

#[derive(Deserialize)]
struct JiraProject {
    key: String,
    name: String,
}
