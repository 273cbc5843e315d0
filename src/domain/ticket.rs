use std::fmt;

/// Normalized issue key of the form `PROJECT-NUMBER`.
///
/// Keys only enter the system through normalization (see
/// [`crate::domain::keys`]): input is uppercased and any whitespace between
/// the project prefix and the number is collapsed to a single hyphen.
/// Comparison is plain string equality after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketKey(String);

impl TicketKey {
    pub fn new(project: &str, number: &str) -> Self {
        Self(format!("{project}-{number}"))
    }

    /// Wraps a key that is already in stamped form, e.g. recovered from a
    /// previously rendered PR body.
    pub fn from_stamped(raw: &str) -> Self {
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct IssueType {
    pub name: String,
    pub icon_url: String,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub key: String,
    pub name: String,
    pub url: String,
}

/// Everything the description renderer needs about one fetched ticket.
#[derive(Debug, Clone)]
pub struct TicketDetails {
    pub key: TicketKey,
    pub summary: String,
    pub url: String,
    pub issue_type: IssueType,
    pub project: Project,
}
