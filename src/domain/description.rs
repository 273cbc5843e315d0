use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::ticket::TicketDetails;

/// Marker literals are a compatibility contract: the removal pattern below
/// matches them byte-for-byte, so changing them orphans the managed block in
/// every PR stamped by an earlier version.
pub const HIDDEN_MARKER_START: &str = "<!--jiralink-hidden-marker-start-->";
pub const HIDDEN_MARKER_END: &str = "<!--jiralink-hidden-marker-end-->";
pub const HIDDEN_MARKER_WARNING: &str =
    "<!--Do not remove: jiralink uses the markers below to keep the ticket table up to date-->";

lazy_static! {
    /// Matches a previously stamped managed block: optional warning banner,
    /// then start marker through end marker, case-insensitive, spanning
    /// newlines. Greedy, so with stray duplicate marker pairs it removes from
    /// the first start marker to the last end marker. Marker text is escaped
    /// so regex metacharacters in it can never alter the pattern.
    static ref MANAGED_BLOCK_PATTERN: Regex = Regex::new(&format!(
        r"(?is)(?:{}\r?\n)?{}.+{}\r?\n?",
        regex::escape(HIDDEN_MARKER_WARNING),
        regex::escape(HIDDEN_MARKER_START),
        regex::escape(HIDDEN_MARKER_END),
    ))
    .unwrap();
}

/// Splices `fragment` into `old_body` inside the managed block, replacing any
/// block stamped by a previous run and leaving everything the PR author wrote
/// untouched below it. Applying this twice never duplicates the banner or the
/// markers.
pub fn compose_body(old_body: &str, fragment: &str) -> String {
    let remainder = MANAGED_BLOCK_PATTERN.replace_all(old_body, "");
    format!(
        "{HIDDEN_MARKER_WARNING}\n{HIDDEN_MARKER_START}\n{fragment}\n{HIDDEN_MARKER_END}\n{remainder}"
    )
}

fn ticket_row(details: &TicketDetails) -> String {
    let key = details.key.as_str().to_uppercase();
    format!(
        "<tr><td>\n  <a href=\"{url}\" title=\"{key}\" target=\"_blank\"><img alt=\"{type_name}\" src=\"{icon}\" />{key}</a>  {summary}\n</td></tr>\n",
        url = details.url,
        type_name = details.issue_type.name,
        icon = details.issue_type.icon_url,
        summary = details.summary,
    )
}

/// Renders one table row per ticket, in input order. Summary and issue-type
/// text are inserted as-is; the PR host's markdown renderer is trusted to
/// sanitize, which is an accepted risk rather than an oversight.
pub fn render_fragment(tickets: &[TicketDetails]) -> String {
    let rows: String = tickets.iter().map(ticket_row).collect();
    format!("<table>\n{rows}</table>\n<br />")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keys::extract_stamped_keys;
    use crate::domain::ticket::{IssueType, Project, TicketKey};

    fn ticket(key: &str, summary: &str) -> TicketDetails {
        TicketDetails {
            key: TicketKey::from_stamped(key),
            summary: summary.to_string(),
            url: format!("https://jira.example.com/browse/{key}"),
            issue_type: IssueType {
                name: "Story".to_string(),
                icon_url: "https://jira.example.com/icons/story.svg".to_string(),
            },
            project: Project {
                key: "MON".to_string(),
                name: "Monitoring".to_string(),
                url: "https://jira.example.com/browse/MON".to_string(),
            },
        }
    }

    #[test]
    fn prepends_fragment_with_markers_to_untouched_body() {
        let body = compose_body("old PR description body", "new info about jira task");

        assert_eq!(
            body,
            format!(
                "{HIDDEN_MARKER_WARNING}\n{HIDDEN_MARKER_START}\nnew info about jira task\n{HIDDEN_MARKER_END}\nold PR description body"
            )
        );
    }

    #[test]
    fn replaces_previously_stamped_block() {
        let old = format!(
            "{HIDDEN_MARKER_START}stale ticket info{HIDDEN_MARKER_END}old PR description body"
        );
        let body = compose_body(&old, "new info about jira task");

        assert_eq!(
            body,
            format!(
                "{HIDDEN_MARKER_WARNING}\n{HIDDEN_MARKER_START}\nnew info about jira task\n{HIDDEN_MARKER_END}\nold PR description body"
            )
        );
    }

    #[test]
    fn composing_twice_is_idempotent() {
        let once = compose_body("user written notes", "first fragment");
        let twice = compose_body(&once, "second fragment");

        assert_eq!(
            twice,
            format!(
                "{HIDDEN_MARKER_WARNING}\n{HIDDEN_MARKER_START}\nsecond fragment\n{HIDDEN_MARKER_END}\nuser written notes"
            )
        );
        assert_eq!(twice.matches(HIDDEN_MARKER_START).count(), 1);
        assert_eq!(twice.matches(HIDDEN_MARKER_WARNING).count(), 1);
    }

    #[test]
    fn removal_spans_first_start_to_last_end() {
        // Stray duplicate marker pairs collapse into one removal span. This
        // mirrors the single-pass greedy removal the block format was
        // designed around.
        let old = format!(
            "{HIDDEN_MARKER_START}a{HIDDEN_MARKER_END}between{HIDDEN_MARKER_START}b{HIDDEN_MARKER_END}tail"
        );
        let body = compose_body(&old, "fresh");

        assert!(body.ends_with("tail"));
        assert!(!body.contains("between"));
    }

    #[test]
    fn rendered_rows_round_trip_through_stamped_key_recovery() {
        let tickets = vec![
            ticket("MON-1530", "Fix alert routing"),
            ticket("MON-1531", "Add paging escalation"),
        ];
        let fragment = render_fragment(&tickets);

        assert!(fragment.starts_with("<table>\n"));
        assert!(fragment.ends_with("</table>\n<br />"));
        assert!(fragment.contains("Fix alert routing"));
        assert!(fragment.contains(r#"alt="Story""#));
        assert_eq!(
            extract_stamped_keys(Some(&fragment)),
            vec![
                TicketKey::from_stamped("MON-1530"),
                TicketKey::from_stamped("MON-1531")
            ]
        );
    }

    #[test]
    fn display_key_is_uppercased() {
        let fragment = render_fragment(&[ticket("mon-7", "lowercase input")]);
        assert!(fragment.contains(">MON-7</a>"));
        assert!(fragment.contains(r#"title="MON-7""#));
    }
}
