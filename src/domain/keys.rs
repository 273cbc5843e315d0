use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::ticket::TicketKey;

lazy_static! {
    /// Ticket key grammar: uppercase project prefix, then a hyphen or a run
    /// of whitespace, then the issue number. Input is uppercased before
    /// matching so `es-43` and `ES 43` both resolve to `ES-43`.
    static ref TICKET_KEY_PATTERN: Regex =
        Regex::new(r"([A-Z]+)(?:-|\s+)([0-9]+)").unwrap();
    /// Keys stamped into a rendered body live in the `title` attribute of the
    /// ticket links the renderer emits.
    static ref STAMPED_KEY_PATTERN: Regex =
        Regex::new(r#"title="([a-zA-Z0-9-]*)""#).unwrap();
}

/// Extracts every ticket key referenced in `text`, in first-occurrence order,
/// duplicates preserved. Returns `None` when there is no match at all so
/// callers can fall back to another source (title first, then branch name).
pub fn extract_keys(text: &str) -> Option<Vec<TicketKey>> {
    let upper = text.to_uppercase();
    let keys: Vec<TicketKey> = TICKET_KEY_PATTERN
        .captures_iter(&upper)
        .map(|caps| TicketKey::new(&caps[1], &caps[2]))
        .collect();

    if keys.is_empty() { None } else { Some(keys) }
}

/// Recovers the keys currently stamped into a rendered PR body, so they can
/// be compared against freshly extracted ones. Unlike [`extract_keys`] this
/// returns an empty vec when nothing matches; a missing body counts as empty.
pub fn extract_stamped_keys(body: Option<&str>) -> Vec<TicketKey> {
    let Some(body) = body else {
        return Vec::new();
    };

    STAMPED_KEY_PATTERN
        .captures_iter(body)
        .map(|caps| TicketKey::from_stamped(&caps[1]))
        .collect()
}
