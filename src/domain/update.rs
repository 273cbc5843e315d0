use crate::domain::ticket::TicketKey;

/// Decides whether the PR body must be rewritten, given the keys currently
/// stamped into it and the keys derived from the title/branch.
///
/// A length mismatch always forces an update (covers additions and removals).
/// With equal lengths, an update is needed unless every stamped key is still
/// among the desired ones. This is a membership check, not set equality:
/// duplicates on either side do not trigger a rewrite on their own, which is
/// what keeps repeated runs with unchanged references from issuing redundant
/// writes.
pub fn needs_update(current: &[TicketKey], desired: &[TicketKey]) -> bool {
    if current.len() != desired.len() {
        return true;
    }

    let present = current.iter().filter(|key| desired.contains(*key)).count();
    present != desired.len()
}
