//! Advisor defaulting rules applied after every load and advisor mutation.

use super::model::Advisor;
use super::preset::{default_host, get_default_advisors};

/// Normalizes an advisor list so that it always contains a host.
///
/// 1. An empty list becomes the full built-in roster, host first.
/// 2. A list without any host gets the built-in host prepended.
///
/// Applying the rules again to their own output changes nothing.
pub fn apply_advisor_defaults(advisors: &mut Vec<Advisor>) {
    if advisors.is_empty() {
        tracing::info!("[AdvisorDefaults] No advisors selected, using built-in roster");
        *advisors = get_default_advisors();
        return;
    }

    if !advisors.iter().any(|advisor| advisor.is_host) {
        tracing::info!("[AdvisorDefaults] No host among selected advisors, prepending default host");
        advisors.insert(0, default_host());
    }
}

/// Returns the advisors a new meeting starts with: the first host, or the
/// first advisor when no host is flagged.
pub fn default_active_advisors(advisors: &[Advisor]) -> Vec<Advisor> {
    advisors
        .iter()
        .find(|advisor| advisor.is_host)
        .or_else(|| advisors.first())
        .cloned()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{AdvisorDraft, HOST_ADVISOR_ID};

    fn custom(name: &str) -> Advisor {
        let mut advisor = AdvisorDraft::new(name, "Advisor").into_advisor();
        advisor.id = format!("custom-{}", name);
        advisor
    }

    #[test]
    fn test_empty_becomes_builtin_roster() {
        let mut advisors = Vec::new();
        apply_advisor_defaults(&mut advisors);

        assert_eq!(advisors, get_default_advisors());
        assert_eq!(advisors[0].id, HOST_ADVISOR_ID);
    }

    #[test]
    fn test_missing_host_is_prepended() {
        let mut advisors = vec![custom("a"), custom("b")];
        apply_advisor_defaults(&mut advisors);

        let ids: Vec<&str> = advisors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec![HOST_ADVISOR_ID, "custom-a", "custom-b"]);
    }

    #[test]
    fn test_existing_host_is_kept_in_place() {
        let mut host = custom("chair");
        host.is_host = true;
        let mut advisors = vec![custom("a"), host];
        let before = advisors.clone();

        apply_advisor_defaults(&mut advisors);
        assert_eq!(advisors, before);
    }

    #[test]
    fn test_defaulting_is_idempotent() {
        let inputs = vec![
            Vec::new(),
            vec![custom("a")],
            vec![custom("a"), custom("b"), custom("c")],
            get_default_advisors(),
        ];

        for input in inputs {
            let mut once = input.clone();
            apply_advisor_defaults(&mut once);
            let mut twice = once.clone();
            apply_advisor_defaults(&mut twice);

            assert_eq!(once, twice);
            assert!(twice.iter().any(|a| a.is_host));
        }
    }

    #[test]
    fn test_default_active_prefers_host() {
        let mut host = custom("chair");
        host.is_host = true;
        let advisors = vec![custom("a"), host.clone()];

        assert_eq!(default_active_advisors(&advisors), vec![host]);
    }

    #[test]
    fn test_default_active_falls_back_to_first() {
        let advisors = vec![custom("a"), custom("b")];
        let active = default_active_advisors(&advisors);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "custom-a");
        assert!(default_active_advisors(&[]).is_empty());
    }
}
