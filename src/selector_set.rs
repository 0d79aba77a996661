//! # Selector Set
//!
//! The aggregate configuration state: every active selector from both
//! unattended-upgrades sections plus the global on/off switch, assembled
//! once per invocation by [`crate::apt_conf`] and queried by the CLI layer.
//!
//! A repository is *enabled* iff the global switch is on AND at least one
//! selector admits it. Matching is existential, not first-match: selector
//! order is preserved purely for display, and duplicates or overlapping
//! selectors are legal.

use crate::repository::Repository;
use crate::selector::{Section, Selector};
use crate::vars::DistroContext;

/// The active unattended-upgrades configuration as an immutable snapshot.
///
/// Mutation (`add`/`remove`) only happens on the single owned instance held
/// by the invoking command; queries are read-only and safe to share.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    /// The `APT::Periodic::Unattended-Upgrade` toggle.
    pub globally_enabled: bool,
    selectors: Vec<Selector>,
    /// The distribution context the selectors were expanded against.
    pub distro: DistroContext,
}

impl SelectorSet {
    pub fn new(globally_enabled: bool, selectors: Vec<Selector>, distro: DistroContext) -> Self {
        Self {
            globally_enabled,
            selectors,
            distro,
        }
    }

    /// All selectors in configuration order.
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Selectors belonging to one configuration section, in order.
    pub fn section_selectors(&self, section: Section) -> impl Iterator<Item = &Selector> {
        self.selectors.iter().filter(move |s| s.section() == section)
    }

    /// Whether the repository currently receives unattended upgrades.
    ///
    /// `globally_enabled AND exists s: s.matches(repo)`. O(selectors) per
    /// call; selector counts are tens, not thousands, so no caching.
    pub fn is_enabled(&self, repo: &Repository) -> bool {
        self.globally_enabled && self.is_covered(repo)
    }

    /// Whether any selector admits the repository, ignoring the global
    /// switch. Used to decide which repositories still need a suggestion.
    pub fn is_covered(&self, repo: &Repository) -> bool {
        self.selectors.iter().any(|s| s.matches(repo))
    }

    /// Filter the repositories down to the enabled ones, preserving input
    /// order. Total: matching never fails on any descriptor.
    pub fn enabled_of<'r>(&self, repos: &'r [Repository]) -> Vec<&'r Repository> {
        repos.iter().filter(|r| self.is_enabled(r)).collect()
    }

    /// Inverse query: the repositories a given selector admits. Used for
    /// verbose reporting.
    pub fn matches_for<'r>(
        &self,
        selector: &Selector,
        repos: &'r [Repository],
    ) -> Vec<&'r Repository> {
        repos.iter().filter(|r| selector.matches(r)).collect()
    }

    /// The selectors that admit a given repository, in configuration order.
    pub fn selectors_matching(&self, repo: &Repository) -> Vec<&Selector> {
        self.selectors.iter().filter(|s| s.matches(repo)).collect()
    }

    /// Append a selector. Duplicates are allowed; no uniqueness constraint.
    pub fn add(&mut self, selector: Selector) {
        self.selectors.push(selector);
    }

    /// Remove every selector equal to the given one, matched by value
    /// equality of `(section, raw)`. A no-op when none is present.
    ///
    /// Returns the number of selectors removed.
    pub fn remove(&mut self, selector: &Selector) -> usize {
        let before = self.selectors.len();
        self.selectors.retain(|s| s != selector);
        before - self.selectors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector;

    fn ctx() -> DistroContext {
        DistroContext::new("Ubuntu", "noble")
    }

    fn selector(raw: &str, section: Section) -> Selector {
        Selector::parse(raw, section, &ctx()).unwrap()
    }

    fn repo(origin: &str, suite: &str) -> Repository {
        Repository {
            origin: Some(origin.to_string()),
            suite: Some(suite.to_string()),
            ..Default::default()
        }
    }

    fn security_set(globally_enabled: bool) -> SelectorSet {
        SelectorSet::new(
            globally_enabled,
            vec![
                selector(
                    "${distro_id}:${distro_codename}-security",
                    Section::AllowedOrigins,
                ),
                selector("origin=Docker", Section::OriginsPattern),
            ],
            ctx(),
        )
    }

    #[test]
    fn test_is_enabled_requires_global_switch() {
        let set = security_set(false);
        assert!(!set.is_enabled(&repo("Ubuntu", "noble-security")));
        assert!(!set.is_enabled(&repo("Docker", "noble")));
        // Coverage is still visible with the switch off.
        assert!(set.is_covered(&repo("Ubuntu", "noble-security")));
    }

    #[test]
    fn test_is_enabled_requires_a_matching_selector() {
        let set = security_set(true);
        assert!(set.is_enabled(&repo("Ubuntu", "noble-security")));
        assert!(set.is_enabled(&repo("Docker", "anything")));
        assert!(!set.is_enabled(&repo("Ubuntu", "noble-updates")));
    }

    #[test]
    fn test_enabled_of_preserves_order() {
        let set = security_set(true);
        let repos = vec![
            repo("Ubuntu", "noble-updates"),
            repo("Docker", "noble"),
            repo("Ubuntu", "noble-security"),
        ];
        let enabled = set.enabled_of(&repos);
        assert_eq!(enabled.len(), 2);
        assert_eq!(enabled[0].origin.as_deref(), Some("Docker"));
        assert_eq!(enabled[1].suite.as_deref(), Some("noble-security"));
    }

    #[test]
    fn test_matches_for_inverse_query() {
        let set = security_set(true);
        let repos = vec![
            repo("Docker", "noble"),
            repo("Ubuntu", "noble-security"),
            repo("Docker", "bookworm"),
        ];
        let docker = selector("origin=Docker", Section::OriginsPattern);
        let matched = set.matches_for(&docker, &repos);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|r| r.origin.as_deref() == Some("Docker")));
    }

    #[test]
    fn test_selectors_matching_reports_every_match() {
        let mut set = security_set(true);
        set.add(selector("origin=*", Section::OriginsPattern));
        let matching = set.selectors_matching(&repo("Ubuntu", "noble-security"));
        assert_eq!(matching.len(), 2);
        assert_eq!(matching[0].raw(), "${distro_id}:${distro_codename}-security");
        assert_eq!(matching[1].raw(), "origin=*");
    }

    #[test]
    fn test_add_allows_duplicates() {
        let mut set = security_set(true);
        set.add(selector("origin=Docker", Section::OriginsPattern));
        assert_eq!(set.selectors().len(), 3);
    }

    #[test]
    fn test_remove_by_value_equality() {
        let mut set = security_set(true);
        let removed = set.remove(&selector("origin=Docker", Section::OriginsPattern));
        assert_eq!(removed, 1);
        assert_eq!(set.selectors().len(), 1);
        assert!(!set.is_covered(&repo("Docker", "noble")));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set = security_set(true);
        let removed = set.remove(&selector("origin=Nothing", Section::OriginsPattern));
        assert_eq!(removed, 0);
        assert_eq!(set.selectors().len(), 2);
    }

    #[test]
    fn test_remove_matches_section_too() {
        let mut set = SelectorSet::new(
            true,
            vec![selector("origin=Docker", Section::AllowedOrigins)],
            ctx(),
        );
        // Same raw text in the other section is a different selector.
        let removed = set.remove(&selector("origin=Docker", Section::OriginsPattern));
        assert_eq!(removed, 0);
        assert_eq!(set.selectors().len(), 1);
    }

    #[test]
    fn test_section_selectors_filters() {
        let set = security_set(true);
        assert_eq!(set.section_selectors(Section::AllowedOrigins).count(), 1);
        assert_eq!(set.section_selectors(Section::OriginsPattern).count(), 1);
    }
}
