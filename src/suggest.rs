//! # Selector Suggestions
//!
//! Given a repository with possibly incomplete metadata, propose the most
//! specific selector that would admit it. The ranking prefers the
//! human-readable colon form when the suite metadata is trustworthy and
//! falls back to structurally unambiguous multi-field patterns for
//! repositories with partial Release metadata, which is the common case for
//! small third-party repositories. A suite value is never fabricated.
//!
//! The ranking, first satisfied rule wins:
//!
//! 1. origin + meaningful suite → `Origin:Suite` (`Allowed-Origins`)
//! 2. origin + codename → `origin=..,codename=..` (`Origins-Pattern`)
//! 3. origin + site → `origin=..,site=..`
//! 4. site → `site=..`
//! 5. nothing usable → `origin=*`, flagged [`Confidence::Fallback`]
//!
//! The fallback matches every repository on the system, so it is reported
//! as a low-confidence advisory rather than silently handed out; it is
//! still a valid selector, not an error.

use serde::Serialize;

use crate::repository::Repository;
use crate::selector::{Field, Selector};

/// Suite values that carry no channel information.
///
/// `.` is what flat repositories (`deb [arch=amd64] https://... ./`)
/// publish as their suite. The "suite identical to codename" case is
/// handled separately in [`meaningful_suite`] because it needs the
/// descriptor's own codename. Extend this list rather than adding ad-hoc
/// checks elsewhere.
const PLACEHOLDER_SUITES: &[&str] = &["."];

/// How trustworthy a suggestion is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Built from discriminating metadata; admits this repository and few
    /// or no others.
    Specific,
    /// The universal-wildcard fallback; admits every repository. Surfaced
    /// to the user as an advisory.
    Fallback,
}

/// A suggested selector for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub selector: Selector,
    pub confidence: Confidence,
}

/// Decide whether a suite value is meaningful enough for the colon form.
///
/// Concrete rule (the boundary is deliberately kept in this one place): a
/// suite is degenerate when it is empty after trimming, a known placeholder
/// (currently just `.`), or byte-identical to the repository's codename.
/// `a=noble,n=noble` says nothing about the release channel, whereas
/// `noble-security` does.
pub fn meaningful_suite(suite: &str, codename: Option<&str>) -> bool {
    let suite = suite.trim();
    if suite.is_empty() || PLACEHOLDER_SUITES.contains(&suite) {
        return false;
    }
    codename != Some(suite)
}

/// Propose the most specific selector admitting `repo`.
///
/// Deterministic and total: every descriptor yields a suggestion, even one
/// with no usable metadata at all.
pub fn suggest(repo: &Repository) -> Suggestion {
    let origin = repo.origin.as_deref().filter(|o| !o.trim().is_empty());
    let suite = repo.suite.as_deref();
    let codename = repo.codename.as_deref().filter(|c| !c.trim().is_empty());
    let site = repo.site.as_deref().filter(|s| !s.trim().is_empty());

    if let (Some(origin), Some(suite)) = (origin, suite) {
        if meaningful_suite(suite, repo.codename.as_deref()) {
            return Suggestion {
                selector: Selector::allowed_origins(origin, suite),
                confidence: Confidence::Specific,
            };
        }
    }

    if let (Some(origin), Some(codename)) = (origin, codename) {
        return Suggestion {
            selector: Selector::origins_pattern(&[
                (Field::Origin, origin),
                (Field::Codename, codename),
            ]),
            confidence: Confidence::Specific,
        };
    }

    if let (Some(origin), Some(site)) = (origin, site) {
        return Suggestion {
            selector: Selector::origins_pattern(&[
                (Field::Origin, origin),
                (Field::Site, site),
            ]),
            confidence: Confidence::Specific,
        };
    }

    if let Some(site) = site {
        return Suggestion {
            selector: Selector::origins_pattern(&[(Field::Site, site)]),
            confidence: Confidence::Specific,
        };
    }

    Suggestion {
        selector: Selector::origins_pattern(&[(Field::Origin, "*")]),
        confidence: Confidence::Fallback,
    }
}
