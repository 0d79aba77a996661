//! # Repository Data Model
//!
//! This module contains the pure data model for APT repositories as they
//! exist on the system. A [`Repository`] is a read-only snapshot built from
//! one `apt-cache policy` entry; it carries no opinion about
//! unattended-upgrades and is never mutated after construction.
//!
//! Metadata fields come from the repository's Release file:
//!
//! - `origin` (o=): who provides the repository
//! - `suite`/archive (a=): release channel or pocket (e.g. `noble-security`)
//! - `codename` (n=): distribution release name (e.g. `noble`, `bookworm`)
//! - `label` (l=): repository label
//! - `component` (c=): licensing subdivision (e.g. `main`, `universe`)
//! - `site`: repository hostname, derived from the package list URL
//!
//! All of those are optional; small third-party repositories routinely
//! publish only a subset. The remaining fields (`priority`, `url`,
//! `architecture`, `version`) are carried for display only and play no role
//! in selector matching.

use serde::Serialize;

/// Origins longer than this get middle-truncated in table output.
const ORIGIN_TRUNCATE_LEN: usize = 30;

/// One APT repository with its observed metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Repository origin/provider (o= field), e.g. `Ubuntu`, `Brave Software`.
    pub origin: Option<String>,
    /// Suite/archive name (a= field), e.g. `stable`, `noble-security`.
    pub suite: Option<String>,
    /// Distribution codename (n= field), e.g. `noble`, `jammy`.
    pub codename: Option<String>,
    /// Repository label (l= field), e.g. `Ubuntu`, `Debian-Security`.
    pub label: Option<String>,
    /// Component (c= field), e.g. `main`, `universe`, `contrib`.
    pub component: Option<String>,
    /// Repository hostname, e.g. `archive.ubuntu.com`, `pkgs.tailscale.com`.
    pub site: Option<String>,

    /// Package priority from apt-cache policy. Higher = preferred.
    pub priority: i32,
    /// Full package list URL from apt-cache policy.
    pub url: String,
    /// Architecture (b= field), e.g. `amd64`, `arm64`.
    pub architecture: Option<String>,
    /// Distribution version (v= field), e.g. `24.04`.
    pub version: Option<String>,
}

impl Repository {
    /// Check if this is the dpkg/status pseudo-repository.
    ///
    /// `apt-cache policy` reports the set of currently installed packages as
    /// a repository-shaped entry with suite `now` and the dpkg status file
    /// as its URL. It is not a source of updates and is skipped when
    /// generating selector suggestions.
    pub fn is_dpkg_status(&self) -> bool {
        self.suite.as_deref() == Some("now") && self.url.contains("/var/lib/dpkg/status")
    }

    /// Format with essential identifying information:
    /// `origin:suite/component [arch]`.
    ///
    /// Missing values render as `?`; long origins (obs:// style URLs used as
    /// origin strings) are middle-truncated.
    pub fn format_compact(&self) -> String {
        let mut out = format!(
            "{}:{}",
            truncate_origin(self.origin.as_deref().unwrap_or("?")),
            self.suite.as_deref().unwrap_or("?")
        );
        if let Some(component) = &self.component {
            out.push('/');
            out.push_str(component);
        }
        let arch = self
            .architecture
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or("?");
        out.push_str(&format!(" [{arch}]"));
        out
    }

    /// Format with full identifying information:
    /// `origin:suite/component [arch] @site`.
    pub fn format_full(&self) -> String {
        let mut out = self.format_compact();
        if let Some(site) = &self.site {
            out.push_str(&format!(" @{site}"));
        }
        out
    }

    /// Format the metadata not shown by [`format_full`](Self::format_full):
    /// `codename=X, label=Y, version=Z`, empty fields omitted.
    pub fn format_details(&self) -> String {
        let mut details = Vec::new();
        if let Some(codename) = &self.codename {
            details.push(format!("codename={codename}"));
        }
        if let Some(label) = &self.label {
            details.push(format!("label={label}"));
        }
        if let Some(version) = &self.version {
            details.push(format!("version={version}"));
        }
        details.join(", ")
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}",
            self.origin.as_deref().unwrap_or("Unknown"),
            self.suite.as_deref().unwrap_or("Unknown")
        )
    }
}

/// Middle-truncate origins that are really URLs (keeps first 15 and last 12
/// characters). Counted in characters, never byte offsets; Release metadata
/// is not guaranteed to be ASCII.
fn truncate_origin(origin: &str) -> String {
    let count = origin.chars().count();
    if count > ORIGIN_TRUNCATE_LEN {
        let head: String = origin.chars().take(15).collect();
        let tail: String = origin.chars().skip(count - 12).collect();
        format!("{head}...{tail}")
    } else {
        origin.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn ubuntu_security() -> Repository {
        Repository {
            origin: Some("Ubuntu".to_string()),
            suite: Some("noble-security".to_string()),
            codename: Some("noble".to_string()),
            label: Some("Ubuntu".to_string()),
            component: Some("main".to_string()),
            site: Some("security.ubuntu.com".to_string()),
            priority: 500,
            url: "http://security.ubuntu.com/ubuntu".to_string(),
            architecture: Some("amd64".to_string()),
            version: Some("24.04".to_string()),
        }
    }

    #[test]
    fn test_display_uses_origin_and_suite() {
        assert_eq!(ubuntu_security().to_string(), "Ubuntu:noble-security");
    }

    #[test]
    fn test_display_with_missing_fields() {
        let repo = Repository::default();
        assert_eq!(repo.to_string(), "Unknown:Unknown");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(
            ubuntu_security().format_compact(),
            "Ubuntu:noble-security/main [amd64]"
        );
    }

    #[test]
    fn test_format_compact_missing_arch_and_component() {
        let repo = Repository {
            origin: Some("Docker".to_string()),
            suite: Some("noble".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.format_compact(), "Docker:noble [?]");
    }

    #[test]
    fn test_format_full_appends_site() {
        assert_eq!(
            ubuntu_security().format_full(),
            "Ubuntu:noble-security/main [amd64] @security.ubuntu.com"
        );
    }

    #[test]
    fn test_format_full_without_site() {
        let repo = Repository {
            origin: Some("Docker".to_string()),
            suite: Some("noble".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.format_full(), "Docker:noble [?]");
    }

    #[test]
    fn test_format_details() {
        assert_eq!(
            ubuntu_security().format_details(),
            "codename=noble, label=Ubuntu, version=24.04"
        );
    }

    #[test]
    fn test_format_details_empty_when_no_extras() {
        let repo = Repository::default();
        assert_eq!(repo.format_details(), "");
    }

    #[test]
    fn test_long_origin_is_truncated() {
        let repo = Repository {
            origin: Some(
                "obs://build.opensuse.org/home:user/xUbuntu_24.04".to_string(),
            ),
            ..Default::default()
        };
        let compact = repo.format_compact();
        assert!(compact.contains("..."));
        assert!(compact.len() < 50);
    }

    #[test]
    fn test_long_non_ascii_origin_is_truncated() {
        // Release files are not guaranteed to be ASCII; truncation must cut
        // on character boundaries.
        let repo = Repository {
            origin: Some("é".repeat(31)),
            ..Default::default()
        };
        let compact = repo.format_compact();
        assert!(compact.starts_with(&format!("{}...", "é".repeat(15))));

        // Two-byte characters below the limit stay untouched.
        let repo = Repository {
            origin: Some("é".repeat(16)),
            ..Default::default()
        };
        assert_eq!(repo.format_compact(), format!("{}:? [?]", "é".repeat(16)));

        let repo = Repository {
            origin: Some(format!("obs://build.opensuse.org/hôme:usér/{}", "ü".repeat(20))),
            ..Default::default()
        };
        // Must not panic; keeps 15 leading and 12 trailing characters.
        let compact = repo.format_compact();
        assert!(compact.starts_with("obs://build.ope..."));
        assert!(compact.contains(&"ü".repeat(12)));
    }

    #[test]
    fn test_is_dpkg_status() {
        let repo = Repository {
            suite: Some("now".to_string()),
            url: "/var/lib/dpkg/status".to_string(),
            priority: 100,
            ..Default::default()
        };
        assert!(repo.is_dpkg_status());
    }

    #[test]
    fn test_is_dpkg_status_requires_both_markers() {
        let repo = Repository {
            suite: Some("now".to_string()),
            url: "http://example.com/debian".to_string(),
            ..Default::default()
        };
        assert!(!repo.is_dpkg_status());
        assert!(!ubuntu_security().is_dpkg_status());
    }
}
