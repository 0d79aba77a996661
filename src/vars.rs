//! # Selector Variable Substitution
//!
//! Unattended-upgrades selector strings may reference two variables,
//! `${distro_id}` and `${distro_codename}`, which expand to the values of
//! the running distribution. The stock Ubuntu configuration relies on this:
//!
//! ```text
//! Unattended-Upgrade::Allowed-Origins {
//!     "${distro_id}:${distro_codename}-security";
//! };
//! ```
//!
//! Expansion is plain textual substring replacement, performed once per raw
//! selector at parse time and case-sensitive on the variable tokens. Any
//! other `${...}` token is left verbatim in place rather than rejected, so
//! configurations written for a future unattended-upgrades version still
//! load; the unknown tokens are returned to the caller so the tool can warn
//! about them.

use regex::Regex;
use std::sync::OnceLock;

/// The distribution identity used to expand selector variables.
///
/// Supplied by [`crate::distro::detect`] on a real system, or directly by
/// tests and CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistroContext {
    /// Distribution id, e.g. `Ubuntu` or `Debian`.
    pub id: String,
    /// Distribution release codename, e.g. `noble` or `bookworm`.
    pub codename: String,
}

impl DistroContext {
    pub fn new(id: impl Into<String>, codename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            codename: codename.into(),
        }
    }
}

/// Token replaced by [`DistroContext::id`].
pub const DISTRO_ID_VAR: &str = "${distro_id}";
/// Token replaced by [`DistroContext::codename`].
pub const DISTRO_CODENAME_VAR: &str = "${distro_codename}";

/// The result of expanding one raw selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The selector text with all recognized variables replaced.
    pub text: String,
    /// `${...}` tokens that were not recognized and were left verbatim.
    pub unknown_variables: Vec<String>,
}

/// Expand `${distro_id}` and `${distro_codename}` in a raw selector string.
///
/// Unrecognized `${...}` tokens are preserved and reported, never an error.
///
/// ```
/// use apt_uu_config::vars::{expand, DistroContext};
///
/// let ctx = DistroContext::new("Ubuntu", "noble");
/// let expansion = expand("${distro_id}:${distro_codename}-security", &ctx);
/// assert_eq!(expansion.text, "Ubuntu:noble-security");
/// assert!(expansion.unknown_variables.is_empty());
/// ```
pub fn expand(raw: &str, ctx: &DistroContext) -> Expansion {
    let text = raw
        .replace(DISTRO_ID_VAR, &ctx.id)
        .replace(DISTRO_CODENAME_VAR, &ctx.codename);

    let unknown_variables = variable_token_re()
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect();

    Expansion {
        text,
        unknown_variables,
    }
}

fn variable_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{[^}]*\}").expect("static regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> DistroContext {
        DistroContext::new("Ubuntu", "noble")
    }

    #[test]
    fn test_expand_both_variables() {
        let expansion = expand("${distro_id}:${distro_codename}-security", &ctx());
        assert_eq!(expansion.text, "Ubuntu:noble-security");
        assert!(expansion.unknown_variables.is_empty());
    }

    #[test]
    fn test_expand_repeated_variable() {
        let expansion = expand(
            "origin=${distro_id},label=${distro_id}ESMApps",
            &ctx(),
        );
        assert_eq!(expansion.text, "origin=Ubuntu,label=UbuntuESMApps");
    }

    #[test]
    fn test_expand_no_variables_is_identity() {
        let expansion = expand("origin=Docker,codename=noble", &ctx());
        assert_eq!(expansion.text, "origin=Docker,codename=noble");
        assert!(expansion.unknown_variables.is_empty());
    }

    #[test]
    fn test_unknown_variable_left_verbatim_and_reported() {
        let expansion = expand("${distro_id}:${distro_version}-updates", &ctx());
        assert_eq!(expansion.text, "Ubuntu:${distro_version}-updates");
        assert_eq!(expansion.unknown_variables, vec!["${distro_version}"]);
    }

    #[test]
    fn test_variable_tokens_are_case_sensitive() {
        let expansion = expand("${DISTRO_ID}:stable", &ctx());
        assert_eq!(expansion.text, "${DISTRO_ID}:stable");
        assert_eq!(expansion.unknown_variables, vec!["${DISTRO_ID}"]);
    }

    #[test]
    fn test_multiple_unknown_variables() {
        let expansion = expand("${a}:${b}", &ctx());
        assert_eq!(expansion.unknown_variables, vec!["${a}", "${b}"]);
    }
}
