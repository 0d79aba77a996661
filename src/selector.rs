//! # Selector Parsing and Matching
//!
//! This module defines the selector model for unattended-upgrades
//! configuration entries, as well as the logic for parsing and evaluating
//! them. A [`Selector`] is one entry from the `Allowed-Origins` or
//! `Origins-Pattern` section of `50unattended-upgrades`; it decides, for a
//! given [`Repository`], whether that repository is admitted for automatic
//! upgrades.
//!
//! ## Surface syntaxes
//!
//! Two on-disk syntaxes feed one canonical predicate model:
//!
//! 1. **Colon form** `"Origin:Suite"`, only legal in `Allowed-Origins`.
//!    Example: `"Ubuntu:noble-security"`.
//! 2. **Key=value form** `"field=value,field=value"`, legal in both
//!    sections. Example: `"origin=Tailscale,site=pkgs.tailscale.com"`.
//!
//! Both produce an ordered list of `(Field, MatchValue)` constraints, so
//! matching code never dispatches on the selector's syntax.
//!
//! ## Matching semantics
//!
//! Matching is a pure conjunction: every constraint in the predicate must
//! hold against the repository's corresponding attribute. A field omitted
//! from the selector imposes no constraint (wildcard by omission), so a
//! selector with an empty predicate matches every repository. Comparison is
//! case-sensitive; origin names are case-sensitive by design.
//!
//! A `*` value matches anything, including an absent attribute. A `*` at
//! the start and/or end of a value matches by suffix/prefix/substring
//! containment; a `*` anywhere else is a literal character. This is
//! deliberately not a general glob: repository metadata flows into
//! selectors verbatim and must never be interpreted as pattern
//! metacharacters beyond the edge wildcards.
//!
//! Unknown field names are a parse-time error, never a silently ignored
//! constraint. A typo like `orgin=Ubuntu` would otherwise widen the
//! selector to match every repository.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::suggestions;
use crate::vars::{self, DistroContext};

/// Which unattended-upgrades configuration section a selector belongs to.
///
/// The section determines the allowed syntax: colon form is only legal in
/// `Allowed-Origins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `Unattended-Upgrade::Allowed-Origins`
    AllowedOrigins,
    /// `Unattended-Upgrade::Origins-Pattern`
    OriginsPattern,
}

impl Section {
    /// The section name as it appears in the configuration file.
    pub fn as_str(self) -> &'static str {
        match self {
            Section::AllowedOrigins => "Allowed-Origins",
            Section::OriginsPattern => "Origins-Pattern",
        }
    }

    /// The fully qualified APT configuration key for this section.
    pub fn config_key(self) -> &'static str {
        match self {
            Section::AllowedOrigins => "Unattended-Upgrade::Allowed-Origins",
            Section::OriginsPattern => "Unattended-Upgrade::Origins-Pattern",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The six repository metadata fields a selector may constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Origin,
    Suite,
    Codename,
    Label,
    Component,
    Site,
}

/// Recognized field names and aliases, shown in unknown-field hints.
const FIELD_NAMES: &[&str] = &[
    "origin",
    "suite",
    "archive",
    "codename",
    "label",
    "component",
    "site",
];

impl Field {
    /// Resolve a configuration field name or single-letter alias.
    ///
    /// The aliases are the ones APT itself uses in Release file tags:
    /// `o`, `a` (also `archive`), `n`, `l`, `c`. `site` has no alias.
    pub fn from_name(name: &str) -> Option<Field> {
        match name {
            "origin" | "o" => Some(Field::Origin),
            "suite" | "archive" | "a" => Some(Field::Suite),
            "codename" | "n" => Some(Field::Codename),
            "label" | "l" => Some(Field::Label),
            "component" | "c" => Some(Field::Component),
            "site" => Some(Field::Site),
            _ => None,
        }
    }

    /// Canonical field name used when rendering a selector.
    pub fn name(self) -> &'static str {
        match self {
            Field::Origin => "origin",
            Field::Suite => "suite",
            Field::Codename => "codename",
            Field::Label => "label",
            Field::Component => "component",
            Field::Site => "site",
        }
    }

    /// The repository attribute this field is compared against.
    fn of<'r>(self, repo: &'r Repository) -> Option<&'r str> {
        match self {
            Field::Origin => repo.origin.as_deref(),
            Field::Suite => repo.suite.as_deref(),
            Field::Codename => repo.codename.as_deref(),
            Field::Label => repo.label.as_deref(),
            Field::Component => repo.component.as_deref(),
            Field::Site => repo.site.as_deref(),
        }
    }
}

/// One constraint value, already variable-expanded.
///
/// Modeled as a small tagged variant instead of a regex so matching is O(1)
/// per field and repository metadata can never inject pattern
/// metacharacters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchValue {
    /// `*`: matches any value, including an absent attribute.
    Any,
    /// Literal string, exact case-sensitive comparison.
    Exact(String),
    /// `text*`: prefix match.
    Prefix(String),
    /// `*text`: suffix match.
    Suffix(String),
    /// `*text*`: substring match.
    Contains(String),
}

impl MatchValue {
    /// Classify a raw value by its edge wildcards.
    ///
    /// Interior `*` characters stay literal, so `a*b` is `Exact("a*b")` and
    /// `a*b*` is `Prefix("a*b")`.
    pub fn parse(text: &str) -> MatchValue {
        if text == "*" {
            return MatchValue::Any;
        }
        match (text.starts_with('*'), text.ends_with('*')) {
            (true, true) => MatchValue::Contains(text[1..text.len() - 1].to_string()),
            (false, true) => MatchValue::Prefix(text[..text.len() - 1].to_string()),
            (true, false) => MatchValue::Suffix(text[1..].to_string()),
            (false, false) => MatchValue::Exact(text.to_string()),
        }
    }

    /// Evaluate against one repository attribute.
    ///
    /// An absent attribute only matches `Any`; every other variant requires
    /// a published value.
    pub fn matches(&self, attr: Option<&str>) -> bool {
        match (self, attr) {
            (MatchValue::Any, _) => true,
            (_, None) => false,
            (MatchValue::Exact(want), Some(value)) => value == want,
            (MatchValue::Prefix(want), Some(value)) => value.starts_with(want),
            (MatchValue::Suffix(want), Some(value)) => value.ends_with(want),
            (MatchValue::Contains(want), Some(value)) => value.contains(want),
        }
    }
}

impl std::fmt::Display for MatchValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchValue::Any => f.write_str("*"),
            MatchValue::Exact(text) => f.write_str(text),
            MatchValue::Prefix(text) => write!(f, "{text}*"),
            MatchValue::Suffix(text) => write!(f, "*{text}"),
            MatchValue::Contains(text) => write!(f, "*{text}*"),
        }
    }
}

/// One parsed unattended-upgrades configuration entry.
///
/// `raw` preserves the source text exactly as it appeared (variables
/// unexpanded) so write-back is byte-faithful; the predicate holds the
/// already-expanded values used for matching. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Selector {
    raw: String,
    section: Section,
    predicate: Vec<(Field, MatchValue)>,
    unknown_variables: Vec<String>,
}

impl Selector {
    /// Parse one raw selector string from the given configuration section.
    ///
    /// Variable placeholders are expanded against `ctx` before the
    /// predicate is built, so `"${distro_id}:${distro_codename}-security"`
    /// under `(Ubuntu, noble)` yields the predicate
    /// `{origin: Ubuntu, suite: noble-security}`.
    ///
    /// Fails with [`Error::SelectorParse`] on: colon form outside
    /// `Allowed-Origins`, an unknown field name, an empty field name or
    /// value, or a string that is neither syntax.
    pub fn parse(raw: &str, section: Section, ctx: &DistroContext) -> Result<Selector> {
        let expansion = vars::expand(raw, ctx);
        let text = expansion.text.trim();

        if text.is_empty() {
            return Err(Error::parse(raw, "empty selector"));
        }

        let predicate = if text.contains('=') {
            parse_key_value_form(raw, text)?
        } else if text.contains(':') {
            if section != Section::AllowedOrigins {
                return Err(Error::parse_with_hint(
                    raw,
                    "'Origin:Suite' syntax is only allowed in the Allowed-Origins section",
                    "use 'origin=...,suite=...' in Origins-Pattern",
                ));
            }
            parse_colon_form(raw, text)?
        } else if text == "*" {
            // A lone wildcard constrains nothing.
            Vec::new()
        } else {
            return Err(Error::parse_with_hint(
                raw,
                "expected 'Origin:Suite' or 'field=value[,field=value...]'",
                format!("to match an origin regardless of suite, use '{text}:*'"),
            ));
        };

        Ok(Selector {
            raw: raw.to_string(),
            section,
            predicate,
            unknown_variables: expansion.unknown_variables,
        })
    }

    /// Build a colon-form `Allowed-Origins` selector programmatically.
    ///
    /// `raw` is rendered canonically as `origin:suite`.
    pub fn allowed_origins(origin: &str, suite: &str) -> Selector {
        Selector {
            raw: format!("{origin}:{suite}"),
            section: Section::AllowedOrigins,
            predicate: vec![
                (Field::Origin, MatchValue::parse(origin)),
                (Field::Suite, MatchValue::parse(suite)),
            ],
            unknown_variables: Vec::new(),
        }
    }

    /// Build a key=value `Origins-Pattern` selector programmatically.
    ///
    /// `raw` is rendered canonically as `field=value,field=value`.
    pub fn origins_pattern(pairs: &[(Field, &str)]) -> Selector {
        let raw = pairs
            .iter()
            .map(|(field, value)| format!("{}={}", field.name(), value))
            .collect::<Vec<_>>()
            .join(",");
        Selector {
            raw,
            section: Section::OriginsPattern,
            predicate: pairs
                .iter()
                .map(|(field, value)| (*field, MatchValue::parse(value)))
                .collect(),
            unknown_variables: Vec::new(),
        }
    }

    /// The selector exactly as written in the configuration file.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The configuration section this selector belongs to.
    pub fn section(&self) -> Section {
        self.section
    }

    /// The parsed constraints, in source order.
    pub fn predicate(&self) -> &[(Field, MatchValue)] {
        &self.predicate
    }

    /// `${...}` tokens in `raw` that were not recognized during expansion.
    ///
    /// Left verbatim in the predicate values; callers may warn about them.
    pub fn unknown_variables(&self) -> &[String] {
        &self.unknown_variables
    }

    /// Check whether this selector admits the given repository.
    ///
    /// Pure conjunction over the predicate; see the module docs for the
    /// exact wildcard semantics.
    pub fn matches(&self, repo: &Repository) -> bool {
        self.predicate
            .iter()
            .all(|(field, value)| value.matches(field.of(repo)))
    }
}

/// Selector identity is value identity of `(section, raw)`; two selectors
/// written identically in the same section are the same configuration
/// entry.
impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.section == other.section && self.raw == other.raw
    }
}

impl Eq for Selector {}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.section, self.raw)
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Selector", 2)?;
        state.serialize_field("section", &self.section)?;
        state.serialize_field("selector", &self.raw)?;
        state.end()
    }
}

/// Parse `field=value[,field=value...]` into a predicate.
fn parse_key_value_form(raw: &str, text: &str) -> Result<Vec<(Field, MatchValue)>> {
    let mut predicate = Vec::new();

    for pair in text.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            return Err(Error::parse(raw, "empty field=value pair"));
        }
        let Some((name, value)) = pair.split_once('=') else {
            return Err(Error::parse(
                raw,
                format!("expected 'field=value', got '{pair}'"),
            ));
        };
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            return Err(Error::parse(raw, "empty field name"));
        }
        if value.is_empty() {
            return Err(Error::parse(
                raw,
                format!("empty value for field '{name}'"),
            ));
        }
        let Some(field) = Field::from_name(name) else {
            return Err(Error::parse_with_hint(
                raw,
                format!("unknown field name '{name}'"),
                suggestions::unknown_field_hint(name, FIELD_NAMES),
            ));
        };
        predicate.push((field, MatchValue::parse(value)));
    }

    Ok(predicate)
}

/// Parse `Origin:Suite` into a predicate.
fn parse_colon_form(raw: &str, text: &str) -> Result<Vec<(Field, MatchValue)>> {
    let (origin, suite) = text.split_once(':').expect("caller checked for ':'");
    let origin = origin.trim();
    let suite = suite.trim();
    if origin.is_empty() {
        return Err(Error::parse(raw, "empty origin before ':'"));
    }
    if suite.is_empty() {
        return Err(Error::parse_with_hint(
            raw,
            "empty suite after ':'",
            "use '*' to match any suite",
        ));
    }
    Ok(vec![
        (Field::Origin, MatchValue::parse(origin)),
        (Field::Suite, MatchValue::parse(suite)),
    ])
}
