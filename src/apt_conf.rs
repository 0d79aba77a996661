//! # APT Configuration Reading and Writing
//!
//! This module handles the on-disk unattended-upgrades configuration under
//! `/etc/apt/apt.conf.d/`:
//!
//! - `20auto-upgrades`: the global toggle,
//!   `APT::Periodic::Unattended-Upgrade "1";`
//! - `50unattended-upgrades`: the selector lists, double-quoted strings
//!   inside `Unattended-Upgrade::Allowed-Origins { ... };` and
//!   `Unattended-Upgrade::Origins-Pattern { ... };` blocks
//!
//! Reading tolerates a missing file (disabled, no selectors) and skips `//`
//! and `#` comment lines inside blocks. Individual selector strings that
//! fail to parse are collected and reported per line rather than aborting
//! the whole load; a corrupted selector is surfaced, never silently treated
//! as "matches nothing".
//!
//! Write-back is line-oriented surgery on the existing file text: added and
//! removed selectors use the selector's `raw` string verbatim, everything
//! else in the file is left byte-for-byte untouched, and a `.bak` copy is
//! made beside each file before the first modification.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Error, Result};
use crate::selector::{Section, Selector};
use crate::selector_set::SelectorSet;
use crate::vars::DistroContext;

/// File carrying the global toggle.
pub const AUTO_UPGRADES_FILE: &str = "20auto-upgrades";
/// File carrying the selector blocks.
pub const UNATTENDED_UPGRADES_FILE: &str = "50unattended-upgrades";
/// The APT key for the global toggle.
pub const PERIODIC_KEY: &str = "APT::Periodic::Unattended-Upgrade";

/// The result of loading the configuration.
///
/// `failures` holds the per-line parse errors for selectors that were
/// skipped; callers decide how loudly to report them.
#[derive(Debug)]
pub struct LoadReport {
    pub set: SelectorSet,
    pub failures: Vec<Error>,
}

/// Handle on an `apt.conf.d` style configuration directory.
#[derive(Debug, Clone)]
pub struct AptConfDir {
    root: PathBuf,
}

impl AptConfDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the global-toggle file.
    pub fn auto_upgrades_path(&self) -> PathBuf {
        self.root.join(AUTO_UPGRADES_FILE)
    }

    /// Path of the selector file.
    pub fn unattended_upgrades_path(&self) -> PathBuf {
        self.root.join(UNATTENDED_UPGRADES_FILE)
    }

    /// Read the global toggle. A missing file means disabled.
    pub fn globally_enabled(&self) -> Result<bool> {
        let Some(content) = self.read_optional(&self.auto_upgrades_path())? else {
            return Ok(false);
        };
        let re = periodic_re();
        Ok(re
            .captures(&content)
            .is_some_and(|cap| cap[1].trim() == "1"))
    }

    /// Read the raw selector strings with their sections, in file order.
    /// A missing file yields an empty list.
    pub fn raw_selectors(&self) -> Result<Vec<(Section, String)>> {
        let Some(content) = self.read_optional(&self.unattended_upgrades_path())? else {
            return Ok(Vec::new());
        };

        let mut selectors = Vec::new();
        for section in [Section::AllowedOrigins, Section::OriginsPattern] {
            if let Some(body) = block_body(&content, section) {
                for raw in quoted_strings(body) {
                    selectors.push((section, raw));
                }
            }
        }
        Ok(selectors)
    }

    /// Load the full configuration snapshot: toggle plus parsed selectors.
    ///
    /// Selectors that fail to parse are skipped and returned in
    /// [`LoadReport::failures`]; selectors referencing unknown `${...}`
    /// variables load normally but are warned about.
    pub fn load(&self, ctx: &DistroContext) -> Result<LoadReport> {
        let globally_enabled = self.globally_enabled()?;
        let mut selectors = Vec::new();
        let mut failures = Vec::new();

        for (section, raw) in self.raw_selectors()? {
            match Selector::parse(&raw, section, ctx) {
                Ok(selector) => {
                    for variable in selector.unknown_variables() {
                        log::warn!(
                            "selector {:?} references unrecognized variable {}",
                            selector.raw(),
                            variable
                        );
                    }
                    selectors.push(selector);
                }
                Err(e) => failures.push(e),
            }
        }

        Ok(LoadReport {
            set: SelectorSet::new(globally_enabled, selectors, ctx.clone()),
            failures,
        })
    }

    /// Set the global toggle, creating `20auto-upgrades` if needed.
    ///
    /// Returns the path of the `.bak` backup when one was made.
    pub fn set_globally_enabled(&self, enabled: bool) -> Result<Option<PathBuf>> {
        let path = self.auto_upgrades_path();
        let value = if enabled { "1" } else { "0" };

        let (content, backup) = match self.read_optional(&path)? {
            Some(existing) => {
                let backup = self.backup(&path)?;
                let re = periodic_re();
                let updated = if re.is_match(&existing) {
                    re.replace(&existing, format!("{PERIODIC_KEY} \"{value}\";"))
                        .into_owned()
                } else {
                    let mut out = existing;
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push_str(&format!("{PERIODIC_KEY} \"{value}\";\n"));
                    out
                };
                (updated, Some(backup))
            }
            None => (
                format!(
                    "APT::Periodic::Update-Package-Lists \"1\";\n{PERIODIC_KEY} \"{value}\";\n"
                ),
                None,
            ),
        };

        self.write(&path, &content)?;
        Ok(backup)
    }

    /// Append a selector to its section block, creating the file or block
    /// if needed. Returns false (and changes nothing) when the exact raw
    /// string is already present in the block.
    pub fn add_selector(&self, selector: &Selector) -> Result<bool> {
        let path = self.unattended_upgrades_path();
        let existing = self.read_optional(&path)?;
        let mut content = existing.clone().unwrap_or_default();
        let entry = format!("\t\"{}\";\n", selector.raw());

        match block_body_span(&content, selector.section()) {
            Some((start, end)) => {
                if quoted_strings(&content[start..end])
                    .iter()
                    .any(|raw| raw == selector.raw())
                {
                    return Ok(false);
                }
                let mut insertion = entry;
                if !content[start..end].ends_with('\n') {
                    insertion = format!("\n{insertion}");
                }
                content.insert_str(end, &insertion);
            }
            None => {
                if !content.is_empty() && !content.ends_with('\n') {
                    content.push('\n');
                }
                content.push_str(&format!(
                    "{} {{\n{entry}}};\n",
                    selector.section().config_key()
                ));
            }
        }

        if existing.is_some() {
            self.backup(&path)?;
        }
        self.write(&path, &content)?;
        Ok(true)
    }

    /// Remove every line carrying the selector's exact raw string from its
    /// section block. Returns false (no write, no backup) when absent.
    pub fn remove_selector(&self, selector: &Selector) -> Result<bool> {
        let path = self.unattended_upgrades_path();
        let Some(content) = self.read_optional(&path)? else {
            return Ok(false);
        };
        let Some((start, end)) = block_body_span(&content, selector.section()) else {
            return Ok(false);
        };

        let needle = format!("\"{}\";", selector.raw());
        let body = &content[start..end];
        let kept: Vec<&str> = body
            .split_inclusive('\n')
            .filter(|line| line.trim() != needle)
            .collect();
        let new_body: String = kept.concat();
        if new_body.len() == body.len() {
            return Ok(false);
        }

        let mut updated = String::with_capacity(content.len());
        updated.push_str(&content[..start]);
        updated.push_str(&new_body);
        updated.push_str(&content[end..]);

        self.backup(&path)?;
        self.write(&path, &updated)?;
        Ok(true)
    }

    fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::ConfigRead {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| write_error(path, &e))
    }

    /// Copy `file` to `file.bak` before modifying it.
    fn backup(&self, path: &Path) -> Result<PathBuf> {
        let backup = PathBuf::from(format!("{}.bak", path.display()));
        fs::copy(path, &backup).map_err(|e| write_error(&backup, &e))?;
        Ok(backup)
    }
}

impl Default for AptConfDir {
    fn default() -> Self {
        Self::new(crate::defaults::default_conf_dir())
    }
}

/// Map a failed write to the typed error, with a sudo hint for permission
/// failures. Editing /etc/apt/apt.conf.d as a regular user is the most
/// common way these writes fail.
fn write_error(path: &Path, e: &std::io::Error) -> Error {
    let hint = (e.kind() == std::io::ErrorKind::PermissionDenied)
        .then(crate::suggestions::permission_denied);
    Error::ConfigWrite {
        path: path.display().to_string(),
        message: e.to_string(),
        hint,
    }
}

fn periodic_re() -> Regex {
    Regex::new(&format!(
        r#"{}\s+"([^"]*)"\s*;"#,
        regex::escape(PERIODIC_KEY)
    ))
    .expect("static regex")
}

/// The text between the braces of a section's block, if the block exists.
fn block_body(content: &str, section: Section) -> Option<&str> {
    block_body_span(content, section).map(|(start, end)| &content[start..end])
}

/// Byte span of a section block's body within `content`.
fn block_body_span(content: &str, section: Section) -> Option<(usize, usize)> {
    let re = Regex::new(&format!(
        r"(?s){}\s*\{{(.*?)\}}\s*;",
        regex::escape(section.config_key())
    ))
    .expect("static regex");
    re.captures(content)
        .and_then(|cap| cap.get(1))
        .map(|m| (m.start(), m.end()))
}

/// The double-quoted strings in a block body, comment lines skipped.
fn quoted_strings(body: &str) -> Vec<String> {
    let quoted = Regex::new(r#""([^"]*)""#).expect("static regex");
    body.lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//") && !trimmed.starts_with('#')
        })
        .flat_map(|line| {
            quoted
                .captures_iter(line)
                .map(|cap| cap[1].to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}
