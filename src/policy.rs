//! # APT Policy Parsing
//!
//! This module turns `apt-cache policy` output into [`Repository`]
//! snapshots. It is the only source of repository metadata the tool uses;
//! everything downstream (matching, suggestions, display) works off the
//! descriptors built here.
//!
//! A policy entry looks like:
//!
//! ```text
//!  500 http://archive.ubuntu.com/ubuntu noble/main amd64 Packages
//!      release v=24.04,o=Ubuntu,a=noble,n=noble,l=Ubuntu,c=main,b=amd64
//!      origin archive.ubuntu.com
//! ```
//!
//! The first line carries priority and URL, the `release` line carries the
//! Release file tags, and the `origin` line names the host. `site` is
//! derived from the URL's hostname when possible, with the `origin` line as
//! a fallback (mirror:// and file: URLs often have no usable host).
//!
//! The text parser is total: entry lines that do not fit the shape are
//! skipped, never fatal. Only running `apt-cache` itself can fail.

use std::process::Command;

use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::suggestions;

/// How many lines below an entry line the release/origin details may
/// appear.
const DETAIL_LOOKAHEAD: usize = 4;

/// Run `apt-cache policy` and parse its output.
pub fn load_system_policy() -> Result<Vec<Repository>> {
    let output = Command::new("apt-cache").arg("policy").output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::PolicyRead {
                message: "apt-cache command not found".to_string(),
                hint: Some(suggestions::apt_cache_unavailable()),
            }
        } else {
            Error::PolicyRead {
                message: format!("failed to run apt-cache policy: {e}"),
                hint: None,
            }
        }
    })?;

    if !output.status.success() {
        return Err(Error::PolicyRead {
            message: format!(
                "apt-cache policy failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            hint: None,
        });
    }

    Ok(parse_policy_output(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse the text output of `apt-cache policy` into repositories.
///
/// One [`Repository`] per entry line; malformed lines are skipped.
pub fn parse_policy_output(output: &str) -> Vec<Repository> {
    let lines: Vec<&str> = output.lines().collect();
    let mut repositories = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if is_entry_line(line) {
            if let Some(repo) = parse_entry(line, &lines, index) {
                repositories.push(repo);
            }
        }
    }

    repositories
}

/// Entry lines are indented and start with the numeric priority.
fn is_entry_line(line: &str) -> bool {
    line.starts_with(char::is_whitespace)
        && line
            .trim_start()
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
}

/// Parse one entry line plus its detail lines into a repository.
fn parse_entry(entry_line: &str, lines: &[&str], index: usize) -> Option<Repository> {
    let mut parts = entry_line.split_whitespace();
    let priority: i32 = parts.next()?.parse().ok()?;
    let url = parts.next()?.to_string();

    let mut site = site_from_url(&url);
    let mut release = ReleaseTags::default();

    for detail in lines
        .iter()
        .skip(index + 1)
        .take(DETAIL_LOOKAHEAD)
        .map(|l| l.trim())
    {
        // The next entry line ends this entry's details.
        if detail.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            break;
        }
        if let Some(tags) = detail.strip_prefix("release ") {
            release = ReleaseTags::parse(tags);
        } else if let Some(host) = detail.strip_prefix("origin ") {
            if site.is_none() {
                site = Some(host.trim().to_string()).filter(|h| !h.is_empty());
            }
        }
    }

    Some(Repository {
        origin: release.origin,
        suite: release.suite,
        codename: release.codename,
        label: release.label,
        component: release.component,
        site,
        priority,
        url,
        architecture: release.architecture,
        version: release.version,
    })
}

/// Hostname of a package list URL, when it has one.
fn site_from_url(raw: &str) -> Option<String> {
    if let Ok(parsed) = url::Url::parse(raw) {
        if let Some(host) = parsed.host_str() {
            return Some(host.to_string());
        }
    }
    // mirror:// and similar schemes the url crate treats as opaque.
    let rest = raw.split_once("://")?.1;
    let host = rest.split('/').next()?;
    (!host.is_empty()).then(|| host.to_string())
}

/// The `k=v` tags from a `release` detail line.
#[derive(Debug, Default)]
struct ReleaseTags {
    origin: Option<String>,
    suite: Option<String>,
    codename: Option<String>,
    label: Option<String>,
    component: Option<String>,
    architecture: Option<String>,
    version: Option<String>,
}

impl ReleaseTags {
    fn parse(tags: &str) -> Self {
        let mut out = Self::default();
        for pair in tags.split(',') {
            let Some((key, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let value = Some(value.trim().to_string());
            match key.trim() {
                "o" => out.origin = value,
                "a" => out.suite = value,
                "n" => out.codename = value,
                "l" => out.label = value,
                "c" => out.component = value,
                "b" => out.architecture = value,
                "v" => out.version = value,
                _ => {}
            }
        }
        out
    }
}
