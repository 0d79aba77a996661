//! # Distribution Detection
//!
//! Determines the distribution id and codename used for `${distro_id}` /
//! `${distro_codename}` expansion. The primary source is `lsb_release`,
//! which is what unattended-upgrades itself uses; when that is unavailable
//! the module falls back to parsing `/etc/os-release`.
//!
//! Note the two sources disagree on capitalization: `lsb_release -is`
//! prints `Ubuntu` while os-release has `ID=ubuntu`. Values are used
//! verbatim from whichever source answered, matching unattended-upgrades'
//! own behavior, and selector matching stays case-sensitive either way.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};
use crate::vars::DistroContext;

const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Detect the distribution context of the running system.
pub fn detect() -> Result<DistroContext> {
    match from_lsb_release() {
        Ok(ctx) => Ok(ctx),
        Err(lsb_error) => {
            log::debug!("lsb_release unavailable ({lsb_error}), trying os-release");
            from_os_release(Path::new(OS_RELEASE_PATH)).map_err(|_| lsb_error)
        }
    }
}

/// Query `lsb_release -is` / `-cs`.
fn from_lsb_release() -> Result<DistroContext> {
    let id = lsb_release_value("-is")?;
    let codename = lsb_release_value("-cs")?;
    if id.is_empty() || codename.is_empty() {
        return Err(Error::DistroDetect {
            message: "lsb_release returned empty values".to_string(),
            hint: None,
        });
    }
    Ok(DistroContext::new(id, codename))
}

fn lsb_release_value(flag: &str) -> Result<String> {
    let output = Command::new("lsb_release").arg(flag).output().map_err(|e| {
        Error::DistroDetect {
            message: format!("failed to run lsb_release: {e}"),
            hint: Some("install the lsb-release package, or pass --distro-id/--distro-codename".to_string()),
        }
    })?;
    if !output.status.success() {
        return Err(Error::DistroDetect {
            message: format!(
                "lsb_release {flag} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            hint: None,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Parse an os-release file (`ID=` and `VERSION_CODENAME=`).
fn from_os_release(path: &Path) -> Result<DistroContext> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::DistroDetect {
        message: format!("failed to read {}: {e}", path.display()),
        hint: None,
    })?;
    let (id, codename) = parse_os_release(&content);
    match (id, codename) {
        (Some(id), Some(codename)) => Ok(DistroContext::new(id, codename)),
        _ => Err(Error::DistroDetect {
            message: format!(
                "{} is missing ID or VERSION_CODENAME",
                path.display()
            ),
            hint: Some("pass --distro-id and --distro-codename explicitly".to_string()),
        }),
    }
}

/// Extract `ID` and `VERSION_CODENAME` from os-release text.
fn parse_os_release(content: &str) -> (Option<String>, Option<String>) {
    let mut id = None;
    let mut codename = None;
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim() {
            "ID" => id = Some(value),
            "VERSION_CODENAME" => codename = Some(value),
            _ => {}
        }
    }
    (id, codename)
}
