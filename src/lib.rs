//! # apt-uu-config Library
//!
//! This library provides the core functionality for auditing and editing
//! which APT repositories are eligible for unattended automatic upgrades on
//! a Debian/Ubuntu-family host. It is designed to be used by the
//! `apt-uu-config` command-line tool but can also be integrated into other
//! applications that need to reason about unattended-upgrades
//! configuration.
//!
//! ## Quick Example
//!
//! ```
//! use apt_uu_config::repository::Repository;
//! use apt_uu_config::selector::{Section, Selector};
//! use apt_uu_config::vars::DistroContext;
//!
//! let ctx = DistroContext::new("Ubuntu", "noble");
//! let selector = Selector::parse(
//!     "${distro_id}:${distro_codename}-security",
//!     Section::AllowedOrigins,
//!     &ctx,
//! )
//! .unwrap();
//!
//! let repo = Repository {
//!     origin: Some("Ubuntu".to_string()),
//!     suite: Some("noble-security".to_string()),
//!     ..Default::default()
//! };
//! assert!(selector.matches(&repo));
//! ```
//!
//! ## Core Concepts
//!
//! The library correlates independent data sources:
//!
//! - **Repositories (`repository`, `policy`)**: immutable snapshots of the
//!   repositories configured on the machine, parsed from `apt-cache policy`
//!   output.
//! - **Selectors (`selector`, `vars`)**: the configured unattended-upgrades
//!   patterns, parsed from `Allowed-Origins` / `Origins-Pattern` entries
//!   with distribution-variable expansion, evaluated as conjunctive
//!   per-field predicates with edge-wildcard support.
//! - **Configuration state (`selector_set`, `apt_conf`, `distro`)**: the
//!   global on/off switch plus the active selectors, loaded from
//!   `/etc/apt/apt.conf.d/` and written back with byte-faithful edits.
//! - **Suggestions (`suggest`)**: given a repository with partial metadata,
//!   the most specific selector that would admit it.
//!
//! Everything is purely computational and single-threaded: the engine takes
//! a fully loaded, immutable snapshot per invocation and performs no I/O
//! outside `policy`, `apt_conf`, and `distro`.

pub mod apt_conf;
pub mod defaults;
pub mod distro;
pub mod error;
pub mod output;
pub mod policy;
pub mod repository;
pub mod selector;
pub mod selector_set;
pub mod suggest;
pub mod suggestions;
pub mod vars;
