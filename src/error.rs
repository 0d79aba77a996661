//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `apt-uu-config` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures and ensure
//!   type safety.
//!
//! Two rules shape the taxonomy:
//!
//! - A malformed selector string is always a `SelectorParse` error, never a
//!   selector that silently matches nothing. Typos in field names must fail
//!   loudly, otherwise a misspelled pattern would widen or narrow the set of
//!   auto-upgraded repositories without anyone noticing.
//! - Matching and query functions never fail once their inputs are valid
//!   typed values. All validation happens at the parse boundary.

use thiserror::Error;

/// Main error type for apt-uu-config operations
#[derive(Error, Debug)]
pub enum Error {
    /// A selector string in the unattended-upgrades configuration could not
    /// be parsed.
    ///
    /// Includes the offending raw string, the specific parsing issue, and
    /// optionally a hint about how to fix it.
    #[error("Invalid selector {raw:?}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    SelectorParse {
        raw: String,
        message: String,
        /// Optional hint for how to fix the selector
        hint: Option<String>,
    },

    /// Repository information could not be obtained from `apt-cache policy`.
    #[error("Failed to read repository information: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    PolicyRead {
        message: String,
        /// Optional hint for how to resolve the issue
        hint: Option<String>,
    },

    /// An APT configuration fragment could not be read.
    #[error("Failed to read {path}: {message}")]
    ConfigRead { path: String, message: String },

    /// An APT configuration fragment could not be written.
    #[error("Failed to write {path}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigWrite {
        path: String,
        message: String,
        /// Optional hint for how to resolve the issue
        hint: Option<String>,
    },

    /// The distribution id or codename could not be determined.
    #[error("Failed to detect distribution: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    DistroDetect {
        message: String,
        /// Optional hint for how to resolve the issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Build a `SelectorParse` error without a hint.
    pub(crate) fn parse(raw: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SelectorParse {
            raw: raw.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Build a `SelectorParse` error with a hint.
    pub(crate) fn parse_with_hint(
        raw: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Error::SelectorParse {
            raw: raw.into(),
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
