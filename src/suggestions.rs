//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Following CLI recommendations,
//! errors should tell users what went wrong AND how to fix it.
//!
//! The most important consumer is the selector parser: a typo in a field
//! name (`orgin=Ubuntu`) is a hard error, and the hint attached here is the
//! difference between a cryptic failure and a one-keystroke fix.

use std::path::Path;

/// Hint text for an unknown selector field name.
///
/// Returns a did-you-mean suggestion when the name is close to a recognized
/// field or alias, otherwise lists the valid names.
pub fn unknown_field_hint(name: &str, valid_names: &[&str]) -> String {
    match find_similar(name, valid_names) {
        Some(suggestion) => format!("Did you mean '{suggestion}'?"),
        None => format!("Valid field names are: {}", valid_names.join(", ")),
    }
}

/// Generate an error for when no repository matches a selector the user is
/// trying to enable or disable.
pub fn no_matching_repository(selector: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "No repository on this system matches '{selector}'\n\n\
         hint: Run 'apt-uu-config show repos' to see the available repositories\n\
         hint: Run 'apt-uu-config suggest' for ready-made selectors"
    )
}

/// Generate an error for when `apt-cache` is unavailable.
///
/// Includes hints about the package providing it and the fixture override.
pub fn apt_cache_unavailable() -> String {
    "apt-cache command not found. Is APT installed? \
     Use --policy-file to read saved 'apt-cache policy' output instead"
        .to_string()
}

/// Generate an error for when the APT configuration directory is missing.
pub fn conf_dir_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "APT configuration directory not found: {path}\n\n\
         hint: The default is /etc/apt/apt.conf.d\n\
         hint: Use --apt-conf-dir or the APT_UU_CONF_DIR environment variable to override",
        path = path.display()
    )
}

/// Hint text for a write that failed with a permission error.
pub fn permission_denied() -> String {
    "Editing APT configuration requires root, try running with sudo".to_string()
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["origin", "suite", "codename", "label", "component", "site"];

    #[test]
    fn test_unknown_field_hint_suggests_similar() {
        let hint = unknown_field_hint("orgin", FIELDS);
        assert_eq!(hint, "Did you mean 'origin'?");
    }

    #[test]
    fn test_unknown_field_hint_lists_valid_for_very_different() {
        let hint = unknown_field_hint("foobar", FIELDS);
        assert!(hint.contains("Valid field names are:"));
        assert!(hint.contains("origin"));
        assert!(hint.contains("site"));
    }

    #[test]
    fn test_no_matching_repository_includes_hints() {
        let error = no_matching_repository("origin=Nowhere");
        let message = error.to_string();

        assert!(message.contains("No repository on this system matches"));
        assert!(message.contains("origin=Nowhere"));
        assert!(message.contains("show repos"));
        assert!(message.contains("suggest"));
    }

    #[test]
    fn test_conf_dir_not_found_includes_hints() {
        let error = conf_dir_not_found(Path::new("/nonexistent/apt.conf.d"));
        let message = error.to_string();

        assert!(message.contains("APT configuration directory not found"));
        assert!(message.contains("/nonexistent/apt.conf.d"));
        assert!(message.contains("--apt-conf-dir"));
        assert!(message.contains("APT_UU_CONF_DIR"));
    }

    #[test]
    fn test_permission_denied_suggests_sudo() {
        let hint = permission_denied();

        assert!(hint.contains("root"));
        assert!(hint.contains("sudo"));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("origin", "origin"), 0);
        assert_eq!(edit_distance("orgin", "origin"), 1);
        assert_eq!(edit_distance("suit", "suite"), 1);
        assert_eq!(edit_distance("sight", "site"), 2);
        assert_eq!(edit_distance("foobar", "origin"), 6);
    }

    #[test]
    fn test_find_similar() {
        assert_eq!(find_similar("orgin", FIELDS), Some("origin"));
        assert_eq!(find_similar("suit", FIELDS), Some("suite"));
        assert_eq!(find_similar("lable", FIELDS), Some("label"));
        assert_eq!(find_similar("foobar", FIELDS), None);
    }
}
