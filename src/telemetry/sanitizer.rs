// SPDX-License-Identifier: MPL-2.0
//! Scrubbing of error text before it becomes telemetry.
//!
//! The workbench renders health records, so error messages can carry more
//! than a stack of file paths. Paths, e-mail addresses and SSN-shaped numbers
//! are replaced with placeholders.

use std::sync::LazyLock;

use regex::Regex;

static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Path continues until whitespace or a common delimiter.
    Regex::new(concat!(
        r#"("#,
        r#"/home/[^\s"'()\[\]]+"#,
        r#"|/Users/[^\s"'()\[\]]+"#,
        r#"|/tmp/[^\s"'()\[\]]+"#,
        r#"|/var/[^\s"'()\[\]]+"#,
        r#"|~/[^\s"'()\[\]]+"#,
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#,
        r#")"#,
    ))
    .expect("path regex should compile")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("email regex should compile")
});

static SSN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("ssn regex should compile")
});

/// Replaces sensitive fragments of `message` with placeholders.
///
/// ```
/// use alitheia_workbench::telemetry::sanitize_message;
///
/// assert_eq!(
///     sanitize_message("cannot read /home/ana/case.json for ana@example.com"),
///     "cannot read <path> for <email>"
/// );
/// assert_eq!(sanitize_message("SSN 123-45-6789 rejected"), "SSN <ssn> rejected");
/// assert_eq!(sanitize_message("Invalid format"), "Invalid format");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    let scrubbed = PATH_PATTERN.replace_all(message, "<path>");
    let scrubbed = EMAIL_PATTERN.replace_all(&scrubbed, "<email>");
    SSN_PATTERN.replace_all(&scrubbed, "<ssn>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_unix_home_paths() {
        let msg = "Failed to open /home/user/cases/1042.json";
        assert_eq!(sanitize_message(msg), "Failed to open <path>");
    }

    #[test]
    fn removes_windows_paths() {
        let msg = r"Cannot read C:\Users\name\export.csv now";
        assert_eq!(sanitize_message(msg), "Cannot read <path> now");
    }

    #[test]
    fn removes_email_addresses() {
        let msg = "notify failed for jane.doe+uw@insurer.co.uk";
        assert_eq!(sanitize_message(msg), "notify failed for <email>");
    }

    #[test]
    fn removes_ssn_shaped_numbers() {
        let msg = "applicant 078-05-1120 missing";
        assert_eq!(sanitize_message(msg), "applicant <ssn> missing");
    }

    #[test]
    fn leaves_other_numbers_alone() {
        let msg = "risk score 87 on case C-1042 (2024-03-01)";
        assert_eq!(sanitize_message(msg), msg);
    }

    #[test]
    fn preserves_quoted_structure() {
        let msg = "load '/tmp/fixture.json' failed";
        assert_eq!(sanitize_message(msg), "load '<path>' failed");
    }
}
