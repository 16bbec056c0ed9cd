//! Human readable output for the commands. Everything here goes to stdout;
//! diagnostics go through `tracing` instead.

use crate::baseline::Baseline;
use crate::ops::{AddResult, RemoveOutcome, RemoveResult, UpdateResult};
use crate::reconcile::{CheckReport, CheckStatus};

const RULE_WIDTH: usize = 60;

/// Hex digits of a hash shown when reporting a modification.
const CHECK_HASH_PREFIX: usize = 16;

/// Hex digits of a hash shown in listings.
const LIST_HASH_PREFIX: usize = 32;

/// `added_date` is displayed down to whole seconds.
const ADDED_DATE_DISPLAY_LEN: usize = 19;

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Per-file results followed by the summary. Intact files are only listed
/// when `show_intact` is set.
pub fn format_check_report(report: &CheckReport, show_intact: bool) -> Vec<String> {
    if report.entries.is_empty() {
        return vec!["No files are being monitored. Use 'add' command first.".to_string()];
    }

    let mut lines = vec![
        format!("Checking integrity of {} file(s)...", report.entries.len()),
        String::new(),
    ];

    for entry in &report.entries {
        match &entry.status {
            CheckStatus::Intact => {
                if show_intact {
                    lines.push(format!("INTACT:     {}", entry.path));
                }
            }
            CheckStatus::Deleted => lines.push(format!("DELETED:    {}", entry.path)),
            CheckStatus::Modified {
                stored_sha256,
                current_sha256,
            } => {
                lines.push(format!("MODIFIED:   {}", entry.path));
                lines.push(format!(
                    "   original hash: {}",
                    display_hash(stored_sha256.as_deref(), CHECK_HASH_PREFIX)
                ));
                lines.push(format!(
                    "   current hash:  {}",
                    truncate_sha256(current_sha256, CHECK_HASH_PREFIX)
                ));
            }
            CheckStatus::Unreadable { error } => {
                lines.push(format!("UNREADABLE: {}", entry.path));
                lines.push(format!("   error: {}", error));
            }
        }
    }

    let counts = report.counts();
    let rule = "=".repeat(RULE_WIDTH);

    lines.push(String::new());
    lines.push(rule.clone());
    lines.push("INTEGRITY CHECK SUMMARY".to_string());
    lines.push(rule.clone());
    lines.push(format!("Intact:     {} file(s)", counts.intact));
    lines.push(format!("Modified:   {} file(s)", counts.modified));
    lines.push(format!("Deleted:    {} file(s)", counts.deleted));
    lines.push(format!("Unreadable: {} file(s)", counts.unreadable));
    lines.push(rule);

    if counts.all_intact() {
        lines.push(String::new());
        lines.push("All monitored files are intact.".to_string());
    }

    lines
}

pub fn format_listing(baseline: &Baseline) -> Vec<String> {
    if baseline.is_empty() {
        return vec!["No files are being monitored.".to_string()];
    }

    let mut lines = vec![
        format!("Monitored files ({}):", baseline.len()),
        String::new(),
    ];

    for (path, record) in baseline.iter() {
        lines.push(path.clone());
        lines.push(format!(
            "   hash:  {}",
            display_hash(record.hash.as_deref(), LIST_HASH_PREFIX)
        ));
        lines.push(format!("   size:  {} bytes", record.size));
        lines.push(format!(
            "   added: {}",
            truncate_chars(&record.added_date, ADDED_DATE_DISPLAY_LEN)
        ));
        lines.push(String::new());
    }

    lines
}

pub fn format_add_result(result: &AddResult) -> Vec<String> {
    let mut lines: Vec<String> = result
        .added
        .iter()
        .map(|path| format!("Added: {}", path))
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Added {} file(s) to monitoring",
        result.added.len()
    ));
    lines
}

pub fn format_remove_result(result: &RemoveResult) -> Vec<String> {
    let mut lines: Vec<String> = result
        .outcomes
        .iter()
        .map(|outcome| match outcome {
            RemoveOutcome::Removed(path) => format!("Removed: {}", path.display()),
            RemoveOutcome::NotMonitored(path) => format!("Not monitored: {}", path.display()),
        })
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Removed {} file(s) from monitoring",
        result.removed_count()
    ));
    lines
}

/// `explicit` is true when the user named the files to update, in which case
/// each one is confirmed individually.
pub fn format_update_result(result: &UpdateResult, explicit: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if explicit {
        lines.extend(
            result
                .updated
                .iter()
                .map(|path| format!("Updated: {}", path.display())),
        );
        lines.push(String::new());
        lines.push(format!("Updated {} file(s)", result.updated.len()));
    } else {
        lines.push(format!(
            "Updated baseline for {} file(s)",
            result.updated.len()
        ));
    }
    lines
}

/// Shown in place of a hash for records that do not have one.
const NO_HASH: &str = "(none)";

fn display_hash(sha256: Option<&str>, len: usize) -> String {
    sha256.map_or_else(|| NO_HASH.to_string(), |h| truncate_sha256(h, len))
}

fn truncate_sha256(sha256: &str, len: usize) -> String {
    if sha256.len() > len {
        format!("{}...", truncate_chars(sha256, len))
    } else {
        sha256.to_string()
    }
}

/// The first `len` characters of `s`. Never splits a character, even if the
/// store was hand edited to hold something other than ASCII.
fn truncate_chars(s: &str, len: usize) -> &str {
    match s.char_indices().nth(len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
