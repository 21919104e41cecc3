use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::models::{LeaderboardEntry, RunStats};
use crate::services::registry::RunRegistry;

/// Two columns, left text padded, right numbers right aligned.
fn plain_table(rows: &[(String, String)]) -> String {
    let left = rows.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    let right = rows.iter().map(|(_, r)| r.width()).max().unwrap_or(0);

    rows.iter()
        .map(|(l, r)| {
            let pad_left = " ".repeat(left - l.width());
            let pad_right = " ".repeat(right - r.width());
            format!("{l}{pad_left}  {pad_right}{r}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn summary_table(stats: &RunStats) -> String {
    let rows = [
        ("# Files", stats.files),
        ("Supported", stats.supported),
        ("Unsupported", stats.unsupported),
        ("Duplicates", stats.duplicates),
        ("Exceptions", stats.exceptions),
        ("# Sheets", stats.sheets),
        ("Empty", stats.empty_sheets),
        ("Date Issues", stats.date_issues),
        ("Heading", stats.headings_found),
        ("No Heading", stats.headings_missing),
    ]
    .map(|(label, count)| (label.to_string(), count.to_string()));

    plain_table(&rows)
}

pub fn leaderboard_table(entries: &[LeaderboardEntry]) -> String {
    let rows: Vec<_> = entries
        .iter()
        .map(|e| (e.name.clone(), e.wins.to_string()))
        .collect();
    plain_table(&rows)
}

#[derive(Debug, Serialize)]
struct SkippedFiles<'a> {
    unsupported: &'a [PathBuf],
    duplicates: &'a [PathBuf],
    exceptions: &'a [PathBuf],
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a RunStats,
    leaderboard: Vec<LeaderboardEntry>,
    skipped: SkippedFiles<'a>,
}

/// Counters, leaderboard and the files left out of the tally.
pub fn json_report(registry: &RunRegistry) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport {
        summary: registry.stats(),
        leaderboard: registry.leaderboard(),
        skipped: SkippedFiles {
            unsupported: &registry.unsupported_files,
            duplicates: &registry.duplicate_files,
            exceptions: &registry.exception_files,
        },
    })?)
}
