use std::collections::HashSet;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::models::{LeaderboardEntry, Runner, RunStats};
use crate::services::excel::ResultFile;

/// Everything tallied over one run: dedup hashes, counters and winners.
#[derive(Debug, Default)]
pub struct RunRegistry {
    seen_hashes: HashSet<String>,
    stats: RunStats,
    winners: IndexMap<String, Runner>,
    pub unsupported_files: Vec<PathBuf>,
    pub duplicate_files: Vec<PathBuf>,
    pub exception_files: Vec<PathBuf>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn record_file_seen(&mut self) {
        self.stats.files += 1;
    }

    /// Remembers `hash`; false when it was already recorded this run.
    pub fn insert_hash(&mut self, hash: String) -> bool {
        self.seen_hashes.insert(hash)
    }

    pub fn record_unsupported(&mut self, path: PathBuf) {
        self.stats.unsupported += 1;
        self.unsupported_files.push(path);
    }

    pub fn record_duplicate(&mut self, path: PathBuf) {
        self.stats.duplicates += 1;
        self.duplicate_files.push(path);
    }

    pub fn record_exception(&mut self, path: PathBuf) {
        self.stats.exceptions += 1;
        self.exception_files.push(path);
    }

    pub fn record_date_issue(&mut self) {
        self.stats.date_issues += 1;
    }

    /// Folds a successfully opened file into the counters and the tally.
    pub fn record_file(&mut self, file: &ResultFile) {
        self.stats.supported += 1;
        self.stats.sheets += file.sheet_count();
        self.stats.empty_sheets += file.empty_sheet_count();
        self.stats.headings_found += file.headings_found();
        self.stats.headings_missing += file.headings_missing();

        for winner in file.winners().into_iter().flatten() {
            self.add_winner(winner);
        }
    }

    pub fn add_winner(&mut self, raw_name: &str) {
        let Some(runner) = Runner::from_raw(raw_name) else {
            return;
        };

        self.winners
            .entry(runner.identity_key())
            .and_modify(|existing| existing.wins += 1)
            .or_insert(runner);
    }

    /// Runners by wins, most first; ties stay in first-seen order.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut runners: Vec<&Runner> = self.winners.values().collect();
        runners.sort_by(|a, b| b.wins.cmp(&a.wins));
        runners
            .into_iter()
            .map(|r| LeaderboardEntry {
                name: r.display_name.clone(),
                wins: r.wins,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swapped_names_fold_together() {
        let mut registry = RunRegistry::new();
        for name in ["John Smith", "Smith John", "Jane Doe"] {
            registry.add_winner(name);
        }

        let board = registry.leaderboard();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0], LeaderboardEntry { name: "John Smith".into(), wins: 2 });
        assert_eq!(board[1], LeaderboardEntry { name: "Jane Doe".into(), wins: 1 });
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let mut registry = RunRegistry::new();
        for name in ["Cara Bell", "Abe Moss", "Dan Fox", "Abe Moss"] {
            registry.add_winner(name);
        }

        let names: Vec<_> = registry.leaderboard().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Abe Moss", "Cara Bell", "Dan Fox"]);
    }

    #[test]
    fn blank_names_are_ignored() {
        let mut registry = RunRegistry::new();
        registry.add_winner("  ");
        registry.add_winner("\"*\"");
        assert!(registry.leaderboard().is_empty());
    }

    #[test]
    fn hashes_are_remembered() {
        let mut registry = RunRegistry::new();
        assert!(registry.insert_hash("abc".into()));
        assert!(!registry.insert_hash("abc".into()));
    }
}
