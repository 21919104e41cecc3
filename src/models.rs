use serde::Serialize;

use crate::services::names;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerName {
    Known { first: String, surname: String },
    Unknown,
}

/// A winner as tallied across the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runner {
    pub display_name: String,
    pub name: RunnerName,
    pub wins: u32,
}

impl Runner {
    /// `None` when nothing is left of the name after normalization.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let display_name = names::normalize(raw);
        if display_name.is_empty() {
            return None;
        }
        let name = names::split_name(&display_name);
        Some(Self {
            display_name,
            name,
            wins: 1,
        })
    }

    pub fn identity_key(&self) -> String {
        match &self.name {
            RunnerName::Known { .. } => names::identity_key(&self.display_name),
            RunnerName::Unknown => self.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub wins: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub files: usize,
    pub supported: usize,
    pub unsupported: usize,
    pub duplicates: usize,
    pub exceptions: usize,
    pub sheets: usize,
    pub empty_sheets: usize,
    pub date_issues: usize,
    pub headings_found: usize,
    pub headings_missing: usize,
}
