//! Header synonyms and the wheelchair exclusion list.
//!
//! Header cells are compared after [`normalize_header`]: lower case with all
//! whitespace removed. Matching is exact string equality.

use crate::services::names::strip_excessive_spaces;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalField {
    Position,
    FirstName,
    Surname,
    FullName,
    Club,
    Category,
    ChipTime,
    FinishTime,
    Bib,
    Lap,
    Distance,
}

impl CanonicalField {
    /// Table order; the first field whose literals match a cell claims it.
    pub const ALL: [CanonicalField; 11] = [
        CanonicalField::Position,
        CanonicalField::FirstName,
        CanonicalField::Surname,
        CanonicalField::FullName,
        CanonicalField::Club,
        CanonicalField::Category,
        CanonicalField::ChipTime,
        CanonicalField::FinishTime,
        CanonicalField::Bib,
        CanonicalField::Lap,
        CanonicalField::Distance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalField::Position => "position",
            CanonicalField::FirstName => "first_name",
            CanonicalField::Surname => "surname",
            CanonicalField::FullName => "full_name",
            CanonicalField::Club => "club",
            CanonicalField::Category => "category",
            CanonicalField::ChipTime => "chip_time",
            CanonicalField::FinishTime => "finish_time",
            CanonicalField::Bib => "bib",
            CanonicalField::Lap => "lap",
            CanonicalField::Distance => "distance",
        }
    }

    pub fn literals(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Position => &["pos", "pl.", "place"],
            CanonicalField::FirstName => &["firstname", "forename", "name1"],
            CanonicalField::Surname => &["lastname", "surname", "name2"],
            CanonicalField::FullName => &["name", "athlete"],
            CanonicalField::Club => &["club", "team"],
            CanonicalField::Category => &["cat", "age", "group", "category", "gender"],
            CanonicalField::ChipTime => &["chip", "net"],
            CanonicalField::FinishTime => &["gun", "finish", "time", "gross"],
            CanonicalField::Bib => &["bib", "num"],
            CanonicalField::Lap => &["lap"],
            CanonicalField::Distance => &["half", "km", "mile"],
        }
    }
}

/// Athletes racing in the wheelchair category, lower case.
pub const WHEELCHAIR_ATHLETES: [&str; 4] = [
    "jim corbett",
    "paul hannan",
    "karol doherty",
    "james divin",
];

pub fn normalize_header(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// First canonical field (in table order) listing `normalized` as a literal.
pub fn match_field(normalized: &str) -> Option<CanonicalField> {
    CanonicalField::ALL
        .into_iter()
        .find(|field| field.literals().contains(&normalized))
}

pub fn is_header_literal(normalized: &str) -> bool {
    match_field(normalized).is_some()
}

pub fn is_wheelchair_athlete(name: &str) -> bool {
    let name = strip_excessive_spaces(name).to_lowercase();
    WHEELCHAIR_ATHLETES.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization_drops_spaces_and_case() {
        assert_eq!(normalize_header("First Name"), "firstname");
        assert_eq!(normalize_header(" PL. "), "pl.");
        assert_eq!(normalize_header("Chip\tTime"), "chiptime");
    }

    #[test]
    fn matches_literals_exactly() {
        assert_eq!(match_field("pos"), Some(CanonicalField::Position));
        assert_eq!(match_field("surname"), Some(CanonicalField::Surname));
        assert_eq!(match_field("name"), Some(CanonicalField::FullName));
        assert_eq!(match_field("gun"), Some(CanonicalField::FinishTime));
        assert_eq!(match_field("position"), None);
        assert_eq!(match_field("names"), None);
        assert!(!is_header_literal("notes"));
        assert_eq!(CanonicalField::FirstName.as_str(), "first_name");
    }

    #[test]
    fn literals_are_unique_across_fields() {
        let mut seen = std::collections::HashSet::new();
        for field in CanonicalField::ALL {
            for literal in field.literals() {
                assert!(seen.insert(*literal), "{literal} listed twice");
            }
        }
    }

    #[test]
    fn wheelchair_check_ignores_case_and_spacing() {
        assert!(is_wheelchair_athlete("Jim Corbett"));
        assert!(is_wheelchair_athlete("  KAROL   DOHERTY "));
        assert!(!is_wheelchair_athlete("Jim Corbet"));
    }
}
