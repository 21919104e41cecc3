use super::headers::{self, CanonicalField};
use super::types::*;

/// Sheets shorter than this never hold results.
pub const MIN_SHEET_ROWS: usize = 10;
/// Rows inspected when deciding whether a sheet is blank.
pub const EMPTY_SCAN_ROWS: usize = 15;
/// Rows inspected when looking for the heading row.
pub const HEADING_SCAN_ROWS: usize = 20;
/// A heading row needs strictly more header matches than this.
pub const HEADING_MATCH_THRESHOLD: usize = 2;
/// Rows after the heading searched for the first result.
pub const WINNER_SEARCH_ROWS: usize = 5;
/// Rows with at most this many populated cells are skipped as noise.
pub const RESULT_ROW_TOLERANCE: usize = 3;

pub struct SheetAnalyzer<'a> {
    sheet: &'a Worksheet,
}

impl<'a> SheetAnalyzer<'a> {
    pub fn new(sheet: &'a Worksheet) -> Self {
        Self { sheet }
    }

    pub fn analyze(&self) -> SheetAnalysis {
        let is_empty = self.is_empty_sheet();
        if is_empty {
            tracing::debug!("Sheet {} is empty", self.sheet.name);
            return SheetAnalysis {
                is_empty,
                ..SheetAnalysis::default()
            };
        }

        let Some(heading_row) = self.find_heading_row() else {
            tracing::debug!("No heading row found in sheet {}", self.sheet.name);
            return SheetAnalysis::default();
        };

        let columns = self.identify_columns(heading_row);
        let winner = self.find_winner(heading_row, &columns);
        tracing::debug!(
            "Sheet {}: heading row {}, columns {:?}, winner {:?}",
            self.sheet.name,
            heading_row,
            columns,
            winner
        );

        SheetAnalysis {
            is_empty,
            heading_row: Some(heading_row),
            columns,
            winner,
        }
    }

    pub fn is_empty_sheet(&self) -> bool {
        if self.sheet.height() < MIN_SHEET_ROWS {
            return true;
        }

        let rows_to_check = self.sheet.height().min(EMPTY_SCAN_ROWS);
        !(0..rows_to_check).any(|row| self.sheet.row(row).iter().any(|cell| !cell.is_blank()))
    }

    /// First row in the scan window with more than two header matches.
    pub fn find_heading_row(&self) -> Option<usize> {
        let rows_to_check = self.sheet.height().min(HEADING_SCAN_ROWS);

        (0..rows_to_check).find(|&row| {
            let matches = self
                .sheet
                .row(row)
                .iter()
                .filter(|cell| headers::is_header_literal(&headers::normalize_header(&cell.to_string())))
                .count();
            matches > HEADING_MATCH_THRESHOLD
        })
    }

    pub fn identify_columns(&self, heading_row: usize) -> ColumnMap {
        let mut columns = ColumnMap::default();

        for (col, cell) in self.sheet.row(heading_row).iter().enumerate() {
            if let Some(field) = headers::match_field(&headers::normalize_header(&cell.to_string())) {
                if columns.insert_first(field, col) {
                    tracing::trace!("Column {} is {} in sheet {}", col, field.as_str(), self.sheet.name);
                }
            }
        }

        columns
    }

    /// A row is empty when it has at most `tolerance` populated cells.
    pub fn is_row_empty(&self, row: usize, tolerance: usize) -> bool {
        self.sheet
            .row(row)
            .iter()
            .filter(|cell| !cell.is_blank())
            .count()
            <= tolerance
    }

    /// Raw name of the first real result below the heading row.
    ///
    /// Wheelchair athletes are passed over; each one skipped widens the
    /// search window by a row.
    pub fn find_winner(&self, heading_row: usize, columns: &ColumnMap) -> Option<String> {
        let mut search_end = heading_row + 1 + WINNER_SEARCH_ROWS;
        let mut row = heading_row + 1;

        while row < search_end {
            if self.is_row_empty(row, RESULT_ROW_TOLERANCE) {
                row += 1;
                continue;
            }

            let name = self.name_in_row(row, columns)?;

            if headers::is_wheelchair_athlete(&name) {
                tracing::info!("Wheelchair athlete {} skipped in sheet {}", name.trim(), self.sheet.name);
                search_end += 1;
                row += 1;
                continue;
            }

            return Some(name);
        }

        None
    }

    fn name_in_row(&self, row: usize, columns: &ColumnMap) -> Option<String> {
        if let Some(col) = columns.get(CanonicalField::FullName) {
            return Some(self.sheet.cell(row, col).to_string());
        }

        match (columns.get(CanonicalField::FirstName), columns.get(CanonicalField::Surname)) {
            (Some(first), Some(surname)) => Some(format!(
                "{} {}",
                self.sheet.cell(row, first),
                self.sheet.cell(row, surname)
            )),
            _ => None,
        }
    }
}
