use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};

use super::analyzer::SheetAnalyzer;
use super::html;
use super::types::*;
use super::utils::{date_system_from_decoded, render_cell};
use crate::error::AppError;

/// A worksheet kept for output together with what was learnt about it.
#[derive(Debug, Clone)]
pub struct AnalyzedSheet {
    pub sheet: Worksheet,
    pub analysis: SheetAnalysis,
}

/// One result spreadsheet: its non-empty worksheets and their analysis.
#[derive(Debug, Clone)]
pub struct ResultFile {
    pub path: PathBuf,
    date_system: DateSystem,
    sheets: Vec<AnalyzedSheet>,
    empty_sheets: usize,
}

impl ResultFile {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        tracing::debug!("Opening workbook {}", path.display());
        let workbook = load_workbook(path)?;
        Ok(Self::from_workbook(path, workbook))
    }

    pub fn from_workbook(path: impl Into<PathBuf>, workbook: Workbook) -> Self {
        let path = path.into();
        let mut sheets = Vec::new();
        let mut empty_sheets = 0;

        for sheet in workbook.sheets {
            let analysis = SheetAnalyzer::new(&sheet).analyze();
            if analysis.is_empty {
                empty_sheets += 1;
                continue;
            }
            sheets.push(AnalyzedSheet { sheet, analysis });
        }

        tracing::debug!(
            "{}: {} sheets kept, {} empty",
            path.display(),
            sheets.len(),
            empty_sheets
        );

        Self {
            path,
            date_system: workbook.date_system,
            sheets,
            empty_sheets,
        }
    }

    pub fn sheets(&self) -> &[AnalyzedSheet] {
        &self.sheets
    }

    /// All worksheets, empty ones included.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len() + self.empty_sheets
    }

    pub fn empty_sheet_count(&self) -> usize {
        self.empty_sheets
    }

    pub fn headings_found(&self) -> usize {
        self.sheets
            .iter()
            .filter(|s| s.analysis.heading_row.is_some())
            .count()
    }

    pub fn headings_missing(&self) -> usize {
        self.sheets.len() - self.headings_found()
    }

    /// One entry per kept sheet; `None` where no winner was found.
    pub fn winners(&self) -> Vec<Option<&str>> {
        self.sheets
            .iter()
            .map(|s| s.analysis.winner.as_deref())
            .collect()
    }

    /// Full HTML page with one table per kept sheet.
    pub fn build_html(&self) -> Result<String, AppError> {
        let tables = self
            .sheets
            .iter()
            .map(|s| self.build_html_table(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(html::render_page(tables))
    }

    fn build_html_table(&self, analyzed: &AnalyzedSheet) -> Result<String, AppError> {
        let sheet = &analyzed.sheet;
        let analyzer = SheetAnalyzer::new(sheet);
        let starting_row = analyzed.analysis.heading_row.unwrap_or(0);

        let mut rows = Vec::new();
        for row in starting_row..sheet.height() {
            if analyzer.is_row_empty(row, 0) {
                continue;
            }
            let cells = sheet
                .row(row)
                .iter()
                .map(|cell| render_cell(cell, self.date_system))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }

        Ok(html::render_table(&rows, true))
    }
}

fn load_workbook(path: &Path) -> Result<Workbook, AppError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| AppError::open_failure(path, e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());
    let mut date_system = None;
    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| AppError::open_failure(path, format!("sheet {}: {}", sheet_name, e)))?;
        if date_system.is_none() {
            date_system = detect_date_system(&range);
        }
        sheets.push(worksheet_from_range(sheet_name, &range));
    }

    let date_system = date_system.unwrap_or_default();
    tracing::debug!("{}: {:?} date system", path.display(), date_system);
    Ok(Workbook { sheets, date_system })
}

/// calamine keeps the epoch flag inside its date values, so compare the
/// raw serial of the first date cell with the date calamine decodes it to.
fn detect_date_system(range: &Range<Data>) -> Option<DateSystem> {
    range.used_cells().find_map(|(_, _, data)| match data {
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|decoded| date_system_from_decoded(dt.as_f64(), decoded)),
        _ => None,
    })
}

/// calamine trims leading blank rows and columns; put them back so that row
/// indices match the sheet.
fn worksheet_from_range(name: &str, range: &Range<Data>) -> Worksheet {
    let (top, left) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); top];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; left];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }

    Worksheet::new(name, rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Float(*f),
        Data::Int(i) => Cell::Int(*i),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(d) => Cell::DateTime(d.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
        _ => Cell::Empty,
    }
}
