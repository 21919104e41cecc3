use std::collections::BTreeMap;
use std::fmt;

use super::headers::CanonicalField;

/// A single worksheet cell, detached from the spreadsheet reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Float(f64),
    Int(i64),
    Bool(bool),
    /// Raw date serial as stored by the workbook.
    DateTime(f64),
    Error(String),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// Blank cells are the ones a spreadsheet reader would report as falsy:
    /// nothing, empty text, numeric zero or `false`.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Float(f) | Cell::DateTime(f) => *f == 0.0,
            Cell::Int(i) => *i == 0,
            Cell::Bool(b) => !b,
            Cell::Error(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Float(v) | Cell::DateTime(v) => write!(f, "{}", v),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Bool(v) => write!(f, "{}", v),
            Cell::Error(e) => f.write_str(e),
        }
    }
}

/// Epoch used by a workbook to encode dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSystem {
    #[default]
    Windows1900,
    Mac1904,
}

/// Rectangular cell grid addressed by absolute sheet coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub name: String,
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Self {
            name: name.into(),
            rows,
            width,
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Out-of-range coordinates read as an empty cell.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
    pub date_system: DateSystem,
}

/// Canonical field → column index. The first column seen for a field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<CanonicalField, usize>,
}

impl ColumnMap {
    /// Returns false when the field already had a column.
    pub fn insert_first(&mut self, field: CanonicalField, col: usize) -> bool {
        if self.columns.contains_key(&field) {
            return false;
        }
        self.columns.insert(field, col);
        true
    }

    pub fn get(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetAnalysis {
    pub is_empty: bool,
    pub heading_row: Option<usize>,
    pub columns: ColumnMap,
    pub winner: Option<String>,
}
