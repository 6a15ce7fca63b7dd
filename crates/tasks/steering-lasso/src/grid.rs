use serde::{Deserialize, Serialize};

use steering_core::error::SpecError;
use steering_core::geometry::Point;

/// What occupies one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMarker {
    /// Selectable icon the lasso must enclose (`X`).
    Target,
    /// Visible icon that must stay outside the lasso (`O`).
    Distractor,
    /// Empty, invisible cell (`.`).
    Blank,
}

impl CellMarker {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "X" => Some(Self::Target),
            "O" => Some(Self::Distractor),
            "." => Some(Self::Blank),
            _ => None,
        }
    }

    pub fn is_icon(self) -> bool {
        !matches!(self, Self::Blank)
    }
}

/// A target icon's center in scene units plus its grid address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub row: usize,
    pub col: usize,
}

impl Target {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Parsed lasso grid. Rows are split on whitespace independently, so rows
/// may have different lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct LassoGrid {
    cells: Vec<Vec<CellMarker>>,
}

impl LassoGrid {
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, SpecError> {
        let mut cells = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let parsed = line
                .as_ref()
                .split_whitespace()
                .enumerate()
                .map(|(col, symbol)| {
                    CellMarker::from_symbol(symbol).ok_or_else(|| SpecError::UnknownGridSymbol {
                        symbol: symbol.to_string(),
                        row,
                        col,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(parsed);
        }
        if cells.iter().all(Vec::is_empty) {
            return Err(SpecError::EmptyGrid);
        }
        Ok(Self { cells })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellMarker> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn is_target(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(CellMarker::Target)
    }

    /// Every cell with its address, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellMarker)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &m)| (r, c, m)))
    }

    /// Target cells in row-major order, so the first is the top-most,
    /// left-most target.
    pub fn targets(&self, origin: Point, spacing: f64) -> Vec<Target> {
        self.cells()
            .filter(|&(_, _, m)| m == CellMarker::Target)
            .map(|(row, col, _)| {
                let c = cell_center(origin, spacing, row, col);
                Target {
                    x: c.x,
                    y: c.y,
                    row,
                    col,
                }
            })
            .collect()
    }

    /// Centers of every visible icon, targets and distractors alike.
    pub fn icon_centers(&self, origin: Point, spacing: f64) -> Vec<Point> {
        self.cells()
            .filter(|&(_, _, m)| m.is_icon())
            .map(|(row, col, _)| cell_center(origin, spacing, row, col))
            .collect()
    }
}

pub fn cell_center(origin: Point, spacing: f64, row: usize, col: usize) -> Point {
    Point::new(
        origin.x + col as f64 * spacing,
        origin.y + row as f64 * spacing,
    )
}
