use thiserror::Error;

use super::stats::ErrorSummary;
use super::triangulation::triangulate;

// ---------------------------------------------------------------------------
// Errors raised while shaping loaded tables into plot data
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("table is empty")]
    Empty,
    /// `row` is 0-based; the message counts from 1.
    #[error("row {} has {found} columns, expected {expected}", .row + 1)]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("coordinate table needs at least 2 columns, found {0}")]
    TooFewColumns(usize),
    #[error("{name} has {found} values but there are {expected} (X, Y) points")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// NumericTable – a rectangular block of numbers read from a CSV file
// ---------------------------------------------------------------------------

/// Row-major numeric table. Every row has exactly `cols` values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl NumericTable {
    /// Build a table from parsed rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DataError> {
        let cols = rows.first().map(Vec::len).ok_or(DataError::Empty)?;
        if cols == 0 {
            return Err(DataError::Empty);
        }
        let mut values = Vec::with_capacity(rows.len() * cols);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != cols {
                return Err(DataError::Ragged {
                    row,
                    expected: cols,
                    found: r.len(),
                });
            }
            values.extend_from_slice(r);
        }
        Ok(NumericTable {
            rows: rows.len(),
            cols,
            values,
        })
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Copy of one column, in row order. `None` if `col` is out of range.
    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        if col >= self.cols {
            return None;
        }
        Some(
            self.values
                .iter()
                .skip(col)
                .step_by(self.cols)
                .copied()
                .collect(),
        )
    }

    /// Z values held by this table: the single column of a one-column
    /// table, otherwise every cell in row-major order.
    pub fn surface_values(&self) -> Vec<f64> {
        self.values.clone()
    }
}

// ---------------------------------------------------------------------------
// PlotData – everything the views draw
// ---------------------------------------------------------------------------

/// Which Z set a surface view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Predicted,
    Actual,
}

impl SurfaceKind {
    pub fn title(self) -> &'static str {
        match self {
            SurfaceKind::Predicted => "Predicted",
            SurfaceKind::Actual => "Actual",
        }
    }
}

/// Shared X/Y coordinates with both Z sets and the triangulation over X/Y.
#[derive(Debug, Clone)]
pub struct PlotData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z_actual: Vec<f64>,
    pub z_predicted: Vec<f64>,
    /// Delaunay triangles over `(x[i], y[i])`, as point indices.
    pub triangles: Vec<[usize; 3]>,
}

impl PlotData {
    /// Assemble plot data from the coordinate table and the two Z tables.
    pub fn from_tables(
        coords: &NumericTable,
        actual: &NumericTable,
        predicted: &NumericTable,
    ) -> Result<Self, DataError> {
        let (_, cols) = coords.shape();
        let (Some(x), Some(y)) = (coords.column(0), coords.column(1)) else {
            return Err(DataError::TooFewColumns(cols));
        };

        let z_actual = actual.surface_values();
        let z_predicted = predicted.surface_values();
        check_len("training data", x.len(), z_actual.len())?;
        check_len("prediction", x.len(), z_predicted.len())?;

        let points: Vec<[f64; 2]> = x.iter().zip(&y).map(|(&xi, &yi)| [xi, yi]).collect();
        let triangles = triangulate(&points);
        if triangles.is_empty() {
            log::warn!(
                "{} points do not span a surface; only the scatter will be drawn",
                points.len()
            );
        } else {
            log::debug!("triangulated {} points into {} triangles", points.len(), triangles.len());
        }

        Ok(PlotData {
            x,
            y,
            z_actual,
            z_predicted,
            triangles,
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (X, Y) pairs in input order, as fed to the 2-D scatter plot.
    pub fn scatter_points(&self) -> Vec<[f64; 2]> {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y]).collect()
    }

    pub fn z(&self, kind: SurfaceKind) -> &[f64] {
        match kind {
            SurfaceKind::Predicted => &self.z_predicted,
            SurfaceKind::Actual => &self.z_actual,
        }
    }

    /// `(x, y, z)` triples for one surface, in input order.
    pub fn triples(&self, kind: SurfaceKind) -> Vec<(f64, f64, f64)> {
        self.x
            .iter()
            .zip(&self.y)
            .zip(self.z(kind))
            .map(|((&x, &y), &z)| (x, y, z))
            .collect()
    }

    pub fn error_summary(&self) -> ErrorSummary {
        ErrorSummary::between(&self.z_predicted, &self.z_actual)
    }
}

fn check_len(name: &'static str, expected: usize, found: usize) -> Result<(), DataError> {
    if expected == found {
        Ok(())
    } else {
        Err(DataError::LengthMismatch {
            name,
            expected,
            found,
        })
    }
}
