use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use super::model::{NumericTable, PlotData};
use crate::config::{COORDINATES_FILE, PREDICTION_FILE, TRAINING_FILE};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the coordinate, training and prediction files from `dir`.
pub fn load_dataset(dir: &Path) -> Result<PlotData> {
    let coords = load_table(&dir.join(COORDINATES_FILE))?;
    let actual = load_table(&dir.join(TRAINING_FILE))?;
    let predicted = load_table(&dir.join(PREDICTION_FILE))?;

    let data = PlotData::from_tables(&coords, &actual, &predicted)
        .with_context(|| format!("combining CSV files in {}", dir.display()))?;

    log::info!(
        "Loaded {} points from {} ({} triangles)",
        data.len(),
        dir.display(),
        data.triangles.len()
    );
    Ok(data)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One headerless CSV record. Empty cells deserialize to `None`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct Row(Vec<Option<f64>>);

/// Read a headerless, comma-delimited numeric file.
///
/// Cells are trimmed; an empty cell or `nan` becomes NaN. Lines starting
/// with `#` are comments. Anything else that does not parse as a number, or
/// a row with a different width than the first, is an error. Errors name the
/// 1-based line of the file.
pub fn load_table(path: &Path) -> Result<NumericTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.with_context(|| format!("reading {}", path.display()))?;
        let line = record.position().map_or(0, |p| p.line());
        let Row(cells) = record
            .deserialize::<Row>(None)
            .with_context(|| format!("{}: line {line} is not numeric", path.display()))?;
        rows.push(cells.into_iter().map(|c| c.unwrap_or(f64::NAN)).collect());
    }

    let table = NumericTable::from_rows(rows)
        .with_context(|| format!("reading {}", path.display()))?;
    log::debug!("{}: shape {:?}", path.display(), table.shape());
    Ok(table)
}
