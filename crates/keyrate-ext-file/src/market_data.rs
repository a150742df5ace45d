//! File-based curve source.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::Deserialize;

use keyrate_core::types::Date;
use keyrate_curves::YieldCurve;

use crate::error::{SourceError, SourceResult};
use crate::open_reader;

/// Provides zero curves by date and curve identifier.
pub trait CurveSource: Send + Sync {
    /// Returns the `(tenor_years, rate_percent)` points of a curve, ordered
    /// by tenor.
    ///
    /// # Errors
    ///
    /// Returns `CurveNotFound` when the source has no points for the pair.
    fn load_points(&self, as_of: Date, curve_id: &str) -> SourceResult<Vec<(f64, f64)>>;

    /// Loads and builds the curve.
    ///
    /// # Errors
    ///
    /// Propagates `load_points` errors and curve construction errors.
    fn load_curve(&self, as_of: Date, curve_id: &str) -> SourceResult<YieldCurve> {
        Ok(YieldCurve::from_points(self.load_points(as_of, curve_id)?)?)
    }
}

// =============================================================================
// CSV CURVE SOURCE
// =============================================================================

/// CSV record for curve points.
#[derive(Debug, Deserialize)]
struct CurveRecord {
    curve_date: Date,
    curve_type: String,
    tenor: f64,
    rate: Option<f64>,
}

/// CSV-based curve source.
///
/// Rows with an empty rate are skipped.
#[derive(Debug)]
pub struct CsvCurveSource {
    file_path: PathBuf,
    curves: DashMap<(Date, String), Vec<(f64, f64)>>,
}

impl CsvCurveSource {
    /// Opens the file and indexes its rows.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened and `Csv` for a malformed row.
    pub fn new(file_path: impl AsRef<Path>) -> SourceResult<Self> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            curves: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Re-reads the file, replacing the current index.
    ///
    /// # Errors
    ///
    /// Same as [`CsvCurveSource::new`]. On error the index is left empty.
    pub fn reload(&self) -> SourceResult<()> {
        self.curves.clear();
        let mut reader = open_reader(&self.file_path)?;

        let mut skipped = 0usize;
        for result in reader.deserialize() {
            let record: CurveRecord = result?;
            let Some(rate) = record.rate else {
                skipped += 1;
                continue;
            };
            self.curves
                .entry((record.curve_date, record.curve_type))
                .or_default()
                .push((record.tenor, rate));
        }

        for mut points in self.curves.iter_mut() {
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
        }

        log::debug!(
            "loaded {} curves from {} ({skipped} empty rates skipped)",
            self.curves.len(),
            self.file_path.display()
        );
        Ok(())
    }

    /// Curve identifiers available on `as_of`, sorted.
    pub fn curve_ids(&self, as_of: Date) -> Vec<String> {
        let mut ids: Vec<String> = self
            .curves
            .iter()
            .filter(|entry| entry.key().0 == as_of)
            .map(|entry| entry.key().1.clone())
            .collect();
        ids.sort();
        ids
    }
}

impl CurveSource for CsvCurveSource {
    fn load_points(&self, as_of: Date, curve_id: &str) -> SourceResult<Vec<(f64, f64)>> {
        self.curves
            .get(&(as_of, curve_id.to_string()))
            .map(|points| points.value().clone())
            .ok_or_else(|| SourceError::CurveNotFound {
                curve_id: curve_id.to_string(),
                as_of,
            })
    }
}
