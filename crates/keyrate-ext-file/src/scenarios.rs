//! Scenario inputs: loading vectors and historical rate changes.

use std::path::Path;

use nalgebra::DMatrix;
use serde::Deserialize;

use keyrate_portfolio::LoadingVector;

use crate::error::{SourceError, SourceResult};
use crate::open_reader;

/// CSV record for one loading entry.
#[derive(Debug, Deserialize)]
struct LoadingRecord {
    name: String,
    tenor: f64,
    loading: f64,
}

/// Reads loading vectors from a `name,tenor,loading` file.
///
/// Rows sharing a name form one vector. Vectors keep the order in which
/// their names first appear.
///
/// # Errors
///
/// Returns `Io` or `Csv` for unreadable input and `Parse` for an empty file.
pub fn load_loadings(path: impl AsRef<Path>) -> SourceResult<Vec<LoadingVector>> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;

    let mut vectors: Vec<LoadingVector> = Vec::new();
    for result in reader.deserialize() {
        let record: LoadingRecord = result?;
        match vectors.iter_mut().find(|v| v.name == record.name) {
            Some(v) => {
                v.tenors.push(record.tenor);
                v.loading.push(record.loading);
            }
            None => vectors.push(LoadingVector::new(
                record.name,
                vec![record.tenor],
                vec![record.loading],
            )),
        }
    }

    if vectors.is_empty() {
        return Err(SourceError::parse(format!(
            "no loading rows in {}",
            path.display()
        )));
    }
    log::debug!("loaded {} loading vectors", vectors.len());
    Ok(vectors)
}

/// Historical rate changes: one row per observation, one column per tenor.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnsPanel {
    /// Tenor of each column, in years.
    pub tenors: Vec<f64>,
    /// Observations × tenors.
    pub observations: DMatrix<f64>,
}

impl ReturnsPanel {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.nrows()
    }

    /// Returns true when there are no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.nrows() == 0
    }
}

/// Reads a returns panel.
///
/// The header names the tenors in years. A leading `date` column, if
/// present, is ignored.
///
/// # Errors
///
/// Returns `Parse` for a non-numeric tenor or value, or a missing value.
pub fn load_returns(path: impl AsRef<Path>) -> SourceResult<ReturnsPanel> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;

    let headers = reader.headers()?.clone();
    let skip = usize::from(
        headers
            .get(0)
            .is_some_and(|h| h.eq_ignore_ascii_case("date")),
    );
    let tenors = headers
        .iter()
        .skip(skip)
        .map(|h| {
            h.parse::<f64>()
                .map_err(|_| SourceError::parse(format!("tenor header '{h}' is not a number")))
        })
        .collect::<SourceResult<Vec<f64>>>()?;

    let mut values = Vec::new();
    let mut rows = 0usize;
    for result in reader.records() {
        let record = result?;
        for field in record.iter().skip(skip) {
            let v = field.parse::<f64>().map_err(|_| {
                SourceError::parse(format!("row {}: '{field}' is not a number", rows + 1))
            })?;
            values.push(v);
        }
        rows += 1;
    }

    log::debug!("loaded {rows} observations over {} tenors", tenors.len());
    Ok(ReturnsPanel {
        observations: DMatrix::from_row_slice(rows, tenors.len(), &values),
        tenors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loadings_grouped_in_order() {
        let file = write_csv(
            "name,tenor,loading\n\
             PC1,1,0.3\n\
             PC2,1,-0.6\n\
             PC1,10,0.4\n\
             PC2,10,0.5\n",
        );
        let vectors = load_loadings(file.path()).unwrap();

        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].name, "PC1");
        assert_eq!(vectors[0].tenors, vec![1.0, 10.0]);
        assert_eq!(vectors[1].loading, vec![-0.6, 0.5]);
    }

    #[test]
    fn test_empty_loadings() {
        let file = write_csv("name,tenor,loading\n");
        assert!(matches!(load_loadings(file.path()), Err(SourceError::Parse { .. })));
    }

    #[test]
    fn test_returns_with_date_column() {
        let file = write_csv(
            "date,1,5,10\n\
             2024-01-02,0.01,0.02,0.03\n\
             2024-01-03,-0.01,0.00,0.01\n",
        );
        let panel = load_returns(file.path()).unwrap();

        assert_eq!(panel.tenors, vec![1.0, 5.0, 10.0]);
        assert_eq!(panel.len(), 2);
        assert_eq!(panel.observations[(0, 2)], 0.03);
        assert_eq!(panel.observations[(1, 0)], -0.01);
    }

    #[test]
    fn test_returns_rejects_text() {
        let file = write_csv("1,5\n0.1,abc\n");
        assert!(matches!(load_returns(file.path()), Err(SourceError::Parse { .. })));
    }
}
