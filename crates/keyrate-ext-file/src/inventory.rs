//! File-based position inventory.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::Deserialize;

use keyrate_bonds::{BondContract, FinalCouponPolicy, InstrumentRecord};
use keyrate_core::types::Date;

use crate::error::SourceResult;
use crate::open_reader;

/// Provides the positions held on a date.
pub trait InventorySource: Send + Sync {
    /// Returns the inventory rows for `as_of`, in file order.
    ///
    /// A date with no positions yields an empty list.
    fn load_inventory(&self, as_of: Date) -> SourceResult<Vec<InstrumentRecord>>;

    /// Loads the inventory and builds one contract per row.
    ///
    /// # Errors
    ///
    /// Fails on the first row that does not describe a valid bond.
    fn load_contracts(
        &self,
        as_of: Date,
        policy: FinalCouponPolicy,
    ) -> SourceResult<Vec<BondContract>> {
        self.load_inventory(as_of)?
            .iter()
            .map(|record| Ok(BondContract::from_record(record, policy)?))
            .collect()
    }
}

// =============================================================================
// CSV INVENTORY SOURCE
// =============================================================================

/// CSV record for inventory rows.
#[derive(Debug, Deserialize)]
struct InventoryRow {
    as_of_date: Date,
    id: String,
    issue_date: Date,
    maturity_date: Date,
    coupon: Option<f64>,
    frequency: String,
    quantity: f64,
    face_value: Option<f64>,
}

impl From<InventoryRow> for InstrumentRecord {
    fn from(row: InventoryRow) -> Self {
        InstrumentRecord {
            id: row.id,
            issue_date: row.issue_date,
            maturity_date: row.maturity_date,
            coupon: row.coupon,
            frequency: row.frequency,
            quantity: row.quantity,
            face_value: row.face_value,
        }
    }
}

/// CSV-based inventory source.
///
/// Columns: `as_of_date,id,issue_date,maturity_date,coupon,frequency,quantity,face_value`.
/// `coupon` and `face_value` may be empty.
#[derive(Debug)]
pub struct CsvInventorySource {
    file_path: PathBuf,
    positions: DashMap<Date, Vec<InstrumentRecord>>,
}

impl CsvInventorySource {
    /// Opens the file and indexes its rows by date.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened and `Csv` for a malformed row.
    pub fn new(file_path: impl AsRef<Path>) -> SourceResult<Self> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            positions: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Re-reads the file, replacing the current index.
    ///
    /// # Errors
    ///
    /// Same as [`CsvInventorySource::new`].
    pub fn reload(&self) -> SourceResult<()> {
        self.positions.clear();
        let mut reader = open_reader(&self.file_path)?;

        let mut rows = 0usize;
        for result in reader.deserialize() {
            let row: InventoryRow = result?;
            self.positions
                .entry(row.as_of_date)
                .or_default()
                .push(row.into());
            rows += 1;
        }

        log::debug!(
            "loaded {rows} inventory rows over {} dates from {}",
            self.positions.len(),
            self.file_path.display()
        );
        Ok(())
    }

    /// Dates with at least one position, ascending.
    pub fn dates(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self.positions.iter().map(|e| *e.key()).collect();
        dates.sort();
        dates
    }
}

impl InventorySource for CsvInventorySource {
    fn load_inventory(&self, as_of: Date) -> SourceResult<Vec<InstrumentRecord>> {
        Ok(self
            .positions
            .get(&as_of)
            .map(|records| records.value().clone())
            .unwrap_or_default())
    }
}
