use crate::domain::record::TransactionRecord;
use crate::error::{DashboardError, Result};
use std::io::Read;

/// Reads transaction records from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<TransactionRecord>`. It handles whitespace trimming and
/// flexible record lengths automatically.
pub struct TransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransactionReader<R> {
    /// Creates a new `TransactionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records.
    pub fn records(self) -> impl Iterator<Item = Result<TransactionRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(DashboardError::from))
    }

    /// Materializes the whole table.
    ///
    /// A malformed row or a missing expected column aborts the read; there
    /// is no fallback data source to degrade to.
    pub fn read_all(self) -> Result<Vec<TransactionRecord>> {
        self.records().collect()
    }
}
