use crate::domain::ports::TableSource;
use crate::domain::record::{GeoPoint, TransactionRecord};
use crate::error::{DashboardError, Result};
use crate::interfaces::csv::geo_reader::GeoPointReader;
use crate::interfaces::csv::transaction_reader::TransactionReader;
use async_trait::async_trait;
use std::fs::File;
use std::path::PathBuf;

/// A `TableSource` reading the two tables from local files.
///
/// Used for offline runs and tests. There is no map backdrop on disk, so
/// `fetch_map_background` always reports failure and the overlay degrades
/// to points only.
pub struct FileTableSource {
    main_path: PathBuf,
    geo_path: PathBuf,
}

impl FileTableSource {
    pub fn new(main_path: PathBuf, geo_path: PathBuf) -> Self {
        Self {
            main_path,
            geo_path,
        }
    }
}

#[async_trait]
impl TableSource for FileTableSource {
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>> {
        let file = File::open(&self.main_path)?;
        TransactionReader::new(file).read_all()
    }

    async fn fetch_geolocation(&self) -> Result<Vec<GeoPoint>> {
        let file = File::open(&self.geo_path)?;
        GeoPointReader::new(file).read_deduplicated()
    }

    async fn fetch_map_background(&self) -> Result<Vec<u8>> {
        Err(DashboardError::ValidationError(
            "no map background available for local sources".to_string(),
        ))
    }
}
