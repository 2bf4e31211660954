use super::record::{GeoPoint, TransactionRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Port over the tabular-data collaborator that supplies the two input
/// tables and the map backdrop.
///
/// Implementations materialize the full table and release any file or
/// network handle before returning; the compute path never streams.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// The joined transactions table (`main.csv`).
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>>;

    /// The geolocation table (`geo.csv`), deduplicated per customer.
    async fn fetch_geolocation(&self) -> Result<Vec<GeoPoint>>;

    /// Raw bytes of the map background image. Failure here is the one
    /// non-fatal fetch: callers degrade to a points-only overlay.
    async fn fetch_map_background(&self) -> Result<Vec<u8>>;
}

pub type TableSourceBox = Box<dyn TableSource>;
