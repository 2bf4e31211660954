use crate::domain::ports::TableSource;
use crate::domain::record::{GeoPoint, TransactionRecord};
use crate::error::Result;
use crate::interfaces::csv::geo_reader::GeoPointReader;
use crate::interfaces::csv::transaction_reader::TransactionReader;
use async_trait::async_trait;

/// Upstream location of the joined transactions table.
pub const MAIN_CSV_URL: &str =
    "https://raw.githubusercontent.com/Y-commit/for-dicoding/dashboard/dasboard/main.csv";
/// Upstream location of the geolocation table.
pub const GEO_CSV_URL: &str =
    "https://raw.githubusercontent.com/Y-commit/for-dicoding/dashboard/dasboard/geo.csv";
/// Backdrop image for the customer map.
pub const MAP_BACKGROUND_URL: &str =
    "https://i.pinimg.com/originals/3a/0c/e1/3a0ce18b3c842748c255bc0aa445ad41.jpg";

/// A `TableSource` fetching the input tables over HTTP.
///
/// Each fetch downloads the full body, parses it, and drops the
/// connection before returning; nothing is streamed into the compute
/// path.
pub struct HttpTableSource {
    client: reqwest::Client,
    main_url: String,
    geo_url: String,
    background_url: String,
}

impl HttpTableSource {
    /// A source pointed at the fixed upstream URLs.
    pub fn new() -> Self {
        Self::with_urls(MAIN_CSV_URL, GEO_CSV_URL, MAP_BACKGROUND_URL)
    }

    /// A source pointed at arbitrary URLs (test servers, mirrors).
    pub fn with_urls(main_url: &str, geo_url: &str, background_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            main_url: main_url.to_string(),
            geo_url: geo_url.to_string(),
            background_url: background_url.to_string(),
        }
    }

    pub fn background_url(&self) -> &str {
        &self.background_url
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for HttpTableSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableSource for HttpTableSource {
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>> {
        let body = self.get_bytes(&self.main_url).await?;
        log::info!("fetched transactions table ({} bytes)", body.len());
        TransactionReader::new(body.as_slice()).read_all()
    }

    async fn fetch_geolocation(&self) -> Result<Vec<GeoPoint>> {
        let body = self.get_bytes(&self.geo_url).await?;
        log::info!("fetched geolocation table ({} bytes)", body.len());
        GeoPointReader::new(body.as_slice()).read_deduplicated()
    }

    async fn fetch_map_background(&self) -> Result<Vec<u8>> {
        self.get_bytes(&self.background_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_source_points_at_upstream() {
        let source = HttpTableSource::new();
        assert_eq!(source.main_url, MAIN_CSV_URL);
        assert_eq!(source.geo_url, GEO_CSV_URL);
        assert_eq!(source.background_url(), MAP_BACKGROUND_URL);
    }
}
