use crate::domain::record::GeoPoint;
use crate::error::{DashboardError, Result};
use std::collections::HashSet;
use std::io::Read;

/// Reads geolocation points from a CSV source.
pub struct GeoPointReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> GeoPointReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes points.
    pub fn points(self) -> impl Iterator<Item = Result<GeoPoint>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(DashboardError::from))
    }

    /// Materializes the table keeping at most one point per
    /// `customer_unique_id` (first occurrence wins).
    pub fn read_deduplicated(self) -> Result<Vec<GeoPoint>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut points = Vec::new();
        for point in self.points() {
            let point = point?;
            if seen.insert(point.customer_unique_id.clone()) {
                points.push(point);
            }
        }
        Ok(points)
    }
}
