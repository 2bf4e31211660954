use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layouts accepted for the six datetime columns.
///
/// The upstream export writes `2018-01-01 10:56:33`; a `T` separator is
/// also accepted for ISO-style exports.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One row of the transactions table (`main.csv`).
///
/// The table is the product of outer joins across orders, payments, and
/// customers, so every column other than `order_id` may be missing on a
/// given row. Empty CSV cells deserialize to `None`. Note that `order_id`
/// is not unique per row: an order contributes one row per payment/item,
/// and `customer_unique_id` identifies one person across several
/// `customer_id` values (guest-checkout artifact).
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct TransactionRecord {
    pub order_id: String,
    pub customer_id: Option<String>,
    pub customer_unique_id: Option<String>,
    pub customer_state: Option<String>,
    pub order_status: Option<String>,
    #[serde(deserialize_with = "de_opt_score")]
    pub review_score: Option<u8>,
    #[serde(rename = "product_category_name_english")]
    pub product_category: Option<String>,
    pub payment_value: Option<Decimal>,
    #[serde(rename = "order_purchase_timestamp", deserialize_with = "de_opt_datetime")]
    pub purchased_at: Option<NaiveDateTime>,
    #[serde(rename = "order_approved_at", deserialize_with = "de_opt_datetime")]
    pub approved_at: Option<NaiveDateTime>,
    #[serde(rename = "order_delivered_carrier_date", deserialize_with = "de_opt_datetime")]
    pub carrier_handoff_at: Option<NaiveDateTime>,
    #[serde(rename = "order_delivered_customer_date", deserialize_with = "de_opt_datetime")]
    pub delivered_at: Option<NaiveDateTime>,
    #[serde(rename = "order_estimated_delivery_date", deserialize_with = "de_opt_datetime")]
    pub estimated_delivery_at: Option<NaiveDateTime>,
    #[serde(rename = "shipping_limit_date", deserialize_with = "de_opt_datetime")]
    pub shipping_deadline_at: Option<NaiveDateTime>,
}

impl TransactionRecord {
    /// Calendar day of payment approval, the anchor for all time bucketing.
    pub fn approved_date(&self) -> Option<NaiveDate> {
        self.approved_at.map(|ts| ts.date())
    }
}

/// One deduplicated customer location from `geo.csv`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct GeoPoint {
    pub customer_unique_id: String,
    #[serde(rename = "geolocation_lng")]
    pub lng: f64,
    #[serde(rename = "geolocation_lat")]
    pub lat: f64,
}

fn de_opt_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unparseable datetime: {text:?}"))),
    }
}

/// Review scores are integers 1..=5, but the upstream join serializes the
/// column as floats once a missing value appears in it ("4.0").
fn de_opt_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(|score| Some(score.round() as u8))
            .map_err(|_| serde::de::Error::custom(format!("unparseable review score: {text:?}"))),
    }
}
