use std::io::Error;
use std::path::Path;
use storeview::domain::record::TransactionRecord;

pub const MAIN_HEADER: [&str; 14] = [
    "order_id",
    "customer_id",
    "customer_unique_id",
    "customer_state",
    "order_status",
    "review_score",
    "product_category_name_english",
    "payment_value",
    "order_purchase_timestamp",
    "order_approved_at",
    "order_delivered_carrier_date",
    "order_delivered_customer_date",
    "order_estimated_delivery_date",
    "shipping_limit_date",
];

pub const GEO_HEADER: [&str; 3] = ["customer_unique_id", "geolocation_lng", "geolocation_lat"];

pub fn write_main_csv(path: &Path, rows: &[[&str; 14]]) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(MAIN_HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_geo_csv(path: &Path, rows: &[[&str; 3]]) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(GEO_HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// A record with only the order id set; tests fill in what they exercise.
pub fn record(order_id: &str) -> TransactionRecord {
    TransactionRecord {
        order_id: order_id.to_string(),
        customer_id: None,
        customer_unique_id: None,
        customer_state: None,
        order_status: None,
        review_score: None,
        product_category: None,
        payment_value: None,
        purchased_at: None,
        approved_at: None,
        carrier_handoff_at: None,
        delivered_at: None,
        estimated_delivery_at: None,
        shipping_deadline_at: None,
    }
}
