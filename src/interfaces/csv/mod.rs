pub mod geo_reader;
pub mod transaction_reader;
