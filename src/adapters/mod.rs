// Adapters layer: concrete sinks for the transformed records.

pub mod csv_file;
pub mod database;
