pub mod export_csv;

pub use export_csv::{csv_filename, rentals_to_csv};
