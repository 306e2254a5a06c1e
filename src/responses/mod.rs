pub mod csv;
pub mod errors;
pub mod html;

pub use csv::csv_response;
pub use errors::html_error_response;
pub use html::html_response;
