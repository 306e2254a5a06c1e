pub mod home;
pub mod results;

pub use home::home_page;
pub use results::{no_results_page, results_page};
