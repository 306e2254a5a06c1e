pub mod collection;
pub mod rental;

pub use collection::{RentalCollection, RentalTable, TableRow, TABLE_COLUMNS};
pub use rental::{Rental, COLUMNS, DEFAULT_SIZE};
