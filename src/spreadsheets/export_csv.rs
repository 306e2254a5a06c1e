use crate::api::SearchCriteria;
use crate::data::{RentalCollection, COLUMNS};
use chrono::Local;
use serde_json::Value;

/// CSV text of every rental in the collection, sorted ascending by
/// relative value (best deals first). Missing values become empty cells.
pub fn rentals_to_csv(collection: &RentalCollection) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');

    for record in collection.sorted_records() {
        let cells: Vec<String> = COLUMNS
            .iter()
            .map(|column| csv_cell(record.get(*column).unwrap_or(&Value::Null)))
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}

/// Download filename encoding the search that produced the file, e.g.
/// `Hoboken_NJ_1_false_1_false_20260830.csv`.
pub fn csv_filename(criteria: &SearchCriteria) -> String {
    format!(
        "{}_{}_{}_{}_{}_{}_{}.csv",
        criteria.city,
        criteria.state,
        criteria.beds_min,
        criteria.exact_bedrooms,
        criteria.baths_min,
        criteria.exact_bathrooms,
        Local::now().format("%Y%m%d"),
    )
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => quote_if_needed(s),
        other => other.to_string(),
    }
}

fn quote_if_needed(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
