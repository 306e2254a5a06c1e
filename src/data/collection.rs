use crate::api::ApiError;
use crate::data::rental::Rental;
use serde_json::Value;

/// Columns shown in the results table and fed to the summarizer; the
/// geo/size columns from the flat record are for the map and CSV only.
pub const TABLE_COLUMNS: [&str; 8] = [
    "Address",
    "Unit",
    "Price",
    "Bedrooms",
    "Bathrooms",
    "Zestimate",
    "Days on Zillow",
    "Relative Value",
];

/// Rentals in discovery order across pages. Duplicates across pages are
/// kept; filters shrink the sequence in place.
#[derive(Debug, Default)]
pub struct RentalCollection {
    pub rentals: Vec<Rental>,
}

/// One displayable row: the flat record plus a color channel derived from
/// where its relative value sits between the filtered min and max.
#[derive(Debug)]
pub struct TableRow {
    pub record: Value,
    pub color: [u8; 4],
}

#[derive(Debug)]
pub struct RentalTable {
    pub rows: Vec<TableRow>,
}

impl RentalCollection {
    pub fn new(rentals: Vec<Rental>) -> Self {
        Self { rentals }
    }

    /// Merge the `props` arrays of every fetched page, in page order, into
    /// one collection. A page without a `props` field contributes nothing.
    pub fn from_pages(pages: &[Value]) -> Result<Self, ApiError> {
        let mut rentals = Vec::new();

        for page in pages {
            let Some(props) = page.get("props").and_then(Value::as_array) else {
                continue;
            };
            for raw in props {
                rentals.push(Rental::from_raw(raw)?);
            }
        }

        Ok(Self::new(rentals))
    }

    pub fn len(&self) -> usize {
        self.rentals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rentals.is_empty()
    }

    pub fn filter_by_bedrooms(&mut self, bedrooms: i64) {
        self.rentals.retain(|r| r.bedrooms == Some(bedrooms));
    }

    pub fn filter_by_bathrooms(&mut self, bathrooms: i64) {
        self.rentals.retain(|r| r.bathrooms == Some(bathrooms));
    }

    /// Representative map center: the record at index len/2 supplies the
    /// latitude, the record at an independently computed index len/2 the
    /// longitude. Not a true centroid; kept as the original behaves.
    pub fn center_of_lat_lng(&self) -> (f64, f64) {
        let mid_lat = self.rentals.len() / 2;
        let mid_lng = self.rentals.len() / 2;

        match (self.rentals.get(mid_lat), self.rentals.get(mid_lng)) {
            (Some(lat_rental), Some(lng_rental)) => (
                lat_rental.latitude.unwrap_or(0.0),
                lng_rental.longitude.unwrap_or(0.0),
            ),
            _ => (0.0, 0.0),
        }
    }

    /// Project the displayable subset (price, zestimate and coordinates all
    /// present) into a table, or `None` when that subset is empty.
    pub fn to_table(&self) -> Option<RentalTable> {
        let complete: Vec<&Rental> = self
            .rentals
            .iter()
            .filter(|r| {
                r.price.is_some()
                    && r.zestimate.is_some()
                    && r.latitude.is_some()
                    && r.longitude.is_some()
            })
            .collect();

        if complete.is_empty() {
            return None;
        }

        let min = complete.iter().map(|r| r.relative_value).min()?;
        let max = complete.iter().map(|r| r.relative_value).max()?;

        let rows = complete
            .iter()
            .map(|rental| TableRow {
                record: rental.to_record(),
                color: color_for(rental.relative_value, min, max),
            })
            .collect();

        Some(RentalTable { rows })
    }

    /// Flat record of every rental, sorted ascending by relative value
    /// (stable, so discovery order breaks ties). CSV export input.
    pub fn sorted_records(&self) -> Vec<Value> {
        let mut rentals: Vec<&Rental> = self.rentals.iter().collect();
        rentals.sort_by_key(|r| r.relative_value);
        rentals.iter().map(|r| r.to_record()).collect()
    }
}

/// Scale the relative value linearly onto a red↔green channel pair:
/// min maps to full green, max to full red. min == max would divide by
/// zero, so that case pins every row to the midpoint.
fn color_for(relative_value: i64, min: i64, max: i64) -> [u8; 4] {
    let channel = if max == min {
        255 / 2
    } else {
        (255 * (relative_value - min) / (max - min)) as u8
    };
    [channel, 255 - channel, 0, 160]
}

impl RentalTable {
    /// Rows ascending by relative value.
    pub fn sorted_rows(&self) -> Vec<&TableRow> {
        let mut rows: Vec<&TableRow> = self.rows.iter().collect();
        rows.sort_by_key(|row| relative_value_of(&row.record));
        rows
    }

    /// Plain-text rendering of the first `max_rows` sorted rows, one line
    /// per row plus a header; this is what the summarizer reads.
    pub fn to_text(&self, max_rows: usize) -> String {
        let mut out = TABLE_COLUMNS.join(" | ");
        out.push('\n');

        for row in self.sorted_rows().into_iter().take(max_rows) {
            let cells: Vec<String> = TABLE_COLUMNS
                .iter()
                .map(|column| cell_text(&row.record[*column]))
                .collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }

        out
    }
}

fn relative_value_of(record: &Value) -> i64 {
    record
        .get("Relative Value")
        .and_then(Value::as_i64)
        .unwrap_or(0)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rental(raw: Value) -> Rental {
        Rental::from_raw(&raw).unwrap()
    }

    fn complete_rental(address: &str, price: f64, zestimate: i64, bedrooms: i64) -> Rental {
        rental(json!({
            "address": address,
            "price": price,
            "bedrooms": bedrooms,
            "bathrooms": 1,
            "rentZestimate": zestimate,
            "latitude": 40.7,
            "longitude": -74.0,
        }))
    }

    #[test]
    fn filter_by_bedrooms_is_exact_and_idempotent() {
        let mut collection = RentalCollection::new(vec![
            complete_rental("a", 3000.0, 2900, 1),
            complete_rental("b", 3100.0, 3000, 2),
            rental(json!({ "address": "c" })), // no bedrooms at all
        ]);

        collection.filter_by_bedrooms(2);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.rentals[0].address, "b");

        collection.filter_by_bedrooms(2);
        assert_eq!(collection.len(), 1, "re-applying the same filter is a no-op");
    }

    #[test]
    fn filter_by_bathrooms_drops_missing_values() {
        let mut collection = RentalCollection::new(vec![
            complete_rental("a", 3000.0, 2900, 1),
            rental(json!({ "address": "b", "bathrooms": 2 })),
        ]);

        collection.filter_by_bathrooms(1);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.rentals[0].address, "a");
    }

    #[test]
    fn center_of_empty_collection_is_origin() {
        let collection = RentalCollection::default();
        assert_eq!(collection.center_of_lat_lng(), (0.0, 0.0));
    }

    #[test]
    fn center_picks_the_middle_record() {
        let mut rentals = Vec::new();
        for i in 0..5 {
            rentals.push(rental(json!({
                "address": format!("{i} Main St"),
                "latitude": 40.0 + i as f64,
                "longitude": -74.0 - i as f64,
            })));
        }
        let collection = RentalCollection::new(rentals);

        // len 5 -> index 2 for both coordinates
        assert_eq!(collection.center_of_lat_lng(), (42.0, -76.0));
    }

    #[test]
    fn to_table_excludes_incomplete_records() {
        let collection = RentalCollection::new(vec![
            complete_rental("a", 3000.0, 2900, 1),
            rental(json!({ "address": "no geo", "price": 2000, "rentZestimate": 2500 })),
        ]);

        let table = collection.to_table().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].record["Address"], json!("a"));
    }

    #[test]
    fn to_table_with_no_displayable_rows_is_none() {
        let collection = RentalCollection::new(vec![rental(json!({ "address": "a" }))]);
        assert!(collection.to_table().is_none());
    }

    #[test]
    fn color_scales_between_min_and_max() {
        let collection = RentalCollection::new(vec![
            complete_rental("cheap", 2500.0, 3000, 1),  // rv -500 -> min
            complete_rental("mid", 3000.0, 2750, 1),    // rv 250
            complete_rental("dear", 3500.0, 2500, 1),   // rv 1000 -> max
        ]);

        let table = collection.to_table().unwrap();
        assert_eq!(table.rows[0].color, [0, 255, 0, 160]);
        assert_eq!(table.rows[2].color, [255, 0, 0, 160]);
        // 255 * 750 / 1500 = 127
        assert_eq!(table.rows[1].color, [127, 128, 0, 160]);
    }

    #[test]
    fn equal_relative_values_get_midpoint_color() {
        let collection = RentalCollection::new(vec![
            complete_rental("a", 3000.0, 2900, 1),
            complete_rental("b", 3100.0, 3000, 1),
        ]);

        let table = collection.to_table().unwrap();
        for row in &table.rows {
            assert_eq!(row.color, [127, 128, 0, 160]);
        }
    }

    #[test]
    fn sorted_rows_ascend_by_relative_value() {
        let collection = RentalCollection::new(vec![
            complete_rental("dear", 3500.0, 2500, 1), // rv 1000
            complete_rental("cheap", 2500.0, 3000, 1), // rv -500
        ]);

        let table = collection.to_table().unwrap();
        let sorted = table.sorted_rows();
        assert_eq!(sorted[0].record["Address"], json!("cheap"));
        assert_eq!(sorted[1].record["Address"], json!("dear"));
    }

    #[test]
    fn table_text_has_header_and_respects_row_limit() {
        let collection = RentalCollection::new(vec![
            complete_rental("a", 3000.0, 2900, 1),
            complete_rental("b", 3100.0, 3000, 1),
        ]);

        let text = collection.to_table().unwrap().to_text(1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Address"));
        assert!(lines[1].starts_with("a"));
    }

    #[test]
    fn from_pages_skips_pages_without_props() {
        let pages = vec![
            json!({ "totalPages": 3, "props": [{ "address": "one" }] }),
            json!({ "totalPages": 3 }),
            json!({ "totalPages": 3, "props": [{ "address": "three" }] }),
        ];

        let collection = RentalCollection::from_pages(&pages).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.rentals[0].address, "one");
        assert_eq!(collection.rentals[1].address, "three");
    }

    #[test]
    fn sorted_records_include_incomplete_rentals() {
        let collection = RentalCollection::new(vec![
            complete_rental("dear", 3500.0, 2500, 1), // rv 1000
            rental(json!({ "address": "bare" })),      // rv 0
        ]);

        let records = collection.sorted_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Address"], json!("bare"));
        assert_eq!(records[1]["Address"], json!("dear"));
    }
}
