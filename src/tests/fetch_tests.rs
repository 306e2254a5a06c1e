// Pipeline tests driven through the closure seam, no server involved.

use crate::api::{assemble_collection, fetch_all_pages, ApiError, SearchCriteria};
use serde_json::{json, Value};

fn criteria() -> SearchCriteria {
    SearchCriteria {
        city: "Hoboken".to_string(),
        state: "NJ".to_string(),
        min_price: 2500,
        max_price: 4000,
        baths_min: 1,
        beds_min: 1,
        exact_bathrooms: false,
        exact_bedrooms: false,
    }
}

/// A page-fetch stub serving canned responses and counting invocations.
fn paged(responses: Vec<Result<Value, ApiError>>) -> impl FnMut(u32) -> Result<Value, ApiError> {
    move |page: u32| {
        responses
            .get((page - 1) as usize)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::Http(404, format!("no page {page}"))))
    }
}

#[test]
fn aggregates_pages_in_order_skipping_missing_props() {
    let collection = assemble_collection(
        &criteria(),
        paged(vec![
            Ok(json!({ "totalPages": 3, "props": [{ "address": "page one" }] })),
            Ok(json!({ "totalPages": 3 })), // no props field at all
            Ok(json!({ "totalPages": 3, "props": [{ "address": "page three" }] })),
        ]),
    )
    .unwrap();

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.rentals[0].address, "page one");
    assert_eq!(collection.rentals[1].address, "page three");
}

#[test]
fn page_one_is_requested_twice_like_the_cache_expects() {
    let mut calls = Vec::new();
    let pages = fetch_all_pages(|page| {
        calls.push(page);
        Ok(json!({ "totalPages": 2, "props": [] }))
    })
    .unwrap();

    // initial probe for totalPages, then the 1..=totalPages sweep
    assert_eq!(calls, vec![1, 1, 2]);
    assert_eq!(pages.len(), 2);
}

#[test]
fn missing_total_pages_degrades_to_no_results() {
    let collection = assemble_collection(
        &criteria(),
        paged(vec![Ok(json!({ "props": [{ "address": "ignored" }] }))]),
    )
    .unwrap();

    assert!(collection.is_empty());
}

#[test]
fn error_mid_sequence_discards_partial_pages() {
    let result = assemble_collection(
        &criteria(),
        paged(vec![
            Ok(json!({ "totalPages": 2, "props": [{ "address": "page one" }] })),
            Err(ApiError::Http(500, "server error".to_string())),
        ]),
    );

    assert!(result.is_err(), "page 1 alone must not leak through");
}

#[test]
fn exact_flags_refilter_client_side() {
    let mut c = criteria();
    c.beds_min = 2;
    c.exact_bedrooms = true;

    // The server ignored the exact bound and returned a 1-bed too.
    let collection = assemble_collection(
        &c,
        paged(vec![Ok(json!({
            "totalPages": 1,
            "props": [
                { "address": "two beds", "bedrooms": 2 },
                { "address": "one bed", "bedrooms": 1 },
            ]
        }))]),
    )
    .unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.rentals[0].address, "two beds");
}

#[test]
fn hoboken_end_to_end_scenario() {
    let collection = assemble_collection(
        &criteria(),
        paged(vec![Ok(json!({
            "totalPages": 1,
            "props": [
                {
                    "address": "A St",
                    "price": 3000,
                    "latitude": 40.74,
                    "longitude": -74.03,
                    // no rentZestimate at all
                },
                {
                    "address": "B St",
                    "price": 2800,
                    "rentZestimate": 3100,
                    "latitude": 40.75,
                    "longitude": -74.02,
                },
            ]
        }))]),
    )
    .unwrap();

    assert_eq!(collection.len(), 2);

    // zestimate coerced to zero leaves the raw price as relative value
    let a = &collection.rentals[0];
    assert_eq!(a.zestimate, None);
    assert_eq!(a.relative_value, 3000);

    let records = collection.sorted_records();
    assert_eq!(records[0]["Address"], json!("B St")); // rv -300 sorts first
    assert_eq!(records[1]["Address"], json!("A St"));
}

#[test]
fn missing_address_fails_the_whole_fetch() {
    let result = assemble_collection(
        &criteria(),
        paged(vec![Ok(json!({
            "totalPages": 1,
            "props": [{ "price": 3000 }]
        }))]),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::MissingField("address".to_string())
    );
}
