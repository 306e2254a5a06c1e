use crate::api::SearchCriteria;
use crate::data::{RentalTable, TABLE_COLUMNS};
use crate::templates::desktop_layout;
use maud::{html, Markup};
use serde_json::Value;
use url::form_urlencoded;

pub fn results_page(
    criteria: &SearchCriteria,
    center: (f64, f64),
    table: &RentalTable,
    summary: Option<&str>,
    download_query: &str,
) -> Markup {
    let bedrooms_text = count_text(criteria.beds_min, criteria.exact_bedrooms);
    let bathrooms_text = count_text(criteria.baths_min, criteria.exact_bathrooms);
    let rows = table.sorted_rows();

    desktop_layout(
        "Results",
        html! {
            h1 { "Rentals in " (criteria.city) ", " (criteria.state) }
            p {
                "Listings with " (bedrooms_text) " bedrooms, " (bathrooms_text)
                " bathrooms, priced $" (criteria.min_price) "–$" (criteria.max_price)
                ". Map center: (" (format!("{:.4}", center.0)) ", "
                (format!("{:.4}", center.1)) "). Lower relative value is a better deal."
            }

            @if let Some(summary) = summary {
                div class="summary" {
                    p { (summary) }
                }
            }

            div class="table-container" {
                table {
                    thead {
                        tr {
                            @for column in TABLE_COLUMNS {
                                th { (column) }
                            }
                        }
                    }
                    tbody {
                        @for row in &rows {
                            tr {
                                @for column in TABLE_COLUMNS {
                                    td {
                                        @if column == "Address" {
                                            (address_link(&row.record))
                                        } @else {
                                            (display_cell(&row.record[column]))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            p {
                a href=(format!("/download?{download_query}")) { "Download CSV" }
            }
        },
    )
}

pub fn no_results_page() -> Markup {
    desktop_layout(
        "No Results",
        html! {
            h1 { "No rentals found for the given criteria." }
            p { a href="/" { "Try another search" } }
        },
    )
}

fn count_text(count: u32, exact: bool) -> String {
    if exact {
        format!("exactly {count}")
    } else {
        format!("at least {count}")
    }
}

/// Each address doubles as a Google search link, like the original table.
fn address_link(record: &Value) -> Markup {
    let address = record["Address"].as_str().unwrap_or("");
    let query: String = form_urlencoded::byte_serialize(address.as_bytes()).collect();
    let href = format!("https://www.google.com/search?q={query}");

    html! {
        a href=(href) target="_blank" { (address) }
    }
}

fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
