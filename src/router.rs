use crate::api::{SearchCriteria, Summarizer, ZillowClient};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{csv_response, html_response};
use crate::spreadsheets::{csv_filename, rentals_to_csv};
use crate::templates;
use astra::Request;
use std::collections::HashMap;

/// Shared per-process state handed to every request.
pub struct App {
    pub zillow: ZillowClient,
    pub summarizer: Option<Summarizer>,
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => html_response(templates::pages::home_page()),
        ("GET", "/search") => search(&req, app),
        ("GET", "/download") => download(&req, app),
        _ => Err(ServerError::NotFound),
    }
}

fn search(req: &Request, app: &App) -> ResultResp {
    let criteria = parse_criteria(req)?;
    let collection = app.zillow.fetch_rentals(&criteria);
    let center = collection.center_of_lat_lng();

    // An empty table covers both a genuinely empty result and a swallowed
    // fetch failure; the fetcher already logged which one it was.
    let Some(table) = collection.to_table() else {
        return html_response(templates::pages::no_results_page());
    };

    let summary = app
        .summarizer
        .as_ref()
        .and_then(|summarizer| match summarizer.summarize(&table) {
            Ok(text) => Some(text),
            Err(e) => {
                eprintln!("⚠️ Summary request failed: {e}");
                None
            }
        });

    let download_query = req.uri().query().unwrap_or("");
    html_response(templates::pages::results_page(
        &criteria,
        center,
        &table,
        summary.as_deref(),
        download_query,
    ))
}

fn download(req: &Request, app: &App) -> ResultResp {
    let criteria = parse_criteria(req)?;
    // Identical arguments within the cache window, so this re-serves the
    // pages the search just fetched instead of hitting the API again.
    let collection = app.zillow.fetch_rentals(&criteria);

    csv_response(rentals_to_csv(&collection), &csv_filename(&criteria))
}

fn parse_criteria(req: &Request) -> Result<SearchCriteria, ServerError> {
    let params = parse_query(req);

    let city = params.get("city").map(|s| s.trim()).unwrap_or("");
    let state = params.get("state").map(|s| s.trim()).unwrap_or("");
    if city.is_empty() || state.is_empty() {
        return Err(ServerError::BadRequest(
            "Please enter a city and state to fetch data.".to_string(),
        ));
    }

    Ok(SearchCriteria {
        city: city.to_string(),
        state: state.to_string(),
        min_price: number_param(&params, "min_price", 2500),
        max_price: number_param(&params, "max_price", 4000),
        baths_min: number_param(&params, "baths_min", 1),
        beds_min: number_param(&params, "beds_min", 1),
        exact_bathrooms: checkbox_param(&params, "exact_bathrooms"),
        exact_bedrooms: checkbox_param(&params, "exact_bedrooms"),
    })
}

fn number_param(params: &HashMap<String, String>, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn checkbox_param(params: &HashMap<String, String>, name: &str) -> bool {
    matches!(
        params.get(name).map(String::as_str),
        Some("on") | Some("true") | Some("1")
    )
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}
