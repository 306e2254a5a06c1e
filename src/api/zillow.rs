use crate::api::backoff::Backoff;
use crate::api::cache::ExpiringCache;
use crate::api::ApiError;
use crate::data::RentalCollection;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_HOST: &str = "zillow-com1.p.rapidapi.com";
const CACHE_MAX_AGE: Duration = Duration::from_secs(600); // 10 minutes

/// Sentinel upper bound when an exact bed/bath count was not requested.
const NO_UPPER_BOUND: u32 = 99;

pub struct ZillowConfig {
    pub api_key: String,
    pub host: String,
}

impl ZillowConfig {
    pub fn from_env() -> Result<Self, ApiError> {
        let api_key = std::env::var("ZILLOW_API_KEY")
            .map_err(|_| ApiError::Config("ZILLOW_API_KEY environment variable not set".into()))?;
        Ok(Self {
            api_key,
            host: DEFAULT_HOST.to_string(),
        })
    }
}

/// One rental search. Hashable because it keys the page cache together
/// with the page number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchCriteria {
    pub city: String,
    pub state: String,
    pub min_price: u32,
    pub max_price: u32,
    pub baths_min: u32,
    pub beds_min: u32,
    pub exact_bathrooms: bool,
    pub exact_bedrooms: bool,
}

impl SearchCriteria {
    /// Query parameters for one page request. An exact flag pins the max
    /// bound to the min bound; otherwise the max is effectively unbounded.
    pub fn query_params(&self, page: u32) -> Vec<(&'static str, String)> {
        let baths_max = if self.exact_bathrooms {
            self.baths_min
        } else {
            NO_UPPER_BOUND
        };
        let beds_max = if self.exact_bedrooms {
            self.beds_min
        } else {
            NO_UPPER_BOUND
        };

        vec![
            ("location", format!("{}, {}", self.city, self.state)),
            ("status_type", "ForRent".to_string()),
            ("rentMinPrice", self.min_price.to_string()),
            ("rentMaxPrice", self.max_price.to_string()),
            ("bathsMin", self.baths_min.to_string()),
            ("bathsMax", baths_max.to_string()),
            ("bedsMin", self.beds_min.to_string()),
            ("bedsMax", beds_max.to_string()),
            ("page", page.to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PageKey {
    criteria: SearchCriteria,
    page: u32,
}

/// Fetch every page for a search: page 1 first to learn `totalPages`, then
/// pages 1..=totalPages in order (page 1 comes back out of the cache in
/// production use). A missing `totalPages` degrades to no pages at all.
pub fn fetch_all_pages<F>(mut fetch_page: F) -> Result<Vec<Value>, ApiError>
where
    F: FnMut(u32) -> Result<Value, ApiError>,
{
    let initial = fetch_page(1)?;
    let total_pages = initial
        .get("totalPages")
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32;

    let mut pages = Vec::with_capacity(total_pages as usize);
    for page in 1..=total_pages {
        pages.push(fetch_page(page)?);
    }

    Ok(pages)
}

/// The full pipeline below the swallow boundary: paginate, merge, build
/// records, then re-validate exact bed/bath matches client-side (the query
/// already asked for them, but the API is not guaranteed to honor it).
pub fn assemble_collection<F>(
    criteria: &SearchCriteria,
    fetch_page: F,
) -> Result<RentalCollection, ApiError>
where
    F: FnMut(u32) -> Result<Value, ApiError>,
{
    let pages = fetch_all_pages(fetch_page)?;
    let mut collection = RentalCollection::from_pages(&pages)?;

    if criteria.exact_bedrooms {
        collection.filter_by_bedrooms(criteria.beds_min as i64);
    }
    if criteria.exact_bathrooms {
        collection.filter_by_bathrooms(criteria.baths_min as i64);
    }

    Ok(collection)
}

pub struct ZillowClient {
    client: Client,
    config: ZillowConfig,
    cache: ExpiringCache<PageKey, Value>,
    backoff: Backoff,
}

impl ZillowClient {
    pub fn new(config: ZillowConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            config,
            cache: ExpiringCache::new(CACHE_MAX_AGE),
            backoff: Backoff::default(),
        })
    }

    /// Run a search. Every failure below this boundary is logged and
    /// collapsed into an empty collection; callers never see an error and
    /// never see a partial page set.
    pub fn fetch_rentals(&self, criteria: &SearchCriteria) -> RentalCollection {
        match assemble_collection(criteria, |page| self.page_json(criteria, page)) {
            Ok(collection) => {
                eprintln!(
                    "✅ Fetched {} rentals for {}, {}",
                    collection.len(),
                    criteria.city,
                    criteria.state
                );
                collection
            }
            Err(e) => {
                eprintln!(
                    "⚠️ Rental fetch failed for {}, {}: {e}",
                    criteria.city, criteria.state
                );
                RentalCollection::default()
            }
        }
    }

    /// One page, composed the way the original stacked its decorators:
    /// backoff outside, cache inside, HTTP at the bottom. A cached hit
    /// never touches the network; a 429 bubbles past the cache (errors are
    /// not cached) and triggers the retry sleep.
    fn page_json(&self, criteria: &SearchCriteria, page: u32) -> Result<Value, ApiError> {
        let key = PageKey {
            criteria: criteria.clone(),
            page,
        };

        self.backoff.retry(|| {
            self.cache
                .get_or_fetch(key.clone(), || self.request_page(criteria, page))
        })
    }

    fn request_page(&self, criteria: &SearchCriteria, page: u32) -> Result<Value, ApiError> {
        let url = format!("https://{}/propertyExtendedSearch", self.config.host);

        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.host)
            .query(&criteria.query_params(page))
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ApiError::RateLimited);
        }

        let text = response
            .text()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16(), text));
        }

        serde_json::from_str(&text).map_err(|e| ApiError::JsonParse(e.to_string()))
    }
}
