mod api_error;
mod backoff;
mod cache;
mod summarizer;
mod zillow;

pub use api_error::ApiError;
pub use backoff::Backoff;
pub use cache::ExpiringCache;
pub use summarizer::{Summarizer, SummarizerConfig, SUMMARY_ROW_LIMIT};
pub use zillow::{
    assemble_collection, fetch_all_pages, SearchCriteria, ZillowClient, ZillowConfig,
};
