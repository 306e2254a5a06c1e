use crate::api::ApiError;
use rand::Rng;
use std::time::Duration;

/// Exponential backoff for rate-limited page fetches.
///
/// Only `ApiError::RateLimited` (HTTP 429) is retried; every other error
/// surfaces immediately so no attempts are wasted on failures that a wait
/// cannot fix. Sleeps are blocking, matching the synchronous fetch loop.
pub struct Backoff {
    pub max_tries: u32,
    pub base_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            max_tries: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl Backoff {
    pub fn retry<T, F>(&self, mut attempt: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Result<T, ApiError>,
    {
        let mut tries = 0;

        loop {
            tries += 1;

            match attempt() {
                Ok(value) => return Ok(value),
                Err(ApiError::RateLimited) if tries < self.max_tries => {
                    let backoff = self.base_delay * (1u32 << (tries - 1));
                    let jitter_ms = rand::thread_rng()
                        .gen_range(0..=self.base_delay.as_millis().max(1) as u64);
                    let delay = backoff + Duration::from_millis(jitter_ms);

                    eprintln!("⏳ Rate limited, attempt {tries} failed, sleeping {delay:?}");
                    std::thread::sleep(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
