//! Rate limiting for NCBI E-utilities compliance
//!
//! NCBI allows 3 requests per second without an API key and 10 requests per
//! second with one; violations can result in IP blocking. The limiter is a
//! token bucket shared across clones of the client.

use std::sync::{Arc, Mutex};

use tokio::time::{sleep, Duration, Instant};
use tracing::debug;

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<TokenBucket>>,
}

struct TokenBucket {
    tokens: f64,
    capacity: f64,
    refill_rate: f64, // tokens per second
    last_refill: Instant,
}

impl TokenBucket {
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }
}

impl RateLimiter {
    /// Create a new rate limiter allowing `rate` requests per second
    pub fn new(rate: f64) -> Self {
        let capacity = rate.max(1.0);
        Self {
            bucket: Arc::new(Mutex::new(TokenBucket {
                tokens: capacity,
                capacity,
                refill_rate: rate.max(f64::MIN_POSITIVE),
                last_refill: Instant::now(),
            })),
        }
    }

    /// Limiter for the NCBI default of 3 requests/second (no API key)
    pub fn ncbi_default() -> Self {
        Self::new(3.0)
    }

    /// Limiter for the NCBI API-key allowance of 10 requests/second
    pub fn ncbi_with_key() -> Self {
        Self::new(10.0)
    }

    /// Acquire a token, sleeping until one becomes available
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().unwrap();
                bucket.refill();

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    debug!(remaining_tokens = bucket.tokens, "Rate limit token acquired");
                    None
                } else {
                    // Time until one full token accumulates
                    let deficit = 1.0 - bucket.tokens;
                    Some(Duration::from_secs_f64(deficit / bucket.refill_rate))
                }
            };

            match wait {
                None => return,
                Some(duration) => {
                    debug!(
                        wait_ms = duration.as_millis() as u64,
                        "Rate limit reached, waiting"
                    );
                    sleep(duration).await;
                }
            }
        }
    }

    /// Check whether a token is available without consuming one
    pub fn check_available(&self) -> bool {
        let mut bucket = self.bucket.lock().unwrap();
        bucket.refill();
        bucket.tokens >= 1.0
    }

    /// Configured rate limit in requests per second
    pub fn rate(&self) -> f64 {
        self.bucket.lock().unwrap().refill_rate
    }
}
