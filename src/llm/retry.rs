//! Bounded-retry decorator for completion services
//!
//! Off unless `SOUS_CHEF_MAX_RETRIES` is set; the relay endpoint itself always
//! makes a single attempt against whatever service it was given.

use super::{CompletionService, LlmError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
/// Ceiling on any single wait, including a provider's `Retry-After`
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);
const DEFAULT_MAX_ELAPSED: Duration = Duration::from_secs(60);

/// Retries retryable failures with exponential backoff
pub struct RetryingService {
    inner: Arc<dyn CompletionService>,
    max_retries: u32,
    base_delay: Duration,
    /// Total time budget across all attempts and waits
    max_elapsed: Duration,
}

impl RetryingService {
    pub fn new(inner: Arc<dyn CompletionService>, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            base_delay: DEFAULT_BASE_DELAY,
            max_elapsed: DEFAULT_MAX_ELAPSED,
        }
    }

    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    #[must_use]
    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    /// Exponential backoff: base, 2*base, 4*base... capped at `MAX_RETRY_DELAY`
    fn retry_delay(&self, retry: u32) -> Duration {
        (self.base_delay * (1u32 << (retry - 1).min(16))).min(MAX_RETRY_DELAY)
    }

    fn delay_for(&self, error: &LlmError, retry: u32) -> Duration {
        error
            .retry_after
            .map_or_else(|| self.retry_delay(retry), |d| d.min(MAX_RETRY_DELAY))
    }
}

#[async_trait]
impl CompletionService for RetryingService {
    async fn complete(&self, user_text: &str) -> Result<Value, LlmError> {
        let start = Instant::now();
        let mut retry = 0;
        loop {
            match self.inner.complete(user_text).await {
                Ok(payload) => return Ok(payload),
                Err(e) if e.kind.is_retryable() && retry < self.max_retries => {
                    retry += 1;
                    let delay = self.delay_for(&e, retry);
                    if start.elapsed() + delay > self.max_elapsed {
                        tracing::warn!(
                            retry,
                            delay_ms = %delay.as_millis(),
                            budget_ms = %self.max_elapsed.as_millis(),
                            error = %e.message,
                            "Retry budget exhausted"
                        );
                        return Err(e);
                    }
                    tracing::warn!(
                        retry,
                        max_retries = self.max_retries,
                        delay_ms = %delay.as_millis(),
                        error = %e.message,
                        "Retrying completion request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}
