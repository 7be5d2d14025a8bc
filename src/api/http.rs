use anyhow::{Context, Result};
use rand::Rng;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Retry schedule for transient store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub base_delay: Duration,
    /// Jitter is added up to `delay / jitter_divisor`.
    pub jitter_divisor: u32,
}

impl Default for RetryPolicy {
    /// 3 retries with exponential backoff from 1s, plus up to 25% jitter.
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            jitter_divisor: 4,
        }
    }
}

impl RetryPolicy {
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn base_delay_for(&self, attempt: usize) -> Duration {
        let multiplier = 1u32.checked_shl(attempt as u32).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(multiplier)
    }

    fn with_jitter(&self, delay: Duration) -> Duration {
        if self.jitter_divisor == 0 {
            return delay;
        }
        let max_jitter_ms = delay.as_millis() / u128::from(self.jitter_divisor);
        if max_jitter_ms == 0 {
            return delay;
        }

        let max_jitter_ms = std::cmp::min(max_jitter_ms, u128::from(u64::MAX)) as u64;
        let jitter_ms = rand::thread_rng().gen_range(0..=max_jitter_ms);
        delay + Duration::from_millis(jitter_ms)
    }
}

fn is_retriable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn is_retriable_send_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// Send a request built by `make_request`, retrying transient failures.
///
/// Non-retriable or exhausted error statuses are returned as `Ok(response)`
/// so the caller can turn the body into a structured error.
pub(super) async fn send_with_retry(
    policy: RetryPolicy,
    mut make_request: impl FnMut() -> reqwest::RequestBuilder,
) -> Result<reqwest::Response> {
    let max_attempts = policy.max_retries + 1;
    let mut attempt = 0;

    loop {
        let can_retry = attempt < policy.max_retries;

        match make_request().send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() || !(can_retry && is_retriable_status(status)) {
                    return Ok(response);
                }

                let delay = policy.with_jitter(policy.base_delay_for(attempt));
                debug!(
                    "HTTP request failed with status {}; retrying in {:?} (attempt {}/{})",
                    status,
                    delay,
                    attempt + 1,
                    max_attempts
                );
                let _ = response.bytes().await;
                sleep(delay).await;
            }
            Err(err) => {
                if !(can_retry && is_retriable_send_error(&err)) {
                    return Err(anyhow::Error::new(err)).with_context(|| {
                        format!("HTTP request failed after {} attempt(s)", attempt + 1)
                    });
                }

                let delay = policy.with_jitter(policy.base_delay_for(attempt));
                debug!(
                    "HTTP request error: {}; retrying in {:?} (attempt {}/{})",
                    err,
                    delay,
                    attempt + 1,
                    max_attempts
                );
                sleep(delay).await;
            }
        }

        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.base_delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.base_delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.base_delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn test_jitter_stays_within_quarter() {
        let policy = RetryPolicy::default();
        for _ in 0..100 {
            let delay = policy.with_jitter(Duration::from_secs(4));
            assert!(delay >= Duration::from_secs(4));
            assert!(delay <= Duration::from_secs(5));
        }
    }

    #[test]
    fn test_retriable_statuses() {
        assert!(is_retriable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retriable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retriable_status(StatusCode::UNAUTHORIZED));
        assert!(!is_retriable_status(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[test]
    fn test_no_retry_policy() {
        assert_eq!(RetryPolicy::none().max_retries, 0);
    }
}
