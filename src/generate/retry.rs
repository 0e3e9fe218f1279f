//! Quota-aware retry controller
//!
//! Wraps every outbound call to the generation service. Rate-limit
//! signals are retried with a linearly growing wait; any other error
//! propagates immediately.

use crate::error::{GenesisError, GenesisResult};
use crate::generate::service::GenerationService;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Total attempts per logical request
pub const MAX_ATTEMPTS: u32 = 5;

/// The wait before retry `n` is `BACKOFF_STEP * n`
pub const BACKOFF_STEP: Duration = Duration::from_secs(12);

/// Issue one logical generation request with bounded retry.
///
/// On the service's throttle signal the call is retried after
/// `12 * attempt_number` seconds, up to [`MAX_ATTEMPTS`] total attempts,
/// then fails with [`GenesisError::QuotaExhausted`].
pub async fn generate_with_retry(
    service: &dyn GenerationService,
    model: &str,
    instruction: &str,
) -> GenesisResult<String> {
    let mut attempt = 1u32;

    loop {
        match service.generate(model, instruction).await {
            Ok(text) => return Ok(text),
            Err(e) if e.is_quota_signal() => {
                if attempt >= MAX_ATTEMPTS {
                    return Err(GenesisError::QuotaExhausted {
                        attempts: MAX_ATTEMPTS,
                    });
                }

                let wait = BACKOFF_STEP * attempt;
                warn!(
                    "Rate limited (attempt {}/{}), retrying in {}s",
                    attempt,
                    MAX_ATTEMPTS,
                    wait.as_secs()
                );
                sleep(wait).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with the quota signal until `succeed_on`, then succeeds.
    /// `succeed_on = 0` means never succeed.
    struct ThrottledService {
        calls: AtomicU32,
        succeed_on: u32,
    }

    impl ThrottledService {
        fn new(succeed_on: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                succeed_on,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationService for ThrottledService {
        async fn generate(&self, _model: &str, _instruction: &str) -> GenesisResult<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.succeed_on != 0 && call >= self.succeed_on {
                Ok("generated".to_string())
            } else {
                Err(GenesisError::QuotaExceeded)
            }
        }
    }

    struct BrokenService;

    #[async_trait]
    impl GenerationService for BrokenService {
        async fn generate(&self, _model: &str, _instruction: &str) -> GenesisResult<String> {
            Err(GenesisError::Service("boom".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_five_attempts() {
        let service = ThrottledService::new(0);

        let result = generate_with_retry(&service, "gpt-4", "x").await;

        assert!(matches!(
            result,
            Err(GenesisError::QuotaExhausted { attempts: 5 })
        ));
        assert_eq!(service.calls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_grows_linearly() {
        let service = ThrottledService::new(0);
        let started = tokio::time::Instant::now();

        let _ = generate_with_retry(&service, "gpt-4", "x").await;

        // Waits of 12, 24, 36 and 48 seconds between the five attempts
        assert_eq!(started.elapsed(), Duration::from_secs(120));
    }

    #[tokio::test(start_paused = true)]
    async fn returns_first_success() {
        let service = ThrottledService::new(3);

        let result = generate_with_retry(&service, "gpt-4", "x").await.unwrap();

        assert_eq!(result, "generated");
        assert_eq!(service.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_success_needs_one_call() {
        let service = ThrottledService::new(1);

        generate_with_retry(&service, "gpt-4", "x").await.unwrap();
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn non_quota_error_is_not_retried() {
        let result = generate_with_retry(&BrokenService, "gpt-4", "x").await;
        assert!(matches!(result, Err(GenesisError::Service(_))));
    }
}
