use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry an async operation with exponential backoff: 100ms, 200ms, 400ms...
pub async fn with_retry<F, Fut, T, E>(mut operation: F, max_retries: u32) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_retries => {
                let backoff_ms = 2_u64.pow(attempt) * 100;
                warn!(
                    attempt = attempt + 1,
                    max_retries,
                    backoff_ms,
                    "speed test failed: {e}, retrying"
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                attempt += 1;
            }
            Err(e) => {
                warn!("speed test failed after {} attempts", max_retries + 1);
                return Err(e);
            }
        }
    }
}
