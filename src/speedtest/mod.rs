pub mod client;
pub mod retry;

use crate::error::SpeedTestError;
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Anything that can measure downstream throughput, in megabits per second.
pub trait ThroughputProbe {
    fn measure(&self) -> impl Future<Output = Result<f64, SpeedTestError>> + Send;
}

/// Collect `samples` measurements (each retried up to `retries` times) and
/// report their median. The whole run is abandoned after `timeout`.
pub async fn run<P: ThroughputProbe>(
    probe: &P,
    samples: u32,
    retries: u32,
    timeout: Duration,
) -> Result<f64, SpeedTestError> {
    let collect = async {
        let mut results = Vec::with_capacity(samples as usize);
        for sample in 1..=samples.max(1) {
            let mbps = retry::with_retry(|| probe.measure(), retries).await?;
            info!(sample, mbps, "speed test sample");
            results.push(mbps);
        }
        Ok::<_, SpeedTestError>(results)
    };

    let mut results = tokio::time::timeout(timeout, collect)
        .await
        .map_err(|_| SpeedTestError::Timeout(timeout))??;

    median(&mut results).ok_or(SpeedTestError::EmptyResponse)
}

/// Median of the collected samples. `None` when there are none.
pub fn median(samples: &mut [f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_by(f64::total_cmp);
    let mid = samples.len() / 2;
    if samples.len() % 2 == 0 {
        Some((samples[mid - 1] + samples[mid]) / 2.0)
    } else {
        Some(samples[mid])
    }
}
