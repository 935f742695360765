use crate::error::SpeedTestError;
use crate::speedtest::ThroughputProbe;
use reqwest::Client;
use std::future::Future;
use std::time::Instant;
use tracing::debug;

pub const DEFAULT_SPEEDTEST_URL: &str = "https://speed.cloudflare.com";
pub const DEFAULT_DOWNLOAD_BYTES: u64 = 10_000_000;

/// Measures throughput by timing one download from a speed test server.
pub struct SpeedTestClient {
    client: Client,
    base_url: String,
    bytes: u64,
}

impl SpeedTestClient {
    pub fn new(bytes: u64) -> Self {
        let client = Client::builder()
            .user_agent(concat!("dltime/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: DEFAULT_SPEEDTEST_URL.to_string(),
            bytes,
        }
    }

    /// Point the probe at another server (a mirror, or a mock in tests)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Request `bytes` bytes and time the whole transfer, from sending the
    /// request to receiving the last chunk.
    pub async fn download_sample(&self) -> Result<f64, SpeedTestError> {
        let url = format!("{}/__down", self.base_url);
        debug!(%url, bytes = self.bytes, "starting speed test download");

        let start = Instant::now();
        let mut response = self
            .client
            .get(&url)
            .query(&[("bytes", self.bytes)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeedTestError::Status(status.as_u16()));
        }

        let mut received: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            received += chunk.len() as u64;
        }
        let elapsed = start.elapsed().as_secs_f64();

        if received == 0 {
            return Err(SpeedTestError::EmptyResponse);
        }

        let mbps = megabits_per_second(received, elapsed);
        debug!(received, elapsed, mbps, "speed test download finished");
        Ok(mbps)
    }
}

impl ThroughputProbe for SpeedTestClient {
    fn measure(&self) -> impl Future<Output = Result<f64, SpeedTestError>> + Send {
        self.download_sample()
    }
}

/// Decimal megabits per second.
pub fn megabits_per_second(bytes: u64, elapsed_secs: f64) -> f64 {
    let elapsed_secs = elapsed_secs.max(1e-9);
    bytes as f64 * 8.0 / 1_000_000.0 / elapsed_secs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_megabits_per_second() {
        assert_eq!(megabits_per_second(10_000_000, 1.0), 80.0);
        assert_eq!(megabits_per_second(1_250_000, 0.5), 20.0);
    }

    #[test]
    fn test_zero_elapsed_does_not_divide_by_zero() {
        assert!(megabits_per_second(1, 0.0).is_finite());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = SpeedTestClient::new(1).with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
