use crate::OutputFormat;
use crate::config::Config;
use crate::platform::state_paths;
use crate::speedtest::{self, client::SpeedTestClient};
use crate::state::{SpeedSample, with_state_lock};
use anyhow::{Context, Result};
use chrono::Utc;
use std::time::Duration;
use tracing::info;

/// Measure the download speed with the configured server and remember the
/// result for later `calc` runs.
pub async fn measure(config: &Config, bytes: Option<u64>) -> Result<SpeedSample> {
    let settings = &config.speedtest;
    let bytes = bytes.unwrap_or(settings.bytes);
    let client = SpeedTestClient::new(bytes).with_base_url(&settings.url);

    info!(url = %settings.url, bytes, samples = settings.samples, "running speed test");
    let mbps = speedtest::run(
        &client,
        settings.samples,
        settings.retries,
        Duration::from_secs(settings.timeout_secs),
    )
    .await
    .context("Speed test failed")?;

    let sample = SpeedSample {
        mbps,
        measured_at: Utc::now(),
    };

    let (lock_path, state_path) = state_paths(config.state.state_dir_override.as_ref())?;
    with_state_lock(&lock_path, &state_path, |state| {
        state.last_speed_test = Some(sample.clone());
        Ok(())
    })?;

    Ok(sample)
}

pub async fn speedtest(config: &Config, bytes: Option<u64>, format: OutputFormat) -> Result<()> {
    if matches!(format, OutputFormat::Text) {
        println!("Testing download speed...");
    }

    let sample = measure(config, bytes).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sample)?),
        OutputFormat::Text => println!("✓ Download speed: {:.2} Mbps", sample.mbps),
    }

    Ok(())
}
