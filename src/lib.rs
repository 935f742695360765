pub mod commands;
pub mod config;
pub mod error;
pub mod estimate;
pub mod platform;
pub mod speedtest;
pub mod state;
pub mod theme;
pub mod units;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
