pub mod calc;
pub mod config;
pub mod speedtest;
pub mod theme;
pub mod units;
