use crate::OutputFormat;
use crate::units::{SizeUnit, SpeedUnit};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct UnitRow {
    token: &'static str,
    label: &'static str,
    multiplier: f64,
}

/// Print both unit tables: the token to type, its label, and its value in
/// bytes (or bytes per second).
pub fn list(format: OutputFormat) -> Result<()> {
    let sizes: Vec<UnitRow> = SizeUnit::ALL
        .iter()
        .map(|u| UnitRow {
            token: u.token(),
            label: u.label(),
            multiplier: u.multiplier(),
        })
        .collect();
    let speeds: Vec<UnitRow> = SpeedUnit::ALL
        .iter()
        .map(|u| UnitRow {
            token: u.token(),
            label: u.label(),
            multiplier: u.multiplier(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "size": sizes,
                    "speed": speeds,
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{:<8} {:<8} {}", "Size", "Label", "Bytes");
            for row in &sizes {
                println!("{:<8} {:<8} {}", row.token, row.label, row.multiplier);
            }
            println!();
            println!("{:<8} {:<8} {}", "Speed", "Label", "Bytes/s");
            for row in &speeds {
                println!("{:<8} {:<8} {}", row.token, row.label, row.multiplier);
            }
        }
    }

    Ok(())
}
