use crate::config::{Config, config_path, load_from_path};
use anyhow::{Context, Result};
use std::fs;
use tracing::warn;

pub fn list(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

pub fn get(key: &str, config: &Config) -> Result<()> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;

    // Dot notation: "speedtest.samples"
    let mut current = &value;
    for part in key.split('.') {
        current = current
            .get(part)
            .with_context(|| format!("Key not found: {}", part))?;
    }

    match current {
        serde_json::Value::String(s) => println!("{}", s),
        v => println!("{}", v),
    }

    Ok(())
}

/// Set a dotted key in the config file. Comments in the file are not kept.
pub fn set(key: &str, value: &str) -> Result<()> {
    let path = config_path()?;
    let mut table: toml::Table = if path.exists() {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        content.parse().context("Failed to parse config file")?
    } else {
        toml::Table::new()
    };

    set_dotted(&mut table, key, parse_value(value))?;

    let content = toml::to_string_pretty(&table).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &content).context("Failed to write config file")?;

    // Warn when the edited file no longer loads
    let reloaded = load_from_path(&path).and_then(|c| c.validate().map(|_| c));
    if let Err(e) = reloaded {
        warn!("{} now fails validation: {:#}", path.display(), e);
    }

    println!("✓ {} = {}", key, value);
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn parse_value(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = raw.parse::<i64>() {
        toml::Value::Integer(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        toml::Value::Float(f)
    } else {
        toml::Value::String(raw.to_string())
    }
}

fn set_dotted(table: &mut toml::Table, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let (last, sections) = parts
        .split_last()
        .context("Config key must not be empty")?;

    let mut current = table;
    for section in sections {
        let entry = current
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        current = entry
            .as_table_mut()
            .with_context(|| format!("'{}' is not a section", section))?;
    }
    current.insert(last.to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("3"), toml::Value::Integer(3));
        assert_eq!(parse_value("2.5"), toml::Value::Float(2.5));
        assert_eq!(parse_value("mbps"), toml::Value::String("mbps".into()));
    }

    #[test]
    fn test_set_dotted_creates_sections() {
        let mut table = toml::Table::new();
        set_dotted(&mut table, "speedtest.samples", toml::Value::Integer(3)).unwrap();
        assert_eq!(
            table["speedtest"]["samples"],
            toml::Value::Integer(3)
        );
    }

    #[test]
    fn test_set_dotted_rejects_scalar_section() {
        let mut table = toml::Table::new();
        table.insert("units".into(), toml::Value::Integer(1));
        assert!(set_dotted(&mut table, "units.strict", toml::Value::Boolean(true)).is_err());
    }
}
