use crate::OutputFormat;
use crate::config::Config;
use crate::estimate::capitalize;
use crate::platform::state_paths;
use crate::state::{State, with_state_lock};
use crate::theme::Theme;
use anyhow::Result;

pub fn current(config: &Config) -> Result<Theme> {
    let (_, state_path) = state_paths(config.state.state_dir_override.as_ref())?;
    Ok(State::load(&state_path)?.theme)
}

pub fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let active = current(config)?;

    match format {
        OutputFormat::Json => {
            let names: Vec<&str> = Theme::ALL.iter().map(|t| t.name()).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "current": active,
                    "themes": names,
                }))?
            );
        }
        OutputFormat::Text => {
            for theme in Theme::ALL {
                let marker = if theme == active { "*" } else { " " };
                println!("{} {}", marker, capitalize(theme.name()));
            }
        }
    }

    Ok(())
}

pub fn get(config: &Config) -> Result<()> {
    println!("{}", current(config)?.name());
    Ok(())
}

pub fn set(config: &Config, theme: Theme) -> Result<()> {
    let (lock_path, state_path) = state_paths(config.state.state_dir_override.as_ref())?;
    with_state_lock(&lock_path, &state_path, |state| {
        state.theme = theme;
        Ok(())
    })?;
    println!("✓ Theme set to {}", capitalize(theme.name()));
    Ok(())
}
