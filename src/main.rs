use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use dltime::OutputFormat;
use dltime::commands;
use dltime::commands::calc::SpeedSource;
use dltime::config;
use dltime::theme::Theme;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dltime")]
#[command(about = "File size & internet speed calculator: how long will this download take?")]
#[command(version)]
struct Cli {
    #[arg(short, long, action = ArgAction::Count, global = true, help = "More log output (-v, -vv, -vvv)")]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate download time and finish time
    #[command(allow_negative_numbers = true)]
    Calc {
        #[arg(help = "File size")]
        size: f64,
        #[arg(help = "Size unit: b, kb, mb, gb, tb")]
        size_unit: String,
        #[arg(help = "Internet speed (omit to use the last speed test)")]
        speed: Option<f64>,
        #[arg(
            requires = "speed",
            help = "Speed unit: bps (B/s), kbps, kbs (KB/s), mbps, mbs (MB/s), gbps, gbs (GB/s)"
        )]
        speed_unit: Option<String>,
        #[arg(long, conflicts_with = "speed", help = "Run a speed test first and use its result")]
        measure: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Measure the current download speed
    Speedtest {
        #[arg(
            long,
            value_parser = clap::value_parser!(u64).range(1..),
            help = "Bytes to download (default from config)"
        )]
        bytes: Option<u64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the accepted size and speed units
    Units {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show or change the colour theme
    Theme(ThemeArgs),

    /// Show or change configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct ThemeArgs {
    #[command(subcommand)]
    action: ThemeAction,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// List available themes, marking the current one
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the current theme
    Get,
    /// Remember a theme
    Set {
        #[arg(value_enum)]
        theme: Theme,
    },
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get { key: String },
    Set { key: String, value: String },
    /// Print the config file location
    Path,
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load().unwrap_or_else(|e| {
        warn!("Ignoring configuration: {:#}. Using defaults.", e);
        config::Config::default()
    });

    match cli.command {
        Commands::Calc {
            size,
            size_unit,
            speed,
            speed_unit,
            measure,
            format,
        } => {
            let source = match speed {
                Some(value) => SpeedSource::Given {
                    value,
                    unit: speed_unit,
                },
                None if measure => {
                    let sample = tokio::runtime::Runtime::new()?
                        .block_on(commands::speedtest::measure(&config, None))?;
                    SpeedSource::Measured(sample.mbps)
                }
                None => SpeedSource::LastTest,
            };
            commands::calc::calc(&config, size, &size_unit, source, format)?;
        }
        Commands::Speedtest { bytes, format } => {
            tokio::runtime::Runtime::new()?
                .block_on(commands::speedtest::speedtest(&config, bytes, format))?;
        }
        Commands::Units { format } => commands::units::list(format)?,
        Commands::Theme(args) => match args.action {
            ThemeAction::List { format } => commands::theme::list(&config, format)?,
            ThemeAction::Get => commands::theme::get(&config)?,
            ThemeAction::Set { theme } => commands::theme::set(&config, theme)?,
        },
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Get { key } => commands::config::get(key, &config)?,
            ConfigAction::Set { key, value } => commands::config::set(key, value)?,
            ConfigAction::Path => commands::config::path()?,
        },
    }

    Ok(())
}
