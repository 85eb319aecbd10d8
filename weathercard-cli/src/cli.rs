use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::info;
use weathercard_core::{Config, Dashboard, ElementTree, load_record, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathercard", version, about = "Weather cards from WeatherAPI.com")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and a default location.
    Configure,

    /// Render current conditions and the 3-day forecast.
    Show {
        /// Location query, e.g. "san jose". Defaults to the configured location.
        location: Option<String>,

        /// Display metric units instead of imperial.
        #[arg(long)]
        metric: bool,

        /// Also expand the hourly forecast of this forecast day (0 = today).
        #[arg(long, value_name = "SLOT")]
        hourly: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, metric, hourly, format } => {
                show(location, metric, hourly, format).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut location_prompt = Text::new("Default location (leave empty for none):");
    if let Some(current) = config.location.as_deref() {
        location_prompt = location_prompt.with_default(current);
    }
    let location = location_prompt.prompt().context("Failed to read location")?;

    config.set_api_key(api_key.trim().to_string());
    config.set_location(Some(location.trim().to_string()));
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    location: Option<String>,
    metric: bool,
    hourly: Option<usize>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let location = config.resolve_location(location)?;
    let provider = provider_from_config(&config)?;

    info!(%location, "fetching forecast");
    let Some(record) = load_record(&*provider, &location).await else {
        bail!("No forecast available for '{location}'.");
    };

    let mut tree = ElementTree::new();
    let mut dashboard = Dashboard::render(&record, &mut tree);
    if metric {
        dashboard.toggle_units(&mut tree);
    }
    if let Some(slot) = hourly {
        dashboard.expand_hourly(&record, slot, &mut tree);
    }

    match format {
        OutputFormat::Text => print!("{}", tree.to_text()),
        OutputFormat::Html => print!("{}", tree.to_html()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_defaults_to_text_and_imperial() {
        let cli = Cli::try_parse_from(["weathercard", "show", "san jose"]).unwrap();
        match cli.command {
            Command::Show { location, metric, hourly, format } => {
                assert_eq!(location.as_deref(), Some("san jose"));
                assert!(!metric);
                assert_eq!(hourly, None);
                assert_eq!(format, OutputFormat::Text);
            }
            Command::Configure => panic!("expected show"),
        }
    }

    #[test]
    fn show_accepts_flags_without_location() {
        let cli = Cli::try_parse_from([
            "weathercard", "-vv", "show", "--metric", "--hourly", "1", "--format", "html",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Show { location, metric, hourly, format } => {
                assert_eq!(location, None);
                assert!(metric);
                assert_eq!(hourly, Some(1));
                assert_eq!(format, OutputFormat::Html);
            }
            Command::Configure => panic!("expected show"),
        }
    }

    #[test]
    fn configure_takes_no_arguments() {
        assert!(Cli::try_parse_from(["weathercard", "configure"]).is_ok());
        assert!(Cli::try_parse_from(["weathercard", "configure", "extra"]).is_err());
    }
}
