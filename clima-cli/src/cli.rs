use clap::{Parser, Subcommand};
use clima_core::{Config, ProviderId, provider_from_config};

use crate::display;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Consulta el clima de una ciudad")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "open-meteo" or "openweather".
        provider: String,
    },

    /// Show current weather and forecast for a city.
    Show {
        /// City or place name.
        city: String,

        /// Forecast window, in days after today.
        #[arg(long, default_value_t = 5)]
        days: usize,

        /// Provider to use instead of the configured default.
        #[arg(long)]
        provider: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show {
                city,
                days,
                provider,
            } => show(&city, days, provider.as_deref()).await,
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    if id.requires_api_key() {
        let api_key = inquire::Password::new("API key:")
            .without_confirmation()
            .prompt()?;
        config.upsert_provider_api_key(id, api_key);
    }
    config.set_default_provider(id);
    config.save()?;

    println!("Proveedor '{id}' configurado como predeterminado.");
    Ok(())
}

async fn show(city: &str, days: usize, provider: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let id = match provider {
        Some(s) => ProviderId::try_from(s)?,
        None => config.default_provider_id()?,
    };

    let provider = provider_from_config(id, &config)?;
    let snapshot = provider.snapshot(city).await?;

    print!("{}", display::render(&snapshot, days));
    Ok(())
}
