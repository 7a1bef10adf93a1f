use clap::{Parser, Subcommand};
use widgets_core::{Config, ConfiguredGeolocator, provider_from_config};

use crate::{configure, tictactoe, weather};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "widgets", version, about = "Tic-tac-toe and weather widgets")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key, default city and location sharing.
    Configure,

    /// Show current weather and the 5-day forecast once.
    Weather {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        /// Use the configured home location instead of a city name.
        #[arg(long, conflicts_with = "city")]
        here: bool,
    },

    /// Interactive weather panel with recent searches.
    Panel,

    /// Play tic-tac-toe for two players on one terminal.
    Tictactoe,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure::run(),
            Command::Weather { city, here } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let target = if here {
                    weather::Target::Here
                } else {
                    weather::Target::City(city.unwrap_or_else(|| config.default_city.clone()))
                };
                let geolocator = ConfiguredGeolocator::from_config(&config);
                weather::show_once(&provider, &geolocator, target).await
            }
            Command::Panel => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let geolocator = ConfiguredGeolocator::from_config(&config);
                weather::run_panel(&provider, &geolocator, &config.default_city).await
            }
            Command::Tictactoe => tictactoe::run(),
        }
    }
}
