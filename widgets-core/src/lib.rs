//! Core library for the `widgets` CLI.
//!
//! This crate defines:
//! - The tic-tac-toe board engine and turn controller
//! - The OpenWeather client, daily forecast aggregation and recent-cities list
//! - The weather panel state with its stale-response guard
//! - Configuration & credentials handling
//!
//! It is used by `widgets-cli`, but can also be reused by other front ends.

pub mod board;
pub mod config;
pub mod error;
pub mod forecast;
pub mod game;
pub mod geolocation;
pub mod model;
pub mod panel;
pub mod provider;
pub mod recent;

pub use board::{Board, LINES, Marker, evaluate_winner, winning_line};
pub use config::Config;
pub use error::{GeolocationError, WeatherError};
pub use forecast::{MAX_FORECAST_DAYS, aggregate_daily};
pub use game::{Game, GameStatus, MoveOutcome};
pub use geolocation::{ConfiguredGeolocator, Geolocator};
pub use model::{
    Coordinates, DailySummary, ForecastSample, IconSize, LocationQuery, WeatherSnapshot, icon_url,
};
pub use panel::{LookupOutcome, PanelView, Ticket, WeatherPanel, WeatherReport};
pub use provider::{WeatherProvider, fetch_current_and_forecast, provider_from_config};
pub use recent::{RECENT_CAPACITY, RecentCities};
