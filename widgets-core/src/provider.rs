use crate::{
    Config, WeatherError,
    model::{ForecastSample, LocationQuery, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, query: &LocationQuery) -> Result<WeatherSnapshot, WeatherError>;

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<ForecastSample>, WeatherError>;
}

/// Fetch current conditions and the forecast feed concurrently.
///
/// Both requests must succeed; the first failure fails the whole lookup.
pub async fn fetch_current_and_forecast<P>(
    provider: &P,
    query: &LocationQuery,
) -> Result<(WeatherSnapshot, Vec<ForecastSample>), WeatherError>
where
    P: WeatherProvider + ?Sized,
{
    tracing::debug!(%query, "fetching current conditions and forecast");
    let result = tokio::try_join!(provider.fetch_current(query), provider.fetch_forecast(query));
    if let Err(err) = &result {
        tracing::warn!(%query, error = %err, "weather lookup failed");
    }
    result
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.resolve_api_key()?;
    OpenWeatherProvider::from_config(api_key, config)
}
