use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    Config, WeatherError,
    model::{ForecastSample, LocationQuery, WeatherSnapshot},
};

use super::WeatherProvider;

const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Snapshot and forecast fields are Celsius and m/s, so the unit system is fixed.
const UNITS: &str = "metric";
const LANGUAGE: &str = "kr";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn from_config(api_key: String, config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            api_key,
            base_url: OPENWEATHER_BASE_URL.to_string(),
            http,
        })
    }

    /// Point the provider at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get<T>(&self, endpoint: &str, query: &LocationQuery) -> Result<T, WeatherError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{endpoint}", self.base_url);
        let mut params = query.query_pairs();
        params.push(("units", UNITS.to_string()));
        params.push(("lang", LANGUAGE.to_string()));
        params.push(("appid", self.api_key.clone()));

        tracing::debug!(endpoint, %query, "sending OpenWeather request");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|err| WeatherError::Malformed(format!("{endpoint}: {err}")))
    }
}

fn status_error(status: StatusCode, body: &str) -> WeatherError {
    match status {
        StatusCode::NOT_FOUND => WeatherError::LocationNotFound,
        StatusCode::UNAUTHORIZED => WeatherError::Unauthorized,
        _ => {
            let message = serde_json::from_str::<OwErrorBody>(body)
                .map(|b| b.message)
                .unwrap_or_else(|_| truncate_body(body));
            WeatherError::Upstream {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    #[serde(default)]
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<u32>,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        let (description, icon) = first_condition(self.weather);

        Ok(WeatherSnapshot {
            location_name: self.name,
            country: self.sys.country.unwrap_or_default(),
            observed_at: unix_to_utc(self.dt)?,
            utc_offset_secs: self.timezone,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            visibility_m: self.visibility,
            wind_speed_mps: self.wind.speed,
            description,
            icon,
            sunrise: self.sys.sunrise.map(unix_to_utc).transpose()?,
            sunset: self.sys.sunset.map(unix_to_utc).transpose()?,
        })
    }
}

impl OwForecastEntry {
    fn into_sample(self) -> Result<ForecastSample, WeatherError> {
        let (description, icon) = first_condition(self.weather);

        Ok(ForecastSample {
            at: unix_to_utc(self.dt)?,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            description,
            icon,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, query: &LocationQuery) -> Result<WeatherSnapshot, WeatherError> {
        let parsed: OwCurrentResponse = self.get("weather", query).await?;
        parsed.into_snapshot()
    }

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<ForecastSample>, WeatherError> {
        let parsed: OwForecastResponse = self.get("forecast", query).await?;
        parsed.list.into_iter().map(OwForecastEntry::into_sample).collect()
    }
}

fn first_condition(weather: Vec<OwWeather>) -> (String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| WeatherError::Malformed(format!("timestamp out of range: {ts}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
