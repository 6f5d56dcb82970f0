//! Weather chip data source
//!
//! Background fetch chain: IP geolocation → Open-Meteo current conditions.
//! Runs on the tokio runtime, independent of preference state, and publishes
//! results over a watch channel the UI polls each frame. Failures degrade to
//! an inline error state; only a location permission denial offers a retry.

use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{Notify, watch};
use tracing::{info, warn};

use crate::constants::weather as cfg;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentWeather {
    pub temperature_c: f32,
    pub code: u16,
}

impl CurrentWeather {
    /// WMO weather code → short condition label
    pub fn label(&self) -> &'static str {
        match self.code {
            0 => "Clear",
            1..=3 => "Partly cloudy",
            45 | 48 => "Fog",
            51..=57 => "Drizzle",
            61..=67 => "Rain",
            71..=77 => "Snow",
            80..=82 => "Showers",
            85 | 86 => "Snow showers",
            95..=99 => "Thunderstorm",
            _ => "Overcast",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.code {
            0 => "\u{2600}",            // sun
            1..=3 => "\u{26C5}",        // sun behind cloud
            45 | 48 => "\u{1F32B}",     // fog
            51..=67 | 80..=82 => "\u{1F327}", // rain
            71..=77 | 85 | 86 => "\u{2744}",  // snow
            95..=99 => "\u{26C8}",      // storm
            _ => "\u{2601}",            // cloud
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("location access denied")]
    LocationDenied,
    #[error("location unavailable")]
    LocationUnavailable,
    #[error("weather unavailable")]
    Fetch,
}

impl WeatherError {
    /// Only a denial gets a retry affordance in the chip; generic failures
    /// wait for the next scheduled refresh.
    pub fn offers_retry(&self) -> bool {
        matches!(self, WeatherError::LocationDenied)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherState {
    Loading,
    Ready(CurrentWeather),
    Failed(WeatherError),
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: ForecastCurrent,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    temperature_2m: f32,
    weather_code: u16,
}

/// UI-side handle: current state plus a manual retry trigger
pub struct WeatherService {
    state: watch::Receiver<WeatherState>,
    retry: Arc<Notify>,
}

impl WeatherService {
    pub fn spawn(runtime: &Handle) -> Self {
        let (tx, rx) = watch::channel(WeatherState::Loading);
        let retry = Arc::new(Notify::new());
        let retry_signal = Arc::clone(&retry);
        runtime.spawn(run_loop(tx, retry_signal));
        Self { state: rx, retry }
    }

    pub fn state(&self) -> WeatherState {
        self.state.borrow().clone()
    }

    pub fn retry(&self) {
        self.retry.notify_one();
    }
}

async fn run_loop(tx: watch::Sender<WeatherState>, retry: Arc<Notify>) {
    let client = reqwest::Client::new();
    let mut cached_position: Option<((f64, f64), Instant)> = None;

    loop {
        match fetch_current(&client, &mut cached_position).await {
            Ok(weather) => {
                info!(temperature = weather.temperature_c, code = weather.code, "Weather updated");
                if tx.send(WeatherState::Ready(weather)).is_err() {
                    return;
                }
            }
            Err(err) => {
                warn!(error = %err, "Weather fetch failed");
                if tx.send(WeatherState::Failed(err)).is_err() {
                    return;
                }
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(cfg::REFRESH_INTERVAL_SECS)) => {}
            _ = retry.notified() => info!("Manual weather retry requested"),
        }
    }
}

async fn fetch_current(
    client: &reqwest::Client,
    cached_position: &mut Option<((f64, f64), Instant)>,
) -> Result<CurrentWeather, WeatherError> {
    let (latitude, longitude) = locate(client, cached_position).await?;

    let response = client
        .get(cfg::FORECAST_URL)
        .query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", "temperature_2m,weather_code".to_string()),
        ])
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|err| {
            warn!(error = %err, "Forecast request failed");
            WeatherError::Fetch
        })?;

    let forecast: ForecastResponse = response.json().await.map_err(|err| {
        warn!(error = %err, "Forecast response malformed");
        WeatherError::Fetch
    })?;

    Ok(CurrentWeather {
        temperature_c: forecast.current.temperature_2m,
        code: forecast.current.weather_code,
    })
}

async fn locate(
    client: &reqwest::Client,
    cached: &mut Option<((f64, f64), Instant)>,
) -> Result<(f64, f64), WeatherError> {
    if let Some((position, resolved_at)) = cached
        && resolved_at.elapsed() < Duration::from_secs(cfg::POSITION_CACHE_SECS)
    {
        return Ok(*position);
    }

    let response = client
        .get(cfg::GEOLOCATION_URL)
        .timeout(Duration::from_secs(cfg::GEOLOCATION_TIMEOUT_SECS))
        .send()
        .await
        .map_err(|err| {
            warn!(error = %err, "Geolocation request failed");
            WeatherError::LocationUnavailable
        })?;

    if response.status() == reqwest::StatusCode::FORBIDDEN {
        return Err(WeatherError::LocationDenied);
    }
    let response = response
        .error_for_status()
        .map_err(|_| WeatherError::LocationUnavailable)?;

    let geo: GeoResponse = response
        .json()
        .await
        .map_err(|_| WeatherError::LocationUnavailable)?;

    let position = (geo.latitude, geo.longitude);
    *cached = Some((position, Instant::now()));
    info!(latitude = geo.latitude, longitude = geo.longitude, "Position resolved");
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_labels() {
        let weather = |code| CurrentWeather {
            temperature_c: 10.0,
            code,
        };
        assert_eq!(weather(0).label(), "Clear");
        assert_eq!(weather(2).label(), "Partly cloudy");
        assert_eq!(weather(48).label(), "Fog");
        assert_eq!(weather(63).label(), "Rain");
        assert_eq!(weather(75).label(), "Snow");
        assert_eq!(weather(81).label(), "Showers");
        assert_eq!(weather(96).label(), "Thunderstorm");
    }

    #[test]
    fn test_only_denial_offers_retry() {
        assert!(WeatherError::LocationDenied.offers_retry());
        assert!(!WeatherError::LocationUnavailable.offers_retry());
        assert!(!WeatherError::Fetch.offers_retry());
    }

    #[test]
    fn test_forecast_response_shape() {
        let body = r#"{ "current": { "temperature_2m": 18.4, "weather_code": 3, "time": "2024-11-04T10:00" } }"#;
        let parsed: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.current.temperature_2m, 18.4);
        assert_eq!(parsed.current.weather_code, 3);
    }

    #[test]
    fn test_geolocation_response_shape() {
        let body = r#"{ "ip": "203.0.113.7", "latitude": 52.52, "longitude": 13.405, "city": "Berlin" }"#;
        let parsed: GeoResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.latitude, 52.52);
        assert_eq!(parsed.longitude, 13.405);
    }
}
