use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::constants::{
    CURRENT_FIELDS, DAILY_FIELDS, DATE_FORMAT, GEOCODING_RESULT_COUNT, UNIT_PARAMS, USER_AGENT,
};
use crate::error::{Result, WeatherError};
use crate::models::{
    ArchiveResponse, ForecastResponse, GeocodingResponse, GeocodingResult, UpstreamErrorBody,
};
use crate::query::DateRange;

/// HTTP client for the Open-Meteo geocoding, forecast and archive APIs.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Arc<Client>,
    geocoding_url: String,
    forecast_url: String,
    archive_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
            archive_url: config.archive_url.trim_end_matches('/').to_string(),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Open-Meteo explains rejected parameters in a `reason` field.
            let body = response.bytes().await.unwrap_or_default();
            let reason = serde_json::from_slice::<UpstreamErrorBody>(&body)
                .ok()
                .and_then(|b| b.reason);
            let message = match reason {
                Some(reason) => format!("{} returned status {}: {}", url, status, reason),
                None => format!("{} returned status {}", url, status),
            };
            return Err(WeatherError::UpstreamUnavailable(message));
        }

        let body = response.bytes().await?;
        let data = serde_json::from_slice::<T>(&body)?;
        Ok(data)
    }

    /// Resolves a city name to its highest-ranked geocoding match
    pub async fn geocode(&self, city_name: &str) -> Result<GeocodingResult> {
        let url = format!("{}/search", self.geocoding_url);
        let query = [
            ("name", city_name.to_string()),
            ("count", GEOCODING_RESULT_COUNT.to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];

        tracing::info!("Using Open-Meteo geocoding API for '{}'", city_name);
        let response = self.make_request::<GeocodingResponse>(&url, &query).await?;

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound(city_name.to_string()))
    }

    /// Fetches the instantaneous conditions at a point
    pub async fn current(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse> {
        let url = format!("{}/forecast", self.forecast_url);
        let mut query = coordinates(latitude, longitude);
        query.push(("current", CURRENT_FIELDS.join(",")));
        query.extend(units());

        tracing::info!("Using Open-Meteo forecast API at {}, {}", latitude, longitude);

        self.make_request(&url, &query).await
    }

    /// Fetches daily aggregates at a point over an inclusive date range
    pub async fn daily(&self, latitude: f64, longitude: f64, range: DateRange) -> Result<ArchiveResponse> {
        let url = format!("{}/archive", self.archive_url);
        let mut query = coordinates(latitude, longitude);
        query.push(("start_date", range.start.format(DATE_FORMAT).to_string()));
        query.push(("end_date", range.end.format(DATE_FORMAT).to_string()));
        query.push(("daily", DAILY_FIELDS.join(",")));
        query.push(("timezone", "auto".to_string()));
        query.extend(units());

        tracing::info!(
            "Using Open-Meteo archive API at {}, {} from {} to {}",
            latitude,
            longitude,
            range.start,
            range.end
        );

        self.make_request(&url, &query).await
    }
}

fn coordinates(latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", latitude.to_string()),
        ("longitude", longitude.to_string()),
    ]
}

fn units() -> Vec<(&'static str, String)> {
    UNIT_PARAMS.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use std::io::Write;
    use std::sync::Mutex;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn client_for(server: &MockServer) -> OpenMeteoClient {
        OpenMeteoClient::new(&Config::with_base_url(&server.uri())).unwrap()
    }

    #[tokio::test]
    async fn geocode_picks_first_result() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("name", "Springfield"))
            .and(query_param("language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "name": "Springfield", "latitude": 39.80, "longitude": -89.64,
                      "country": "United States", "admin1": "Illinois" },
                    { "name": "Springfield", "latitude": 37.21, "longitude": -93.29,
                      "country": "United States", "admin1": "Missouri" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server).geocode("Springfield").await.unwrap();

        assert_eq!(place.name, "Springfield");
        assert_eq!(place.region.as_deref(), Some("Illinois"));
        assert_eq!(place.latitude, 39.80);
    }

    #[tokio::test]
    async fn geocode_without_results_is_city_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.4 })))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).geocode("Zzzznotacity123").await.unwrap_err();

        assert!(matches!(err, WeatherError::CityNotFound(ref c) if c == "Zzzznotacity123"));
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).geocode("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamUnavailable(_)));
        assert!(err.to_string().contains("503"), "Error should mention status: {}", err);
    }

    #[tokio::test]
    async fn logs_each_upstream_call() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let client = client_for(&mock_server);
        let range = DateRange {
            start: chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: chrono::NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
        };
        let _ = client.geocode("Lisbon").await;
        let _ = client.current(38.72, -9.14).await;
        let _ = client.daily(38.72, -9.14, range).await;

        let output = logs.contents();
        assert!(output.contains("geocoding API for 'Lisbon'"), "missing geocode log: {output}");
        assert!(output.contains("forecast API at 38.72, -9.14"), "missing forecast log: {output}");
        assert!(
            output.contains("archive API at 38.72, -9.14 from 2023-01-01 to 2023-01-03"),
            "missing archive log: {output}"
        );
    }

    #[tokio::test]
    async fn rejected_request_reports_upstream_reason() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/archive"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": true,
                "reason": "Parameter 'start_date' is out of allowed range from 1940-01-01 to 2026-10-18"
            })))
            .mount(&mock_server)
            .await;

        let range = DateRange {
            start: chrono::NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(),
            end: chrono::NaiveDate::from_ymd_opt(1900, 1, 2).unwrap(),
        };
        let err = client_for(&mock_server).daily(48.85, 2.35, range).await.unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamUnavailable(_)));
        let msg = err.to_string();
        assert!(msg.contains("400"), "Error should mention status: {}", msg);
        assert!(msg.contains("out of allowed range"), "Error should carry the reason: {}", msg);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_upstream_unavailable() {
        let config = Config::with_base_url("http://127.0.0.1:1");
        let client = OpenMeteoClient::new(&config).unwrap();

        let err = client.geocode("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "results": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let mut config = Config::with_base_url(&mock_server.uri());
        config.timeout_secs = 1;
        let err = OpenMeteoClient::new(&config).unwrap().geocode("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn current_requests_all_fields_in_metric_units() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "51.50853"))
            .and(query_param("longitude", "-0.12574"))
            .and(query_param("current", CURRENT_FIELDS.join(",")))
            .and(query_param("temperature_unit", "celsius"))
            .and(query_param("wind_speed_unit", "kmh"))
            .and(query_param("precipitation_unit", "mm"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "current": {} })))
            .expect(1)
            .mount(&mock_server)
            .await;

        // An empty current block reaches the mock but fails decoding.
        let err = client_for(&mock_server).current(51.50853, -0.12574).await.unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamSchemaMismatch(_)));
    }

    #[tokio::test]
    async fn daily_requests_the_date_range() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/archive"))
            .and(query_param("start_date", "2023-01-01"))
            .and(query_param("end_date", "2023-01-03"))
            .and(query_param("daily", DAILY_FIELDS.join(",")))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let range = DateRange {
            start: chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: chrono::NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
        };
        let err = client_for(&mock_server).daily(48.85, 2.35, range).await.unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamSchemaMismatch(_)));
    }
}
