use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Open-Meteo Geocoding API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    // The key is absent entirely when nothing matches.
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    #[serde(rename = "admin1")]
    pub region: Option<String>,
}

// ============================================================================
// Open-Meteo Forecast / Archive API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: CurrentData,
    #[serde(default)]
    pub current_units: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    pub time: String,
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub relative_humidity: f64,
    pub apparent_temperature: f64,
    pub precipitation: f64,
    pub rain: f64,
    pub snowfall: f64,
    pub weather_code: i32,
    pub cloud_cover: f64,
    pub pressure_msl: f64,
    pub surface_pressure: f64,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction: f64,
    #[serde(rename = "wind_gusts_10m")]
    pub wind_gusts: f64,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveResponse {
    pub daily: DailyData,
    #[serde(default)]
    pub daily_units: BTreeMap<String, String>,
}

/// Parallel arrays, one entry per day. Individual values are null where the
/// archive has no data.
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<i32>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_mean")]
    pub temperature_mean: Vec<Option<f64>>,
    pub apparent_temperature_max: Vec<Option<f64>>,
    pub apparent_temperature_min: Vec<Option<f64>>,
    pub apparent_temperature_mean: Vec<Option<f64>>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub rain_sum: Vec<Option<f64>>,
    pub snowfall_sum: Vec<Option<f64>>,
    pub precipitation_hours: Vec<Option<f64>>,
    #[serde(rename = "wind_speed_10m_max")]
    pub wind_speed_max: Vec<Option<f64>>,
    #[serde(rename = "wind_gusts_10m_max")]
    pub wind_gusts_max: Vec<Option<f64>>,
    #[serde(rename = "wind_direction_10m_dominant")]
    pub wind_direction_dominant: Vec<Option<f64>>,
    #[serde(rename = "shortwave_radiation_sum")]
    pub shortwave_radiation: Vec<Option<f64>>,
}

/// Error body Open-Meteo sends with a 4xx status
#[derive(Debug, Deserialize)]
pub struct UpstreamErrorBody {
    pub reason: Option<String>,
}

// ============================================================================
// Tool Output Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationInfo {
    pub city: String,
    pub country: Option<String>,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub time: String,
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub relative_humidity: f64,
    pub apparent_temperature: f64,
    pub precipitation: f64,
    pub rain: f64,
    pub snowfall: f64,
    pub weather_code: i32,
    pub cloud_cover: f64,
    pub pressure_msl: f64,
    pub surface_pressure: f64,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction: f64,
    #[serde(rename = "wind_gusts_10m")]
    pub wind_gusts: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: String,
    pub weather_code: Option<i32>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Option<f64>,
    #[serde(rename = "temperature_2m_mean")]
    pub temperature_mean: Option<f64>,
    pub apparent_temperature_max: Option<f64>,
    pub apparent_temperature_min: Option<f64>,
    pub apparent_temperature_mean: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub precipitation_sum: Option<f64>,
    pub rain_sum: Option<f64>,
    pub snowfall_sum: Option<f64>,
    pub precipitation_hours: Option<f64>,
    #[serde(rename = "wind_speed_10m_max")]
    pub wind_speed_max: Option<f64>,
    #[serde(rename = "wind_gusts_10m_max")]
    pub wind_gusts_max: Option<f64>,
    #[serde(rename = "wind_direction_10m_dominant")]
    pub wind_direction_dominant: Option<f64>,
    #[serde(rename = "shortwave_radiation_sum")]
    pub shortwave_radiation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeInfo {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentReport {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub units: BTreeMap<String, String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalReport {
    pub location: LocationInfo,
    pub date_range: DateRangeInfo,
    pub daily: Vec<DailyRecord>,
    pub units: BTreeMap<String, String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeatherReport {
    Current(CurrentReport),
    Historical(HistoricalReport),
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherDataRequest {
    /// Name of the city to fetch weather for
    // Absent arrives as "" so validation reports it as invalid input.
    #[serde(default)]
    pub city_name: String,
    /// "current" or "historical" (default: "current")
    #[serde(default)]
    pub query_type: Option<String>,
    /// Start date for historical data, YYYY-MM-DD
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date for historical data, YYYY-MM-DD
    #[serde(default)]
    pub end_date: Option<String>,
}
