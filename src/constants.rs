/// User agent string for HTTP requests
pub const USER_AGENT: &str = "open-meteo-mcp/0.1.0";

/// Open-Meteo geocoding API base URL
pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Open-Meteo forecast API base URL
pub const FORECAST_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Open-Meteo historical archive API base URL
pub const ARCHIVE_API_BASE: &str = "https://archive-api.open-meteo.com/v1";

/// Default upstream request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Number of geocoding candidates requested; the first one wins
pub const GEOCODING_RESULT_COUNT: &str = "1";

/// Calendar date format accepted for historical ranges
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Instantaneous variables requested in current mode
pub const CURRENT_FIELDS: [&str; 13] = [
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "precipitation",
    "rain",
    "snowfall",
    "weather_code",
    "cloud_cover",
    "pressure_msl",
    "surface_pressure",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
];

/// Daily aggregates requested in historical mode
pub const DAILY_FIELDS: [&str; 17] = [
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "temperature_2m_mean",
    "apparent_temperature_max",
    "apparent_temperature_min",
    "apparent_temperature_mean",
    "sunrise",
    "sunset",
    "precipitation_sum",
    "rain_sum",
    "snowfall_sum",
    "precipitation_hours",
    "wind_speed_10m_max",
    "wind_gusts_10m_max",
    "wind_direction_10m_dominant",
    "shortwave_radiation_sum",
];

/// Unit parameters sent with every weather request
pub const UNIT_PARAMS: [(&str, &str); 3] = [
    ("temperature_unit", "celsius"),
    ("wind_speed_unit", "kmh"),
    ("precipitation_unit", "mm"),
];
