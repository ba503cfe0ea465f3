use clap::Parser;

use crate::constants::{ARCHIVE_API_BASE, DEFAULT_TIMEOUT_SECS, FORECAST_API_BASE, GEOCODING_API_BASE};

/// Runtime configuration, from flags or environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "open-meteo-mcp", version, about = "MCP server for Open-Meteo weather data")]
pub struct Config {
    /// Base URL of the geocoding API
    #[arg(long, env = "OPEN_METEO_GEOCODING_URL", default_value = GEOCODING_API_BASE)]
    pub geocoding_url: String,

    /// Base URL of the forecast API
    #[arg(long, env = "OPEN_METEO_FORECAST_URL", default_value = FORECAST_API_BASE)]
    pub forecast_url: String,

    /// Base URL of the historical archive API
    #[arg(long, env = "OPEN_METEO_ARCHIVE_URL", default_value = ARCHIVE_API_BASE)]
    pub archive_url: String,

    /// Timeout for each upstream request, in seconds
    #[arg(long, env = "OPEN_METEO_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[cfg(test)]
impl Config {
    /// Points every upstream at one server, e.g. a wiremock instance.
    pub fn with_base_url(base: &str) -> Self {
        Self {
            geocoding_url: base.to_string(),
            forecast_url: base.to_string(),
            archive_url: base.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
