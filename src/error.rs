//! Classified failures of a weather query.

use rmcp::ErrorData as McpError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("City '{0}' not found")]
    CityNotFound(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream schema mismatch: {0}")]
    UpstreamSchemaMismatch(String),
}

impl WeatherError {
    /// Stable machine-readable kind, reported in the MCP error data.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::CityNotFound(_) => "city_not_found",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::UpstreamSchemaMismatch(_) => "upstream_schema_mismatch",
        }
    }

    /// Converts into the protocol error returned from the tool call.
    ///
    /// Caller mistakes map to `invalid_params`, upstream trouble to `internal_error`.
    pub fn into_mcp_error(self, city_name: &str, query_type: &str) -> McpError {
        let data = Some(json!({
            "kind": self.kind(),
            "city_name": city_name,
            "query_type": query_type,
        }));
        let message = self.to_string();

        match self {
            Self::InvalidInput(_) | Self::CityNotFound(_) => McpError::invalid_params(message, data),
            Self::UpstreamUnavailable(_) | Self::UpstreamSchemaMismatch(_) => {
                McpError::internal_error(message, data)
            }
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::UpstreamUnavailable(format!("request timed out: {}", e))
        } else {
            Self::UpstreamUnavailable(e.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        Self::UpstreamSchemaMismatch(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
