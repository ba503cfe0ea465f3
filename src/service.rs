use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};

use crate::client::OpenMeteoClient;
use crate::config::Config;
use crate::error::{self, WeatherError};
use crate::formatters::{format_current, format_historical, format_location, weather_code_to_description};
use crate::models::{GetWeatherDataRequest, WeatherReport};
use crate::query::WeatherQuery;

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    client: OpenMeteoClient,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: &Config) -> error::Result<Self> {
        Ok(Self {
            client: OpenMeteoClient::new(config)?,
            tool_router: Self::tool_router(),
        })
    }

    /// Resolves the city, then runs exactly one weather request for it.
    pub async fn query_weather(&self, query: &WeatherQuery) -> error::Result<WeatherReport> {
        let place = self.client.geocode(query.city_name()).await?;
        let location = format_location(place);
        tracing::debug!(
            "Resolved '{}' for {} query to {} ({:?}) at {}, {}",
            query.city_name(),
            query.query_type(),
            location.city,
            location.country,
            location.latitude,
            location.longitude
        );

        match query {
            WeatherQuery::Current { .. } => {
                let forecast = self.client.current(location.latitude, location.longitude).await?;
                tracing::debug!(
                    "Current conditions in {}: {}",
                    location.city,
                    weather_code_to_description(forecast.current.weather_code)
                );
                Ok(format_current(location, forecast))
            }
            WeatherQuery::Historical { range, .. } => {
                let archive = self
                    .client
                    .daily(location.latitude, location.longitude, *range)
                    .await?;
                format_historical(location, *range, archive)
            }
        }
    }

    /// Validates raw arguments and returns the report as a JSON string
    pub async fn get_weather_json(&self, request: &GetWeatherDataRequest) -> error::Result<String> {
        let query = WeatherQuery::try_from(request)?;
        let report = self.query_weather(&query).await?;
        serde_json::to_string_pretty(&report)
            .map_err(|e| WeatherError::UpstreamSchemaMismatch(format!("failed to encode result: {}", e)))
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "open-meteo-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather information service powered by the Open-Meteo API. \
                Provides current conditions and daily historical weather for cities worldwide."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets current or historical weather for a city
    #[tool(description = "Fetch weather data for a city. query_type is \"current\" (default) for a snapshot of 13 instantaneous fields, or \"historical\" for daily aggregates between start_date and end_date (YYYY-MM-DD, both required, inclusive). Returns a JSON string with a location block and either a current or daily block. Weather codes are WMO codes.")]
    async fn get_weather_data(
        &self,
        Parameters(request): Parameters<GetWeatherDataRequest>,
    ) -> Result<CallToolResult, McpError> {
        let query_type = request.query_type.clone().unwrap_or_else(|| "current".to_string());
        tracing::info!("Getting {} weather for city: {}", query_type, request.city_name);

        match self.get_weather_json(&request).await {
            Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
            Err(e) => {
                tracing::warn!("Weather query for '{}' failed: {}", request.city_name, e);
                Err(e.into_mcp_error(&request.city_name, &query_type))
            }
        }
    }
}
