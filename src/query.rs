use chrono::NaiveDate;
use std::fmt;

use crate::constants::DATE_FORMAT;
use crate::error::{Result, WeatherError};
use crate::models::GetWeatherDataRequest;

/// Which upstream dataset a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryType {
    #[default]
    Current,
    Historical,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Current => "current",
            QueryType::Historical => "historical",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for QueryType {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "current" => Ok(QueryType::Current),
            "historical" => Ok(QueryType::Historical),
            _ => Err(WeatherError::InvalidInput(format!(
                "Invalid query_type: {value}. Must be 'current' or 'historical'"
            ))),
        }
    }
}

/// Inclusive calendar range for historical queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }
}

/// A validated weather query.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    Current { city_name: String },
    Historical { city_name: String, range: DateRange },
}

impl WeatherQuery {
    /// Validates raw tool arguments.
    pub fn parse(
        city_name: &str,
        query_type: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self> {
        let city_name = city_name.trim();
        if city_name.is_empty() {
            return Err(WeatherError::InvalidInput("city_name must not be empty".to_string()));
        }
        let city_name = city_name.to_string();

        let query_type = query_type.map(QueryType::try_from).transpose()?.unwrap_or_default();

        match query_type {
            QueryType::Current => Ok(WeatherQuery::Current { city_name }),
            QueryType::Historical => {
                let start = parse_date("start_date", start_date)?;
                let end = parse_date("end_date", end_date)?;
                if start > end {
                    return Err(WeatherError::InvalidInput(format!(
                        "start_date {start} is after end_date {end}"
                    )));
                }
                Ok(WeatherQuery::Historical {
                    city_name,
                    range: DateRange { start, end },
                })
            }
        }
    }

    pub fn city_name(&self) -> &str {
        match self {
            WeatherQuery::Current { city_name } | WeatherQuery::Historical { city_name, .. } => {
                city_name
            }
        }
    }

    pub fn query_type(&self) -> QueryType {
        match self {
            WeatherQuery::Current { .. } => QueryType::Current,
            WeatherQuery::Historical { .. } => QueryType::Historical,
        }
    }
}

impl TryFrom<&GetWeatherDataRequest> for WeatherQuery {
    type Error = WeatherError;

    fn try_from(request: &GetWeatherDataRequest) -> Result<Self> {
        WeatherQuery::parse(
            &request.city_name,
            request.query_type.as_deref(),
            request.start_date.as_deref(),
            request.end_date.as_deref(),
        )
    }
}

fn parse_date(name: &str, value: Option<&str>) -> Result<NaiveDate> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            WeatherError::InvalidInput(format!("{name} is required for historical queries"))
        })?;

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        WeatherError::InvalidInput(format!("{name} '{value}' is not a YYYY-MM-DD date: {e}"))
    })
}
