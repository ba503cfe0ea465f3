use chrono::Utc;

use crate::constants::DATE_FORMAT;
use crate::error::{Result, WeatherError};
use crate::models::{
    ArchiveResponse, CurrentConditions, CurrentReport, DailyData, DailyRecord, DateRangeInfo,
    ForecastResponse, GeocodingResult, HistoricalReport, LocationInfo, WeatherReport,
};
use crate::query::DateRange;

/// Maps a geocoding hit into the output location block
pub fn format_location(place: GeocodingResult) -> LocationInfo {
    LocationInfo {
        city: place.name,
        country: place.country.filter(|c| !c.is_empty()),
        region: place.region.filter(|r| !r.is_empty()),
        latitude: place.latitude,
        longitude: place.longitude,
    }
}

/// Maps a forecast response into the current-mode report
pub fn format_current(location: LocationInfo, forecast: ForecastResponse) -> WeatherReport {
    let c = forecast.current;
    WeatherReport::Current(CurrentReport {
        location,
        current: CurrentConditions {
            time: c.time,
            temperature: c.temperature,
            relative_humidity: c.relative_humidity,
            apparent_temperature: c.apparent_temperature,
            precipitation: c.precipitation,
            rain: c.rain,
            snowfall: c.snowfall,
            weather_code: c.weather_code,
            cloud_cover: c.cloud_cover,
            pressure_msl: c.pressure_msl,
            surface_pressure: c.surface_pressure,
            wind_speed: c.wind_speed,
            wind_direction: c.wind_direction,
            wind_gusts: c.wind_gusts,
        },
        units: forecast.current_units,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Maps an archive response into the historical-mode report.
///
/// The daily block must hold exactly one record per requested day, in order.
pub fn format_historical(
    location: LocationInfo,
    range: DateRange,
    archive: ArchiveResponse,
) -> Result<WeatherReport> {
    let daily = daily_records(archive.daily)?;

    let expected: Vec<String> = range
        .start
        .iter_days()
        .take(range.days())
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect();
    let returned: Vec<&str> = daily.iter().map(|r| r.date.as_str()).collect();
    if returned != expected {
        return Err(WeatherError::UpstreamSchemaMismatch(format!(
            "daily block covers {} day(s) but {} to {} ({} day(s)) was requested",
            returned.len(),
            range.start,
            range.end,
            expected.len()
        )));
    }

    Ok(WeatherReport::Historical(HistoricalReport {
        location,
        date_range: DateRangeInfo {
            start: range.start.format(DATE_FORMAT).to_string(),
            end: range.end.format(DATE_FORMAT).to_string(),
        },
        daily,
        units: archive.daily_units,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// Zips the parallel daily arrays into one record per date
fn daily_records(d: DailyData) -> Result<Vec<DailyRecord>> {
    let days = d.time.len();
    let lengths = [
        ("weather_code", d.weather_code.len()),
        ("temperature_2m_max", d.temperature_max.len()),
        ("temperature_2m_min", d.temperature_min.len()),
        ("temperature_2m_mean", d.temperature_mean.len()),
        ("apparent_temperature_max", d.apparent_temperature_max.len()),
        ("apparent_temperature_min", d.apparent_temperature_min.len()),
        ("apparent_temperature_mean", d.apparent_temperature_mean.len()),
        ("sunrise", d.sunrise.len()),
        ("sunset", d.sunset.len()),
        ("precipitation_sum", d.precipitation_sum.len()),
        ("rain_sum", d.rain_sum.len()),
        ("snowfall_sum", d.snowfall_sum.len()),
        ("precipitation_hours", d.precipitation_hours.len()),
        ("wind_speed_10m_max", d.wind_speed_max.len()),
        ("wind_gusts_10m_max", d.wind_gusts_max.len()),
        ("wind_direction_10m_dominant", d.wind_direction_dominant.len()),
        ("shortwave_radiation_sum", d.shortwave_radiation.len()),
    ];
    if let Some((field, len)) = lengths.iter().find(|(_, len)| *len != days) {
        return Err(WeatherError::UpstreamSchemaMismatch(format!(
            "daily.{field} has {len} entries, daily.time has {days}"
        )));
    }

    let records = (0..days)
        .map(|i| DailyRecord {
            date: d.time[i].clone(),
            weather_code: d.weather_code[i],
            temperature_max: d.temperature_max[i],
            temperature_min: d.temperature_min[i],
            temperature_mean: d.temperature_mean[i],
            apparent_temperature_max: d.apparent_temperature_max[i],
            apparent_temperature_min: d.apparent_temperature_min[i],
            apparent_temperature_mean: d.apparent_temperature_mean[i],
            sunrise: d.sunrise[i].clone(),
            sunset: d.sunset[i].clone(),
            precipitation_sum: d.precipitation_sum[i],
            rain_sum: d.rain_sum[i],
            snowfall_sum: d.snowfall_sum[i],
            precipitation_hours: d.precipitation_hours[i],
            wind_speed_max: d.wind_speed_max[i],
            wind_gusts_max: d.wind_gusts_max[i],
            wind_direction_dominant: d.wind_direction_dominant[i],
            shortwave_radiation: d.shortwave_radiation[i],
        })
        .collect();

    Ok(records)
}

/// Converts WMO weather code to human-readable description
pub fn weather_code_to_description(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
