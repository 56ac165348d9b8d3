use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Timelike};
use tracing::{debug, error, info};

use crate::config::ServiceConfig;
use crate::error::SunsetError;
use crate::solar_service::response::{SolarResponse, SolarResults};
use crate::solar_service::{SolarDataClient, SolarService};

/// A point in time carrying the host's local offset
pub type LocalTimestamp = DateTime<Local>;

// 12-hour clock, with and without seconds; `%.f` also accepts no fraction
const TIME_FORMATS: [&str; 2] = ["%I:%M:%S%.f %p", "%I:%M %p"];

/// Sunrise and sunset lookup for a calendar date
#[async_trait]
pub trait SunsetProvider: Send + Sync {
    async fn get_sunset(&self, date: NaiveDate) -> Result<LocalTimestamp, SunsetError>;
    async fn get_sunrise(&self, date: NaiveDate) -> Result<LocalTimestamp, SunsetError>;
}

/// `SunsetProvider` that asks a `SolarDataClient` for every lookup.
///
/// Each call issues its own fetch, so `get_sunrise` followed by `get_sunset`
/// for the same date makes two requests. Callers that want a single request
/// can fetch once and use [`extract_sunrise_time`], [`extract_sunset_time`]
/// and [`to_local_timestamp`] directly.
#[derive(Debug, Clone)]
pub struct SolarServiceSunsetProvider<C = SolarService> {
    client: C,
}

impl<C: SolarDataClient> SolarServiceSunsetProvider<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl SolarServiceSunsetProvider<SolarService> {
    /// Builds a provider around the HTTP `SolarService`.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self::new(SolarService::new(config))
    }
}

#[async_trait]
impl<C: SolarDataClient> SunsetProvider for SolarServiceSunsetProvider<C> {
    async fn get_sunset(&self, date: NaiveDate) -> Result<LocalTimestamp, SunsetError> {
        info!("Looking up sunset for {}", date);
        let data = self.client.fetch(date).await?;
        let sunset = extract_sunset_time(&data)?;
        to_local_timestamp(date, &sunset)
    }

    async fn get_sunrise(&self, date: NaiveDate) -> Result<LocalTimestamp, SunsetError> {
        info!("Looking up sunrise for {}", date);
        let data = self.client.fetch(date).await?;
        let sunrise = extract_sunrise_time(&data)?;
        to_local_timestamp(date, &sunrise)
    }
}

/// Returns true iff the payload's top-level `status` is "OK".
///
/// Never fails: text that is not JSON, a non-string status or a `results`
/// object of the wrong shape all count as `false`.
pub fn check_status(payload: &str) -> bool {
    decode(payload).is_some()
}

/// Returns `results.sunrise` unmodified.
///
/// # Returns
/// * `InvalidResponse` carrying the payload if the status is not "OK"
/// * `InvalidResponse` naming the field if the status is "OK" but the field is missing
pub fn extract_sunrise_time(payload: &str) -> Result<String, SunsetError> {
    extract(payload, "sunrise", |results| results.sunrise)
}

/// Returns `results.sunset` unmodified. Fails like [`extract_sunrise_time`].
pub fn extract_sunset_time(payload: &str) -> Result<String, SunsetError> {
    extract(payload, "sunset", |results| results.sunset)
}

/// Combines `date` with a 12-hour time string such as "3:53:04 PM".
///
/// There is no day rollover: "12:00:00 AM" is midnight at the start of `date`.
/// The result carries the local offset in effect at that wall-clock time;
/// an ambiguous time (DST fall-back) resolves to the earlier instant.
///
/// # Returns
/// * `ParseError` if `time` is not a valid 12-hour clock value
/// * `NonexistentLocalTime` if the wall-clock time is skipped by a DST change
pub fn to_local_timestamp(date: NaiveDate, time: &str) -> Result<LocalTimestamp, SunsetError> {
    let naive = date.and_time(parse_time_of_day(time)?);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or(SunsetError::NonexistentLocalTime(naive))
}

/// Parses `h:mm:ss[.fff] AM|PM` or `h:mm AM|PM`; the meridiem is case-insensitive.
pub fn parse_time_of_day(time: &str) -> Result<NaiveTime, SunsetError> {
    let trimmed = time.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        // chrono reads second 60 as a leap second; a wall clock never shows it
        .filter(|parsed| parsed.nanosecond() < 1_000_000_000)
        .ok_or_else(|| SunsetError::ParseError(time.to_string()))
}

// Decodes the payload, keeping it only when the status is "OK"
fn decode(payload: &str) -> Option<SolarResponse> {
    serde_json::from_str::<SolarResponse>(payload)
        .ok()
        .filter(SolarResponse::is_ok)
}

fn extract(
    payload: &str,
    field: &str,
    pick: fn(SolarResults) -> Option<String>,
) -> Result<String, SunsetError> {
    let Some(response) = decode(payload) else {
        error!("Rejected solar data: {}", payload);
        return Err(SunsetError::InvalidResponse(payload.to_string()));
    };

    let value = response.results.and_then(pick).ok_or_else(|| {
        error!("Solar data has status OK but no results.{}", field);
        SunsetError::InvalidResponse(format!("missing field results.{}", field))
    })?;

    debug!("Extracted {}: {}", field, value);
    Ok(value)
}
