// Response data structures for the sunrise-sunset API
pub(crate) mod response;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, error, info};

use crate::config::ServiceConfig;
use crate::error::SunsetError;

/// Source of raw solar data for a calendar date.
///
/// One call performs one request; implementations do not retry or cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolarDataClient: Send + Sync {
    /// Returns the raw response text for `date`.
    async fn fetch(&self, date: NaiveDate) -> Result<String, SunsetError>;
}

/// `SolarDataClient` backed by the sunrise-sunset.org HTTP API.
#[derive(Debug, Clone)]
pub struct SolarService {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl SolarService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn build_request(&self, date: NaiveDate) -> Result<reqwest::Request, SunsetError> {
        let query = [
            ("lat", self.config.latitude.to_string()),
            ("lng", self.config.longitude.to_string()),
            ("date", date.format("%Y-%m-%d").to_string()),
            ("tzid", self.config.tzid.clone()),
        ];

        Ok(self.http.get(&self.config.endpoint).query(&query).build()?)
    }
}

#[async_trait]
impl SolarDataClient for SolarService {
    /// Fetches the sun event times for `date` at the configured location.
    ///
    /// # Returns
    /// * The response body, unparsed
    /// * `ApiRequestFailed` if the service answers with a non-success status code
    /// * `Request` if the HTTP exchange itself fails
    async fn fetch(&self, date: NaiveDate) -> Result<String, SunsetError> {
        info!(
            "Fetching solar data for {} at ({}, {})",
            date, self.config.latitude, self.config.longitude
        );

        // Build the query for the configured location and send it
        let request = self.build_request(date)?;
        let response = self.http.execute(request).await?;

        if response.status().is_success() {
            // The body is handed over unparsed; status checks happen in the provider
            let body = response.text().await?;
            debug!("Solar data fetched successfully: {}", body);
            Ok(body)
        } else {
            // Log and return error for unsuccessful responses
            error!("Failed to fetch solar data: {}", response.status());
            Err(SunsetError::ApiRequestFailed(format!(
                "Failed to fetch solar data: {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seattle() -> ServiceConfig {
        ServiceConfig::new(47.6, -122.3, "America/Los_Angeles").unwrap()
    }

    #[test]
    fn request_carries_location_date_and_zone() {
        let service = SolarService::new(seattle());
        let date = NaiveDate::from_ymd_opt(2022, 10, 20).unwrap();

        let request = service.build_request(date).unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().host_str(), Some("api.sunrise-sunset.org"));
        assert_eq!(request.url().path(), "/json");
        assert_eq!(
            request.url().query(),
            Some("lat=47.6&lng=-122.3&date=2022-10-20&tzid=America%2FLos_Angeles")
        );
    }

    #[test]
    fn request_honours_custom_endpoint() {
        let service =
            SolarService::new(seattle().with_endpoint("http://localhost:8080/v2/json"));
        let date = NaiveDate::from_ymd_opt(2022, 10, 20).unwrap();

        let request = service.build_request(date).unwrap();

        assert_eq!(request.url().port(), Some(8080));
        assert_eq!(request.url().path(), "/v2/json");
    }

    #[test]
    fn malformed_endpoint_is_a_request_error() {
        let service = SolarService::new(seattle().with_endpoint("not a url"));
        let date = NaiveDate::from_ymd_opt(2022, 10, 20).unwrap();

        assert!(matches!(
            service.build_request(date),
            Err(SunsetError::Request(_))
        ));
    }

    #[test]
    fn response_ignores_unread_fields() {
        let response: response::SolarResponse = serde_json::from_str(
            r#"{"results":{"sunrise":"7:27:02 AM","solar_noon":"12:00:00 PM"},"status":"OK"}"#,
        )
        .unwrap();

        assert!(response.is_ok());
        let results = response.results.unwrap();
        assert_eq!(results.sunrise.as_deref(), Some("7:27:02 AM"));
        assert_eq!(results.sunset, None);
    }
}
