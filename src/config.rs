use std::env;

use crate::error::SunsetError;

/// Default endpoint of the sunrise-sunset.org JSON API
pub const DEFAULT_ENDPOINT: &str = "https://api.sunrise-sunset.org/json";

pub const LATITUDE_VAR: &str = "SUNSET_LATITUDE";
pub const LONGITUDE_VAR: &str = "SUNSET_LONGITUDE";
pub const ENDPOINT_VAR: &str = "SUNSET_ENDPOINT";
pub const TZID_VAR: &str = "SUNSET_TZID";

/// Settings for the solar data service: where to ask and for which location.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone id forwarded as `tzid`, so reported times are local to it
    pub tzid: String,
}

impl ServiceConfig {
    /// Creates a config for the given coordinates and zone using the default endpoint.
    ///
    /// # Returns
    /// * `InvalidConfig` if latitude is outside [-90, 90], longitude outside [-180, 180]
    ///   or `tzid` is blank
    pub fn new(
        latitude: f64,
        longitude: f64,
        tzid: impl Into<String>,
    ) -> Result<Self, SunsetError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SunsetError::InvalidConfig(format!(
                "latitude {} out of range [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SunsetError::InvalidConfig(format!(
                "longitude {} out of range [-180, 180]",
                longitude
            )));
        }
        let tzid = tzid.into().trim().to_string();
        if tzid.is_empty() {
            return Err(SunsetError::InvalidConfig("tzid is empty".to_string()));
        }

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            latitude,
            longitude,
            tzid,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Reads the config from `SUNSET_LATITUDE`, `SUNSET_LONGITUDE`, `SUNSET_TZID`
    /// (required) and `SUNSET_ENDPOINT` (optional).
    pub fn from_env() -> Result<Self, SunsetError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SunsetError> {
        let coordinate = |key: &str| -> Result<f64, SunsetError> {
            let raw = lookup(key).ok_or_else(|| SunsetError::EnvVarNotSet(key.to_string()))?;
            raw.trim()
                .parse::<f64>()
                .map_err(|_| SunsetError::InvalidConfig(format!("{}={:?} is not a number", key, raw)))
        };

        let latitude = coordinate(LATITUDE_VAR)?;
        let longitude = coordinate(LONGITUDE_VAR)?;

        // Without a zone the service reports UTC, which would be mislabelled as local
        let tzid = lookup(TZID_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SunsetError::EnvVarNotSet(TZID_VAR.to_string()))?;

        let mut config = Self::new(latitude, longitude, tzid)?;

        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_endpoint(endpoint.trim());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_required_values_with_default_endpoint() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (LATITUDE_VAR, "47.6062"),
            (LONGITUDE_VAR, " -122.3321 "),
            (TZID_VAR, " America/Los_Angeles "),
        ]))
        .unwrap();

        assert_eq!(config.latitude, 47.6062);
        assert_eq!(config.longitude, -122.3321);
        assert_eq!(config.tzid, "America/Los_Angeles");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn reads_optional_endpoint() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (LATITUDE_VAR, "51.5"),
            (LONGITUDE_VAR, "0"),
            (ENDPOINT_VAR, "http://localhost:8080/json"),
            (TZID_VAR, "Europe/London"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:8080/json");
        assert_eq!(config.tzid, "Europe/London");
    }

    #[test]
    fn blank_endpoint_is_ignored() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (LATITUDE_VAR, "51.5"),
            (LONGITUDE_VAR, "0"),
            (ENDPOINT_VAR, "  "),
            (TZID_VAR, "Europe/London"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn missing_tzid_is_rejected() {
        for pairs in [
            &[(LATITUDE_VAR, "51.5"), (LONGITUDE_VAR, "0")][..],
            &[(LATITUDE_VAR, "51.5"), (LONGITUDE_VAR, "0"), (TZID_VAR, " ")][..],
        ] {
            match ServiceConfig::from_lookup(lookup_from(pairs)) {
                Err(SunsetError::EnvVarNotSet(name)) => assert_eq!(name, TZID_VAR),
                other => panic!("Expected EnvVarNotSet, got {:?}", other),
            }
        }
    }

    #[test]
    fn missing_latitude_is_reported_by_name() {
        let result = ServiceConfig::from_lookup(lookup_from(&[
            (LONGITUDE_VAR, "0"),
            (TZID_VAR, "UTC"),
        ]));
        match result {
            Err(SunsetError::EnvVarNotSet(name)) => assert_eq!(name, LATITUDE_VAR),
            other => panic!("Expected EnvVarNotSet, got {:?}", other),
        }
    }

    #[test]
    fn non_numeric_coordinate_is_invalid() {
        let result = ServiceConfig::from_lookup(lookup_from(&[
            (LATITUDE_VAR, "north"),
            (LONGITUDE_VAR, "0"),
            (TZID_VAR, "UTC"),
        ]));
        assert!(matches!(result, Err(SunsetError::InvalidConfig(_))));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(matches!(
            ServiceConfig::new(90.5, 0.0, "UTC"),
            Err(SunsetError::InvalidConfig(_))
        ));
        assert!(matches!(
            ServiceConfig::new(0.0, -180.5, "UTC"),
            Err(SunsetError::InvalidConfig(_))
        ));
        assert!(ServiceConfig::new(-90.0, 180.0, "UTC").is_ok());
    }

    #[test]
    fn blank_tzid_is_rejected() {
        assert!(matches!(
            ServiceConfig::new(0.0, 0.0, "  "),
            Err(SunsetError::InvalidConfig(_))
        ));
    }
}
