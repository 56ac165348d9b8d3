/// Value of `status` on a successful lookup
pub const STATUS_OK: &str = "OK";

/// Response structure for the sunrise-sunset.org JSON API.
/// `results` is `null` when the lookup fails; fields the provider does not
/// read (`solar_noon`, `day_length`, ...) are ignored.
#[derive(serde::Deserialize, Debug)]
pub struct SolarResponse {
    #[serde(default)]
    pub results: Option<SolarResults>,
    /// "OK" on success, "ERROR" / "INVALID_REQUEST" / ... otherwise
    #[serde(default)]
    pub status: Option<String>,
}

/// Sun event times for the requested day, as 12-hour strings (e.g., "4:52:36 AM")
#[derive(serde::Deserialize, Debug)]
pub struct SolarResults {
    #[serde(default)]
    pub sunrise: Option<String>,
    #[serde(default)]
    pub sunset: Option<String>,
}

impl SolarResponse {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }
}
