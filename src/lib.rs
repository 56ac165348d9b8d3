//! Sunrise and sunset lookup for home automation.
//!
//! A [`SolarDataClient`] fetches the raw payload of the sunrise-sunset.org API
//! for a date; [`SolarServiceSunsetProvider`] validates it and turns the
//! reported 12-hour times into [`LocalTimestamp`]s on that date.

pub mod config;
pub mod error;
pub mod solar_service;
pub mod sunset;

pub use config::ServiceConfig;
pub use error::SunsetError;
pub use solar_service::{SolarDataClient, SolarService};
pub use sunset::{
    LocalTimestamp, SolarServiceSunsetProvider, SunsetProvider, check_status,
    extract_sunrise_time, extract_sunset_time, to_local_timestamp,
};
