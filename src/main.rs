use chrono::Local;
use house_sunset::{ServiceConfig, SolarServiceSunsetProvider, SunsetProvider};
use tracing::{Instrument, info, span};
use tracing_subscriber::EnvFilter;

/// Prints today's sunrise and sunset for the location configured through
/// `SUNSET_LATITUDE`, `SUNSET_LONGITUDE` and `SUNSET_TZID`
/// (see `ServiceConfig::from_env`).
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServiceConfig::from_env()?;
    info!(
        "Using solar service {} at ({}, {})",
        config.endpoint, config.latitude, config.longitude
    );
    let provider = SolarServiceSunsetProvider::from_config(config);

    let today = Local::now().date_naive();
    let (sunrise, sunset) = async {
        let sunrise = provider.get_sunrise(today).await?;
        let sunset = provider.get_sunset(today).await?;
        anyhow::Ok((sunrise, sunset))
    }
    .instrument(span!(tracing::Level::INFO, "lookup", %today))
    .await?;

    println!("Today's Sunrise/Sunset Times:");
    println!("Date: {}", today);
    println!("Sunrise: {}", sunrise);
    println!("Sunset: {}", sunset);

    Ok(())
}
