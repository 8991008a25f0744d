use tracing::{info, instrument};

use crate::Result;
use crate::models::{Location, WeatherSnapshot};

pub mod codes;
pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Fetch current, hourly and daily weather for an already resolved location.
///
/// One request, no retry beyond what the client was configured with.
#[instrument(skip(client, location), fields(location = %location.name))]
pub async fn fetch_forecast(client: &OpenMeteoClient, location: &Location) -> Result<WeatherSnapshot> {
    let response = client
        .forecast(location.latitude, location.longitude)
        .await?;
    let snapshot = response.into_snapshot(location.clone())?;
    info!(
        "Forecast for {} with {} hourly and {} daily entries",
        snapshot.location.display_name(),
        snapshot.hourly.len(),
        snapshot.daily.as_ref().map_or(0, |d| d.len())
    );
    Ok(snapshot)
}
