//! Simulated companion
//!
//! Plays the phone's part: publishes the configured forecasts to the data
//! layer one after another, every `interval` or when `PUBLISH_NOW` fires.

use embassy_futures::select::select;
use embassy_time::{Duration, Timer};
use log::{info, warn};

use solstice_protocol::{CodecError, DataItem, DataPath, PayloadKeys};

use crate::channels::PUBLISH_NOW;
use crate::config::Forecast;
use crate::sync::DataLayer;

/// What the companion publishes, and where
#[derive(Debug, Clone)]
pub struct CompanionSettings {
    pub path: DataPath,
    pub keys: PayloadKeys,
    pub forecasts: Vec<Forecast>,
    pub interval: Duration,
}

impl CompanionSettings {
    /// Encode a forecast as a weather item
    pub fn item(&self, forecast: &Forecast) -> Result<DataItem, CodecError> {
        let map = self.keys.weather_map(
            forecast.condition_id,
            &forecast.high,
            &forecast.low,
            &forecast.short_desc,
            &forecast.units,
        )?;
        DataItem::from_map(self.path.clone(), &map)
    }
}

#[embassy_executor::task]
pub async fn companion_task(layer: &'static DataLayer<'static>, settings: CompanionSettings) {
    if settings.forecasts.is_empty() {
        info!("Companion has no forecasts, not publishing");
        return;
    }
    info!(
        "Companion started ({} forecasts every {}s)",
        settings.forecasts.len(),
        settings.interval.as_secs()
    );

    for forecast in settings.forecasts.iter().cycle() {
        match settings.item(forecast) {
            Ok(item) => {
                info!(
                    "Companion: publishing {} {}/{} ({})",
                    forecast.condition_id, forecast.high, forecast.low, forecast.short_desc
                );
                layer.publish(item);
            }
            Err(e) => warn!("Companion: forecast {} not encodable: {:?}", forecast.condition_id, e),
        }

        select(Timer::after(settings.interval), PUBLISH_NOW.wait()).await;
    }
}
