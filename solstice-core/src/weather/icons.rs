//! Weather condition art
//!
//! Maps OpenWeatherMap condition ids to the face's art set.
//! See <https://openweathermap.org/weather-conditions>.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Art shown for a weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConditionArt {
    Storm,
    LightRain,
    Rain,
    Snow,
    Fog,
    Clear,
    LightClouds,
    Clouds,
}

impl ConditionArt {
    /// All art variants
    pub const ALL: [ConditionArt; 8] = [
        ConditionArt::Storm,
        ConditionArt::LightRain,
        ConditionArt::Rain,
        ConditionArt::Snow,
        ConditionArt::Fog,
        ConditionArt::Clear,
        ConditionArt::LightClouds,
        ConditionArt::Clouds,
    ];

    /// Art for a condition id, or None if the id is unknown
    pub fn for_condition(condition_id: i32) -> Option<Self> {
        use ConditionArt::*;

        let art = match condition_id {
            200..=232 => Storm,
            300..=321 => LightRain,
            500..=504 => Rain,
            511 => Snow,
            520..=531 => Rain,
            600..=622 => Snow,
            701..=761 => Fog,
            781 => Storm,
            800 => Clear,
            801 => LightClouds,
            802..=804 => Clouds,
            // Extreme and additional conditions
            900..=906 | 958..=962 => Storm,
            951 => Clear,
            952..=956 => LightClouds,
            _ => return None,
        };
        Some(art)
    }

    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            ConditionArt::Storm => "storm",
            ConditionArt::LightRain => "light_rain",
            ConditionArt::Rain => "rain",
            ConditionArt::Snow => "snow",
            ConditionArt::Fog => "fog",
            ConditionArt::Clear => "clear",
            ConditionArt::LightClouds => "light_clouds",
            ConditionArt::Clouds => "clouds",
        }
    }
}
