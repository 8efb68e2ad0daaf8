//! The two built-in outlook configurations.

use crate::config::SystemConfig;
use crate::error::ConfigError;
use crate::inference::InferenceEngine;

const TEMPERATURE_OUTLOOK: &str = include_str!("../presets/temperature_outlook.toml");
const WEATHER_OUTLOOK: &str = include_str!("../presets/weather_outlook.toml");

/// Precipitation, wind speed and humidity to a Cold / Cool / Mild / Hot outlook.
pub fn temperature_outlook() -> Result<InferenceEngine, ConfigError> {
    SystemConfig::from_toml_str(TEMPERATURE_OUTLOOK)?.build()
}

/// Precipitation, temperature, wind speed and humidity to a Bad / Moderate / Good outlook.
pub fn weather_outlook() -> Result<InferenceEngine, ConfigError> {
    SystemConfig::from_toml_str(WEATHER_OUTLOOK)?.build()
}

#[test]
fn test_presets_build() {
    let temperature = temperature_outlook().unwrap();
    let weather = weather_outlook().unwrap();

    assert_eq!(
        temperature.antecedent_names().collect::<Vec<_>>(),
        vec!["humidity", "precipitation", "wind_speed"]
    );
    assert_eq!(temperature.rules().len(), 9);
    assert_eq!(temperature.consequent().name(), "temperature_outlook_value");

    assert_eq!(
        weather.antecedent_names().collect::<Vec<_>>(),
        vec!["humidity", "precipitation", "temperature", "wind_speed"]
    );
    assert_eq!(weather.rules().len(), 10);
    assert_eq!(weather.consequent().name(), "weather_outlook");
}
