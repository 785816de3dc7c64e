//! Weather lookup tool — returns mock weather for a location.
//!
//! The report is derived from a hash of the location name, so the same
//! location always gets the same weather and different locations vary.

use serde::Serialize;

const CONDITIONS: [(&str, &str); 8] = [
    ("sunny", "☀️"),
    ("partly cloudy", "⛅"),
    ("overcast", "☁️"),
    ("showing light rain", "🌦️"),
    ("rainy", "🌧️"),
    ("stormy", "⛈️"),
    ("snowy", "❄️"),
    ("foggy", "🌫️"),
];

/// Mock observation for one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: String,
    pub conditions: &'static str,
    pub icon: &'static str,
    pub temperature_f: i32,
    pub humidity: u32,
}

/// Deterministic weather for `location`.
pub fn lookup(location: &str) -> WeatherReport {
    let hash = location
        .to_lowercase()
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));

    let (conditions, icon) = CONDITIONS[(hash as usize / 7) % CONDITIONS.len()];

    WeatherReport {
        location: location.to_string(),
        conditions,
        icon,
        // 23°F to 95°F
        temperature_f: 23 + (hash % 73) as i32,
        humidity: 30 + (hash % 60),
    }
}

/// Render the weather for `location` as a chat reply.
pub fn report(location: &str) -> String {
    let w = lookup(location);
    format!(
        "The weather in {} is {} and {}°F {} (humidity {}%)",
        w.location, w.conditions, w.temperature_f, w.icon, w.humidity
    )
}
