//! WMO weather code descriptions
//!
//! One table, two renderings: plain text for cards and the forecast strip,
//! emoji-annotated for the weekly forecast.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

/// How a weather code is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CodeStyle {
    #[default]
    Plain,
    Emoji,
}

pub const UNKNOWN: &str = "Unknown";
/// Shown when the payload carries no code at all
pub const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_ICON: &str = "❔";

struct CodeEntry {
    code: i32,
    plain: &'static str,
    icon: &'static str,
    emoji: &'static str,
}

const fn entry(
    code: i32,
    plain: &'static str,
    icon: &'static str,
    emoji: &'static str,
) -> CodeEntry {
    CodeEntry {
        code,
        plain,
        icon,
        emoji,
    }
}

const TABLE: [CodeEntry; 28] = [
    entry(0, "Clear sky", "☀️", "☀️ Sunny"),
    entry(1, "Mainly clear", "🌤️", "🌤️ Mostly Sunny"),
    entry(2, "Partly cloudy", "⛅", "⛅ Partly Cloudy"),
    entry(3, "Overcast", "☁️", "☁️ Cloudy"),
    entry(45, "Fog", "🌫️", "🌫️ Fog"),
    entry(48, "Depositing rime fog", "🌫️", "🌫️ Freezing Fog"),
    entry(51, "Light drizzle", "🌦️", "🌦️ Light Drizzle"),
    entry(53, "Moderate drizzle", "🌦️", "🌦️ Drizzle"),
    entry(55, "Dense drizzle", "🌧️", "🌧️ Heavy Drizzle"),
    entry(56, "Light freezing drizzle", "🌧️", "🌧️ Freezing Drizzle"),
    entry(57, "Dense freezing drizzle", "❄️", "❄️ Heavy Freezing Drizzle"),
    entry(61, "Slight rain", "🌧️", "🌧️ Light Rain"),
    entry(63, "Moderate rain", "🌧️", "🌧️ Rain"),
    entry(65, "Heavy rain", "🌧️", "🌧️ Heavy Rain"),
    entry(66, "Light freezing rain", "🌧️", "🌧️ Freezing Rain"),
    entry(67, "Heavy freezing rain", "❄️", "❄️ Heavy Freezing Rain"),
    entry(71, "Slight snow fall", "❄️", "❄️ Light Snow"),
    entry(73, "Moderate snow fall", "❄️", "❄️ Snow"),
    entry(75, "Heavy snow fall", "❄️", "❄️ Heavy Snow"),
    entry(77, "Snow grains", "❄️", "❄️ Snow Grains"),
    entry(80, "Slight rain showers", "🌧️", "🌧️ Light Showers"),
    entry(81, "Moderate rain showers", "🌧️", "🌧️ Showers"),
    entry(82, "Violent rain showers", "🌧️", "🌧️ Heavy Showers"),
    entry(85, "Slight snow showers", "❄️", "❄️ Snow Showers"),
    entry(86, "Heavy snow showers", "❄️", "❄️ Heavy Snow Showers"),
    entry(95, "Thunderstorm", "⛈️", "⛈️ Thunderstorm"),
    entry(96, "Thunderstorm with slight hail", "⛈️", "⛈️ Hail Storm"),
    entry(99, "Thunderstorm with heavy hail", "⛈️", "⛈️ Heavy Hail Storm"),
];

fn lookup(code: i32) -> Option<&'static CodeEntry> {
    TABLE.iter().find(|e| e.code == code)
}

/// Describe a weather code. Never fails: unknown codes give `"Unknown"`.
#[must_use]
pub fn describe(code: i32, style: CodeStyle) -> &'static str {
    match (lookup(code), style) {
        (Some(e), CodeStyle::Plain) => e.plain,
        (Some(e), CodeStyle::Emoji) => e.emoji,
        (None, _) => UNKNOWN,
    }
}

/// Same as [`describe`], for a code that may be absent from the payload.
/// An absent code is `"N/A"`; `"Unknown"` stays reserved for codes outside the table.
#[must_use]
pub fn describe_opt(code: Option<i32>, style: CodeStyle) -> &'static str {
    code.map_or(NOT_AVAILABLE, |c| describe(c, style))
}

/// Bare glyph for a weather code
#[must_use]
pub fn icon(code: i32) -> &'static str {
    lookup(code).map_or(UNKNOWN_ICON, |e| e.icon)
}

/// Every known code, in table order
pub fn known_codes() -> impl Iterator<Item = i32> {
    TABLE.iter().map(|e| e.code)
}
