//! View model assembly
//!
//! Turns a [`WeatherSnapshot`] into display-ready views: rounded
//! temperatures, the current hour and today lookups, the short forecast
//! strip, the temperature trend and the weekly forecast. Stored values are
//! never rounded; only the strings handed to renderers are.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CurrentConditions, DailySeries, HourlySeries, Location, WeatherSnapshot};
use crate::weather::codes::{self, CodeStyle};

/// Rendered in place of any value the payload did not provide
pub use crate::weather::codes::NOT_AVAILABLE;

const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAP_ZOOM: u8 = 6;
const WEEKLY_DAYS: usize = 7;

/// Where the temperature trend window starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrendAnchor {
    /// A fixed number of entries after the start of the hourly series
    #[default]
    FixedOffset,
    /// The hour matching the current conditions
    CurrentHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub strip_hours: usize,
    pub trend_points: usize,
    pub trend_anchor: TrendAnchor,
    pub trend_offset: usize,
    /// Descriptions on the main card and the forecast strip
    pub code_style: CodeStyle,
    /// Descriptions on the weekly forecast
    pub weekly_code_style: CodeStyle,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            strip_hours: 3,
            trend_points: 12,
            trend_anchor: TrendAnchor::FixedOffset,
            trend_offset: 3,
            code_style: CodeStyle::Plain,
            weekly_code_style: CodeStyle::Emoji,
        }
    }
}

/// Bundle resolver and fetcher output into a snapshot stamped with the fetch time
#[must_use]
pub fn assemble(
    location: Location,
    current: CurrentConditions,
    hourly: HourlySeries,
    daily: Option<DailySeries>,
) -> WeatherSnapshot {
    WeatherSnapshot {
        location,
        current,
        hourly,
        daily,
        fetched_at: Utc::now(),
    }
}

/// Round half up, the way the temperatures are displayed
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_temperature(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// "23°C", or "N/A"
#[must_use]
pub fn format_temperature(value: Option<f64>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |v| format!("{}°C", round_temperature(v)),
    )
}

fn format_degrees(value: Option<f64>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |v| format!("{}°", round_temperature(v)),
    )
}

fn format_clock(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |t| t.format("%H:%M").to_string(),
    )
}

/// Index of the hourly entry equal to `observed_at`; 0 when there is none
#[must_use]
pub fn current_hour_index(hourly: &HourlySeries, observed_at: NaiveDateTime) -> usize {
    hourly
        .times()
        .iter()
        .position(|t| *t == observed_at)
        .unwrap_or(0)
}

/// Index of the first daily entry on `today`; 0 when there is none
#[must_use]
pub fn today_index(daily: &DailySeries, today: NaiveDate) -> usize {
    daily.times().iter().position(|d| *d == today).unwrap_or(0)
}

/// Upcoming hours of the current day, starting at the current hour
#[must_use]
pub fn next_hours_window(
    hourly: &HourlySeries,
    observed_at: NaiveDateTime,
    limit: usize,
) -> Vec<usize> {
    let start = current_hour_index(hourly, observed_at);
    (start..hourly.len())
        .filter(|&i| {
            hourly
                .time(i)
                .is_some_and(|t| t.date() == observed_at.date() && t >= observed_at)
        })
        .take(limit)
        .collect()
}

/// Hourly indices plotted by the temperature trend
#[must_use]
pub fn trend_window(hourly: &HourlySeries, settings: &ViewSettings, current_index: usize) -> Vec<usize> {
    let start = match settings.trend_anchor {
        TrendAnchor::FixedOffset => settings.trend_offset,
        TrendAnchor::CurrentHour => current_index,
    };
    (start..hourly.len()).take(settings.trend_points).collect()
}

/// "Dhaka, Bangladesh Weather", or a generic title before anything loaded
#[must_use]
pub fn heading(snapshot: Option<&WeatherSnapshot>) -> String {
    match snapshot {
        Some(s) => format!("{} Weather", s.location.display_name()),
        None => "Weather Dashboard".to_string(),
    }
}

/// Main card: current conditions plus today's extremes
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherCardView {
    pub title: String,
    pub date_label: String,
    pub temperature: String,
    pub description: String,
    pub icon: String,
    pub wind: String,
    pub humidity: String,
    pub high: String,
    pub low: String,
    pub sunrise: String,
    pub sunset: String,
}

impl WeatherCardView {
    #[must_use]
    pub fn build(snapshot: &WeatherSnapshot, style: CodeStyle) -> Self {
        let current = &snapshot.current;
        let hour = current_hour_index(&snapshot.hourly, current.observed_at);
        let humidity = snapshot
            .hourly
            .humidity(hour)
            .map_or_else(|| NOT_AVAILABLE.to_string(), |h| format!("{h}%"));

        let (high, low, sunrise, sunset) = match &snapshot.daily {
            Some(daily) => {
                let day = today_index(daily, current.observed_at.date());
                (
                    format_degrees(daily.max_temp(day)),
                    format_degrees(daily.min_temp(day)),
                    format_clock(daily.sunrise(day)),
                    format_clock(daily.sunset(day)),
                )
            }
            None => (
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
            ),
        };

        Self {
            title: snapshot.location.display_name(),
            date_label: current
                .observed_at
                .format("%A %m/%d/%Y")
                .to_string()
                .to_uppercase(),
            temperature: format_temperature(Some(current.temperature)),
            description: codes::describe(current.weather_code, style).to_string(),
            icon: codes::icon(current.weather_code).to_string(),
            wind: format!("{} km/h", current.wind_speed),
            humidity,
            high,
            low,
            sunrise,
            sunset,
        }
    }
}

/// One entry of the short forecast strip
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyCardView {
    pub time_label: String,
    pub temperature: String,
    pub description: String,
}

/// One point of the temperature trend chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    pub time_label: String,
    pub temperature: Option<f64>,
}

/// One day of the weekly forecast
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyCardView {
    pub date: NaiveDate,
    pub weekday: String,
    pub description: String,
    pub high: String,
    pub low: String,
    pub precipitation: String,
}

/// Map placement of the main location
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub marker: String,
    pub tile_url: String,
}

/// Everything the dashboard shows for the main location
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub heading: String,
    pub card: WeatherCardView,
    pub hourly_strip: Vec<HourlyCardView>,
    pub trend: Vec<TrendPoint>,
    /// `None` when the snapshot has no daily block
    pub weekly: Option<Vec<DailyCardView>>,
    pub map: MapView,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardView {
    #[must_use]
    pub fn build(snapshot: &WeatherSnapshot, settings: &ViewSettings) -> Self {
        let hourly = &snapshot.hourly;
        let observed_at = snapshot.current.observed_at;
        let current_index = current_hour_index(hourly, observed_at);

        let hourly_strip = next_hours_window(hourly, observed_at, settings.strip_hours)
            .into_iter()
            .map(|i| HourlyCardView {
                time_label: format_clock(hourly.time(i)),
                temperature: format_temperature(hourly.temperature(i)),
                description: codes::describe_opt(hourly.weather_code(i), settings.code_style)
                    .to_string(),
            })
            .collect();

        let trend = trend_window(hourly, settings, current_index)
            .into_iter()
            .map(|i| TrendPoint {
                time_label: format_clock(hourly.time(i)),
                temperature: hourly.temperature(i),
            })
            .collect();

        let weekly = snapshot
            .daily
            .as_ref()
            .filter(|d| !d.is_empty())
            .map(|daily| weekly_forecast(daily, settings.weekly_code_style));

        Self {
            heading: heading(Some(snapshot)),
            card: WeatherCardView::build(snapshot, settings.code_style),
            hourly_strip,
            trend,
            weekly,
            map: MapView {
                latitude: snapshot.location.latitude,
                longitude: snapshot.location.longitude,
                zoom: MAP_ZOOM,
                marker: snapshot.location.display_name(),
                tile_url: TILE_URL_TEMPLATE.to_string(),
            },
            fetched_at: snapshot.fetched_at,
        }
    }
}

/// First seven days of the daily series
#[must_use]
pub fn weekly_forecast(daily: &DailySeries, style: CodeStyle) -> Vec<DailyCardView> {
    daily
        .times()
        .iter()
        .take(WEEKLY_DAYS)
        .enumerate()
        .map(|(i, date)| DailyCardView {
            date: *date,
            weekday: date.format("%A").to_string(),
            description: codes::describe_opt(daily.weather_code(i), style).to_string(),
            high: format_temperature(daily.max_temp(i)),
            low: format_temperature(daily.min_temp(i)),
            precipitation: daily
                .precipitation_sum(i)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |p| format!("{p}mm")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyColumns;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    /// 48 hours starting 2024-05-03 00:00, temperature = 20 + hour/2
    fn hourly_two_days() -> HourlySeries {
        let times: Vec<NaiveDateTime> = (0..48).map(|h| at(3 + h / 24, h % 24)).collect();
        let temps = (0..48).map(|h| Some(20.0 + f64::from(h) / 2.0)).collect();
        let humidity = (0..48).map(|h| Some(f64::from(50 + h))).collect();
        let codes = (0..48).map(|h| Some(if h % 2 == 0 { 0 } else { 61 })).collect();
        HourlySeries::new(times, temps, humidity, codes).unwrap()
    }

    fn daily_week() -> DailySeries {
        let times: Vec<NaiveDate> = (2..10)
            .map(|d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap())
            .collect();
        let len = times.len();
        DailySeries::new(DailyColumns {
            times,
            max_temps: (0..len).map(|i| Some(30.5 + i as f64)).collect(),
            min_temps: (0..len).map(|i| Some(20.4 + i as f64)).collect(),
            weather_codes: (0..len).map(|_| Some(3)).collect(),
            precipitation_sums: (0..len).map(|_| Some(1.5)).collect(),
            sunrises: (0..len).map(|_| None).collect(),
            sunsets: (0..len).map(|_| None).collect(),
        })
        .unwrap()
    }

    fn snapshot(observed_at: NaiveDateTime, daily: Option<DailySeries>) -> WeatherSnapshot {
        assemble(
            Location::new("Dhaka", "Bangladesh", 23.81, 90.41),
            CurrentConditions {
                temperature: 30.5,
                wind_speed: 11.2,
                weather_code: 2,
                observed_at,
            },
            hourly_two_days(),
            daily,
        )
    }

    #[test]
    fn test_round_temperature_half_up() {
        assert_eq!(round_temperature(22.5), 23);
        assert_eq!(round_temperature(22.4), 22);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.6), -3);
    }

    #[test]
    fn test_current_hour_index_exact_match() {
        let hourly = hourly_two_days();
        assert_eq!(current_hour_index(&hourly, at(3, 14)), 14);
        assert_eq!(current_hour_index(&hourly, at(4, 1)), 25);
    }

    #[test]
    fn test_current_hour_index_defaults_to_zero() {
        let hourly = hourly_two_days();
        let off_grid = at(3, 14) + chrono::Duration::minutes(15);
        assert_eq!(current_hour_index(&hourly, off_grid), 0);
        assert_eq!(current_hour_index(&HourlySeries::default(), at(3, 14)), 0);
    }

    #[test]
    fn test_today_index() {
        let daily = daily_week();
        assert_eq!(today_index(&daily, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()), 1);
        assert_eq!(today_index(&daily, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()), 0);
    }

    #[test]
    fn test_next_hours_window_caps_at_limit() {
        let hourly = hourly_two_days();
        assert_eq!(next_hours_window(&hourly, at(3, 14), 3), vec![14, 15, 16]);
    }

    #[test]
    fn test_next_hours_window_stays_on_current_day() {
        let hourly = hourly_two_days();
        assert_eq!(next_hours_window(&hourly, at(3, 22), 3), vec![22, 23]);
    }

    #[test]
    fn test_next_hours_window_without_exact_match() {
        let hourly = hourly_two_days();
        let off_grid = at(3, 14) + chrono::Duration::minutes(30);
        // scan starts at 0 but earlier hours are excluded
        assert_eq!(next_hours_window(&hourly, off_grid, 3), vec![15, 16, 17]);
    }

    #[test]
    fn test_trend_window_fixed_offset() {
        let hourly = hourly_two_days();
        let settings = ViewSettings::default();
        let window = trend_window(&hourly, &settings, 14);
        assert_eq!(window, (3..15).collect::<Vec<_>>());
    }

    #[test]
    fn test_trend_window_current_hour() {
        let hourly = hourly_two_days();
        let settings = ViewSettings {
            trend_anchor: TrendAnchor::CurrentHour,
            ..ViewSettings::default()
        };
        assert_eq!(trend_window(&hourly, &settings, 40), (40..48).collect::<Vec<_>>());
    }

    #[test]
    fn test_trend_window_past_the_end_is_empty() {
        let hourly = hourly_two_days();
        let settings = ViewSettings {
            trend_offset: 100,
            ..ViewSettings::default()
        };
        assert!(trend_window(&hourly, &settings, 0).is_empty());
    }

    #[test]
    fn test_weather_card_view() {
        let snap = snapshot(at(3, 14), Some(daily_week()));
        let card = WeatherCardView::build(&snap, CodeStyle::Plain);
        assert_eq!(card.title, "Dhaka, Bangladesh");
        assert_eq!(card.date_label, "FRIDAY 05/03/2024");
        assert_eq!(card.temperature, "31°C");
        assert_eq!(card.description, "Partly cloudy");
        assert_eq!(card.wind, "11.2 km/h");
        assert_eq!(card.humidity, "64%");
        assert_eq!(card.high, "32°");
        assert_eq!(card.low, "21°");
        assert_eq!(card.sunrise, "N/A");
        // stored value untouched
        assert_eq!(snap.current.temperature, 30.5);
    }

    #[test]
    fn test_weather_card_without_daily() {
        let snap = snapshot(at(3, 14), None);
        let card = WeatherCardView::build(&snap, CodeStyle::Emoji);
        assert_eq!(card.high, "N/A");
        assert_eq!(card.low, "N/A");
        assert_eq!(card.description, "⛅ Partly Cloudy");
    }

    #[test]
    fn test_dashboard_view() {
        let snap = snapshot(at(3, 14), Some(daily_week()));
        let view = DashboardView::build(&snap, &ViewSettings::default());

        assert_eq!(view.heading, "Dhaka, Bangladesh Weather");
        assert_eq!(view.hourly_strip.len(), 3);
        assert_eq!(view.hourly_strip[0].time_label, "14:00");
        assert_eq!(view.hourly_strip[0].temperature, "27°C");
        assert_eq!(view.hourly_strip[0].description, "Clear sky");
        assert_eq!(view.hourly_strip[1].description, "Slight rain");
        assert_eq!(view.trend.len(), 12);
        assert_eq!(view.trend[0].time_label, "03:00");
        assert_eq!(view.trend[0].temperature, Some(21.5));
        assert_eq!(view.map.zoom, 6);
        assert_eq!(view.map.marker, "Dhaka, Bangladesh");

        let weekly = view.weekly.unwrap();
        assert_eq!(weekly.len(), 7);
        assert_eq!(weekly[0].weekday, "Thursday");
        assert_eq!(weekly[0].description, "☁️ Cloudy");
        assert_eq!(weekly[0].high, "31°C");
        assert_eq!(weekly[0].precipitation, "1.5mm");
    }

    #[test]
    fn test_dashboard_view_without_daily_has_no_weekly() {
        let snap = snapshot(at(3, 14), None);
        let view = DashboardView::build(&snap, &ViewSettings::default());
        assert!(view.weekly.is_none());
    }

    #[test]
    fn test_missing_codes_render_as_not_available() {
        let daily = DailySeries::new(DailyColumns {
            times: vec![NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()],
            max_temps: vec![Some(31.0)],
            min_temps: vec![None],
            weather_codes: vec![None],
            precipitation_sums: vec![None],
            sunrises: vec![None],
            sunsets: vec![None],
        })
        .unwrap();
        let weekly = weekly_forecast(&daily, CodeStyle::Emoji);
        assert_eq!(weekly[0].description, "N/A");
        assert_eq!(weekly[0].low, "N/A");

        let hourly = HourlySeries::new(vec![at(3, 14)], vec![Some(30.0)], vec![None], vec![None])
            .unwrap();
        let mut snap = snapshot(at(3, 14), None);
        snap.hourly = hourly;
        let view = DashboardView::build(&snap, &ViewSettings::default());
        assert_eq!(view.hourly_strip[0].description, "N/A");
        assert_eq!(view.card.humidity, "N/A");
    }

    #[test]
    fn test_heading_before_load() {
        assert_eq!(heading(None), "Weather Dashboard");
    }
}
