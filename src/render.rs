//! Terminal rendering of the assembled page

use std::fmt::{self, Display};

use console::Style;

use crate::appearance::Palette;
use crate::dashboard::{CityCardView, PageView};
use crate::view_model::{DashboardView, NOT_AVAILABLE, WeatherCardView, format_temperature};

/// Text rendering of a [`PageView`], colored with the page's palette when enabled
pub struct PageDisplay<'a> {
    page: &'a PageView,
    palette: Palette,
    color: bool,
}

impl<'a> PageDisplay<'a> {
    #[must_use]
    pub fn new(page: &'a PageView, color: bool) -> Self {
        Self {
            page,
            palette: page.appearance.palette(),
            color,
        }
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        style
            .clone()
            .force_styling(self.color)
            .apply_to(text)
            .to_string()
    }

    fn section(&self, f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.paint(&self.palette.accent, title))
    }

    fn card(&self, f: &mut fmt::Formatter<'_>, card: &WeatherCardView) -> fmt::Result {
        writeln!(f, "   📅 {}", self.paint(&self.palette.muted, &card.date_label))?;
        writeln!(f, "   {} {} {}", card.icon, card.temperature, card.description)?;
        writeln!(f, "   💨 Wind: {}   💧 Humidity: {}", card.wind, card.humidity)?;
        writeln!(f, "   🌡️ High: {}  Low: {}", card.high, card.low)?;
        writeln!(f, "   🌅 Sunrise: {}  🌇 Sunset: {}", card.sunrise, card.sunset)
    }

    fn main_view(&self, f: &mut fmt::Formatter<'_>, view: &DashboardView) -> fmt::Result {
        self.card(f, &view.card)?;

        if !view.hourly_strip.is_empty() {
            self.section(f, "Next hours")?;
            for hour in &view.hourly_strip {
                writeln!(
                    f,
                    "   {}  {:>5}  {}",
                    hour.time_label, hour.temperature, hour.description
                )?;
            }
        }

        if !view.trend.is_empty() {
            self.section(f, "Temperature trend")?;
            for point in &view.trend {
                writeln!(
                    f,
                    "   {}  {}",
                    point.time_label,
                    format_temperature(point.temperature)
                )?;
            }
        }

        // no daily block, no weekly section
        if let Some(weekly) = &view.weekly {
            self.section(f, "Weekly forecast")?;
            for day in weekly {
                writeln!(
                    f,
                    "   {:<9}  {}  {} / {}  {}",
                    day.weekday, day.description, day.high, day.low, day.precipitation
                )?;
            }
        }

        self.section(f, "Map")?;
        writeln!(
            f,
            "   🗺️ {} at {:.4}, {:.4} (zoom {})",
            view.map.marker, view.map.latitude, view.map.longitude, view.map.zoom
        )
    }

    fn city(&self, f: &mut fmt::Formatter<'_>, city: &CityCardView) -> fmt::Result {
        match (&city.card, &city.error) {
            (Some(card), _) => {
                writeln!(f, "   {}", card.title)?;
                self.card(f, card)
            }
            (None, Some(message)) => writeln!(
                f,
                "   {}: {}",
                city.query,
                self.paint(&self.palette.error, message)
            ),
            (None, None) => writeln!(f, "   {}: {}", city.query, NOT_AVAILABLE),
        }
    }
}

impl Display for PageDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.paint(&self.palette.heading, &self.page.heading))?;

        if self.page.loading {
            writeln!(f, "   ⏳ Loading...")?;
        }
        if let Some(error) = &self.page.error {
            writeln!(f, "   ⚠️ {}", self.paint(&self.palette.error, error))?;
        }

        if let Some(main) = &self.page.main {
            self.main_view(f, main)?;
        }

        if !self.page.pinned.is_empty() {
            self.section(f, "Pinned")?;
            for card in &self.page.pinned {
                writeln!(f, "   📌 {}", card.title)?;
                self.card(f, card)?;
            }
        }

        if !self.page.others.is_empty() {
            self.section(f, "Other cities")?;
            for city in &self.page.others {
                self.city(f, city)?;
            }
        }
        Ok(())
    }
}

/// Plain or colored text for the page
#[must_use]
pub fn render(page: &PageView, color: bool) -> String {
    PageDisplay::new(page, color).to_string()
}
