//! Application-wide appearance settings handed to the renderers.

use console::Style;
use serde::{Deserialize, Serialize};

use crate::weather::codes::CodeStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Styles used by the terminal renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub heading: Style,
    pub accent: Style,
    pub muted: Style,
    pub error: Style,
}

impl Palette {
    fn light() -> Self {
        Self {
            heading: Style::new().blue().bold(),
            accent: Style::new().cyan(),
            muted: Style::new().black().bright(),
            error: Style::new().red(),
        }
    }

    fn dark() -> Self {
        Self {
            heading: Style::new().white().bright().bold(),
            accent: Style::new().yellow().bright(),
            muted: Style::new().white(),
            error: Style::new().red().bright(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Appearance {
    pub theme: ThemeMode,
    pub code_style: CodeStyle,
}

impl Appearance {
    /// Flip between light and dark, returning the new mode
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        match self.theme {
            ThemeMode::Light => Palette::light(),
            ThemeMode::Dark => Palette::dark(),
        }
    }
}
