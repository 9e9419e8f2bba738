use ratatui::crossterm::style::{Color, Stylize, style};

use crate::storage::DisplayConfig;

/// What a piece of text means, mapped to a color by the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Section and table titles
    Title,
    /// Things the user already knows
    Muted,
    /// Things that are new
    Highlight,
    /// Emphasized numbers
    Accent,
}

/// Terminal colors for the printed reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
    title: Color,
    muted: Color,
    highlight: Color,
}

impl Palette {
    /// No escape codes at all
    pub fn plain() -> Self {
        Palette {
            enabled: false,
            ..Palette::default()
        }
    }

    pub fn from_config(display: &DisplayConfig) -> Self {
        Palette {
            enabled: display.color,
            title: parse_color(&display.title_color, Color::Blue),
            muted: parse_color(&display.muted_color, Color::Grey),
            highlight: parse_color(&display.highlight_color, Color::Green),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Style `text` for its role
    pub fn paint(&self, text: &str, role: Role) -> String {
        if !self.enabled {
            return text.to_string();
        }

        match role {
            Role::Title => style(text).with(self.title).bold().to_string(),
            Role::Muted => style(text).with(self.muted).to_string(),
            Role::Highlight => style(text).with(self.highlight).to_string(),
            Role::Accent => style(text).bold().to_string(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            enabled: true,
            title: Color::Blue,
            muted: Color::Grey,
            highlight: Color::Green,
        }
    }
}

fn parse_color(name: &str, fallback: Color) -> Color {
    Color::try_from(name).unwrap_or_else(|_| {
        log::warn!("Unknown color {:?}, using {:?}", name, fallback);
        fallback
    })
}
