use egui::{Color32, Visuals};
use habit_core::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(self) -> Visuals {
        let mut visuals = match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        };
        visuals.selection.bg_fill = self.accent();
        visuals.hyperlink_color = self.accent();
        visuals
    }

    pub fn accent(self) -> Color32 {
        Color32::from_rgb(0x2f, 0x6f, 0xed)
    }

    pub fn muted(self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_gray(0x8a),
            Theme::Light => Color32::from_gray(0x6b),
        }
    }

    pub fn danger(self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(0xf8, 0x71, 0x71),
            Theme::Light => Color32::from_rgb(0xef, 0x44, 0x44),
        }
    }

    /// Glyph for the switch button: the theme it will switch to.
    pub fn switch_glyph(self) -> &'static str {
        match self {
            Theme::Dark => "☀",
            Theme::Light => "🌙",
        }
    }
}

pub fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Dumbbell => "🏋",
        Icon::Brain => "🧠",
        Icon::Moon => "🌙",
        Icon::Pen => "✏",
        Icon::Book => "📖",
        Icon::Heart => "❤",
        Icon::Activity => "📈",
        Icon::Zap => "⚡",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(Theme::parse(" Light "), Some(Theme::Light));
        assert_eq!(Theme::parse("DARK"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
    }

    #[test]
    fn toggle_flips_between_the_two() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
        assert!(Theme::Dark.visuals().dark_mode);
        assert!(!Theme::Light.visuals().dark_mode);
    }
}
