//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::services::IntensityBucket;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected year, keybinding keys, cursor)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, disabled controls, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Date text color
    pub fn date(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Error/unavailable indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Heatmap cell color for an intensity bucket (GitHub-style green ramp)
    pub fn heatmap_color(self, bucket: IntensityBucket) -> Color {
        match self {
            Self::Dark => match bucket {
                IntensityBucket::None => Color::Indexed(236),
                IntensityBucket::Low => Color::Indexed(22),
                IntensityBucket::Medium => Color::Indexed(28),
                IntensityBucket::High => Color::Indexed(34),
                IntensityBucket::Max => Color::Indexed(40),
            },
            Self::Light => match bucket {
                IntensityBucket::None => Color::Indexed(254),
                IntensityBucket::Low => Color::Indexed(194),
                IntensityBucket::Medium => Color::Indexed(157),
                IntensityBucket::High => Color::Indexed(71),
                IntensityBucket::Max => Color::Indexed(28),
            },
        }
    }
}
