//! Terminal color theme system
//!
//! Provides palettes for dark and light terminal backgrounds plus a
//! monochrome one for `!color`. Auto-detects via the COLORFGBG env var, or
//! manual override with --light or MM_LIGHT_BG=1.

use ratatui::style::Color;

/// Color theme for terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    // General UI text
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (footers, instructions)
    pub text_dim: Color,

    // Borders
    pub border: Color,
    /// Informational border (help, questions)
    pub border_accent: Color,
    /// Victory screen border
    pub border_victory: Color,

    // Semantic colors
    pub accent: Color,
    pub good: Color,
    pub bad: Color,

    // First-person view
    pub view_wall: Color,
    pub view_front: Color,
    pub view_opening: Color,

    // Minimap
    pub map_player: Color,
    pub map_wall: Color,
    pub map_path: Color,
    pub map_endpoint: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_accent: Color::Cyan,
            border_victory: Color::Yellow,
            accent: Color::Cyan,
            good: Color::Green,
            bad: Color::Red,
            view_wall: Color::Gray,
            view_front: Color::White,
            view_opening: Color::DarkGray,
            map_player: Color::Yellow,
            map_wall: Color::Gray,
            map_path: Color::DarkGray,
            map_endpoint: Color::Green,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            border_victory: Color::Magenta,
            accent: Color::Blue,
            good: Color::Green,
            bad: Color::Red,
            view_wall: Color::DarkGray,
            view_front: Color::Black,
            view_opening: Color::Gray,
            map_player: Color::Red,
            map_wall: Color::DarkGray,
            map_path: Color::Gray,
            map_endpoint: Color::Green,
        }
    }

    /// Everything in the terminal's default colors
    pub fn monochrome() -> Self {
        Self {
            text: Color::Reset,
            text_dim: Color::Reset,
            border: Color::Reset,
            border_accent: Color::Reset,
            border_victory: Color::Reset,
            accent: Color::Reset,
            good: Color::Reset,
            bad: Color::Reset,
            view_wall: Color::Reset,
            view_front: Color::Reset,
            view_opening: Color::Reset,
            map_player: Color::Reset,
            map_wall: Color::Reset,
            map_path: Color::Reset,
            map_endpoint: Color::Reset,
        }
    }

    /// Auto-detect terminal background and return appropriate theme.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    fn is_monochrome(&self) -> bool {
        self.text == Color::Reset
    }

    fn is_light(&self) -> bool {
        self.text == Color::Black
    }

    /// Adjust a wall-set color so it stays readable on this background.
    pub fn tint(&self, color: Color) -> Color {
        if self.is_monochrome() {
            return Color::Reset;
        }
        if !self.is_light() {
            return color;
        }
        match color {
            Color::White | Color::Gray => Color::Black,
            Color::LightYellow => Color::Yellow,
            Color::LightBlue | Color::LightCyan | Color::Cyan => Color::Blue,
            Color::LightRed => Color::Red,
            Color::LightGreen => Color::Green,
            other => other,
        }
    }

    fn is_light_background() -> bool {
        // Explicit override via environment variable
        if let Ok(val) = std::env::var("MM_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with color indices (0-15)
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_text_is_white() {
        let theme = Theme::dark();
        assert_eq!(theme.text, Color::White);
        assert_eq!(theme.view_front, Color::White);
    }

    #[test]
    fn test_light_theme_text_is_black() {
        let theme = Theme::light();
        assert_eq!(theme.text, Color::Black);
        assert_eq!(theme.view_front, Color::Black);
    }

    #[test]
    fn test_tint_dark_keeps_color() {
        let theme = Theme::dark();
        assert_eq!(theme.tint(Color::White), Color::White);
        assert_eq!(theme.tint(Color::LightBlue), Color::LightBlue);
    }

    #[test]
    fn test_tint_light_darkens_pale_colors() {
        let theme = Theme::light();
        assert_eq!(theme.tint(Color::White), Color::Black);
        assert_eq!(theme.tint(Color::LightBlue), Color::Blue);
        assert_eq!(theme.tint(Color::Red), Color::Red);
    }

    #[test]
    fn test_monochrome_tint_resets() {
        assert_eq!(Theme::monochrome().tint(Color::Green), Color::Reset);
    }
}
