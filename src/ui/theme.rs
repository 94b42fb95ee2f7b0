use ratatui::style::Color;

#[derive(Clone, Debug, Default)]
pub struct Theme {
    pub colors: ThemeColors,
}

/// Palette entries as `#rrggbb` strings, resolved on use.
#[derive(Clone, Debug)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_pending: String,
    pub cursor_bg: String,
    pub cursor_fg: String,
    pub selection_bg: String,
    pub focused_key: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub syntax_keyword: String,
    pub syntax_string: String,
    pub syntax_comment: String,
    pub syntax_number: String,
    pub syntax_function: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            text_pending: "#585b70".to_string(),
            cursor_bg: "#f5e0dc".to_string(),
            cursor_fg: "#1e1e2e".to_string(),
            selection_bg: "#45475a".to_string(),
            focused_key: "#f9e2af".to_string(),
            accent: "#89b4fa".to_string(),
            accent_dim: "#45475a".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            syntax_keyword: "#cba6f7".to_string(),
            syntax_string: "#a6e3a1".to_string(),
            syntax_comment: "#6c7086".to_string(),
            syntax_number: "#fab387".to_string(),
            syntax_function: "#89b4fa".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

impl ThemeColors {
    /// `#rrggbb` to an RGB color; anything else renders as white.
    pub fn parse_color(hex: &str) -> Color {
        let digits = hex.trim_start_matches('#');
        match u32::from_str_radix(digits, 16) {
            Ok(rgb) if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) => {
                Color::from_u32(rgb)
            }
            _ => Color::White,
        }
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn cursor_bg(&self) -> Color { Self::parse_color(&self.cursor_bg) }
    pub fn cursor_fg(&self) -> Color { Self::parse_color(&self.cursor_fg) }
    pub fn selection_bg(&self) -> Color { Self::parse_color(&self.selection_bg) }
    pub fn focused_key(&self) -> Color { Self::parse_color(&self.focused_key) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn syntax_keyword(&self) -> Color { Self::parse_color(&self.syntax_keyword) }
    pub fn syntax_string(&self) -> Color { Self::parse_color(&self.syntax_string) }
    pub fn syntax_comment(&self) -> Color { Self::parse_color(&self.syntax_comment) }
    pub fn syntax_number(&self) -> Color { Self::parse_color(&self.syntax_number) }
    pub fn syntax_function(&self) -> Color { Self::parse_color(&self.syntax_function) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(ThemeColors::parse_color("#89b4fa"), Color::Rgb(0x89, 0xb4, 0xfa));
        assert_eq!(ThemeColors::parse_color("1e1e2e"), Color::Rgb(0x1e, 0x1e, 0x2e));
    }

    #[test]
    fn test_parse_color_invalid_falls_back_to_white() {
        assert_eq!(ThemeColors::parse_color("#zzzzzz"), Color::White);
        assert_eq!(ThemeColors::parse_color("#fff"), Color::White);
    }
}
