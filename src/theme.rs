//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (Rosé Pine and Rosé Pine Dawn) plus custom color
//! overrides from the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Main pane
    pub buffer_bg: Color,
    pub buffer_fg: Color,
    pub cursorline_bg: Color,
    pub header_fg: Color,
    pub dir_fg: Color,
    pub link_fg: Color,
    pub filler_fg: Color,

    // Gutter
    pub gutter_fg: Color,
    pub gutter_cursor_fg: Color,

    // Status line
    pub status_bg: Color,
    pub status_fg: Color,
    pub mode_bg: Color,
    pub mode_fg: Color,

    // Tab line
    pub tabline_bg: Color,
    pub tabline_fg: Color,

    // Semantic colors (not configurable)
    pub error_fg: Color,
    pub success_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Rosé Pine (dark).
pub fn rose_pine() -> ThemeColors {
    ThemeColors {
        buffer_bg: Color::Rgb(25, 23, 36),     // #191724 (base)
        buffer_fg: Color::Rgb(224, 222, 244),  // #e0def4 (text)
        cursorline_bg: Color::Rgb(64, 61, 82), // #403d52 (highlight med)
        header_fg: Color::Rgb(144, 140, 170),  // #908caa (subtle)
        dir_fg: Color::Rgb(156, 207, 216),     // #9ccfd8 (foam)
        link_fg: Color::Rgb(196, 167, 231),    // #c4a7e7 (iris)
        filler_fg: Color::Rgb(110, 106, 134),  // #6e6a86 (muted)

        gutter_fg: Color::Rgb(110, 106, 134),
        gutter_cursor_fg: Color::Rgb(246, 193, 119), // #f6c177 (gold)

        status_bg: Color::Rgb(31, 29, 46), // #1f1d2e (surface)
        status_fg: Color::Rgb(224, 222, 244),
        mode_bg: Color::Rgb(235, 188, 186), // #ebbcba (rose)
        mode_fg: Color::Rgb(25, 23, 36),

        tabline_bg: Color::Rgb(38, 35, 58), // #26233a (overlay)
        tabline_fg: Color::Rgb(224, 222, 244),

        error_fg: Color::Rgb(235, 111, 146),  // #eb6f92 (love)
        success_fg: Color::Rgb(49, 116, 143), // #31748f (pine)
    }
}

/// Rosé Pine Dawn (light).
pub fn dawn() -> ThemeColors {
    ThemeColors {
        buffer_bg: Color::Rgb(250, 244, 237),     // #faf4ed (base)
        buffer_fg: Color::Rgb(87, 82, 121),       // #575279 (text)
        cursorline_bg: Color::Rgb(223, 218, 217), // #dfdad9 (highlight med)
        header_fg: Color::Rgb(121, 117, 147),     // #797593 (subtle)
        dir_fg: Color::Rgb(86, 148, 159),         // #56949f (foam)
        link_fg: Color::Rgb(144, 122, 169),       // #907aa9 (iris)
        filler_fg: Color::Rgb(152, 147, 165),     // #9893a5 (muted)

        gutter_fg: Color::Rgb(152, 147, 165),
        gutter_cursor_fg: Color::Rgb(234, 157, 52), // #ea9d34 (gold)

        status_bg: Color::Rgb(255, 250, 243), // #fffaf3 (surface)
        status_fg: Color::Rgb(87, 82, 121),
        mode_bg: Color::Rgb(215, 130, 126), // #d7827e (rose)
        mode_fg: Color::Rgb(250, 244, 237),

        tabline_bg: Color::Rgb(242, 233, 225), // #f2e9e1 (overlay)
        tabline_fg: Color::Rgb(87, 82, 121),

        error_fg: Color::Rgb(180, 99, 122),  // #b4637a (love)
        success_fg: Color::Rgb(40, 105, 131), // #286983 (pine)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"rose-pine"` (default): dark palette
/// - `"dawn"`: light palette
/// - `"custom"`: start from the dark palette, then apply custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref().unwrap_or("rose-pine") {
        "dawn" => dawn(),
        "custom" => {
            let mut theme = rose_pine();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        "rose-pine" => rose_pine(),
        other => {
            log::warn!("Unknown theme scheme '{}', using rose-pine", other);
            rose_pine()
        }
    }
}

/// Apply custom hex color overrides on top of an existing theme.
/// Malformed values keep the existing color.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let overrides: [(&Option<String>, &mut Color); 15] = [
        (&custom.buffer_bg, &mut theme.buffer_bg),
        (&custom.buffer_fg, &mut theme.buffer_fg),
        (&custom.cursorline_bg, &mut theme.cursorline_bg),
        (&custom.header_fg, &mut theme.header_fg),
        (&custom.dir_fg, &mut theme.dir_fg),
        (&custom.link_fg, &mut theme.link_fg),
        (&custom.filler_fg, &mut theme.filler_fg),
        (&custom.gutter_fg, &mut theme.gutter_fg),
        (&custom.gutter_cursor_fg, &mut theme.gutter_cursor_fg),
        (&custom.status_bg, &mut theme.status_bg),
        (&custom.status_fg, &mut theme.status_fg),
        (&custom.mode_bg, &mut theme.mode_bg),
        (&custom.mode_fg, &mut theme.mode_fg),
        (&custom.tabline_bg, &mut theme.tabline_bg),
        (&custom.tabline_fg, &mut theme.tabline_fg),
    ];
    for (value, slot) in overrides {
        if let Some(color) = value.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
