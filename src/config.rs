//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--min-lines`, `--theme`, `--no-mouse`, etc.)
//! 2. Explicit `--config <path>`
//! 3. `$TERMFOLIO_CONFIG` environment variable (path to config file)
//! 4. Project-local `.termfolio.toml` in the current working directory
//! 5. Global `~/.config/termfolio/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::layout::{DEFAULT_GUTTER_WIDTH, DEFAULT_MIN_VISIBLE_LINES};
use crate::state::DEFAULT_CHORD_WINDOW;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable mouse support.
    pub mouse: Option<bool>,
    /// TOML file describing the tree to browse (built-in tree when unset).
    pub tree_file: Option<String>,
    /// Write a debug log to this file.
    pub log_file: Option<String>,
}

/// Main pane settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ViewConfig {
    /// Never render fewer rows than this, padding with filler rows.
    pub min_visible_lines: Option<usize>,
    /// Window for two-key chords like `gg`, in milliseconds.
    pub chord_timeout_ms: Option<u64>,
    /// Rows scrolled per motion key while viewing a file.
    pub scroll_step: Option<usize>,
    /// Width of the line-number gutter.
    pub gutter_width: Option<usize>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub buffer_bg: Option<String>,
    pub buffer_fg: Option<String>,
    pub cursorline_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dir_fg: Option<String>,
    pub link_fg: Option<String>,
    pub filler_fg: Option<String>,
    pub gutter_fg: Option<String>,
    pub gutter_cursor_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub mode_bg: Option<String>,
    pub mode_fg: Option<String>,
    pub tabline_bg: Option<String>,
    pub tabline_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "rose-pine", "dawn", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub view: ViewConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default rows scrolled per motion key.
pub const DEFAULT_SCROLL_STEP: usize = 1;

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("TERMFOLIO_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".termfolio.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("termfolio").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning logged).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => {
            log::info!("Loaded config from {}", path.display());
            Some(cfg)
        }
        Err(e) => {
            log::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: other.general.mouse.or(self.general.mouse),
                tree_file: other
                    .general
                    .tree_file
                    .clone()
                    .or(self.general.tree_file),
                log_file: other.general.log_file.clone().or(self.general.log_file),
            },
            view: ViewConfig {
                min_visible_lines: other
                    .view
                    .min_visible_lines
                    .or(self.view.min_visible_lines),
                chord_timeout_ms: other.view.chord_timeout_ms.or(self.view.chord_timeout_ms),
                scroll_step: other.view.scroll_step.or(self.view.scroll_step),
                gutter_width: other.view.gutter_width.or(self.view.gutter_width),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Lowest priority first so that higher ones overwrite.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            match load_file(cli_path) {
                Some(file_cfg) => config = config.merge(&file_cfg),
                None => log::warn!("Config file {} not loaded", cli_path.display()),
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Whether mouse support is enabled.
    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(true)
    }

    pub fn tree_file(&self) -> Option<&Path> {
        self.general.tree_file.as_deref().map(Path::new)
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.general.log_file.as_deref().map(Path::new)
    }

    /// Minimum rows in the main pane; at least 1.
    pub fn min_visible_lines(&self) -> usize {
        self.view
            .min_visible_lines
            .unwrap_or(DEFAULT_MIN_VISIBLE_LINES)
            .max(1)
    }

    pub fn chord_window(&self) -> Duration {
        self.view
            .chord_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_CHORD_WINDOW)
    }

    /// Rows per scroll step; at least 1.
    pub fn scroll_step(&self) -> usize {
        self.view.scroll_step.unwrap_or(DEFAULT_SCROLL_STEP).max(1)
    }

    pub fn gutter_width(&self) -> usize {
        self.view.gutter_width.unwrap_or(DEFAULT_GUTTER_WIDTH)
    }

    /// Theme scheme: "rose-pine", "dawn", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("rose-pine")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = AppConfig::default();
        assert!(cfg.mouse_enabled());
        assert!(cfg.tree_file().is_none());
        assert!(cfg.log_file().is_none());
        assert_eq!(cfg.min_visible_lines(), 24);
        assert_eq!(cfg.chord_window(), Duration::from_millis(500));
        assert_eq!(cfg.scroll_step(), 1);
        assert_eq!(cfg.gutter_width(), 4);
        assert_eq!(cfg.theme_scheme(), "rose-pine");
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml = r#"
[general]
mouse = false
tree_file = "/tmp/tree.toml"
log_file = "/tmp/termfolio.log"

[view]
min_visible_lines = 30
chord_timeout_ms = 750
scroll_step = 3
gutter_width = 5

[theme]
scheme = "dawn"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert!(!cfg.mouse_enabled());
        assert_eq!(cfg.tree_file(), Some(Path::new("/tmp/tree.toml")));
        assert_eq!(cfg.log_file(), Some(Path::new("/tmp/termfolio.log")));
        assert_eq!(cfg.min_visible_lines(), 30);
        assert_eq!(cfg.chord_window(), Duration::from_millis(750));
        assert_eq!(cfg.scroll_step(), 3);
        assert_eq!(cfg.gutter_width(), 5);
        assert_eq!(cfg.theme_scheme(), "dawn");
    }

    #[test]
    fn test_toml_parsing_partial() {
        let toml = r#"
[view]
min_visible_lines = 10
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.min_visible_lines(), 10);
        assert_eq!(cfg.scroll_step(), 1);
        assert!(cfg.mouse_enabled());
    }

    #[test]
    fn test_zero_values_are_raised() {
        let toml = r#"
[view]
min_visible_lines = 0
scroll_step = 0
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.min_visible_lines(), 1);
        assert_eq!(cfg.scroll_step(), 1);
    }

    #[test]
    fn test_merge_overrides() {
        let base = AppConfig {
            general: GeneralConfig {
                mouse: Some(false),
                tree_file: Some("a.toml".into()),
                ..Default::default()
            },
            view: ViewConfig {
                min_visible_lines: Some(24),
                scroll_step: Some(2),
                ..Default::default()
            },
            ..Default::default()
        };

        let over = AppConfig {
            general: GeneralConfig {
                mouse: Some(true),
                ..Default::default()
            },
            view: ViewConfig {
                min_visible_lines: Some(40),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert!(merged.mouse_enabled());
        assert_eq!(merged.tree_file(), Some(Path::new("a.toml")));
        assert_eq!(merged.min_visible_lines(), 40);
        assert_eq!(merged.scroll_step(), 2);
    }

    #[test]
    fn test_merge_none_does_not_clear_some() {
        let base = AppConfig {
            view: ViewConfig {
                chord_timeout_ms: Some(900),
                gutter_width: Some(6),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = base.merge(&AppConfig::default());
        assert_eq!(merged.chord_window(), Duration::from_millis(900));
        assert_eq!(merged.gutter_width(), 6);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("test-config.toml");
        let mut f = std::fs::File::create(&cfg_path).expect("create");
        writeln!(
            f,
            r#"
[view]
min_visible_lines = 12

[theme]
scheme = "custom"
"#
        )
        .expect("write");

        let cfg = load_file(&cfg_path).expect("load");
        assert_eq!(cfg.min_visible_lines(), 12);
        assert_eq!(cfg.theme_scheme(), "custom");
        assert_eq!(cfg.scroll_step(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }

    #[test]
    fn test_load_invalid_toml_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        assert!(load_file(&cfg_path).is_none());
    }

    #[test]
    fn test_load_with_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[general]
mouse = false

[view]
min_visible_lines = 12
"#,
        )
        .expect("write");

        let cli_overrides = AppConfig {
            view: ViewConfig {
                min_visible_lines: Some(50),
                ..Default::default()
            },
            ..Default::default()
        };

        let cfg = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        assert_eq!(cfg.min_visible_lines(), 50);
        assert!(!cfg.mouse_enabled());
    }

    #[test]
    fn test_theme_custom_colors() {
        let toml = r##"
[theme]
scheme = "custom"

[theme.custom]
cursorline_bg = "#1a1b26"
dir_fg = "#c0caf5"
"##;
        let cfg: AppConfig = toml::from_str(toml).expect("parse");
        let custom = cfg.theme.custom.as_ref().expect("custom present");
        assert_eq!(custom.cursorline_bg.as_deref(), Some("#1a1b26"));
        assert_eq!(custom.dir_fg.as_deref(), Some("#c0caf5"));
        assert!(custom.status_bg.is_none());
    }
}
