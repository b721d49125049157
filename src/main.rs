mod app;
mod components;
mod config;
mod content;
mod error;
mod event;
mod handler;
mod keymap;
mod layout;
mod state;
mod status;
mod theme;
mod tree;
mod tui;
mod ui;
mod viewport;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, ThemeConfig, ViewConfig};
use crate::event::{Event, EventHandler};
use crate::tree::Tree;
use crate::tui::{install_panic_hook, Tui};

/// Browse a small file tree and read its files, netrw style.
#[derive(Parser, Debug)]
#[command(name = "termfolio", version, about)]
struct Cli {
    /// Path to config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// TOML file describing the tree to browse
    #[arg(long, value_name = "PATH")]
    tree: Option<PathBuf>,

    /// Minimum rows in the main pane
    #[arg(long, value_name = "N")]
    min_lines: Option<usize>,

    /// Color scheme: rose-pine, dawn, custom
    #[arg(long)]
    theme: Option<String>,

    /// Disable mouse support
    #[arg(long)]
    no_mouse: bool,

    /// Write a log to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    /// Partial config carrying only the flags that were given.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: self.no_mouse.then_some(false),
                tree_file: self
                    .tree
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
                log_file: self
                    .log_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            },
            view: ViewConfig {
                min_visible_lines: self.min_lines,
                ..Default::default()
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
        }
    }
}

/// Start logging to `path`. Returns false if the file cannot be created
/// or a logger is already installed.
fn init_logger(path: &Path, level: LevelFilter) -> bool {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(path) {
        Ok(file) => WriteLogger::init(level, log_config, file).is_ok(),
        Err(e) => {
            eprintln!("Cannot create log file {}: {}", path.display(), e);
            false
        }
    }
}

fn load_tree(config: &AppConfig) -> error::Result<Tree> {
    match config.tree_file() {
        Some(path) => {
            log::info!("Loading tree from {}", path.display());
            content::load_tree_file(path)
        }
        None => content::builtin_tree(),
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the UI, so logs only ever go to a file.
    let mut logging = match &cli.log_file {
        Some(path) => init_logger(path, cli.log_level),
        None => false,
    };

    let overrides = cli.overrides();
    let config = AppConfig::load(cli.config.as_deref(), Some(&overrides));

    if !logging {
        if let Some(path) = config.log_file() {
            logging = init_logger(path, cli.log_level);
        }
    }
    if logging {
        log::info!(
            "termfolio starting (theme: {}, mouse: {})",
            config.theme_scheme(),
            config.mouse_enabled()
        );
    }

    let tree = load_tree(&config)?;
    let mut app = App::new(&tree, &config);

    install_panic_hook();
    let mut tui = Tui::new(app.settings.mouse)?;
    let mut events = EventHandler::new(Duration::from_millis(50));

    let result = run(&mut app, &mut tui, &mut events).await;

    tui.restore()?;
    log::info!("termfolio exiting");
    result
}

async fn run(app: &mut App<'_>, tui: &mut Tui, events: &mut EventHandler) -> error::Result<()> {
    loop {
        tui.terminal_mut().draw(|frame| ui::render(app, frame))?;

        match events.next().await? {
            Event::Key(key) => {
                handler::handle_key_event(app, key, Instant::now());
            }
            Event::Mouse(mouse) => {
                handler::handle_mouse_event(app, mouse, Instant::now());
            }
            Event::Tick => app.on_tick(Instant::now()),
            Event::Resize(w, h) => log::debug!("Resized to {}x{}", w, h),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
