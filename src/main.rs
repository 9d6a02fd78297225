use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs, io,
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use toptui::api::ProfileClient;
use toptui::model::Model;

/// Profile tag and post browser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp dir (toptui-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, gg/G)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Backend base URL, overrides api_url from the config file
    #[arg(short, long)]
    base_url: Option<String>,

    /// Profile handle to search right away
    handle: Option<String>,
}

// Global flag for debug mode
static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

mod app;
mod config;
mod handlers;
mod services;
mod ui;
mod utils;

use config::Config;

fn log_debug(msg: &str) {
    // Only log if debug mode is enabled
    if !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }

    use std::fs::OpenOptions;
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(utils::get_debug_log_path())
    {
        let _ = writeln!(file, "{}", msg);
    }
}

pub struct App {
    pub model: Model,

    api_tx: tokio::sync::mpsc::UnboundedSender<services::api::ApiRequest>,
    api_rx: tokio::sync::mpsc::UnboundedReceiver<services::api::ApiResponse>,

    open_command: Option<String>,
    clipboard_command: Option<String>,

    /// First half of a vim `gg`
    last_key_was_g: bool,
}

impl App {
    fn new(config: Config, base_url: String) -> Result<Self> {
        let timeout = config.request_timeout_secs.map(Duration::from_secs);
        let client = ProfileClient::new(base_url, timeout)?;
        log_debug(&format!("Using backend at {}", client.base_url()));

        // Spawn API service worker
        let (api_tx, api_rx) = services::api::spawn_api_service(client);

        Ok(Self {
            model: Model::new(config.vim_mode, config.stat_max_attempts),
            api_tx,
            api_rx,
            open_command: config.open_command,
            clipboard_command: config.clipboard_command,
            last_key_was_g: false,
        })
    }

    /// Handle API responses from background worker
    /// Delegated to handlers::api module
    fn handle_api_response(&mut self, response: services::api::ApiResponse) {
        handlers::handle_api_response(self, response);
    }

    /// Handle keyboard input
    /// Delegated to handlers::keyboard module
    fn handle_key(&mut self, key: event::KeyEvent) {
        handlers::handle_key(self, key);
    }
}

/// Determine the config file path with fallback logic
fn get_config_path(cli_path: Option<String>) -> Result<PathBuf> {
    // If CLI argument provided, use it
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(p);
        } else {
            anyhow::bail!("Config file not found at specified path: {}", path);
        }
    }

    // Try ~/.config/toptui/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("toptui").join("config.yaml");

        if config_path.exists() {
            return Ok(config_path);
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }

    let expected_path = if let Some(config_dir) = dirs::config_dir() {
        config_dir
            .join("toptui")
            .join("config.yaml")
            .display()
            .to_string()
    } else {
        "~/.config/toptui/config.yaml".to_string()
    };

    anyhow::bail!(
        "Config file not found. Expected locations:\n\
         1. {} (preferred)\n\
         2. ./config.yaml (fallback)\n\
         \n\
         Use --config <path> to specify a custom location, or pass --base-url.",
        expected_path
    )
}

/// Load the config file, or fall back to defaults when --base-url makes it optional
fn load_config(args: &Args) -> Result<Config> {
    let explicit = args.config.is_some();
    let config_path = match get_config_path(args.config.clone()) {
        Ok(path) => path,
        Err(e) if !explicit && args.base_url.is_some() => {
            log_debug(&format!("No config file, using defaults: {}", e));
            return Ok(Config::default());
        }
        Err(e) => return Err(e),
    };

    log_debug(&format!("Loading config from: {:?}", config_path));

    let config_str = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: Config = serde_yaml::from_str(&config_str)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set debug mode
    DEBUG_MODE.store(args.debug, Ordering::Relaxed);
    log_debug("Debug mode enabled");

    let mut config = load_config(&args)?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }
    let base_url = args
        .base_url
        .clone()
        .or_else(|| config.api_url.clone())
        .context("No backend URL: set api_url in config.yaml or pass --base-url")?;

    // Initialize app
    let mut app = App::new(config, base_url)?;
    if let Some(handle) = args.handle.as_deref() {
        app.search_handle(handle);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Return result after cleanup
    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        // Auto-dismiss toast after 1.5 seconds
        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            app.handle_api_response(response);
        }

        // Short poll so worker responses show up promptly
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }

    Ok(())
}
