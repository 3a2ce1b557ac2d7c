//! netspeed: announce the current network download and upload speed.
//!
//! Features:
//!   - One-second fixed-window measurement of all interfaces
//!   - Bit-rate (kbps/Mbps) and byte-rate (KB/s, MB/s) announcements
//!   - Press twice to copy the last announcement to the clipboard
//!   - Interactive terminal mode or one-shot `--once bits|bytes`
//!
//! Keybindings: press F1 or '?' for help.

mod app;
mod clock;
mod config;
mod format;
mod host;
mod input;
mod sampler;
mod sinks;
mod system;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use clock::SystemClock;
use config::NetspeedConfig;
use host::{AnnouncementLog, Osc52Clipboard, StdoutAnnouncer};
use sampler::{Collaborators, NetSpeedPlugin, Variant};
use system::counters::CounterCapability;

/// Redraw interval while waiting for keys
const POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Parser)]
#[command(name = "netspeed", version, about)]
struct Cli {
    /// Announce once in the given form, print to stdout and exit
    #[arg(long, value_enum)]
    once: Option<Variant>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = NetspeedConfig::load(cli.config.as_deref());

    if cli.write_config {
        let path = config
            .save(cli.config.as_deref())
            .context("failed to write config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let clipboard = Arc::new(Osc52Clipboard {
        enabled: config.osc52_clipboard,
    });

    if let Some(variant) = cli.once {
        let plugin = NetSpeedPlugin::new(Collaborators {
            capability: CounterCapability::probe(),
            announcer: Arc::new(StdoutAnnouncer {
                timestamps: config.timestamps,
            }),
            clipboard,
            clock: Arc::new(SystemClock),
        });
        plugin.request(variant);
        return Ok(());
    }

    let log = Arc::new(AnnouncementLog::new(config.log_capacity));
    let plugin = NetSpeedPlugin::new(Collaborators {
        capability: CounterCapability::probe(),
        announcer: log.clone(),
        clipboard,
        clock: Arc::new(SystemClock),
    });
    let mut app = App::new(config, Arc::new(plugin), log);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let timeout = Duration::from_millis(POLL_INTERVAL_MS);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(timeout)? {
            // On Windows, crossterm fires Press and Release; only handle Press
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    input::handle_input(app, key);
                }
            }
        }
    }
}
