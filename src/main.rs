use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use space_shooter::config::{GameConfig, CONFIG_FILE};
use space_shooter::display::terminal::TerminalRenderer;
use space_shooter::entities::Field;
use space_shooter::game::Game;
use space_shooter::input::TerminalInput;
use space_shooter::platform::SystemClock;
use space_shooter::runner;
use space_shooter::score::FileStore;

fn main() -> Result<()> {
    let (config, rejected) = GameConfig::load_or_default(CONFIG_FILE);
    init_tracing(&config.log_path);
    if let Some(err) = rejected {
        warn!(error = %err, "config rejected, using defaults");
    }

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let mut renderer = TerminalRenderer::new(out, Field::from_config(&config));
    let result = run(&mut renderer, config);

    // Always restore the terminal
    let out = renderer.writer_mut();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = out.flush();
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(renderer: &mut TerminalRenderer<W>, config: GameConfig) -> Result<()> {
    let mut input = TerminalInput::spawn(renderer.viewport());
    let mut clock = SystemClock::new(config.tick_rate);
    let store = FileStore::new(&config.high_score_path);

    info!(
        width = config.field_width,
        height = config.field_height,
        tick_rate = config.tick_rate,
        "starting"
    );
    let mut game = Game::new(config, Box::new(store), StdRng::from_entropy());
    runner::run(&mut game, renderer, &mut input, &mut clock);
    Ok(())
}

/// Stdout is the game screen, so logs go to a file instead.
fn init_tracing(log_path: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false);

    let installed = match File::create(log_path) {
        Ok(file) => {
            tracing::subscriber::set_global_default(builder.with_writer(Mutex::new(file)).finish())
        }
        Err(_) => {
            tracing::subscriber::set_global_default(builder.with_writer(std::io::sink).finish())
        }
    };

    if installed.is_err() {
        eprintln!("tracing subscriber already set");
    }
}
