use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use survive::assets::Assets;
use survive::audio::LoggedAudio;
use survive::config::GameConfig;
use survive::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use survive::game::{Game, GameState, RunSummary, World};
use survive::rendering::{CellScale, GlyphSheet, OutputTarget, ScreenBuffer, TerminalRenderer};
use survive::terminal_io::{CrosstermInput, InputSource, SimulatedInput};

fn run_with<I: InputSource>(
    config: &GameConfig,
    sheet: GlyphSheet,
    assets: Assets,
    output: OutputTarget,
    input: I,
    cols: u16,
    rows: u16,
) -> Result<RunSummary> {
    let scale = CellScale::fit(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, cols, rows);
    let renderer = TerminalRenderer::new(sheet, output, cols, rows, scale);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(World::new(assets), renderer, input, LoggedAudio, config.loop_settings());
    game.run(&mut rng).context("Game loop failed")
}

fn enter_terminal() -> io::Result<()> {
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide, Clear(ClearType::All))
        .map_err(|e| { error!("Failed to prepare terminal: {}", e); e })
}

fn leave_terminal() -> io::Result<()> {
    execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen)
        .map_err(|e| { error!("Failed to restore terminal: {}", e); e })?;
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })
}

fn main() -> Result<()> {
    let config = GameConfig::parse();
    simple_logging::log_to_file(&config.log_file, config.log_level.into())
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;
    info!("Starting survive with {:?}", config);

    let mut sheet = GlyphSheet::default();
    let assets = Assets::load(&mut sheet).context("Asset loading failed")?;

    let summary = if config.debug {
        info!("Debug mode enabled at {}x{}.", config.width, config.height);
        let scale = CellScale::fit(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, config.width, config.height);
        let input = SimulatedInput::demo_script(scale, config.debug_quit_frame());
        let output = OutputTarget::ScreenBuffer(ScreenBuffer::new(config.width, config.height));
        run_with(&config, sheet, assets, output, input, config.width, config.height)?
    } else {
        let (cols, rows) = size().context("Failed to get terminal size")?;
        info!("Terminal size: {}x{}", cols, rows);
        enter_terminal().context("Failed to enter raw mode")?;
        let scale = CellScale::fit(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, cols, rows);
        let result = run_with(&config, sheet, assets, OutputTarget::Stdout(io::stdout()), CrosstermInput::new(scale), cols, rows);
        leave_terminal().context("Failed to restore terminal")?;
        result?
    };

    info!(
        "Finished after {} frames: {:?}, score {}{}",
        summary.frames,
        summary.state,
        summary.score,
        match (summary.quit, summary.state) {
            (true, _) => " (quit)",
            (false, GameState::Running) => " (frame limit)",
            _ => "",
        }
    );
    println!("Final Score: {}", summary.score);
    Ok(())
}
