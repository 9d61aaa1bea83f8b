//! Terminal match runner (default binary).
//!
//! Fixed-timestep frame loop: poll input until the next tick, apply commands
//! to the match state, advance animations, draw.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, LevelFilter};
use simplelog::{ConfigBuilder, WriteLogger};

use flotilla::core::Game;
use flotilla::input::{map_key, Command};
use flotilla::term::{BoardView, TerminalRenderer};
use flotilla::types::{GRID_SIZE, TICK_MS};

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--debug") {
        setup_logging()?;
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn setup_logging() -> Result<()> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();
    let file = File::create("flotilla.log").context("creating log file")?;
    WriteLogger::init(LevelFilter::Debug, config, file).context("initializing logger")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game = Game::new();
    let view = BoardView;
    let mut cursor: (u8, u8) = (GRID_SIZE / 2, GRID_SIZE / 2);
    let mut status: Option<&'static str> = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game, cursor, status, w, h);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = map_key(key) {
                        status = None;
                        match command {
                            Command::Quit => return Ok(()),
                            Command::CursorUp => cursor.1 = cursor.1.saturating_sub(1),
                            Command::CursorDown => cursor.1 = (cursor.1 + 1).min(GRID_SIZE - 1),
                            Command::CursorLeft => cursor.0 = cursor.0.saturating_sub(1),
                            Command::CursorRight => cursor.0 = (cursor.0 + 1).min(GRID_SIZE - 1),
                            Command::Pick => {
                                if let Err(err) = game.pick_cell(cursor.0, cursor.1) {
                                    debug!("pick rejected: {}", err.code());
                                    status = Some(err.message());
                                }
                            }
                            Command::ChooseAction(index) => {
                                if let Err(err) = game.choose_action(index) {
                                    debug!("action rejected: {}", err.code());
                                    status = Some(err.message());
                                }
                            }
                            Command::Cancel => game.cancel(),
                            Command::EndTurn => game.end_turn(),
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);
        }
    }
}
