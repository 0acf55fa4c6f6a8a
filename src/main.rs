//! Terminal runner (default binary).
//!
//! The session's drop timer runs on its own thread. Every cell the session
//! changes is sent over a channel, and this loop redraws exactly those cells
//! between keyboard polls.

mod cli;
mod logging;

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info, warn};

use tetris_field::core::{Session, SessionConfig};
use tetris_field::input::{command_for_key, should_quit};
use tetris_field::term::{BoardView, TerminalRenderer, Viewport};

const POLL_MS: u64 = 16;

fn main() -> Result<()> {
    let config = cli::Args::parse().into_config()?;

    if let Err(err) = logging::init_log(logging::level_from_env(), logging::LOG_FILE) {
        eprintln!("logging disabled: {err:#}");
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: SessionConfig) -> Result<()> {
    let (changed_tx, changed_rx) = mpsc::channel();
    let session = Session::with_observer(config, move |column: i32, row: i32| {
        // The receiver only goes away on shutdown.
        let _ = changed_tx.send((column, row));
    })?;

    let (columns, rows) = (session.config().columns, session.config().rows);
    let mut view = centered_view(columns, rows);
    redraw_all(term, &session, &view, &changed_rx)?;

    loop {
        if event::poll(Duration::from_millis(POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit requested");
                        break;
                    }
                    if let Some(command) = command_for_key(key) {
                        let applied = session.apply(command);
                        if command.is_piece_command() && !applied {
                            debug!("{} rejected", command.as_str());
                        }
                    }
                }
                Event::Resize(..) => {
                    view = centered_view(columns, rows);
                    redraw_all(term, &session, &view, &changed_rx)?;
                    continue;
                }
                _ => {}
            }
        }

        let mut any = false;
        for (column, row) in changed_rx.try_iter() {
            let cell = session.with_grid(|grid| grid.get(column, row));
            term.draw_cell(&view, column, row, cell)?;
            any = true;
        }
        if any {
            term.draw_status(&view, status_text(&session))?;
        }
    }

    session.clear();
    Ok(())
}

fn centered_view(columns: u16, rows: u16) -> BoardView {
    let (w, h) = crossterm::terminal::size().unwrap_or_else(|err| {
        warn!("terminal size unavailable: {err}");
        (80, 24)
    });
    BoardView::centered(columns, rows, Viewport::new(w, h))
}

/// Redraw the whole field; pending single-cell updates are covered by it.
fn redraw_all(
    term: &mut TerminalRenderer,
    session: &Session,
    view: &BoardView,
    changed: &Receiver<(i32, i32)>,
) -> Result<()> {
    changed.try_iter().for_each(drop);
    session.with_grid(|grid| term.draw_full(view, grid))?;
    term.draw_status(view, status_text(session))
}

fn status_text(session: &Session) -> &'static str {
    if session.has_active_piece() {
        "arrows move/rotate  space drop  q quit"
    } else {
        "s start  q quit"
    }
}
