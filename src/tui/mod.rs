mod state;
mod ui;

use std::io::{self, Stdout};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::controller::Controller;

pub use state::{Focus, ViewerState};

/// Runs the interactive viewer until the user quits. Every key press that
/// changes a control re-renders the table before the next event is read.
pub fn run(controller: Controller) -> io::Result<()> {
    enable_raw_mode()?;
    let mut terminal = undo_on_err(enter_screen(), disable_raw_mode)?;

    let result = event_loop(&mut terminal, ViewerState::new(controller));
    let restored = restore(&mut terminal);

    // The loop's own error wins over a cleanup failure.
    result.and(restored)
}

fn enter_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    undo_on_err(Terminal::new(CrosstermBackend::new(stdout)), || {
        execute!(io::stdout(), LeaveAlternateScreen)
    })
}

fn restore(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw.and(screen).and(cursor)
}

/// Runs `undo` when `result` is an error, keeping the original error.
fn undo_on_err<T>(result: io::Result<T>, undo: impl FnOnce() -> io::Result<()>) -> io::Result<T> {
    if result.is_err() {
        let _ = undo();
    }
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut state: ViewerState,
) -> io::Result<()> {
    info!("viewer started");
    loop {
        terminal.draw(|frame| ui::draw(frame, &state))?;

        if let Event::Key(key) = event::read()? {
            if state.on_key(key) {
                info!(
                    category = state.controller.category(),
                    search = state.controller.search(),
                    "viewer closed"
                );
                return Ok(());
            }
        }
    }
}
