// TUI module - Terminal User Interface
//
// This module drives a `Program` on a real terminal using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, resize, timer ticks)
// - Rendering the active page

use crate::msg::Msg;
use crate::program::Program;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Margin,
    widgets::{Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// How often deferred messages (cursor blink, spinner) are checked
const TICK: Duration = Duration::from_millis(50);

/// Run the program until it quits
///
/// Sets up the terminal, runs the event loop, and restores the terminal even
/// when the loop fails (a routing error, for instance) so the error can be
/// printed on a sane screen.
pub async fn run(program: &mut Program) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, program).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Each pass drains the message queue, redraws, then waits for either a
/// terminal event or the next tick. Expired timers are moved into the queue on
/// every pass.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    program: &mut Program,
) -> Result<()> {
    program.start().context("Failed to start the router")?;
    let mut tick_interval = tokio::time::interval(TICK);

    loop {
        program.run_until_idle().context("Routing error")?;
        if program.should_quit() {
            break;
        }

        terminal
            .draw(|f| draw(f, program))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Some(msg) = event::read().ok().and_then(to_msg) {
                        program.send(msg);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {}
        }

        program.due_timers(Instant::now());
    }

    Ok(())
}

/// Translate a terminal event into a message
///
/// Only key presses count; repeats and releases (reported by some terminals)
/// would otherwise double every keystroke.
fn to_msg(event: Event) -> Option<Msg> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(Msg::Key(key)),
        Event::Resize(width, height) => Some(Msg::Resize { width, height }),
        _ => None,
    }
}

fn draw(f: &mut Frame, program: &Program) {
    let area = f.area().inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    f.render_widget(
        Paragraph::new(program.view()).wrap(Wrap { trim: false }),
        area,
    );
}
