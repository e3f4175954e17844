//! Program - the single-threaded message loop
//!
//! Owns the root [`Router`], a FIFO of pending messages and the timers created
//! by `Effect::After`. Messages are delivered one at a time, each to
//! completion, and the effects they return are only ever queued:
//!
//! ```text
//! send(msg) ─▶ queue ─▶ dispatch ─▶ router.update ─▶ Cmd
//!                ▲                                   │
//!                ├──────────── Effect::Emit ◀────────┤
//!                │                                   │
//!   due_timers ◀─┴── timers ◀──── Effect::After ◀────┤
//!                                                    │
//!                          should_quit ◀── Effect::Quit
//! ```
//!
//! The terminal loop in `tui` feeds keys in with `send`, calls `due_timers`
//! on every tick and redraws after `run_until_idle`.

use crate::msg::{Cmd, Effect, Msg};
use crate::router::{RouteError, Router};
use ratatui::text::Text;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::trace;

struct Timer {
    deadline: Instant,
    msg: Msg,
}

pub struct Program {
    router: Router,
    queue: VecDeque<Msg>,
    timers: Vec<Timer>,
    quit: bool,
}

impl Program {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            queue: VecDeque::new(),
            timers: Vec::new(),
            quit: false,
        }
    }

    /// Initialize the active page and queue its startup effects
    pub fn start(&mut self) -> Result<(), RouteError> {
        let cmd = self.router.init()?;
        self.apply(cmd, Instant::now());
        Ok(())
    }

    /// Queue an external message (key press, resize)
    pub fn send(&mut self, msg: Msg) {
        self.queue.push_back(msg);
    }

    /// Deliver one message to the router and queue what it returns
    pub fn dispatch(&mut self, msg: &Msg) -> Result<(), RouteError> {
        trace!(?msg, "dispatch");
        let cmd = self.router.update(msg)?;
        self.apply(cmd, Instant::now());
        Ok(())
    }

    /// Drain the queue; returns how many messages were delivered
    ///
    /// Stops early once a quit effect has been seen.
    pub fn run_until_idle(&mut self) -> Result<usize, RouteError> {
        let mut delivered = 0;
        while !self.quit {
            let Some(msg) = self.queue.pop_front() else {
                break;
            };
            self.dispatch(&msg)?;
            delivered += 1;
        }
        Ok(delivered)
    }

    /// Move every timer that expired by `now` into the queue, earliest first
    pub fn due_timers(&mut self, now: Instant) -> usize {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.deadline <= now);
        self.timers = pending;

        due.sort_by_key(|t| t.deadline);
        let fired = due.len();
        self.queue.extend(due.into_iter().map(|t| t.msg));
        fired
    }

    /// When the earliest pending timer expires
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn view(&self) -> Text<'static> {
        self.router.view()
    }

    fn apply(&mut self, cmd: Cmd, now: Instant) {
        for effect in cmd {
            match effect {
                Effect::Emit(msg) => self.queue.push_back(msg),
                Effect::After(delay, msg) => self.timers.push(Timer {
                    deadline: now + delay,
                    msg,
                }),
                Effect::Quit => self.quit = true,
            }
        }
    }
}
