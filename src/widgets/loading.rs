//! Loading spinner embedded in the list widgets
//!
//! `Loading { id }` starts the spinner and a chain of `SpinnerTick`s. Options
//! for the same id, `Success` and `Failure` stop it. Ticks carry a tag so that a
//! chain from an earlier load cannot double the spin rate of a later one.
//! A `Loading` that arrives while already active restarts the chain, since the
//! old one may have died with its ticks delivered elsewhere.

use crate::msg::{Cmd, Msg};
use ratatui::text::Span;
use std::time::Duration;

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Delay between spinner frames
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Loading {
    id: String,
    active: bool,
    frame: usize,
    tag: u64,
}

impl Loading {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            active: false,
            frame: 0,
            tag: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.active
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Loading { id } if *id == self.id => {
                self.active = true;
                self.frame = 0;
                self.tag = self.tag.wrapping_add(1);
                self.tick()
            }
            Msg::SpinnerTick { id, tag } if *id == self.id => {
                if !self.active || *tag != self.tag {
                    return Cmd::none();
                }
                self.frame = (self.frame + 1) % FRAMES.len();
                self.tick()
            }
            Msg::SelectorOptions { id, .. } | Msg::MultiSelectorOptions { id, .. }
                if *id == self.id =>
            {
                self.active = false;
                Cmd::none()
            }
            Msg::Success(_) | Msg::Failure(_) => {
                self.active = false;
                Cmd::none()
            }
            _ => Cmd::none(),
        }
    }

    pub fn view(&self) -> Span<'static> {
        Span::raw(FRAMES[self.frame])
    }

    fn tick(&self) -> Cmd {
        Cmd::after(
            SPINNER_INTERVAL,
            Msg::SpinnerTick {
                id: self.id.clone(),
                tag: self.tag,
            },
        )
    }
}
