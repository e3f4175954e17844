//! Focus signal protocol
//!
//! Two directionless requests tagged with the emitting component's id. The
//! signal never names a target; resolving "the one after me" is the form's job.

use crate::msg::{Cmd, Msg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Move focus to the next component
    Advance,
    /// Move focus to the previous component
    Retreat,
}

/// Request to move focus off the component named by `source`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSignal {
    pub direction: Direction,
    pub source: String,
}

impl FocusSignal {
    pub fn new(direction: Direction, source: impl Into<String>) -> Self {
        Self {
            direction,
            source: source.into(),
        }
    }
}

/// Effect asking the form to focus the component after `source`
pub fn advance(source: &str) -> Cmd {
    Cmd::emit(Msg::Focus(FocusSignal::new(Direction::Advance, source)))
}

/// Effect asking the form to focus the component before `source`
pub fn retreat(source: &str) -> Cmd {
    Cmd::emit(Msg::Focus(FocusSignal::new(Direction::Retreat, source)))
}
