//! Messages and effects
//!
//! Every state change in the tree is driven by a [`Msg`] delivered through a
//! single `update` entry point. Updates never perform work inline; they return
//! a [`Cmd`] describing messages to deliver later.

use crate::component::FocusSignal;
use crate::router::{NavRequest, Params};
use crate::widgets::{MultiSelectorOption, SelectorOption};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Closed set of messages understood by the router, forms and widgets
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A key press from the terminal
    Key(KeyEvent),
    /// Terminal was resized
    Resize { width: u16, height: u16 },

    /// Blur and clear every child of a form, then focus the first one
    Start,
    /// A component asks to hand focus to its neighbour
    Focus(FocusSignal),

    /// Navigation request, consumed by the router
    Navigate(NavRequest),
    /// Query parameters of the route that just became active
    RouterParams(Params),
    /// A single query parameter on the current route changed
    ParamChanged { key: String, value: String },

    // Value-setting messages, addressed by component id and accepted
    // whether or not the target is focused
    SetText { id: String, value: String },
    SetToggle { id: String, on: bool },
    SelectorOptions { id: String, options: Vec<SelectorOption> },
    MultiSelectorOptions { id: String, options: Vec<MultiSelectorOption> },

    // Outgoing widget notifications
    Selected { id: String, option: SelectorOption },
    MultiToggled { id: String, option: MultiSelectorOption },
    ToggleChanged { id: String, on: bool },

    /// Put a list component into its loading state
    Loading { id: String },
    /// Background work finished (stops any spinner)
    Success(String),
    /// Background work failed (stops any spinner)
    Failure(String),

    // Deferred ticks. The tag lets a component ignore ticks from a loop it
    // has since restarted.
    Blink { id: String, tag: u64 },
    SpinnerTick { id: String, tag: u64 },
    ResetSelection { id: String },
}

impl Msg {
    /// Key press without modifiers
    pub fn key(code: KeyCode) -> Self {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Key press for a plain character
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }
}

/// A single piece of deferred work
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver the message on the next cycle
    Emit(Msg),
    /// Deliver the message once the delay has elapsed
    After(Duration, Msg),
    /// Terminate the program
    Quit,
}

/// Ordered list of effects returned alongside new state
///
/// An empty `Cmd` means "nothing to do". Effects keep the order in which they
/// were produced, so batching the commands of sibling components preserves
/// their positional order.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Cmd(Vec<Effect>);

impl Cmd {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn emit(msg: Msg) -> Self {
        Self(vec![Effect::Emit(msg)])
    }

    pub fn after(delay: Duration, msg: Msg) -> Self {
        Self(vec![Effect::After(delay, msg)])
    }

    pub fn quit() -> Self {
        Self(vec![Effect::Quit])
    }

    /// Concatenate commands, keeping their order
    pub fn batch(cmds: impl IntoIterator<Item = Cmd>) -> Self {
        let mut out = Self::none();
        for cmd in cmds {
            out.extend(cmd);
        }
        out
    }

    /// Append another command after this one
    pub fn and(mut self, other: Cmd) -> Self {
        self.extend(other);
        self
    }

    pub fn extend(&mut self, other: Cmd) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn effects(&self) -> &[Effect] {
        &self.0
    }

    /// Whether any effect requests termination
    pub fn is_quit(&self) -> bool {
        self.0.iter().any(|e| matches!(e, Effect::Quit))
    }

    /// Messages that will be delivered immediately, in order
    pub fn messages(&self) -> impl Iterator<Item = &Msg> {
        self.0.iter().filter_map(|e| match e {
            Effect::Emit(msg) => Some(msg),
            _ => None,
        })
    }
}

impl IntoIterator for Cmd {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
