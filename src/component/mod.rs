//! Component contract - the foundation of the UI system
//!
//! Every focusable widget implements [`Component`]. Forms and pages only ever
//! hold `Box<dyn Component>`, never a concrete widget type.
//!
//! # Focus rules
//!
//! - A component ignores input while `focused()` is false. Value-setting
//!   messages addressed to its id (`Msg::SetText`, `Msg::SetToggle`, ...) are
//!   the exception so that pages can pre-populate fields.
//! - A component never reaches into a sibling. To move focus it blurs itself
//!   and returns an [`advance`] or [`retreat`] effect carrying its own id; the
//!   enclosing [`Form`](crate::form::Form) resolves the target.
//!
//! ```text
//!   TextInput("name")  --blur + advance("name")-->  Form
//!                                                    │ finds "name" at i
//!                                                    ▼
//!                                             focus child i + 1
//! ```

mod focus;

pub use focus::{advance, retreat, Direction, FocusSignal};

use crate::msg::{Cmd, Msg};
use crate::widgets::{MultiSelectorOption, SelectorOption};
use ratatui::text::Text;

/// Typed value held by a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Bool(bool),
    Selection(Option<SelectorOption>),
    Selections(Vec<MultiSelectorOption>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Capability set shared by every focusable widget
pub trait Component {
    /// Startup effect (e.g. reset a selection once the page is shown)
    fn init(&mut self) -> Cmd {
        Cmd::none()
    }

    /// Apply a message and return follow-up effects
    fn update(&mut self, msg: &Msg) -> Cmd;

    /// Render to styled text
    fn view(&self) -> Text<'static>;

    /// Reset to the default value
    fn clear(&mut self);

    /// Mark focused; may start something like a cursor blink
    fn focus(&mut self) -> Cmd;

    fn focused(&self) -> bool;

    fn blur(&mut self);

    /// Printable keys are currently being taken as text (an editor or a
    /// list filter has the cursor), so page-level shortcuts should stand down
    fn typing(&self) -> bool {
        false
    }

    fn value(&self) -> Value;

    /// Stable identity used by focus signals and addressed messages
    fn id(&self) -> &str;
}

/// Flatten styled text to a plain string, one line per row
pub fn plain(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
