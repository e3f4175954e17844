// Key naming and key bindings
//
// Bindings are plain strings ("ctrl+c", "up", "/") compared by exact match
// against the canonical name of an incoming key event. This keeps the
// `[keys]` config table human-editable.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Canonical name of a key event
///
/// Printable characters map to themselves (so `Shift+a` is `"A"`), control
/// and alt chords get a `ctrl+` / `alt+` prefix, and named keys use short
/// lowercase names.
pub fn key_string(key: &KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return format!("ctrl+{}", c.to_ascii_lowercase());
            }
            if key.modifiers.contains(KeyModifiers::ALT) {
                return format!("alt+{}", c);
            }
            return c.to_string();
        }
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => return "shift+tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pgup".to_string(),
        KeyCode::PageDown => "pgdown".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        other => format!("{:?}", other).to_lowercase(),
    };

    let mut name = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        name.push_str("ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        name.push_str("alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        name.push_str("shift+");
    }
    name.push_str(&base);
    name
}

/// Actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Select,
    Toggle,
    Back,
    Quit,
    Filter,
    Help,
}

impl Action {
    /// Order used by the full help listing
    pub const ALL: [Action; 8] = [
        Action::Back,
        Action::Quit,
        Action::Help,
        Action::Select,
        Action::Toggle,
        Action::Up,
        Action::Down,
        Action::Filter,
    ];

    /// Short description shown in help
    pub fn description(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Select => "select/submit",
            Action::Toggle => "toggle",
            Action::Back => "back",
            Action::Quit => "quit",
            Action::Filter => "filter",
            Action::Help => "help",
        }
    }
}

/// The full set of configurable keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyOpts {
    pub up: String,
    pub down: String,
    pub select: String,
    pub toggle: String,
    pub back: String,
    pub quit: String,
    pub filter: String,
    pub help: String,
}

impl Default for KeyOpts {
    fn default() -> Self {
        Self {
            up: "up".to_string(),
            down: "down".to_string(),
            select: "enter".to_string(),
            toggle: " ".to_string(),
            back: "esc".to_string(),
            quit: "ctrl+c".to_string(),
            filter: "/".to_string(),
            help: "?".to_string(),
        }
    }
}

impl KeyOpts {
    /// Key string bound to an action
    pub fn binding(&self, action: Action) -> &str {
        match action {
            Action::Up => &self.up,
            Action::Down => &self.down,
            Action::Select => &self.select,
            Action::Toggle => &self.toggle,
            Action::Back => &self.back,
            Action::Quit => &self.quit,
            Action::Filter => &self.filter,
            Action::Help => &self.help,
        }
    }

    /// Which action (if any) a key name triggers, checked in a fixed order
    pub fn action_for(&self, key: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|action| self.binding(*action) == key)
    }
}

/// A single binding shown in help
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub action: Action,
    pub key: String,
}

impl Binding {
    /// Printable key label (a bare space is not readable)
    pub fn label(&self) -> String {
        match self.key.as_str() {
            " " => "space".to_string(),
            other => other.to_string(),
        }
    }
}

/// Subset of the configured keys that a screen wants to advertise
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<Binding>,
}

impl KeyMap {
    pub fn new(opts: &KeyOpts, actions: &[Action]) -> Self {
        let bindings = Action::ALL
            .into_iter()
            .filter(|a| actions.contains(a))
            .map(|action| Binding {
                action,
                key: opts.binding(action).to_string(),
            })
            .collect();
        Self { bindings }
    }

    /// Back, quit and help only
    pub fn short_help(&self) -> Vec<&Binding> {
        self.bindings
            .iter()
            .filter(|b| matches!(b.action, Action::Back | Action::Quit | Action::Help))
            .collect()
    }

    pub fn full_help(&self) -> Vec<&Binding> {
        self.bindings.iter().collect()
    }
}
