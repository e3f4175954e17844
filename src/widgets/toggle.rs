//! Labelled yes/no toggle

use crate::component::{advance, retreat, Component, Value};
use crate::keys::{key_string, KeyOpts};
use crate::msg::{Cmd, Msg};
use crate::theme::{ColorType, Theme};
use ratatui::text::{Line, Span, Text};

#[derive(Debug, Clone, Default)]
pub struct ToggleConfig {
    pub id: String,
    pub label: String,
    /// Initial state
    pub on: bool,
    pub no_up: bool,
    pub no_down: bool,
    pub keys: KeyOpts,
    pub theme: Theme,
}

pub struct Toggle {
    id: String,
    label: String,
    on: bool,
    focused: bool,
    no_up: bool,
    no_down: bool,
    keys: KeyOpts,
    theme: Theme,
}

impl Toggle {
    pub fn new(config: ToggleConfig) -> Self {
        Self {
            id: config.id,
            label: config.label,
            on: config.on,
            focused: false,
            no_up: config.no_up,
            no_down: config.no_down,
            keys: config.keys,
            theme: config.theme,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Component for Toggle {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::SetToggle { id, on } if *id == self.id => {
                self.on = *on;
                Cmd::none()
            }
            Msg::Key(key) if self.focused => {
                let name = key_string(key);
                if name == self.keys.toggle {
                    self.on = !self.on;
                    Cmd::emit(Msg::ToggleChanged {
                        id: self.id.clone(),
                        on: self.on,
                    })
                } else if name == self.keys.up && !self.no_up {
                    self.blur();
                    retreat(&self.id)
                } else if name == self.keys.down && !self.no_down {
                    self.blur();
                    advance(&self.id)
                } else if name == self.keys.back {
                    self.blur();
                    Cmd::none()
                } else {
                    Cmd::none()
                }
            }
            _ => Cmd::none(),
        }
    }

    fn view(&self) -> Text<'static> {
        let state = if self.on {
            self.theme.color("Yes", ColorType::Success)
        } else {
            self.theme.color("No", ColorType::Neutral)
        };
        Text::from(Line::from(vec![
            self.theme.color_if(">", ColorType::Primary, self.focused),
            Span::raw(format!(" {}: ", self.label)),
            state,
        ]))
    }

    fn clear(&mut self) {
        self.on = false;
    }

    fn focus(&mut self) -> Cmd {
        self.focused = true;
        Cmd::none()
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn value(&self) -> Value {
        Value::Bool(self.on)
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::plain;
    use crossterm::event::KeyCode;

    fn toggle() -> Toggle {
        Toggle::new(ToggleConfig {
            id: "newsletter".to_string(),
            label: "Newsletter".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_toggle_key_flips_and_notifies() {
        let mut t = toggle();
        assert!(t.update(&Msg::char(' ')).is_empty());
        assert!(!t.is_on());

        let _ = t.focus();
        let cmd = t.update(&Msg::char(' '));
        assert!(t.is_on());
        let messages: Vec<_> = cmd.messages().cloned().collect();
        assert_eq!(
            messages,
            vec![Msg::ToggleChanged {
                id: "newsletter".into(),
                on: true
            }]
        );
        assert_eq!(plain(&t.view()), "> Newsletter: Yes");
    }

    #[test]
    fn test_set_toggle_accepted_while_blurred() {
        let mut t = toggle();
        let cmd = t.update(&Msg::SetToggle {
            id: "newsletter".into(),
            on: true,
        });
        assert!(cmd.is_empty());
        assert_eq!(t.value(), Value::Bool(true));

        t.clear();
        assert_eq!(t.value(), Value::Bool(false));
    }

    #[test]
    fn test_focus_signals() {
        let mut t = toggle();
        let _ = t.focus();
        assert!(!t.update(&Msg::key(KeyCode::Up)).is_empty());
        assert!(!t.focused());

        let _ = t.focus();
        assert!(t.update(&Msg::key(KeyCode::Esc)).is_empty());
        assert!(!t.focused());
    }
}
