//! Single-line text input
//!
//! Editing keys (insert, backspace, delete, left/right, home/end) only apply
//! while focused. The cursor blinks through a chain of `Blink` ticks started by
//! `focus()`; each focus bumps the tag so an older chain stops on its next tick.

use crate::component::{advance, retreat, Component, Value};
use crate::keys::{key_string, KeyOpts};
use crate::msg::{Cmd, Msg};
use crate::theme::{ColorType, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use std::time::Duration;

/// Delay between cursor blink ticks
pub const BLINK_INTERVAL: Duration = Duration::from_millis(530);

#[derive(Debug, Clone, Default)]
pub struct TextInputConfig {
    pub id: String,
    pub placeholder: String,
    /// Never emit a retreat signal on the up key
    pub no_up: bool,
    /// Never emit an advance signal on the down key
    pub no_down: bool,
    pub keys: KeyOpts,
    pub theme: Theme,
}

pub struct TextInput {
    id: String,
    placeholder: String,
    no_up: bool,
    no_down: bool,
    keys: KeyOpts,
    theme: Theme,

    value: Vec<char>,
    /// Char index, `0..=value.len()`
    cursor: usize,
    focused: bool,

    blink_tag: u64,
    cursor_visible: bool,
}

impl TextInput {
    pub fn new(config: TextInputConfig) -> Self {
        Self {
            id: config.id,
            placeholder: config.placeholder,
            no_up: config.no_up,
            no_down: config.no_down,
            keys: config.keys,
            theme: config.theme,
            value: Vec::new(),
            cursor: 0,
            focused: false,
            blink_tag: 0,
            cursor_visible: true,
        }
    }

    /// Current contents
    pub fn text(&self) -> String {
        self.value.iter().collect()
    }

    fn set_text(&mut self, text: &str) {
        self.value = text.chars().collect();
        self.cursor = self.value.len();
    }

    fn blink(&self) -> Cmd {
        Cmd::after(
            BLINK_INTERVAL,
            Msg::Blink {
                id: self.id.clone(),
                tag: self.blink_tag,
            },
        )
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Cmd {
        let name = key_string(key);

        if name == self.keys.up && !self.no_up {
            self.blur();
            return retreat(&self.id);
        }
        if name == self.keys.down && !self.no_down {
            self.blur();
            return advance(&self.id);
        }
        if name == self.keys.back {
            self.blur();
            return Cmd::none();
        }

        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c) if plain => {
                self.value.insert(self.cursor, c);
                self.cursor += 1;
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.value.remove(self.cursor);
            }
            KeyCode::Delete if self.cursor < self.value.len() => {
                self.value.remove(self.cursor);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.value.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => return Cmd::none(),
        }

        // Typing keeps the cursor solid
        self.cursor_visible = true;
        Cmd::none()
    }

    fn cursor_span(&self, c: char) -> Span<'static> {
        if self.cursor_visible {
            Span::styled(
                c.to_string(),
                Style::default().add_modifier(Modifier::REVERSED),
            )
        } else {
            Span::raw(c.to_string())
        }
    }
}

impl Component for TextInput {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::SetText { id, value } if *id == self.id => {
                self.set_text(value);
                Cmd::none()
            }
            Msg::Blink { id, tag } if *id == self.id => {
                if !self.focused || *tag != self.blink_tag {
                    return Cmd::none();
                }
                self.cursor_visible = !self.cursor_visible;
                self.blink()
            }
            Msg::Key(key) if self.focused => self.handle_key(key),
            _ => Cmd::none(),
        }
    }

    fn view(&self) -> Text<'static> {
        let mut spans = vec![self
            .theme
            .color_if("> ", ColorType::Primary, self.focused)];

        if self.value.is_empty() && !self.placeholder.is_empty() {
            let mut rest = self.placeholder.chars();
            if self.focused {
                if let Some(first) = rest.next() {
                    spans.push(self.cursor_span(first));
                }
            }
            spans.push(self.theme.color(rest.collect::<String>(), ColorType::Neutral));
        } else {
            spans.push(Span::raw(
                self.value[..self.cursor].iter().collect::<String>(),
            ));
            let after = if self.focused {
                spans.push(self.cursor_span(self.value.get(self.cursor).copied().unwrap_or(' ')));
                (self.cursor + 1).min(self.value.len())
            } else {
                self.cursor
            };
            spans.push(Span::raw(self.value[after..].iter().collect::<String>()));
        }

        Text::from(Line::from(spans))
    }

    fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn focus(&mut self) -> Cmd {
        self.focused = true;
        self.cursor_visible = true;
        self.blink_tag = self.blink_tag.wrapping_add(1);
        self.blink()
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn typing(&self) -> bool {
        self.focused
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn value(&self) -> Value {
        Value::Text(self.text())
    }

    fn id(&self) -> &str {
        &self.id
    }
}
