//! Key help footer
//!
//! Short form is a single line ("esc back • ctrl+c quit • ? help"); the help
//! key switches to the full listing with one aligned row per binding.

use crate::keys::{key_string, Action, KeyMap, KeyOpts};
use crate::msg::Msg;
use crate::theme::{ColorType, Theme};
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " • ";

pub struct Help {
    help_key: String,
    map: KeyMap,
    show_all: bool,
    theme: Theme,
}

impl Help {
    pub fn new(keys: &KeyOpts, actions: &[Action], theme: Theme) -> Self {
        Self {
            help_key: keys.help.clone(),
            map: KeyMap::new(keys, actions),
            show_all: false,
            theme,
        }
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Flip between short and full help on the help key
    pub fn update(&mut self, msg: &Msg) {
        if let Msg::Key(key) = msg {
            if key_string(key) == self.help_key {
                self.show_all = !self.show_all;
            }
        }
    }

    pub fn view(&self) -> Text<'static> {
        let mut lines = vec![Line::default()];

        if self.show_all {
            let bindings = self.map.full_help();
            let width = bindings
                .iter()
                .map(|b| b.label().width())
                .max()
                .unwrap_or(0);
            for binding in bindings {
                let label = binding.label();
                let pad = " ".repeat(width - label.width());
                lines.push(Line::from(vec![
                    self.theme.color(format!("{}{}", label, pad), ColorType::Neutral),
                    Span::raw(format!("  {}", binding.action.description())),
                ]));
            }
        } else {
            let mut spans = Vec::new();
            for (i, binding) in self.map.short_help().into_iter().enumerate() {
                if i > 0 {
                    spans.push(self.theme.color(SEPARATOR, ColorType::Neutral));
                }
                spans.push(self.theme.color(binding.label(), ColorType::Neutral));
                spans.push(Span::raw(format!(" {}", binding.action.description())));
            }
            lines.push(Line::from(spans));
        }

        Text::from(lines)
    }
}
