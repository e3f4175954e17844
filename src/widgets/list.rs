//! Filterable option list shared by Selector and MultiSelector
//!
//! Holds the options, the visible subset after filtering and truncation, the
//! cursor into that subset, the optional inline filter input and the spinner.
//! The owning widget decides what the pick action (select or toggle) does with
//! the option under the cursor.

use super::loading::Loading;
use super::text_input::{TextInput, TextInputConfig};
use crate::component::{retreat, Component};
use crate::keys::{key_string, Action, KeyOpts};
use crate::msg::{Cmd, Msg};
use crate::theme::{ColorType, Theme};
use crossterm::event::KeyEvent;
use ratatui::text::{Line, Span, Text};
use tracing::debug;

/// Callback giving the rows available to a list (including two for the filter)
pub type MaxHeight = Box<dyn Fn() -> usize>;

/// Inline filter settings
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub placeholder: String,
    /// No filter input at all; the filter key is ignored
    pub hidden: bool,
}

/// What a list needs to know about an option
pub trait ListOption: Clone {
    fn label(&self) -> &str;
    fn disabled(&self) -> bool;
}

pub(super) enum KeyOutcome {
    /// Key fully handled by the list
    Done(Cmd),
    /// The pick action landed on an enabled option (index into `options`)
    Pick(usize),
}

pub(super) struct FilteredList<T> {
    pub(super) id: String,
    pub(super) options: Vec<T>,
    /// Indices into `options`, after filtering and truncation
    visible: Vec<usize>,
    cursor: usize,
    filter: Option<TextInput>,
    max_height: Option<MaxHeight>,
    truncated: bool,
    keys: KeyOpts,
    theme: Theme,
    loading: Loading,
    pub(super) focused: bool,
}

impl<T: ListOption> FilteredList<T> {
    pub(super) fn new(
        id: String,
        options: Vec<T>,
        filter: FilterOptions,
        max_height: Option<MaxHeight>,
        keys: KeyOpts,
        theme: Theme,
    ) -> Self {
        let filter = (!filter.hidden).then(|| {
            TextInput::new(TextInputConfig {
                id: format!("{}-filter", id),
                placeholder: filter.placeholder,
                no_up: true,
                no_down: true,
                keys: keys.clone(),
                theme: theme.clone(),
            })
        });

        let mut list = Self {
            loading: Loading::new(id.clone()),
            id,
            options,
            visible: Vec::new(),
            cursor: 0,
            filter,
            max_height,
            truncated: false,
            keys,
            theme,
            focused: false,
        };
        list.refilter();
        list
    }

    pub(super) fn set_options(&mut self, options: Vec<T>) {
        self.options = options;
        self.refilter();
    }

    pub(super) fn filtering(&self) -> bool {
        self.filter.as_ref().is_some_and(|f| f.focused())
    }

    pub(super) fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Option under the cursor (index into `options`)
    pub(super) fn current(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    /// Spinner messages and filter blink ticks
    pub(super) fn update_ambient(&mut self, msg: &Msg) -> Cmd {
        let mut cmd = self.loading.update(msg);
        if let (Msg::Blink { .. }, Some(filter)) = (msg, self.filter.as_mut()) {
            cmd.extend(filter.update(msg));
        }
        cmd
    }

    pub(super) fn handle_key(&mut self, key: &KeyEvent, pick: Action) -> KeyOutcome {
        if self.is_loading() {
            return KeyOutcome::Done(Cmd::none());
        }
        let action = self.keys.action_for(&key_string(key));

        if self.filtering() {
            let Some(filter) = self.filter.as_mut() else {
                return KeyOutcome::Done(Cmd::none());
            };
            if matches!(action, Some(Action::Back | Action::Select)) {
                filter.blur();
                return KeyOutcome::Done(Cmd::none());
            }
            let cmd = filter.update(&Msg::Key(*key));
            self.cursor = 0;
            self.refilter();
            return KeyOutcome::Done(cmd);
        }

        match action {
            Some(Action::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                KeyOutcome::Done(Cmd::none())
            }
            Some(Action::Down) => {
                if self.cursor + 1 < self.visible.len() {
                    self.cursor += 1;
                }
                KeyOutcome::Done(Cmd::none())
            }
            Some(Action::Filter) => match self.filter.as_mut() {
                Some(filter) => KeyOutcome::Done(filter.focus()),
                None => KeyOutcome::Done(Cmd::none()),
            },
            Some(Action::Back) => {
                self.focused = false;
                KeyOutcome::Done(retreat(&self.id))
            }
            Some(action) if action == pick => match self.current() {
                Some(i) if self.options[i].disabled() => {
                    debug!(list = %self.id, option = self.options[i].label(), "disabled option ignored");
                    KeyOutcome::Done(Cmd::none())
                }
                Some(i) => KeyOutcome::Pick(i),
                None => KeyOutcome::Done(Cmd::none()),
            },
            _ => KeyOutcome::Done(Cmd::none()),
        }
    }

    pub(super) fn blur(&mut self) {
        self.focused = false;
        if let Some(filter) = self.filter.as_mut() {
            filter.blur();
        }
    }

    pub(super) fn clear(&mut self) {
        if let Some(filter) = self.filter.as_mut() {
            filter.clear();
        }
        self.cursor = 0;
        self.refilter();
    }

    /// Recompute the visible subset from the filter text and height limit
    pub(super) fn refilter(&mut self) {
        let needle = self
            .filter
            .as_ref()
            .map(|f| f.text().to_lowercase())
            .unwrap_or_default();

        let mut visible: Vec<usize> = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, opt)| needle.is_empty() || opt.label().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();

        self.truncated = false;
        if let Some(max_height) = &self.max_height {
            // Two rows belong to the filter input
            let rows = max_height().saturating_sub(2);
            if visible.len() > rows {
                visible.truncate(rows);
                self.truncated = true;
            }
        }

        self.visible = visible;
        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
    }

    /// Filter line, then one row per visible option built by `row`
    pub(super) fn view(&self, row: impl Fn(&T) -> Vec<Span<'static>>) -> Text<'static> {
        if self.is_loading() {
            return Text::from(vec![Line::default(), Line::from(self.loading.view())]);
        }

        let mut lines = Vec::new();
        if let Some(filter) = &self.filter {
            lines.extend(filter.view().lines);
        }

        if self.visible.is_empty() {
            lines.push(Line::from("No options found"));
        }

        for (i, &index) in self.visible.iter().enumerate() {
            let mut spans = if i == self.cursor {
                vec![
                    self.theme
                        .color_if(">", ColorType::Primary, self.focused && !self.filtering()),
                    Span::raw(" "),
                ]
            } else {
                vec![Span::raw("  ")]
            };
            spans.extend(row(&self.options[index]));
            lines.push(Line::from(spans));
        }

        if self.truncated {
            lines.push(Line::from(self.theme.color(
                format!("  Results limited, use {} to search...", self.keys.filter),
                ColorType::Neutral,
            )));
        }

        Text::from(lines)
    }

    /// Label colored neutral when disabled
    pub(super) fn label_span(&self, option: &T) -> Span<'static> {
        self.theme
            .color_if(option.label(), ColorType::Neutral, option.disabled())
    }

    pub(super) fn theme(&self) -> &Theme {
        &self.theme
    }
}
