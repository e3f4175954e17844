//! Multi-choice selector: the toggle key flips the option under the cursor

use super::list::{FilterOptions, FilteredList, KeyOutcome, ListOption, MaxHeight};
use crate::component::{Component, Value};
use crate::keys::{Action, KeyOpts};
use crate::msg::{Cmd, Msg};
use crate::theme::{ColorType, Theme};
use ratatui::text::{Span, Text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSelectorOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl MultiSelectorOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            selected: false,
            disabled: false,
        }
    }
}

impl ListOption for MultiSelectorOption {
    fn label(&self) -> &str {
        &self.label
    }

    fn disabled(&self) -> bool {
        self.disabled
    }
}

#[derive(Default)]
pub struct MultiSelectorConfig {
    pub id: String,
    pub options: Vec<MultiSelectorOption>,
    pub filter: FilterOptions,
    pub max_height: Option<MaxHeight>,
    pub keys: KeyOpts,
    pub theme: Theme,
}

pub struct MultiSelector {
    list: FilteredList<MultiSelectorOption>,
}

impl MultiSelector {
    pub fn new(config: MultiSelectorConfig) -> Self {
        Self {
            list: FilteredList::new(
                config.id,
                config.options,
                config.filter,
                config.max_height,
                config.keys,
                config.theme,
            ),
        }
    }

    pub fn options(&self) -> &[MultiSelectorOption] {
        &self.list.options
    }

    fn unselect_all(&mut self) {
        for opt in self.list.options.iter_mut() {
            opt.selected = false;
        }
    }
}

impl Component for MultiSelector {
    /// Selections never survive re-entering a page
    fn init(&mut self) -> Cmd {
        Cmd::emit(Msg::ResetSelection {
            id: self.list.id.clone(),
        })
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::ResetSelection { id } if *id == self.list.id => {
                self.unselect_all();
                Cmd::none()
            }
            Msg::MultiSelectorOptions { id, options } if *id == self.list.id => {
                self.list.set_options(options.clone());
                self.list.update_ambient(msg)
            }
            Msg::Key(key) if self.list.focused => match self.list.handle_key(key, Action::Toggle) {
                KeyOutcome::Done(cmd) => cmd,
                KeyOutcome::Pick(i) => {
                    let option = &mut self.list.options[i];
                    option.selected = !option.selected;
                    Cmd::emit(Msg::MultiToggled {
                        id: self.list.id.clone(),
                        option: option.clone(),
                    })
                }
            },
            _ => self.list.update_ambient(msg),
        }
    }

    fn view(&self) -> Text<'static> {
        let theme = self.list.theme();
        self.list.view(|opt| {
            let icon = if opt.selected { "[x]" } else { "[ ]" };
            vec![
                theme.color_if(icon, ColorType::Neutral, opt.disabled),
                Span::raw(" "),
                self.list.label_span(opt),
            ]
        })
    }

    fn clear(&mut self) {
        self.unselect_all();
        self.list.clear();
    }

    fn focus(&mut self) -> Cmd {
        self.list.focused = true;
        Cmd::none()
    }

    fn focused(&self) -> bool {
        self.list.focused
    }

    fn typing(&self) -> bool {
        self.list.filtering()
    }

    fn blur(&mut self) {
        self.list.blur();
    }

    fn value(&self) -> Value {
        Value::Selections(
            self.list
                .options
                .iter()
                .filter(|opt| opt.selected)
                .cloned()
                .collect(),
        )
    }

    fn id(&self) -> &str {
        &self.list.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::plain;
    use crossterm::event::KeyCode;

    fn multi() -> MultiSelector {
        let mut locked = MultiSelectorOption::new("locked", "locked");
        locked.disabled = true;
        let mut m = MultiSelector::new(MultiSelectorConfig {
            id: "tags".to_string(),
            options: vec![
                MultiSelectorOption::new("rust", "rust"),
                locked,
                MultiSelectorOption::new("go", "go"),
            ],
            filter: FilterOptions {
                hidden: true,
                ..Default::default()
            },
            ..Default::default()
        });
        let _ = m.focus();
        m
    }

    fn selected_values(m: &MultiSelector) -> Vec<String> {
        match m.value() {
            Value::Selections(opts) => opts.into_iter().map(|o| o.value).collect(),
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_toggle_flips_and_notifies() {
        let mut m = multi();
        let cmd = m.update(&Msg::char(' '));
        let toggled: Vec<_> = cmd.messages().cloned().collect();
        let mut expected = MultiSelectorOption::new("rust", "rust");
        expected.selected = true;
        assert_eq!(
            toggled,
            vec![Msg::MultiToggled {
                id: "tags".into(),
                option: expected
            }]
        );
        assert_eq!(selected_values(&m), vec!["rust"]);

        let _ = m.update(&Msg::char(' '));
        assert!(selected_values(&m).is_empty());
    }

    #[test]
    fn test_disabled_option_cannot_be_toggled() {
        let mut m = multi();
        let _ = m.update(&Msg::key(KeyCode::Down));
        assert!(m.update(&Msg::char(' ')).is_empty());
        assert!(selected_values(&m).is_empty());

        // Select does nothing in a multi selector
        let _ = m.update(&Msg::key(KeyCode::Down));
        assert!(m.update(&Msg::key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn test_init_resets_selection() {
        let mut m = multi();
        let _ = m.update(&Msg::char(' '));

        let init = m.init();
        for msg in init.messages() {
            let _ = m.update(msg);
        }
        assert!(selected_values(&m).is_empty());
    }

    #[test]
    fn test_hidden_filter_ignores_filter_key() {
        let mut m = multi();
        assert!(m.update(&Msg::char('/')).is_empty());
        assert_eq!(plain(&m.view()), "> [ ] rust\n  [ ] locked\n  [ ] go");
    }

    #[test]
    fn test_options_message_replaces_list() {
        let mut m = multi();
        let mut picked = MultiSelectorOption::new("zig", "zig");
        picked.selected = true;
        let _ = m.update(&Msg::MultiSelectorOptions {
            id: "tags".into(),
            options: vec![picked],
        });
        assert_eq!(selected_values(&m), vec!["zig"]);

        let _ = m.update(&Msg::MultiSelectorOptions {
            id: "other".into(),
            options: Vec::new(),
        });
        assert_eq!(m.options().len(), 1);
    }
}
