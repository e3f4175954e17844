//! Single-choice selector over a filterable list

use super::list::{FilterOptions, FilteredList, KeyOutcome, ListOption, MaxHeight};
use crate::component::{Component, Value};
use crate::keys::{Action, KeyOpts};
use crate::msg::{Cmd, Msg};
use crate::theme::Theme;
use ratatui::text::Text;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
}

impl SelectorOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
        }
    }

    /// Mark the option as not selectable
    pub fn disable(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl ListOption for SelectorOption {
    fn label(&self) -> &str {
        &self.label
    }

    fn disabled(&self) -> bool {
        self.disabled
    }
}

#[derive(Default)]
pub struct SelectorConfig {
    pub id: String,
    pub options: Vec<SelectorOption>,
    pub filter: FilterOptions,
    pub max_height: Option<MaxHeight>,
    pub keys: KeyOpts,
    pub theme: Theme,
}

/// Emits `Msg::Selected` when the select key lands on an enabled option
pub struct Selector {
    list: FilteredList<SelectorOption>,
    selected: Option<SelectorOption>,
}

impl Selector {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            list: FilteredList::new(
                config.id,
                config.options,
                config.filter,
                config.max_height,
                config.keys,
                config.theme,
            ),
            selected: None,
        }
    }

    pub fn options(&self) -> &[SelectorOption] {
        &self.list.options
    }

    pub fn filtering(&self) -> bool {
        self.list.filtering()
    }
}

impl Component for Selector {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::SelectorOptions { id, options } if *id == self.list.id => {
                self.list.set_options(options.clone());
                self.list.update_ambient(msg)
            }
            Msg::Key(key) if self.list.focused => match self.list.handle_key(key, Action::Select) {
                KeyOutcome::Done(cmd) => cmd,
                KeyOutcome::Pick(i) => {
                    let option = self.list.options[i].clone();
                    self.selected = Some(option.clone());
                    Cmd::emit(Msg::Selected {
                        id: self.list.id.clone(),
                        option,
                    })
                }
            },
            _ => self.list.update_ambient(msg),
        }
    }

    fn view(&self) -> Text<'static> {
        self.list.view(|opt| vec![self.list.label_span(opt)])
    }

    fn clear(&mut self) {
        self.selected = None;
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
        Value::Selection(self.selected.clone())
    }

    fn id(&self) -> &str {
        &self.list.id
    }
}
