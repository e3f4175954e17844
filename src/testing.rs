// Test doubles shared by the form, router and program tests

use crate::component::{advance, retreat, Component, Value};
use crate::msg::{Cmd, Msg};
use crate::router::Page;
use crossterm::event::KeyCode;
use ratatui::text::Text;
use std::cell::RefCell;
use std::rc::Rc;

/// Minimal component: down/up blur and signal, `Success` echoes its id
pub struct Probe {
    id: String,
    value: String,
    focused: bool,
}

impl Probe {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            value: String::new(),
            focused: false,
        }
    }
}

impl Component for Probe {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::SetText { id, value } if *id == self.id => {
                self.value = value.clone();
                Cmd::none()
            }
            Msg::Success(_) => Cmd::emit(Msg::SetText {
                id: "echo".into(),
                value: self.id.clone(),
            }),
            Msg::Key(key) if self.focused => match key.code {
                KeyCode::Down => {
                    self.blur();
                    advance(&self.id)
                }
                KeyCode::Up => {
                    self.blur();
                    retreat(&self.id)
                }
                _ => Cmd::none(),
            },
            _ => Cmd::none(),
        }
    }

    fn view(&self) -> Text<'static> {
        Text::from(format!("{}:{}", self.id, self.value))
    }

    fn clear(&mut self) {
        self.value.clear();
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
        Value::Text(self.value.clone())
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Shared record of what fake pages saw
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Page that renders its name and journals init/update calls
pub struct FakePage {
    name: String,
    journal: Journal,
    on_init: Cmd,
}

impl FakePage {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            journal: Rc::clone(journal),
            on_init: Cmd::none(),
        }
    }

    /// Effects returned from every init
    pub fn with_init(mut self, cmd: Cmd) -> Self {
        self.on_init = cmd;
        self
    }
}

impl Page for FakePage {
    fn init(&mut self) -> Cmd {
        self.journal.borrow_mut().push(format!("init:{}", self.name));
        self.on_init.clone()
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        self.journal
            .borrow_mut()
            .push(format!("update:{}:{:?}", self.name, msg));
        Cmd::none()
    }

    fn view(&self) -> Text<'static> {
        Text::from(self.name.clone())
    }
}

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}
