//! Form - ordered components with single-focus cycling
//!
//! A form owns a fixed, ordered list of components. It never stores a
//! "current index": the focused child is whichever one reports `focused()`.
//!
//! Transitions:
//! - `Msg::Start`: blur and clear every child, then focus child 0
//! - `Msg::Focus(advance from X)`: focus the child after X (no wraparound)
//! - `Msg::Focus(retreat from X)`: focus the child before X (no wraparound)
//! - anything else: broadcast to every child in order, concatenating effects
//!
//! At most one child is focused after every update: the form blurs all other
//! children before focusing a target.

use crate::component::{Component, Direction, FocusSignal, Value};
use crate::msg::{Cmd, Msg};
use crate::router::Page;
use ratatui::text::Text;
use tracing::{trace, warn};

pub struct Form {
    components: Vec<Box<dyn Component>>,
}

impl Form {
    pub fn new(components: Vec<Box<dyn Component>>) -> Self {
        for (i, c) in components.iter().enumerate() {
            if components[..i].iter().any(|prev| prev.id() == c.id()) {
                warn!(id = c.id(), "duplicate component id in form; focus signals resolve to the first");
            }
        }
        Self { components }
    }

    /// Startup effects of every child, followed by `Start`
    pub fn init(&mut self) -> Cmd {
        let mut cmd = Cmd::batch(self.components.iter_mut().map(|c| c.init()));
        cmd.extend(Cmd::emit(Msg::Start));
        cmd
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Start => self.start(),
            Msg::Focus(signal) => self.shift_focus(signal),
            _ => Cmd::batch(self.components.iter_mut().map(|c| c.update(msg))),
        }
    }

    /// Render every child in order
    pub fn view(&self) -> Text<'static> {
        let mut text = Text::default();
        for c in &self.components {
            text.extend(c.view());
        }
        text
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Position of the focused child, if any
    pub fn focused_index(&self) -> Option<usize> {
        self.components.iter().position(|c| c.focused())
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focused_index().map(|i| self.components[i].id())
    }

    /// Position of the child with the given id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Component> {
        self.position(id).map(|i| self.components[i].as_ref())
    }

    /// Whether some child is taking printable keys as text
    pub fn typing(&self) -> bool {
        self.components.iter().any(|c| c.typing())
    }

    pub fn first_id(&self) -> Option<&str> {
        self.components.first().map(|c| c.id())
    }

    /// Current value of every child, keyed by id
    pub fn values(&self) -> Vec<(String, Value)> {
        self.components
            .iter()
            .map(|c| (c.id().to_string(), c.value()))
            .collect()
    }

    fn start(&mut self) -> Cmd {
        for c in self.components.iter_mut() {
            c.blur();
            c.clear();
        }
        match self.components.first_mut() {
            Some(first) => first.focus(),
            None => Cmd::none(),
        }
    }

    fn shift_focus(&mut self, signal: &FocusSignal) -> Cmd {
        let Some(source) = self.position(&signal.source) else {
            trace!(source = %signal.source, "focus signal from unknown component ignored");
            return Cmd::none();
        };

        let target = match signal.direction {
            Direction::Advance => source.checked_add(1).filter(|&t| t < self.components.len()),
            Direction::Retreat => source.checked_sub(1),
        };

        match target {
            Some(target) => self.focus_only(target),
            None => {
                // At the boundary focus stays where it was. The source has
                // usually blurred itself before signalling, so hand it back.
                trace!(source = %signal.source, direction = ?signal.direction, "focus signal at form boundary");
                if self.components[source].focused() {
                    Cmd::none()
                } else {
                    self.focus_only(source)
                }
            }
        }
    }

    fn focus_only(&mut self, target: usize) -> Cmd {
        for (i, c) in self.components.iter_mut().enumerate() {
            if i != target {
                c.blur();
            }
        }
        self.components[target].focus()
    }
}

impl Page for Form {
    fn init(&mut self) -> Cmd {
        Form::init(self)
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        Form::update(self, msg)
    }

    fn view(&self) -> Text<'static> {
        Form::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{advance, retreat};
    use crate::testing::Probe;

    fn form(ids: &[&str]) -> Form {
        Form::new(
            ids.iter()
                .map(|id| Box::new(Probe::new(id)) as Box<dyn Component>)
                .collect(),
        )
    }

    fn deliver(form: &mut Form, cmd: Cmd) -> Cmd {
        Cmd::batch(
            cmd.messages()
                .cloned()
                .collect::<Vec<_>>()
                .iter()
                .map(|m| form.update(m)),
        )
    }

    fn focused_count(form: &Form) -> usize {
        form.components.iter().filter(|c| c.focused()).count()
    }

    #[test]
    fn test_start_focuses_first_and_clears() {
        let mut f = form(&["a", "b", "c"]);
        let _ = f.components[2].update(&Msg::SetText {
            id: "c".into(),
            value: "dirty".into(),
        });
        let _ = f.update(&Msg::Start);

        assert_eq!(f.focused_index(), Some(0));
        assert_eq!(f.get("c").unwrap().value(), Value::Text(String::new()));
    }

    #[test]
    fn test_advance_and_retreat() {
        let mut f = form(&["a", "b", "c"]);
        let _ = f.update(&Msg::Start);

        let _ = deliver(&mut f, advance("a"));
        assert_eq!(f.focused_id(), Some("b"));

        let _ = deliver(&mut f, advance("b"));
        assert_eq!(f.focused_id(), Some("c"));

        let _ = deliver(&mut f, retreat("c"));
        assert_eq!(f.focused_id(), Some("b"));
        assert_eq!(focused_count(&f), 1);
    }

    #[test]
    fn test_no_wraparound_at_either_end() {
        let mut f = form(&["a", "b", "c"]);
        let _ = f.update(&Msg::Start);

        let _ = deliver(&mut f, retreat("a"));
        assert_eq!(f.focused_index(), Some(0));

        let _ = deliver(&mut f, advance("a"));
        let _ = deliver(&mut f, advance("b"));
        let _ = deliver(&mut f, advance("c"));
        assert_eq!(f.focused_index(), Some(2));
    }

    #[test]
    fn test_boundary_refocuses_source_that_blurred_itself() {
        let mut f = form(&["a", "b"]);
        let _ = f.update(&Msg::Start);
        let _ = deliver(&mut f, advance("a"));

        // Probe blurs itself and signals on "down"
        let cmd = f.update(&Msg::key(crossterm::event::KeyCode::Down));
        assert_eq!(focused_count(&f), 0);
        let _ = deliver(&mut f, cmd);
        assert_eq!(f.focused_id(), Some("b"));
    }

    #[test]
    fn test_unknown_source_is_noop() {
        let mut f = form(&["a", "b"]);
        let _ = f.update(&Msg::Start);

        let cmd = deliver(&mut f, advance("ghost"));
        assert!(cmd.is_empty());
        assert_eq!(f.focused_index(), Some(0));
    }

    #[test]
    fn test_empty_form_never_panics() {
        let mut f = form(&[]);
        assert!(f.update(&Msg::Start).is_empty());
        assert!(deliver(&mut f, retreat("x")).is_empty());
        assert_eq!(f.focused_index(), None);
    }

    #[test]
    fn test_broadcast_reaches_every_child_in_order() {
        let mut f = form(&["a", "b", "c"]);
        let cmd = f.update(&Msg::Success("done".into()));

        let echoed: Vec<_> = cmd.messages().cloned().collect();
        assert_eq!(
            echoed,
            vec![
                Msg::SetText { id: "echo".into(), value: "a".into() },
                Msg::SetText { id: "echo".into(), value: "b".into() },
                Msg::SetText { id: "echo".into(), value: "c".into() },
            ]
        );
    }

    #[test]
    fn test_single_focus_invariant_under_mixed_sequence() {
        use crossterm::event::KeyCode;

        let mut f = form(&["a", "b", "c", "d"]);
        let script = vec![
            Msg::Start,
            Msg::key(KeyCode::Down),
            Msg::key(KeyCode::Down),
            Msg::key(KeyCode::Up),
            Msg::Start,
            Msg::key(KeyCode::Up),
            Msg::key(KeyCode::Down),
            Msg::key(KeyCode::Down),
            Msg::key(KeyCode::Down),
            Msg::key(KeyCode::Down),
        ];

        let mut pending: Vec<Msg> = Vec::new();
        for msg in script {
            pending.push(msg);
            while let Some(next) = pending.pop() {
                let cmd = f.update(&next);
                assert!(focused_count(&f) <= 1);
                pending.extend(cmd.messages().cloned());
            }
        }
        assert_eq!(f.focused_id(), Some("d"));
    }
}
