// boba - focusable terminal components, forms and a stack-based view router
//
// Architecture:
// - Components (widgets): focusable units that react to messages and render text
// - Form: ordered components with single-focus cycling driven by focus signals
// - Router: route tree plus a view stack; push/replace/pop/set-param and quit
// - Program: FIFO message queue and timers that deliver effects
// - TUI (ratatui): runs a Program on a real terminal
//
// Everything is single-threaded: updates return effects (`Cmd`) and never do
// work inline.

pub mod component;
pub mod config;
pub mod demo;
pub mod form;
pub mod keys;
pub mod logging;
pub mod msg;
pub mod program;
pub mod router;
pub mod theme;
pub mod tui;
pub mod widgets;

#[cfg(test)]
mod testing;

pub use component::{Component, Value};
pub use form::Form;
pub use msg::{Cmd, Effect, Msg};
pub use program::Program;
pub use router::{Page, RouteNode, Router, RouterOptions};
