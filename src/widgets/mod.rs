//! Focusable widgets
//!
//! Every widget here implements [`Component`](crate::component::Component) and
//! follows the same rules: input is ignored while blurred (addressed
//! value-set messages excepted), and focus leaves a widget only by blurring
//! itself and returning a focus signal.
//!
//! - [`TextInput`] - single-line editor with a blinking cursor
//! - [`Toggle`] - yes/no switch
//! - [`Selector`] - filterable single-choice list
//! - [`MultiSelector`] - filterable multi-choice list
//!
//! [`Loading`] and [`Help`] are not focusable; the list widgets embed the
//! spinner and pages render the help footer.

mod help;
mod list;
mod loading;
mod multi_selector;
mod selector;
mod text_input;
mod toggle;

pub use help::Help;
pub use list::{FilterOptions, ListOption, MaxHeight};
pub use loading::{Loading, SPINNER_INTERVAL};
pub use multi_selector::{MultiSelector, MultiSelectorConfig, MultiSelectorOption};
pub use selector::{Selector, SelectorConfig, SelectorOption};
pub use text_input::{TextInput, TextInputConfig, BLINK_INTERVAL};
pub use toggle::{Toggle, ToggleConfig};
