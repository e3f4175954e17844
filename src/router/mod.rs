//! Router - stack-based navigation between pages
//!
//! The router owns a tree of named views ([`RouteNode`]), a stack of entered
//! route strings and the location of the active page. It is the root of the
//! update chain:
//!
//! ```text
//! Msg ──▶ quit key? ──yes──▶ Cmd::quit()
//!            │ no
//!            ▼
//!       Msg::Navigate? ──yes──▶ push / replace / pop / set-param
//!            │ no
//!            ▼
//!       active page.update(msg)
//! ```
//!
//! Components never call the router. They return [`push`], [`replace`],
//! [`pop`] or [`set_param`] effects, which come back around as
//! `Msg::Navigate` on a later cycle.
//!
//! Configuration mistakes (a route matching no view, an unparseable query)
//! are returned as [`RouteError`] rather than rendering an undefined view.

mod route;
mod tree;


pub use route::{path_of, Params, Route};
pub use tree::RouteNode;

use crate::keys::key_string;
use crate::msg::{Cmd, Msg};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use tracing::{debug, info};
use tree::{locate, node_at, node_at_mut, Location};

/// A top-level model that the router can activate
pub trait Page {
    /// Called every time the page becomes active; state is not preserved
    /// across navigation unless the page keeps it in its route parameters
    fn init(&mut self) -> Cmd;

    fn update(&mut self, msg: &Msg) -> Cmd;

    fn view(&self) -> Text<'static>;
}

/// Navigation requests consumed by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRequest {
    /// Enter a route (no-op if it is already on top)
    Push(String),
    /// Swap the top route for another
    Replace(String),
    /// Return to the previous route, or the default view at the bottom
    Pop,
    /// Rewrite one query parameter of the current route
    SetParam { key: String, value: String },
}

/// Effect that pushes `route` onto the view stack
pub fn push(route: impl Into<String>) -> Cmd {
    Cmd::emit(Msg::Navigate(NavRequest::Push(route.into())))
}

/// Effect that replaces the top of the view stack
pub fn replace(route: impl Into<String>) -> Cmd {
    Cmd::emit(Msg::Navigate(NavRequest::Replace(route.into())))
}

/// Effect that navigates back
pub fn pop() -> Cmd {
    Cmd::emit(Msg::Navigate(NavRequest::Pop))
}

/// Effect that sets `key=value` on the current route
pub fn set_param(key: impl Into<String>, value: impl Into<String>) -> Cmd {
    Cmd::emit(Msg::Navigate(NavRequest::SetParam {
        key: key.into(),
        value: value.into(),
    }))
}

/// Routing configuration errors
///
/// These come from the static route table or from a route string emitted by
/// a page, so they are not recoverable within a running session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("malformed query in route {route:?}: {reason}")]
    MalformedQuery { route: String, reason: String },

    #[error("route {route:?} does not match any view")]
    UnknownRoute { route: String },

    #[error("view stack is empty")]
    EmptyStack,
}

/// Router construction options
pub struct RouterOptions {
    /// Initial route
    pub route: String,
    /// Root list of the route tree
    pub routes: Vec<RouteNode>,
    /// Key string that terminates the program
    pub quit: String,
    /// Where `Pop` lands when there is nothing left to pop
    pub default_view: Option<String>,
}

pub struct Router {
    routes: Vec<RouteNode>,
    stack: Vec<String>,
    active: Location,
    quit_key: String,
    default_view: Option<String>,
}

impl Router {
    /// Build a router positioned on `opts.route`
    ///
    /// Fails if the initial route or the default view does not resolve.
    pub fn new(opts: RouterOptions) -> Result<Self, RouteError> {
        let mut router = Self {
            routes: opts.routes,
            stack: Vec::new(),
            active: Vec::new(),
            quit_key: opts.quit,
            default_view: opts.default_view,
        };

        if let Some(default_view) = &router.default_view {
            router.resolve(default_view)?;
        }

        let (location, _) = router.resolve(&opts.route)?;
        router.stack.push(opts.route);
        router.active = location;
        Ok(router)
    }

    /// Initialize the active page and announce the initial parameters
    pub fn init(&mut self) -> Result<Cmd, RouteError> {
        let params = self.current_params()?;
        let init = self.active_mut()?.init();
        Ok(init.and(Cmd::emit(Msg::RouterParams(params))))
    }

    pub fn update(&mut self, msg: &Msg) -> Result<Cmd, RouteError> {
        // The quit key shortcuts everything, whatever page is active
        if self.is_quit(msg) {
            info!("quit key pressed");
            return Ok(Cmd::quit());
        }

        if let Msg::Navigate(request) = msg {
            return self.navigate(request);
        }

        Ok(self.active_mut()?.update(msg))
    }

    /// Active page followed by a breadcrumb of the stack
    pub fn view(&self) -> Text<'static> {
        let mut text = match node_at(&self.routes, &self.active) {
            Some(node) => node.model.view(),
            None => Text::default(),
        };

        let trail = self
            .stack
            .iter()
            .map(|route| path_of(route))
            .collect::<Vec<_>>()
            .join("/");
        text.extend([
            Line::default(),
            Line::from(Span::styled(
                format!("Path: {}", trail),
                Style::default().fg(Color::Rgb(0x61, 0x61, 0x61)),
            )),
        ]);
        text
    }

    /// Entered routes, oldest first
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// Full route string on top of the stack
    pub fn current_route(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    /// Tree path of the active view
    pub fn active_path(&self) -> Option<&str> {
        node_at(&self.routes, &self.active).map(|node| node.path())
    }

    /// Parsed query parameters of the current route
    pub fn current_params(&self) -> Result<Params, RouteError> {
        let top = self.stack.last().ok_or(RouteError::EmptyStack)?;
        Ok(Route::parse(top)?.into_params())
    }

    fn is_quit(&self, msg: &Msg) -> bool {
        matches!(msg, Msg::Key(key) if key_string(key) == self.quit_key)
    }

    fn navigate(&mut self, request: &NavRequest) -> Result<Cmd, RouteError> {
        match request {
            NavRequest::Push(route) => self.push(route),
            NavRequest::Replace(route) => self.replace(route),
            NavRequest::Pop => self.pop(),
            NavRequest::SetParam { key, value } => self.set_param(key, value),
        }
    }

    fn push(&mut self, route: &str) -> Result<Cmd, RouteError> {
        let (location, parsed) = self.resolve(route)?;

        // Same path and params as the top, however the query was encoded
        if let Some(top) = self.current_route() {
            if Route::parse(top)? == parsed {
                debug!(route, "push ignored, already on top");
                return Ok(Cmd::none());
            }
        }

        self.stack.push(route.to_string());
        debug!(route, depth = self.stack.len(), "push");
        self.activate(location, parsed.into_params())
    }

    fn replace(&mut self, route: &str) -> Result<Cmd, RouteError> {
        let (location, parsed) = self.resolve(route)?;
        match self.stack.last_mut() {
            Some(top) => *top = route.to_string(),
            None => self.stack.push(route.to_string()),
        }
        debug!(route, depth = self.stack.len(), "replace");
        self.activate(location, parsed.into_params())
    }

    fn pop(&mut self) -> Result<Cmd, RouteError> {
        if self.stack.len() >= 2 {
            self.stack.pop();
            let top = self.stack.last().cloned().ok_or(RouteError::EmptyStack)?;
            let (location, parsed) = self.resolve(&top)?;
            debug!(route = %top, depth = self.stack.len(), "pop");
            return self.activate(location, parsed.into_params());
        }

        match self.default_view.clone() {
            Some(default_view) => {
                let (location, parsed) = self.resolve(&default_view)?;
                debug!(route = %default_view, "pop at root, resetting to default view");
                self.stack = vec![default_view];
                self.activate(location, parsed.into_params())
            }
            None => {
                debug!("pop at root ignored, no default view");
                Ok(Cmd::none())
            }
        }
    }

    fn set_param(&mut self, key: &str, value: &str) -> Result<Cmd, RouteError> {
        let top = self.stack.last_mut().ok_or(RouteError::EmptyStack)?;
        let mut route = Route::parse(top)?;
        route.params_mut().set(key, value);
        *top = route.to_string();
        debug!(route = %top, "param set");

        Ok(Cmd::emit(Msg::ParamChanged {
            key: key.to_string(),
            value: value.to_string(),
        }))
    }

    fn resolve(&self, route: &str) -> Result<(Location, Route), RouteError> {
        let parsed = Route::parse(route)?;
        let location =
            locate(&self.routes, parsed.path()).ok_or_else(|| RouteError::UnknownRoute {
                route: route.to_string(),
            })?;
        Ok((location, parsed))
    }

    /// Make `location` active, re-initialize it, then announce its parameters
    fn activate(&mut self, location: Location, params: Params) -> Result<Cmd, RouteError> {
        self.active = location;
        let init = self.active_mut()?.init();
        Ok(init.and(Cmd::emit(Msg::RouterParams(params))))
    }

    fn active_mut(&mut self) -> Result<&mut dyn Page, RouteError> {
        let route = self.stack.last().cloned().unwrap_or_default();
        match node_at_mut(&mut self.routes, &self.active) {
            Some(node) => Ok(node.model.as_mut()),
            None => Err(RouteError::UnknownRoute { route }),
        }
    }
}
