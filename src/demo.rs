// Demo application: a handful of pages wired into one route tree
//
//   home            menu selector, pushes the other pages
//   profile         form with two text inputs and a toggle (?name=&email= prefill)
//   tags            multi-selector loaded after a delay, mirrored into ?tag=
//   settings        effective configuration plus a section selector
//     settings/keys key bindings
//   logs            recent entries from the in-memory log buffer
//
// Run with: cargo run -- --route "tags?tag=rust"

use crate::component::{Component, Direction, Value};
use crate::config::Config;
use crate::form::Form;
use crate::keys::{key_string, Action, KeyMap};
use crate::logging::{LogBuffer, LogLevel};
use crate::msg::{Cmd, Msg};
use crate::router::{self, Page, RouteNode};
use crate::theme::{ColorType, Theme};
use crate::widgets::{
    FilterOptions, Help, MultiSelector, MultiSelectorConfig, MultiSelectorOption, Selector,
    SelectorConfig, SelectorOption, TextInput, TextInputConfig, Toggle, ToggleConfig,
};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};
use std::time::Duration;
use tracing::{info, warn};
use unicode_width::UnicodeWidthStr;

const MENU_ID: &str = "menu";
const SECTION_ID: &str = "section";
const TAGS_ID: &str = "tags";
const TAG_PARAM: &str = "tag";

/// Simulated fetch time for the tag catalog
const LOAD_DELAY: Duration = Duration::from_millis(400);

/// Log lines shown on the logs page
const LOG_LINES: usize = 20;

/// Tag catalog, served as if it came from a remote API
const CATALOG: &str = r#"[
    { "label": "Rust", "value": "rust" },
    { "label": "Go", "value": "go" },
    { "label": "Zig", "value": "zig" },
    { "label": "COBOL", "value": "cobol", "disabled": true }
]"#;

/// Build the demo route tree
pub fn routes(config: &Config, theme: &Theme, logs: LogBuffer) -> Vec<RouteNode> {
    vec![
        RouteNode::new("home", MenuPage::new(config, theme)),
        RouteNode::new("profile", ProfilePage::new(config, theme)),
        RouteNode::new("tags", TagsPage::new(config, theme)),
        RouteNode::new("settings", SettingsPage::new(config, theme))
            .child(RouteNode::new("settings/keys", KeysPage::new(config, theme))),
        RouteNode::new("logs", LogsPage::new(config, theme, logs)),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared page chrome
// ─────────────────────────────────────────────────────────────────────────────

/// Title, form and help footer shared by every page
///
/// Leaving a page: a retreat past the first field pops, and so does the back
/// key once nothing is focused.
struct Screen {
    title: &'static str,
    form: Form,
    help: Help,
    back_key: String,
    theme: Theme,
}

impl Screen {
    fn new(
        title: &'static str,
        components: Vec<Box<dyn Component>>,
        config: &Config,
        theme: &Theme,
        actions: &[Action],
    ) -> Self {
        Self {
            title,
            form: Form::new(components),
            help: Help::new(&config.keys, actions, theme.clone()),
            back_key: config.keys.back.clone(),
            theme: theme.clone(),
        }
    }

    fn init(&mut self) -> Cmd {
        self.form.init()
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        if !self.form.typing() {
            self.help.update(msg);
        }

        match msg {
            Msg::Focus(signal)
                if signal.direction == Direction::Retreat
                    && self.form.first_id() == Some(signal.source.as_str()) =>
            {
                self.form.update(msg).and(router::pop())
            }
            Msg::Key(key)
                if self.form.focused_id().is_none() && key_string(key) == self.back_key =>
            {
                router::pop()
            }
            _ => self.form.update(msg),
        }
    }

    /// Title, then `body`, then the form, then help
    fn view(&self, body: Text<'static>) -> Text<'static> {
        let mut text = Text::from(vec![
            Line::from(Span::styled(
                self.title,
                self.theme
                    .style(ColorType::Primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ]);
        text.extend(body);
        text.extend(self.form.view());
        text.extend(self.help.view());
        text
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pages
// ─────────────────────────────────────────────────────────────────────────────

struct MenuPage {
    screen: Screen,
}

impl MenuPage {
    fn new(config: &Config, theme: &Theme) -> Self {
        let menu = Selector::new(SelectorConfig {
            id: MENU_ID.to_string(),
            options: vec![
                SelectorOption::new("Profile", "profile"),
                SelectorOption::new("Tags", "tags?tag=rust"),
                SelectorOption::new("Settings", "settings"),
                SelectorOption::new("Logs", "logs"),
            ],
            filter: FilterOptions {
                placeholder: "Filter pages".to_string(),
                hidden: false,
            },
            keys: config.keys.clone(),
            theme: theme.clone(),
            ..Default::default()
        });

        Self {
            screen: Screen::new(
                "boba",
                vec![Box::new(menu)],
                config,
                theme,
                &[Action::Up, Action::Down, Action::Select, Action::Filter, Action::Quit, Action::Help],
            ),
        }
    }
}

impl Page for MenuPage {
    fn init(&mut self) -> Cmd {
        self.screen.init()
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Selected { id, option } if id == MENU_ID => router::push(option.value.clone()),
            _ => self.screen.update(msg),
        }
    }

    fn view(&self) -> Text<'static> {
        self.screen.view(Text::default())
    }
}

struct ProfilePage {
    screen: Screen,
}

impl ProfilePage {
    fn new(config: &Config, theme: &Theme) -> Self {
        let name = TextInput::new(TextInputConfig {
            id: "name".to_string(),
            placeholder: "Your name".to_string(),
            no_up: true,
            keys: config.keys.clone(),
            theme: theme.clone(),
            ..Default::default()
        });
        let email = TextInput::new(TextInputConfig {
            id: "email".to_string(),
            placeholder: "you@example.com".to_string(),
            keys: config.keys.clone(),
            theme: theme.clone(),
            ..Default::default()
        });
        let newsletter = Toggle::new(ToggleConfig {
            id: "newsletter".to_string(),
            label: "Newsletter".to_string(),
            no_down: true,
            keys: config.keys.clone(),
            theme: theme.clone(),
            ..Default::default()
        });

        Self {
            screen: Screen::new(
                "Profile",
                vec![Box::new(name), Box::new(email), Box::new(newsletter)],
                config,
                theme,
                &[Action::Up, Action::Down, Action::Toggle, Action::Back, Action::Quit, Action::Help],
            ),
        }
    }
}

impl Page for ProfilePage {
    fn init(&mut self) -> Cmd {
        self.screen.init()
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::RouterParams(params) => Cmd::batch(["name", "email"].into_iter().filter_map(|id| {
                params.get(id).map(|value| {
                    Cmd::emit(Msg::SetText {
                        id: id.to_string(),
                        value: value.to_string(),
                    })
                })
            })),
            Msg::ToggleChanged { id, on } => {
                info!(toggle = %id, on, "profile preference changed");
                Cmd::none()
            }
            _ => self.screen.update(msg),
        }
    }

    fn view(&self) -> Text<'static> {
        self.screen.view(Text::default())
    }
}

/// Multi-selector whose selection lives in the `tag` query parameter
///
/// The catalog "loads" on every entry. Once it arrives, options named by the
/// route's tags start out selected; every toggle writes the selection back.
struct TagsPage {
    screen: Screen,
    wanted: Vec<String>,
}

impl TagsPage {
    fn new(config: &Config, theme: &Theme) -> Self {
        let tags = MultiSelector::new(MultiSelectorConfig {
            id: TAGS_ID.to_string(),
            filter: FilterOptions {
                placeholder: "Filter tags".to_string(),
                hidden: false,
            },
            keys: config.keys.clone(),
            theme: theme.clone(),
            ..Default::default()
        });

        Self {
            screen: Screen::new(
                "Tags",
                vec![Box::new(tags)],
                config,
                theme,
                &[Action::Up, Action::Down, Action::Toggle, Action::Filter, Action::Back, Action::Quit, Action::Help],
            ),
            wanted: Vec::new(),
        }
    }

    fn set_wanted(&mut self, raw: &[&str]) {
        self.wanted = raw
            .iter()
            .flat_map(|v| v.split(','))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Catalog with the wanted tags pre-selected
    fn options(&self) -> Result<Vec<MultiSelectorOption>, serde_json::Error> {
        let mut options: Vec<MultiSelectorOption> = serde_json::from_str(CATALOG)?;
        for option in options.iter_mut() {
            option.selected = self.wanted.contains(&option.value);
        }
        Ok(options)
    }

    fn selected_tags(&self) -> String {
        match self.screen.form.get(TAGS_ID).map(|c| c.value()) {
            Some(Value::Selections(options)) => options
                .iter()
                .map(|o| o.value.as_str())
                .collect::<Vec<_>>()
                .join(","),
            _ => String::new(),
        }
    }
}

impl Page for TagsPage {
    fn init(&mut self) -> Cmd {
        self.screen
            .init()
            .and(Cmd::emit(Msg::Loading {
                id: TAGS_ID.to_string(),
            }))
            .and(Cmd::after(LOAD_DELAY, Msg::Success(TAGS_ID.to_string())))
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::RouterParams(params) => {
                self.set_wanted(&params.get_all(TAG_PARAM));
                Cmd::none()
            }
            Msg::ParamChanged { key, value } if key == TAG_PARAM => {
                self.set_wanted(&[value.as_str()]);
                Cmd::none()
            }
            Msg::Success(id) if id == TAGS_ID => {
                let cmd = self.screen.update(msg);
                match self.options() {
                    Ok(options) => cmd.and(Cmd::emit(Msg::MultiSelectorOptions {
                        id: TAGS_ID.to_string(),
                        options,
                    })),
                    Err(e) => {
                        warn!(error = %e, "tag catalog is not valid JSON");
                        cmd.and(Cmd::emit(Msg::Failure(TAGS_ID.to_string())))
                    }
                }
            }
            Msg::MultiToggled { id, .. } if id == TAGS_ID => {
                router::set_param(TAG_PARAM, self.selected_tags())
            }
            _ => self.screen.update(msg),
        }
    }

    fn view(&self) -> Text<'static> {
        self.screen.view(Text::default())
    }
}

struct SettingsPage {
    screen: Screen,
    summary: Vec<(&'static str, String)>,
}

impl SettingsPage {
    fn new(config: &Config, theme: &Theme) -> Self {
        let section = Selector::new(SelectorConfig {
            id: SECTION_ID.to_string(),
            options: vec![
                SelectorOption::new("Key bindings", "settings/keys"),
                SelectorOption::new("Logs", "logs"),
            ],
            filter: FilterOptions {
                hidden: true,
                ..Default::default()
            },
            keys: config.keys.clone(),
            theme: theme.clone(),
            ..Default::default()
        });

        let config_file = Config::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());
        let summary = vec![
            ("start route", config.start_route.clone()),
            (
                "default view",
                config.default_view.clone().unwrap_or_else(|| "(none)".to_string()),
            ),
            ("log level", config.logging.level.clone()),
            ("config file", config_file),
        ];

        Self {
            screen: Screen::new(
                "Settings",
                vec![Box::new(section)],
                config,
                theme,
                &[Action::Up, Action::Down, Action::Select, Action::Back, Action::Quit, Action::Help],
            ),
            summary,
        }
    }
}

impl Page for SettingsPage {
    fn init(&mut self) -> Cmd {
        self.screen.init()
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Selected { id, option } if id == SECTION_ID => router::push(option.value.clone()),
            _ => self.screen.update(msg),
        }
    }

    fn view(&self) -> Text<'static> {
        let theme = &self.screen.theme;
        let mut lines: Vec<Line<'static>> = self
            .summary
            .iter()
            .map(|(name, value)| {
                Line::from(vec![
                    theme.color(format!("{:<14}", name), ColorType::Neutral),
                    Span::raw(value.clone()),
                ])
            })
            .collect();
        lines.push(Line::default());
        self.screen.view(Text::from(lines))
    }
}

struct KeysPage {
    screen: Screen,
    bindings: KeyMap,
}

impl KeysPage {
    fn new(config: &Config, theme: &Theme) -> Self {
        Self {
            screen: Screen::new(
                "Key bindings",
                Vec::new(),
                config,
                theme,
                &[Action::Back, Action::Quit],
            ),
            bindings: KeyMap::new(&config.keys, &Action::ALL),
        }
    }
}

impl Page for KeysPage {
    fn init(&mut self) -> Cmd {
        self.screen.init()
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        self.screen.update(msg)
    }

    fn view(&self) -> Text<'static> {
        let theme = &self.screen.theme;
        let bindings = self.bindings.full_help();
        let width = bindings
            .iter()
            .map(|b| b.action.description().width())
            .max()
            .unwrap_or(0);
        let lines: Vec<Line<'static>> = bindings
            .into_iter()
            .map(|binding| {
                let description = binding.action.description();
                Line::from(vec![
                    Span::raw(format!(
                        "{}{}  ",
                        description,
                        " ".repeat(width - description.width())
                    )),
                    theme.color(binding.label(), ColorType::Secondary),
                ])
            })
            .collect();
        self.screen.view(Text::from(lines))
    }
}

struct LogsPage {
    screen: Screen,
    buffer: LogBuffer,
}

impl LogsPage {
    fn new(config: &Config, theme: &Theme, buffer: LogBuffer) -> Self {
        Self {
            screen: Screen::new("Logs", Vec::new(), config, theme, &[Action::Back, Action::Quit]),
            buffer,
        }
    }
}

impl Page for LogsPage {
    fn init(&mut self) -> Cmd {
        self.screen.init()
    }

    fn update(&mut self, msg: &Msg) -> Cmd {
        self.screen.update(msg)
    }

    fn view(&self) -> Text<'static> {
        let theme = &self.screen.theme;
        let entries = self.buffer.recent(LOG_LINES);
        if entries.is_empty() {
            return self
                .screen
                .view(Text::from(theme.color("No log entries yet", ColorType::Neutral)));
        }

        let lines: Vec<Line<'static>> = entries
            .into_iter()
            .map(|entry| {
                let level = match entry.level {
                    LogLevel::Error => ColorType::Danger,
                    LogLevel::Warn => ColorType::Secondary,
                    LogLevel::Info => ColorType::Success,
                    LogLevel::Debug | LogLevel::Trace => ColorType::Neutral,
                };
                Line::from(vec![
                    theme.color(entry.timestamp.format("%H:%M:%S ").to_string(), ColorType::Neutral),
                    theme.color(format!("{:<5} ", entry.level.as_str()), level),
                    Span::raw(entry.message),
                ])
            })
            .collect();
        self.screen.view(Text::from(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::plain;
    use crate::logging::LogEntry;
    use crate::program::Program;
    use crate::router::{Router, RouterOptions};
    use crate::widgets::SPINNER_INTERVAL;
    use chrono::Utc;
    use crossterm::event::KeyCode;
    use std::time::Instant;

    fn program_with_logs(route: &str, logs: LogBuffer) -> Program {
        let config = Config::default();
        let router = Router::new(RouterOptions {
            route: route.to_string(),
            routes: routes(&config, &Theme::default(), logs),
            quit: config.keys.quit.clone(),
            default_view: config.default_view.clone(),
        })
        .unwrap();
        let mut program = Program::new(router);
        program.start().unwrap();
        program.run_until_idle().unwrap();
        program
    }

    fn program(route: &str) -> Program {
        program_with_logs(route, LogBuffer::new())
    }

    fn press(program: &mut Program, code: KeyCode) {
        program.send(Msg::key(code));
        program.run_until_idle().unwrap();
    }

    fn finish_loading(program: &mut Program) {
        program.due_timers(Instant::now() + Duration::from_secs(1));
        program.run_until_idle().unwrap();
    }

    fn screen(program: &Program) -> String {
        plain(&program.view())
    }

    #[test]
    fn test_catalog_parses() {
        let options: Vec<MultiSelectorOption> = serde_json::from_str(CATALOG).unwrap();
        assert_eq!(options.len(), 4);
        assert!(options[3].disabled);
    }

    #[test]
    fn test_menu_pushes_selected_page() {
        let mut p = program("home");
        press(&mut p, KeyCode::Down);
        press(&mut p, KeyCode::Enter);
        assert_eq!(p.router().stack(), ["home", "tags?tag=rust"]);
    }

    #[test]
    fn test_back_from_list_pops() {
        let mut p = program("home");
        p.send(Msg::Navigate(router::NavRequest::Push("settings".to_string())));
        p.run_until_idle().unwrap();
        assert_eq!(p.router().active_path(), Some("settings"));

        press(&mut p, KeyCode::Esc);
        assert_eq!(p.router().stack(), ["home"]);
    }

    #[test]
    fn test_settings_opens_nested_keys_page() {
        let mut p = program("settings");
        press(&mut p, KeyCode::Enter);
        assert_eq!(p.router().active_path(), Some("settings/keys"));
        let view = screen(&p);
        assert!(view.contains("ctrl+c"));
        assert!(view.contains("space"));
        assert!(view.contains("Path: settings/settings/keys"));

        // nothing is focused on the keys page, so back pops straight away
        press(&mut p, KeyCode::Esc);
        assert_eq!(p.router().active_path(), Some("settings"));
    }

    #[test]
    fn test_profile_prefills_from_params() {
        let p = program("profile?name=Ada&email=ada%40lovelace.dev");
        let view = screen(&p);
        assert!(view.contains("Ada"));
        assert!(view.contains("ada@lovelace.dev"));
    }

    #[test]
    fn test_profile_back_blurs_then_pops() {
        let mut p = program("home");
        p.send(Msg::Navigate(router::NavRequest::Push("profile".to_string())));
        p.run_until_idle().unwrap();

        press(&mut p, KeyCode::Esc);
        assert_eq!(p.router().stack(), ["home", "profile"]);

        press(&mut p, KeyCode::Esc);
        assert_eq!(p.router().stack(), ["home"]);
    }

    #[test]
    fn test_help_key_is_text_while_typing() {
        let mut p = program("profile");
        press(&mut p, KeyCode::Char('?'));
        let view = screen(&p);
        assert!(view.contains("> ?"));
        assert!(!view.contains("toggle"));

        // once the field is blurred the same key opens the full help
        press(&mut p, KeyCode::Esc);
        press(&mut p, KeyCode::Char('?'));
        assert!(screen(&p).contains("toggle"));
    }

    #[test]
    fn test_tags_spinner_restarts_after_abandoned_load() {
        let mut p = program("home");
        p.send(Msg::Navigate(router::NavRequest::Push("tags".to_string())));
        p.run_until_idle().unwrap();

        // leave while loading; the pending result lands on the menu instead
        p.send(Msg::Navigate(router::NavRequest::Pop));
        p.run_until_idle().unwrap();
        finish_loading(&mut p);
        assert_eq!(p.router().stack(), ["home"]);

        p.send(Msg::Navigate(router::NavRequest::Push("tags?tag=go".to_string())));
        p.run_until_idle().unwrap();
        assert!(p.due_timers(Instant::now() + SPINNER_INTERVAL * 2) > 0);
        p.run_until_idle().unwrap();

        finish_loading(&mut p);
        assert!(screen(&p).contains("[x] Go"));
    }

    #[test]
    fn test_tags_load_with_route_selection() {
        let mut p = program("tags?tag=go");
        assert!(!screen(&p).contains("[x] Go"));

        finish_loading(&mut p);
        let view = screen(&p);
        assert!(view.contains("[x] Go"));
        assert!(view.contains("[ ] Rust"));
    }

    #[test]
    fn test_tag_toggle_writes_query() {
        let mut p = program("tags?tag=go");
        finish_loading(&mut p);

        // cursor starts on Rust
        press(&mut p, KeyCode::Char(' '));
        let params = p.router().current_params().unwrap();
        assert_eq!(params.get("tag"), Some("rust,go"));
        assert_eq!(p.router().stack().len(), 1);
    }

    #[test]
    fn test_logs_page_lists_entries() {
        let logs = LogBuffer::new();
        logs.add(LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Warn,
            target: "boba".to_string(),
            message: "disk nearly full".to_string(),
        });
        let p = program_with_logs("logs", logs);
        let view = screen(&p);
        assert!(view.contains("WARN"));
        assert!(view.contains("disk nearly full"));
    }

    #[test]
    fn test_empty_logs_page() {
        let p = program("logs");
        assert!(screen(&p).contains("No log entries yet"));
    }
}
