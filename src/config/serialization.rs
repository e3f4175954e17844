//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use crate::theme::ColorType;

impl Config {
    /// Serialize the [colors] table; unset roles are written as comments
    /// showing the built-in value
    pub(super) fn colors_to_toml(&self) -> String {
        let mut output = String::new();
        for role in ColorType::ALL {
            let name = format!("{:?}", role).to_lowercase();
            match self.colors.get(role) {
                Some(value) => output.push_str(&format!("{} = {:?}\n", name, value)),
                None => output.push_str(&format!("# {} = {:?}\n", name, role.default_hex())),
            }
        }
        output
    }

    /// Serialize config to TOML with explanatory comments
    pub fn to_toml(&self) -> String {
        let default_view = match &self.default_view {
            Some(view) => format!("default_view = {:?}", view),
            None => "default_view = \"\"".to_string(),
        };
        let keys = &self.keys;
        let log = &self.logging;

        format!(
            r##"# boba configuration

# Route shown at startup (path plus optional ?key=value query)
start_route = {start_route:?}

# Where "back" lands once there is nothing left to pop ("" to disable)
{default_view}

# Key bindings, matched exactly against key names such as
# "up", "enter", "esc", "ctrl+c", "shift+tab", "f1" or a single character
[keys]
up = {up:?}
down = {down:?}
select = {select:?}
toggle = {toggle:?}
back = {back:?}
quit = {quit:?}
filter = {filter:?}
help = {help:?}

# Colors: names ("red", "lightblue") or hex ("#RRGGBB")
[colors]
{colors}
# Logging configuration (RUST_LOG and BOBA_LOG env vars override)
[logging]
level = {log_level:?}
# JSON file logging (the in-app log view always receives events)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}
"##,
            start_route = self.start_route,
            default_view = default_view,
            up = keys.up,
            down = keys.down,
            select = keys.select,
            toggle = keys.toggle,
            back = keys.back,
            quit = keys.quit,
            filter = keys.filter,
            help = keys.help,
            colors = self.colors_to_toml(),
            log_level = log.level,
            log_file_enabled = log.file_enabled,
            log_file_dir = log.file_dir.display().to_string(),
            log_file_rotation = log.file_rotation.as_str(),
            log_file_prefix = log.file_prefix,
        )
    }
}
