//! Configuration tests

use super::*;
use std::collections::HashMap;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that the serialized default config parses back to the same values
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
    assert_eq!(Config::from_parts(parsed.unwrap(), env(&[])), config);
}

#[test]
fn test_config_roundtrip_with_overrides() {
    let mut config = Config::default();
    config.start_route = "tags?tag=rust".to_string();
    config.default_view = None;
    config.keys.quit = "q".to_string();
    config.keys.back = "shift+tab".to_string();
    config.colors.primary = Some("#112233".to_string());
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let toml_str = config.to_toml();
    let parsed: FileConfig = toml::from_str(&toml_str).unwrap();
    assert_eq!(Config::from_parts(parsed, env(&[])), config);
}

/// Unset colors are written as comments, so they stay unset
#[test]
fn test_unset_colors_are_commented_out() {
    let toml_str = Config::default().to_toml();
    assert!(toml_str.contains("# primary = \"#78A7D8\""));

    let parsed: FileConfig = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed.colors.unwrap_or_default(), Colors::default());
}

#[test]
fn test_template_documents_color_formats() {
    let toml_str = Config::default().to_toml();
    assert!(toml_str.contains(r##"hex ("#RRGGBB")"##));
    assert!(toml_str.contains("[colors]
"));
    assert!(toml_str.ends_with("file_prefix = \"boba\"\n"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
start_route = "profile"
default_view = "settings"

[logging]
level = "warn"
"#,
    )
    .unwrap();

    let config = Config::from_parts(
        file,
        env(&[("BOBA_ROUTE", "logs"), ("BOBA_LOG", "boba=trace")]),
    );
    assert_eq!(config.start_route, "logs");
    assert_eq!(config.default_view.as_deref(), Some("settings"));
    assert_eq!(config.logging.level, "boba=trace");
}

#[test]
fn test_empty_default_view_disables_fallback() {
    let config = Config::from_parts(FileConfig::default(), env(&[("BOBA_DEFAULT_VIEW", "")]));
    assert_eq!(config.default_view, None);
    assert_eq!(config.start_route, "home");
}

#[test]
fn test_partial_keys_table_keeps_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
[keys]
quit = "q"
"#,
    )
    .unwrap();
    let config = Config::from_parts(file, env(&[]));
    assert_eq!(config.keys.quit, "q");
    assert_eq!(config.keys.back, "esc");
    assert_eq!(config.keys.toggle, " ");
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    let file: FileConfig = toml::from_str(
        r#"
[logging]
file_rotation = "weekly"
"#,
    )
    .unwrap();
    let config = Config::from_parts(file, env(&[]));
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/boba/config.toml"));
    }
}
