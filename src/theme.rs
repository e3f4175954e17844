// Theme support for components
//
// A theme maps a small set of semantic color roles to ratatui styles.
// Defaults can be overridden per role from the `[colors]` config table.

use ratatui::style::{Color, Style};
use ratatui::text::Span;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Semantic color roles used by the widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorType {
    Primary,
    Secondary,
    Neutral,
    Success,
    Danger,
}

impl ColorType {
    pub const ALL: [ColorType; 5] = [
        ColorType::Primary,
        ColorType::Secondary,
        ColorType::Neutral,
        ColorType::Success,
        ColorType::Danger,
    ];

    /// Built-in hex color for this role
    pub fn default_hex(self) -> &'static str {
        match self {
            ColorType::Primary => "#78A7D8",
            ColorType::Secondary => "#FFA066",
            ColorType::Neutral => "#979797",
            ColorType::Success => "#98BB6C",
            ColorType::Danger => "#FF5E62",
        }
    }
}

/// Color overrides as loaded from config (any subset may be set)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub neutral: Option<String>,
    pub success: Option<String>,
    pub danger: Option<String>,
}

impl Colors {
    /// Override for a role, if one is set
    pub fn get(&self, ct: ColorType) -> Option<&str> {
        match ct {
            ColorType::Primary => self.primary.as_deref(),
            ColorType::Secondary => self.secondary.as_deref(),
            ColorType::Neutral => self.neutral.as_deref(),
            ColorType::Success => self.success.as_deref(),
            ColorType::Danger => self.danger.as_deref(),
        }
    }
}

/// A color string in the config that ratatui could not parse
#[derive(Debug, thiserror::Error)]
#[error("invalid color {value:?} for {role:?} (expected a name or #RRGGBB)")]
pub struct InvalidColor {
    pub role: ColorType,
    pub value: String,
}

/// Styles for every color role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    primary: Style,
    secondary: Style,
    neutral: Style,
    success: Style,
    danger: Style,
}

impl Default for Theme {
    fn default() -> Self {
        // Built-in hex values always parse
        Self::new(&Colors::default()).unwrap_or(Self {
            primary: Style::default().fg(Color::Blue),
            secondary: Style::default().fg(Color::Yellow),
            neutral: Style::default().fg(Color::Gray),
            success: Style::default().fg(Color::Green),
            danger: Style::default().fg(Color::Red),
        })
    }
}

impl Theme {
    /// Build a theme from defaults plus overrides
    pub fn new(overrides: &Colors) -> Result<Self, InvalidColor> {
        let style = |role: ColorType| -> Result<Style, InvalidColor> {
            let value = overrides.get(role).unwrap_or(role.default_hex());
            Color::from_str(value)
                .map(|c| Style::default().fg(c))
                .map_err(|_| InvalidColor {
                    role,
                    value: value.to_string(),
                })
        };

        Ok(Self {
            primary: style(ColorType::Primary)?,
            secondary: style(ColorType::Secondary)?,
            neutral: style(ColorType::Neutral)?,
            success: style(ColorType::Success)?,
            danger: style(ColorType::Danger)?,
        })
    }

    pub fn style(&self, ct: ColorType) -> Style {
        match ct {
            ColorType::Primary => self.primary,
            ColorType::Secondary => self.secondary,
            ColorType::Neutral => self.neutral,
            ColorType::Success => self.success,
            ColorType::Danger => self.danger,
        }
    }

    /// Apply the role's color to the text
    pub fn color(&self, text: impl Into<String>, ct: ColorType) -> Span<'static> {
        Span::styled(text.into(), self.style(ct))
    }

    /// Apply the role's color only when `condition` holds
    pub fn color_if(&self, text: impl Into<String>, ct: ColorType, condition: bool) -> Span<'static> {
        if condition {
            self.color(text, ct)
        } else {
            Span::raw(text.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let theme = Theme::new(&Colors::default()).unwrap();
        assert_eq!(
            theme.style(ColorType::Primary).fg,
            Some(Color::Rgb(0x78, 0xA7, 0xD8))
        );
    }

    #[test]
    fn test_override_and_invalid() {
        let colors = Colors {
            danger: Some("red".to_string()),
            ..Default::default()
        };
        let theme = Theme::new(&colors).unwrap();
        assert_eq!(theme.style(ColorType::Danger).fg, Some(Color::Red));

        let bad = Colors {
            neutral: Some("#zzzzzz".to_string()),
            ..Default::default()
        };
        let err = Theme::new(&bad).unwrap_err();
        assert_eq!(err.role, ColorType::Neutral);
    }

    #[test]
    fn test_color_if() {
        let theme = Theme::default();
        assert_eq!(theme.color_if(">", ColorType::Primary, false).style, Style::default());
        assert_eq!(
            theme.color_if(">", ColorType::Primary, true).style,
            theme.style(ColorType::Primary)
        );
    }
}
