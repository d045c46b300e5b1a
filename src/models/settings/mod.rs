// Settings module
// View configuration shared by the layout engine and the binary

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::ui::ViewType;

/// Which weekday a rendered week begins on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "WeekStartRepr")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Build from the `sundayStartWeek` flag used by calendar props.
    pub fn from_sunday_start(sunday_start_week: bool) -> Self {
        if sunday_start_week {
            WeekStart::Sunday
        } else {
            WeekStart::Monday
        }
    }

    /// 0 = Sunday, 1 = Monday.
    pub fn first_day_of_week(self) -> u8 {
        match self {
            WeekStart::Sunday => 0,
            WeekStart::Monday => 1,
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeekStartRepr {
    Flag(bool),
    Name(String),
}

impl TryFrom<WeekStartRepr> for WeekStart {
    type Error = String;

    fn try_from(repr: WeekStartRepr) -> Result<Self, Self::Error> {
        match repr {
            WeekStartRepr::Flag(sunday) => Ok(WeekStart::from_sunday_start(sunday)),
            WeekStartRepr::Name(name) => match name.to_ascii_lowercase().as_str() {
                "sunday" | "sun" => Ok(WeekStart::Sunday),
                "monday" | "mon" => Ok(WeekStart::Monday),
                other => Err(format!("Week must start on sunday or monday, got {other:?}")),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timezone: Tz,
    #[serde(alias = "sunday_start_week")]
    pub week_start: WeekStart,
    pub default_view: ViewType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            week_start: WeekStart::Sunday,
            default_view: ViewType::Week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.timezone, Tz::UTC);
        assert_eq!(settings.week_start, WeekStart::Sunday);
        assert_eq!(settings.default_view, ViewType::Week);
    }

    #[test]
    fn test_parse_full_settings() {
        let settings: Settings = toml::from_str(
            r#"
            timezone = "Europe/Berlin"
            week_start = "monday"
            default_view = "day"
            "#,
        )
        .unwrap();

        assert_eq!(settings.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(settings.week_start, WeekStart::Monday);
        assert_eq!(settings.default_view, ViewType::Day);
    }

    #[test]
    fn test_parse_sunday_start_flag() {
        let settings: Settings = toml::from_str("sunday_start_week = false").unwrap();
        assert_eq!(settings.week_start, WeekStart::Monday);
        assert_eq!(settings.timezone, Tz::UTC);
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let result: Result<Settings, _> = toml::from_str(r#"timezone = "Mars/Olympus""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_week_start_is_rejected() {
        let result: Result<Settings, _> = toml::from_str(r#"week_start = "friday""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_week_start_serializes_lowercase() {
        let text = toml::to_string(&Settings::default()).unwrap();
        assert!(text.contains(r#"week_start = "sunday""#));
        assert!(text.contains(r#"timezone = "UTC""#));
    }
}
