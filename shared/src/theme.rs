//! UI theme vocabulary
//!
//! Themes travel as Portuguese tokens (`escuro`, `claro`, `matrix`), both to
//! the backend and into the durable preference store. Anything outside this
//! set is treated as absent and replaced with [`Theme::DEFAULT`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of the class marker placed on the document root
pub const MARKER_PREFIX: &str = "tema-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "escuro")]
    Dark,
    #[serde(rename = "claro")]
    Light,
    #[serde(rename = "matrix")]
    Matrix,
}

/// Colors used when a view cannot rely on the stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme token: {0:?}")]
pub struct ThemeParseError(pub String);

impl Theme {
    pub const DEFAULT: Theme = Theme::Dark;
    pub const ALL: [Theme; 3] = [Theme::Dark, Theme::Light, Theme::Matrix];

    /// Wire/storage token
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "escuro",
            Theme::Light => "claro",
            Theme::Matrix => "matrix",
        }
    }

    /// Class marker for the document root, e.g. `tema-escuro`
    pub fn marker_class(&self) -> &'static str {
        match self {
            Theme::Dark => "tema-escuro",
            Theme::Light => "tema-claro",
            Theme::Matrix => "tema-matrix",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: "#000",
                text: "#fff",
                accent: "#0ff",
            },
            Theme::Light => Palette {
                background: "#f5f5f5",
                text: "#222",
                accent: "#00aaff",
            },
            Theme::Matrix => Palette {
                background: "#0a0f0a",
                text: "#0f0",
                accent: "#0f0",
            },
        }
    }

    /// Parse a token exactly, substituting the default for anything
    /// absent or unknown. Callers decide whether surrounding whitespace is
    /// acceptable.
    pub fn from_token_or_default(token: Option<&str>) -> Theme {
        token
            .and_then(|t| t.parse().ok())
            .unwrap_or(Theme::DEFAULT)
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ThemeParseError(s.to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification broadcast after a theme has been applied.
///
/// Serializes as `{"tema": "<token>"}` so non-Rust views can consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChanged {
    pub tema: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_parse() {
        assert_eq!("escuro".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("claro".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!("matrix".parse::<Theme>().unwrap(), Theme::Matrix);
        assert!("dark".parse::<Theme>().is_err());
        assert!("".parse::<Theme>().is_err());
    }

    #[test]
    fn test_invalid_or_absent_falls_back_to_dark() {
        assert_eq!(Theme::from_token_or_default(None), Theme::Dark);
        assert_eq!(Theme::from_token_or_default(Some("neon")), Theme::Dark);
        assert_eq!(Theme::from_token_or_default(Some("claro")), Theme::Light);
        assert_eq!(Theme::from_token_or_default(Some(" matrix")), Theme::Dark);
        assert_eq!(Theme::from_token_or_default(Some("Claro")), Theme::Dark);
    }

    #[test]
    fn test_palette_is_canonical() {
        let table: Vec<_> = Theme::ALL
            .into_iter()
            .map(|theme| {
                let p = theme.palette();
                (theme.as_str(), p.background, p.text, p.accent)
            })
            .collect();
        assert_eq!(
            table,
            vec![
                ("escuro", "#000", "#fff", "#0ff"),
                ("claro", "#f5f5f5", "#222", "#00aaff"),
                ("matrix", "#0a0f0a", "#0f0", "#0f0"),
            ]
        );
    }

    #[test]
    fn test_markers_share_prefix() {
        for theme in Theme::ALL {
            assert!(theme.marker_class().starts_with(MARKER_PREFIX));
            assert!(theme.marker_class().ends_with(theme.as_str()));
        }
    }

    #[test]
    fn test_event_payload_shape() {
        let event = ThemeChanged { tema: Theme::Matrix };
        assert_eq!(
            serde_json::to_value(event).unwrap(),
            serde_json::json!({"tema": "matrix"})
        );
    }
}
