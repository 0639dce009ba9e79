//! Built-in presentation themes.
//!
//! A theme is a partial configuration restricted to presentation fields. It sits between the
//! built-in defaults and the caller's options when a configuration is resolved, see
//! [`resolve`](crate::config::resolve).
//!
//! # Example
//!
//! ```
//! use bobpop::theme::{ThemeName, ThemeOverrides, select_theme};
//!
//! // No theme requested and the platform prefers dark: the dark theme applies.
//! assert_eq!(select_theme(None, true), ThemeName::Dark);
//!
//! // Unknown names fall back to light rather than failing.
//! assert_eq!(select_theme(Some("neon"), true), ThemeName::Light);
//!
//! let warning = ThemeOverrides::for_name(ThemeName::Warning);
//! assert!(warning.background.is_some());
//! ```

use std::str::FromStr;

use crate::error::{ParseError, ParseResult};

/// The fixed set of built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeName {
    Light,
    Dark,
    Error,
    Warning,
    Success,
    Info,
}

impl ThemeName {
    pub const ALL: [ThemeName; 6] = [
        ThemeName::Light,
        ThemeName::Dark,
        ThemeName::Error,
        ThemeName::Warning,
        ThemeName::Success,
        ThemeName::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
            ThemeName::Error => "error",
            ThemeName::Warning => "warning",
            ThemeName::Success => "success",
            ThemeName::Info => "info",
        }
    }
}

impl FromStr for ThemeName {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        let name = s.trim();
        ThemeName::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseError::UnknownTheme(s.to_string()))
    }
}

/// Pick the theme for a request.
///
/// A recognised name wins. An unrecognised name falls back to light, silently, even when the
/// platform prefers dark: the caller asked for something specific. With no name at all the
/// platform's colour-scheme preference decides.
pub fn select_theme(requested: Option<&str>, prefers_dark: bool) -> ThemeName {
    match requested {
        Some(name) => name.parse::<ThemeName>().unwrap_or_else(|err| {
            tracing::debug!("{}, falling back to light theme", err);
            ThemeName::Light
        }),
        None if prefers_dark => ThemeName::Dark,
        None => ThemeName::Light,
    }
}

/// Presentation-only configuration overrides supplied by a theme.
///
/// `None` leaves the underlying default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOverrides {
    pub color: Option<String>,
    pub background: Option<String>,
    pub border: Option<String>,
    pub border_radius: Option<String>,
    pub box_shadow: Option<String>,
    pub font_family: Option<String>,
    pub backdrop_color: Option<String>,
    pub backdrop_blur: Option<String>,
    pub title_separator_color: Option<String>,
    pub close_button_color: Option<String>,
    pub button_background: Option<String>,
    pub button_color: Option<String>,
    pub tail_color: Option<String>,
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

impl ThemeOverrides {
    pub fn for_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Self::light(),
            ThemeName::Dark => Self::dark(),
            ThemeName::Error => Self::error(),
            ThemeName::Warning => Self::warning(),
            ThemeName::Success => Self::success(),
            ThemeName::Info => Self::info(),
        }
    }

    /// Light theme. Sets every presentation field.
    pub fn light() -> Self {
        Self {
            color: some("#1f2328"),
            background: some("#ffffff"),
            border: some("1px solid #d0d7de"),
            border_radius: some("15px"),
            box_shadow: some("0 10px 30px rgba(0, 0, 0, 0.25)"),
            font_family: some("inherit"),
            backdrop_color: some("rgba(0, 0, 0, 0.4)"),
            backdrop_blur: some("0px"),
            title_separator_color: some("#d0d7de"),
            close_button_color: some("#cf222e"),
            button_background: some("#f6f8fa"),
            button_color: some("#1f2328"),
            tail_color: some("#ffffff"),
        }
    }

    /// Dark theme. Sets every presentation field.
    pub fn dark() -> Self {
        Self {
            color: some("#e6edf3"),
            background: some("#161b22"),
            border: some("1px solid #30363d"),
            border_radius: some("15px"),
            box_shadow: some("0 10px 30px rgba(0, 0, 0, 0.6)"),
            font_family: some("inherit"),
            backdrop_color: some("rgba(0, 0, 0, 0.6)"),
            backdrop_blur: some("2px"),
            title_separator_color: some("#30363d"),
            close_button_color: some("#ff7b72"),
            button_background: some("#21262d"),
            button_color: some("#e6edf3"),
            tail_color: some("#161b22"),
        }
    }

    // Status themes only recolour; shape and shadow stay on the defaults.

    pub fn error() -> Self {
        Self::status("black", "pink", "#f5a3a3")
    }

    pub fn warning() -> Self {
        Self::status("#3d2e00", "#fff4cc", "#f0d77a")
    }

    pub fn success() -> Self {
        Self::status("#0f3d1e", "#dcf5e3", "#8fd6a5")
    }

    pub fn info() -> Self {
        Self::status("#0b2f4f", "#ddeeff", "#8cbcec")
    }

    fn status(color: &str, background: &str, accent: &str) -> Self {
        Self {
            color: some(color),
            background: some(background),
            border: Some(format!("1px solid {accent}")),
            title_separator_color: some(accent),
            tail_color: some(background),
            ..Self::default()
        }
    }
}
