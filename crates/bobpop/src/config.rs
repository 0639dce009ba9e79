//! Popover configuration and its three-layer resolution.
//!
//! Callers describe a panel with [`PopoverOptions`], where every field is optional. The
//! resolver layers those options over a theme and the built-in defaults to produce a
//! [`PopoverConfig`], which is what the builder and lifecycle controller consume.
//!
//! Precedence, lowest to highest:
//!
//! 1. [`PopoverConfig::default()`]
//! 2. the selected theme ([`ThemeOverrides`])
//! 3. the caller's [`PopoverOptions`]
//!
//! Each field is resolved independently: a `None` at one layer simply lets the layer below
//! show through.
//!
//! # Example
//!
//! ```
//! use bobpop::config::{DismissMode, PopoverOptions, resolve};
//!
//! let options = PopoverOptions::new()
//!     .dismiss_mode(DismissMode::Manual)
//!     .title("Unsaved changes")
//!     .show_close_button(false);
//!
//! let config = resolve(&options, false);
//! assert_eq!(config.title, "Unsaved changes");
//! // Hard-dismiss panels always get a close control.
//! assert!(config.close_button);
//! ```

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::{ParseError, ParseResult};
use crate::lifecycle::PopoverEvent;
use crate::tail::TailPlacement;
use crate::theme::{ThemeOverrides, select_theme};

/// Identifier used when the caller does not request one.
pub const DEFAULT_ID: &str = "bobpop";

/// Prefix every CSS anchor name must carry.
pub const ANCHOR_PREFIX: &str = "--";

/// How the panel may be dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DismissMode {
    /// Light dismiss: outside click or platform escape closes the panel.
    #[default]
    Auto,
    /// Hard dismiss: an explicit control (or the opt-in escape handler) is required.
    Manual,
}

impl DismissMode {
    /// Map a `popover` attribute value. Anything other than `auto` is a hard dismiss.
    pub fn from_attr(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("auto") {
            DismissMode::Auto
        } else {
            DismissMode::Manual
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            DismissMode::Auto => "auto",
            DismissMode::Manual => "manual",
        }
    }

    pub fn is_light_dismiss(&self) -> bool {
        matches!(self, DismissMode::Auto)
    }
}

/// Horizontal text alignment for the title and body regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

impl FromStr for TextAlign {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" | "end" => Ok(TextAlign::Right),
            "justify" => Ok(TextAlign::Justify),
            _ => Err(ParseError::UnknownAlignment(s.to_string())),
        }
    }
}

/// Named enter/exit transition presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionKind {
    #[default]
    Fade,
    Scale,
    SlideUp,
    SlideDown,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 4] = [
        TransitionKind::Fade,
        TransitionKind::Scale,
        TransitionKind::SlideUp,
        TransitionKind::SlideDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Fade => "fade",
            TransitionKind::Scale => "scale",
            TransitionKind::SlideUp => "slide-up",
            TransitionKind::SlideDown => "slide-down",
        }
    }

    /// Class applied to the container to select this preset.
    pub fn class_name(&self) -> String {
        format!("bobpop-transition-{}", self.as_str())
    }
}

impl FromStr for TransitionKind {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        TransitionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ParseError::UnknownTransition(s.to_string()))
    }
}

bitflags! {
    /// Controls rendered inside a panel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Controls: u8 {
        /// Corner dismiss ("X") button.
        const CLOSE  = 0b001;
        /// Confirm button in the control row.
        const OK     = 0b010;
        /// Cancel button in the control row.
        const CANCEL = 0b100;
    }
}

impl Controls {
    /// Whether the control row under the body is needed.
    #[inline]
    pub fn has_button_row(&self) -> bool {
        self.intersects(Self::OK | Self::CANCEL)
    }
}

/// Opaque lifecycle callback.
///
/// Invoked at most once per lifecycle event; its return value is ignored.
#[derive(Clone)]
pub struct Hook(Rc<dyn Fn(&PopoverEvent)>);

impl Hook {
    pub fn new(callback: impl Fn(&PopoverEvent) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn call(&self, event: &PopoverEvent) {
        (self.0)(event);
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

/// Lifecycle callbacks for one panel.
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    pub on_before_open: Option<Hook>,
    pub on_open: Option<Hook>,
    pub on_before_close: Option<Hook>,
    pub on_close: Option<Hook>,
    /// Fired when removal has been deferred until an exit transition finishes.
    pub on_transition_start: Option<Hook>,
}

/// Fully resolved panel configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverConfig {
    // Identity and mode
    pub id: String,
    pub dismiss_mode: DismissMode,

    // Content
    pub title: String,
    pub title_align: TextAlign,
    pub title_font_weight: String,
    pub title_font_size: String,
    pub title_padding: String,
    pub title_separator: bool,
    pub title_separator_color: String,
    pub body: String,
    pub body_align: TextAlign,
    pub body_padding: String,

    // Controls
    pub close_button: bool,
    pub close_button_text: String,
    pub close_button_color: String,
    pub ok_button: bool,
    pub ok_button_text: String,
    pub cancel_button: bool,
    pub cancel_button_text: String,
    pub button_background: String,
    pub button_color: String,
    pub escape_closes: bool,

    // Presentation
    pub max_width: String,
    pub max_height: String,
    pub overflow: String,
    pub scrollbar_width: String,
    pub padding: String,
    pub margin: Option<String>,
    pub border: String,
    pub border_radius: String,
    pub font_family: String,
    pub color: String,
    pub background: String,
    pub box_shadow: String,
    pub z_index: String,
    pub position: String,
    pub backdrop_color: String,
    pub backdrop_blur: String,

    // Anchoring
    pub anchor: Option<String>,
    pub anchor_to_id: Option<String>,
    pub anchor_margin: String,
    pub position_area: String,
    pub position_try_fallbacks: String,
    pub position_try_order: String,

    // Decoration
    pub tail: Option<TailPlacement>,
    pub tail_color: String,

    // Motion
    pub transition: bool,
    pub transition_kind: TransitionKind,
    pub transition_duration: String,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID.to_string(),
            dismiss_mode: DismissMode::Auto,

            title: String::new(),
            title_align: TextAlign::Left,
            title_font_weight: "bold".into(),
            title_font_size: "1.2rem".into(),
            title_padding: "0 2rem 10px 0".into(),
            title_separator: true,
            title_separator_color: "currentColor".into(),
            body: String::new(),
            body_align: TextAlign::Left,
            body_padding: "10px 0 0".into(),

            close_button: true,
            close_button_text: "\u{274C}".into(),
            close_button_color: "red".into(),
            ok_button: false,
            ok_button_text: "OK".into(),
            cancel_button: false,
            cancel_button_text: "Cancel".into(),
            button_background: "buttonface".into(),
            button_color: "buttontext".into(),
            escape_closes: true,

            max_width: "min(90vw, 32rem)".into(),
            max_height: "80vh".into(),
            overflow: "auto".into(),
            scrollbar_width: "thin".into(),
            padding: "15px".into(),
            margin: None,
            border: "none".into(),
            border_radius: "15px".into(),
            font_family: "inherit".into(),
            color: "black".into(),
            background: "white".into(),
            box_shadow: "0 10px 30px rgba(0, 0, 0, 0.25)".into(),
            z_index: "auto".into(),
            position: "fixed".into(),
            backdrop_color: "rgba(0, 0, 0, 0.5)".into(),
            backdrop_blur: "0px".into(),

            anchor: None,
            anchor_to_id: None,
            anchor_margin: ".5rem 0".into(),
            position_area: "bottom".into(),
            position_try_fallbacks: "flip-block, flip-inline".into(),
            position_try_order: "normal".into(),

            tail: None,
            tail_color: "black".into(),

            transition: false,
            transition_kind: TransitionKind::Fade,
            transition_duration: "0.3s".into(),
        }
    }
}

impl PopoverConfig {
    /// Controls that will be rendered, after forcing the close control for hard dismiss.
    pub fn controls(&self) -> Controls {
        let mut controls = Controls::empty();
        controls.set(
            Controls::CLOSE,
            self.close_button || !self.dismiss_mode.is_light_dismiss(),
        );
        controls.set(Controls::OK, self.ok_button);
        controls.set(Controls::CANCEL, self.cancel_button);
        controls
    }

    /// Whether the global escape listener should be registered for this panel.
    pub fn wants_escape_listener(&self) -> bool {
        !self.dismiss_mode.is_light_dismiss() && self.escape_closes
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Caller-supplied overrides. `None` means "not set".
#[derive(Debug, Clone, Default)]
pub struct PopoverOptions {
    /// Theme name; unknown names fall back to light.
    pub theme: Option<String>,
    pub hooks: Hooks,

    pub id: Option<String>,
    pub dismiss_mode: Option<DismissMode>,

    pub title: Option<String>,
    pub title_align: Option<TextAlign>,
    pub title_font_weight: Option<String>,
    pub title_font_size: Option<String>,
    pub title_padding: Option<String>,
    pub title_separator: Option<bool>,
    pub title_separator_color: Option<String>,
    pub body: Option<String>,
    pub body_align: Option<TextAlign>,
    pub body_padding: Option<String>,

    pub close_button: Option<bool>,
    pub close_button_text: Option<String>,
    pub close_button_color: Option<String>,
    pub ok_button: Option<bool>,
    pub ok_button_text: Option<String>,
    pub cancel_button: Option<bool>,
    pub cancel_button_text: Option<String>,
    pub button_background: Option<String>,
    pub button_color: Option<String>,
    pub escape_closes: Option<bool>,

    pub max_width: Option<String>,
    pub max_height: Option<String>,
    pub overflow: Option<String>,
    pub scrollbar_width: Option<String>,
    pub padding: Option<String>,
    pub margin: Option<String>,
    pub border: Option<String>,
    pub border_radius: Option<String>,
    pub font_family: Option<String>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub box_shadow: Option<String>,
    pub z_index: Option<String>,
    pub position: Option<String>,
    pub backdrop_color: Option<String>,
    pub backdrop_blur: Option<String>,

    pub anchor: Option<String>,
    pub anchor_to_id: Option<String>,
    pub anchor_margin: Option<String>,
    pub position_area: Option<String>,
    pub position_try_fallbacks: Option<String>,
    pub position_try_order: Option<String>,

    pub tail: Option<TailPlacement>,
    pub tail_color: Option<String>,

    pub transition: Option<bool>,
    pub transition_kind: Option<TransitionKind>,
    pub transition_duration: Option<String>,
}

impl PopoverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchored, light-dismiss tooltip pointing at `anchor_to_id`.
    pub fn tooltip(anchor: impl Into<String>, anchor_to_id: impl Into<String>) -> Self {
        Self {
            anchor: Some(anchor.into()),
            anchor_to_id: Some(anchor_to_id.into()),
            tail: Some(TailPlacement::TopCenter),
            close_button: Some(false),
            padding: Some("8px 12px".into()),
            border_radius: Some("8px".into()),
            ..Self::default()
        }
    }

    /// Hard-dismiss confirmation dialog with OK and Cancel buttons.
    pub fn confirm(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            dismiss_mode: Some(DismissMode::Manual),
            ok_button: Some(true),
            cancel_button: Some(true),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn dismiss_mode(mut self, mode: DismissMode) -> Self {
        self.dismiss_mode = Some(mode);
        self
    }

    pub fn theme(mut self, name: impl Into<String>) -> Self {
        self.theme = Some(name.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn show_close_button(mut self, show: bool) -> Self {
        self.close_button = Some(show);
        self
    }

    pub fn show_ok_button(mut self, show: bool) -> Self {
        self.ok_button = Some(show);
        self
    }

    pub fn show_cancel_button(mut self, show: bool) -> Self {
        self.cancel_button = Some(show);
        self
    }

    pub fn escape_closes(mut self, enabled: bool) -> Self {
        self.escape_closes = Some(enabled);
        self
    }

    pub fn anchor(mut self, name: impl Into<String>) -> Self {
        self.anchor = Some(name.into());
        self
    }

    pub fn anchor_to(mut self, element_id: impl Into<String>) -> Self {
        self.anchor_to_id = Some(element_id.into());
        self
    }

    pub fn tail(mut self, placement: TailPlacement) -> Self {
        self.tail = Some(placement);
        self
    }

    pub fn transition(mut self, kind: TransitionKind) -> Self {
        self.transition = Some(true);
        self.transition_kind = Some(kind);
        self
    }

    pub fn on_before_open(mut self, hook: impl Fn(&PopoverEvent) + 'static) -> Self {
        self.hooks.on_before_open = Some(Hook::new(hook));
        self
    }

    pub fn on_open(mut self, hook: impl Fn(&PopoverEvent) + 'static) -> Self {
        self.hooks.on_open = Some(Hook::new(hook));
        self
    }

    pub fn on_before_close(mut self, hook: impl Fn(&PopoverEvent) + 'static) -> Self {
        self.hooks.on_before_close = Some(Hook::new(hook));
        self
    }

    pub fn on_close(mut self, hook: impl Fn(&PopoverEvent) + 'static) -> Self {
        self.hooks.on_close = Some(Hook::new(hook));
        self
    }

    pub fn on_transition_start(mut self, hook: impl Fn(&PopoverEvent) + 'static) -> Self {
        self.hooks.on_transition_start = Some(Hook::new(hook));
        self
    }
}

/// Copy every `Some` field of `$source` onto `$target`.
macro_rules! layer_fields {
    ($target:expr, $source:expr; $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = &$source.$field {
                $target.$field = value.clone();
            }
        )*
    };
}

/// Same as `layer_fields!`, for target fields that are themselves optional.
macro_rules! layer_optional_fields {
    ($target:expr, $source:expr; $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = &$source.$field {
                $target.$field = Some(value.clone());
            }
        )*
    };
}

impl PopoverConfig {
    /// Layer a theme's presentation fields on top of this configuration.
    pub fn apply_theme(mut self, theme: &ThemeOverrides) -> Self {
        layer_fields!(self, theme;
            color,
            background,
            border,
            border_radius,
            box_shadow,
            font_family,
            backdrop_color,
            backdrop_blur,
            title_separator_color,
            close_button_color,
            button_background,
            button_color,
            tail_color,
        );
        self
    }

    /// Layer caller options on top of this configuration.
    pub fn apply_options(mut self, options: &PopoverOptions) -> Self {
        layer_fields!(self, options;
            id,
            dismiss_mode,
            title,
            title_align,
            title_font_weight,
            title_font_size,
            title_padding,
            title_separator,
            title_separator_color,
            body,
            body_align,
            body_padding,
            close_button,
            close_button_text,
            close_button_color,
            ok_button,
            ok_button_text,
            cancel_button,
            cancel_button_text,
            button_background,
            button_color,
            escape_closes,
            max_width,
            max_height,
            overflow,
            scrollbar_width,
            padding,
            border,
            border_radius,
            font_family,
            color,
            background,
            box_shadow,
            z_index,
            position,
            backdrop_color,
            backdrop_blur,
            anchor_margin,
            position_area,
            position_try_fallbacks,
            position_try_order,
            tail_color,
            transition,
            transition_kind,
            transition_duration,
        );
        layer_optional_fields!(self, options;
            margin,
            anchor,
            anchor_to_id,
            tail,
        );
        self
    }

    /// Rules that hold after layering regardless of input.
    fn normalize(mut self) -> Self {
        if !self.dismiss_mode.is_light_dismiss() {
            self.close_button = true;
        }
        self.anchor = self
            .anchor
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(normalize_anchor_name);
        self.anchor_to_id = self.anchor_to_id.filter(|id| !id.trim().is_empty());
        if self.id.trim().is_empty() {
            self.id = DEFAULT_ID.to_string();
        }
        self
    }
}

/// Prefix an anchor name with `--` unless it already has it.
pub fn normalize_anchor_name(name: &str) -> String {
    if name.starts_with(ANCHOR_PREFIX) {
        name.to_string()
    } else {
        format!("{ANCHOR_PREFIX}{name}")
    }
}

/// Resolve caller options into a final configuration.
///
/// Pure: the only input besides `options` is the platform's colour-scheme signal.
pub fn resolve(options: &PopoverOptions, prefers_dark: bool) -> PopoverConfig {
    let theme = select_theme(options.theme.as_deref(), prefers_dark);
    PopoverConfig::default()
        .apply_theme(&ThemeOverrides::for_name(theme))
        .apply_options(options)
        .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeName;

    #[test]
    fn test_empty_options_resolve_to_light_theme_over_defaults() {
        let config = resolve(&PopoverOptions::new(), false);
        let expected = PopoverConfig::default().apply_theme(&ThemeOverrides::light());
        assert_eq!(config, expected);
        assert_eq!(config.id, DEFAULT_ID);
        assert_eq!(config.dismiss_mode, DismissMode::Auto);
    }

    #[test]
    fn test_dark_preference_applies_only_without_explicit_theme() {
        let dark = ThemeOverrides::dark();
        let config = resolve(&PopoverOptions::new(), true);
        assert_eq!(Some(&config.background), dark.background.as_ref());

        let config = resolve(&PopoverOptions::new().theme("light"), true);
        assert_eq!(Some(&config.background), ThemeOverrides::light().background.as_ref());
    }

    #[test]
    fn test_caller_beats_theme_beats_default() {
        let options = PopoverOptions {
            theme: Some("error".into()),
            color: Some("navy".into()),
            ..PopoverOptions::default()
        };
        let config = resolve(&options, false);
        let error = ThemeOverrides::error();
        let defaults = PopoverConfig::default();

        // Caller set it.
        assert_eq!(config.color, "navy");
        // Theme set it, caller didn't.
        assert_eq!(Some(&config.background), error.background.as_ref());
        // Neither set it.
        assert_eq!(error.box_shadow, None);
        assert_eq!(config.box_shadow, defaults.box_shadow);
        assert_eq!(config.padding, defaults.padding);
    }

    #[test]
    fn test_layering_law_per_theme_field() {
        for name in ThemeName::ALL {
            let theme = ThemeOverrides::for_name(name);
            let config = resolve(&PopoverOptions::new().theme(name.as_str()), false);
            let defaults = PopoverConfig::default();
            let check = |resolved: &String, themed: &Option<String>, default: &String| {
                assert_eq!(resolved, themed.as_ref().unwrap_or(default), "theme {name:?}");
            };
            check(&config.color, &theme.color, &defaults.color);
            check(&config.background, &theme.background, &defaults.background);
            check(&config.border, &theme.border, &defaults.border);
            check(&config.border_radius, &theme.border_radius, &defaults.border_radius);
            check(&config.box_shadow, &theme.box_shadow, &defaults.box_shadow);
            check(&config.tail_color, &theme.tail_color, &defaults.tail_color);
            check(
                &config.close_button_color,
                &theme.close_button_color,
                &defaults.close_button_color,
            );
        }
    }

    #[test]
    fn test_theme_fields_over_defaults_for_every_theme() {
        let defaults = PopoverConfig::default();
        let pick = |themed: &Option<String>, default: &String| {
            themed.clone().unwrap_or_else(|| default.clone())
        };
        for name in ThemeName::ALL {
            let theme = ThemeOverrides::for_name(name);
            let expected = PopoverConfig {
                color: pick(&theme.color, &defaults.color),
                background: pick(&theme.background, &defaults.background),
                border: pick(&theme.border, &defaults.border),
                border_radius: pick(&theme.border_radius, &defaults.border_radius),
                box_shadow: pick(&theme.box_shadow, &defaults.box_shadow),
                font_family: pick(&theme.font_family, &defaults.font_family),
                backdrop_color: pick(&theme.backdrop_color, &defaults.backdrop_color),
                backdrop_blur: pick(&theme.backdrop_blur, &defaults.backdrop_blur),
                title_separator_color: pick(
                    &theme.title_separator_color,
                    &defaults.title_separator_color,
                ),
                close_button_color: pick(&theme.close_button_color, &defaults.close_button_color),
                button_background: pick(&theme.button_background, &defaults.button_background),
                button_color: pick(&theme.button_color, &defaults.button_color),
                tail_color: pick(&theme.tail_color, &defaults.tail_color),
                ..PopoverConfig::default()
            };
            let resolved = resolve(&PopoverOptions::new().theme(name.as_str()), false);
            assert_eq!(resolved, expected, "theme {name:?}");
        }
    }

    #[test]
    fn test_every_option_beats_theme_and_default() {
        let options = PopoverOptions {
            theme: Some("dark".into()),
            hooks: Hooks::default(),

            id: Some("opt-id".into()),
            dismiss_mode: Some(DismissMode::Manual),

            title: Some("opt-title".into()),
            title_align: Some(TextAlign::Right),
            title_font_weight: Some("opt-title-weight".into()),
            title_font_size: Some("opt-title-size".into()),
            title_padding: Some("opt-title-padding".into()),
            title_separator: Some(false),
            title_separator_color: Some("opt-separator-color".into()),
            body: Some("opt-body".into()),
            body_align: Some(TextAlign::Justify),
            body_padding: Some("opt-body-padding".into()),

            close_button: Some(true),
            close_button_text: Some("opt-close-text".into()),
            close_button_color: Some("opt-close-color".into()),
            ok_button: Some(true),
            ok_button_text: Some("opt-ok-text".into()),
            cancel_button: Some(true),
            cancel_button_text: Some("opt-cancel-text".into()),
            button_background: Some("opt-button-background".into()),
            button_color: Some("opt-button-color".into()),
            escape_closes: Some(false),

            max_width: Some("opt-max-width".into()),
            max_height: Some("opt-max-height".into()),
            overflow: Some("opt-overflow".into()),
            scrollbar_width: Some("opt-scrollbar-width".into()),
            padding: Some("opt-padding".into()),
            margin: Some("opt-margin".into()),
            border: Some("opt-border".into()),
            border_radius: Some("opt-border-radius".into()),
            font_family: Some("opt-font-family".into()),
            color: Some("opt-color".into()),
            background: Some("opt-background".into()),
            box_shadow: Some("opt-box-shadow".into()),
            z_index: Some("opt-z-index".into()),
            position: Some("opt-position".into()),
            backdrop_color: Some("opt-backdrop-color".into()),
            backdrop_blur: Some("opt-backdrop-blur".into()),

            anchor: Some("--opt-anchor".into()),
            anchor_to_id: Some("opt-target".into()),
            anchor_margin: Some("opt-anchor-margin".into()),
            position_area: Some("opt-position-area".into()),
            position_try_fallbacks: Some("opt-try-fallbacks".into()),
            position_try_order: Some("opt-try-order".into()),

            tail: Some(TailPlacement::RightBottom),
            tail_color: Some("opt-tail-color".into()),

            transition: Some(true),
            transition_kind: Some(TransitionKind::SlideDown),
            transition_duration: Some("opt-duration".into()),
        };

        let expected = PopoverConfig {
            id: "opt-id".into(),
            dismiss_mode: DismissMode::Manual,

            title: "opt-title".into(),
            title_align: TextAlign::Right,
            title_font_weight: "opt-title-weight".into(),
            title_font_size: "opt-title-size".into(),
            title_padding: "opt-title-padding".into(),
            title_separator: false,
            title_separator_color: "opt-separator-color".into(),
            body: "opt-body".into(),
            body_align: TextAlign::Justify,
            body_padding: "opt-body-padding".into(),

            close_button: true,
            close_button_text: "opt-close-text".into(),
            close_button_color: "opt-close-color".into(),
            ok_button: true,
            ok_button_text: "opt-ok-text".into(),
            cancel_button: true,
            cancel_button_text: "opt-cancel-text".into(),
            button_background: "opt-button-background".into(),
            button_color: "opt-button-color".into(),
            escape_closes: false,

            max_width: "opt-max-width".into(),
            max_height: "opt-max-height".into(),
            overflow: "opt-overflow".into(),
            scrollbar_width: "opt-scrollbar-width".into(),
            padding: "opt-padding".into(),
            margin: Some("opt-margin".into()),
            border: "opt-border".into(),
            border_radius: "opt-border-radius".into(),
            font_family: "opt-font-family".into(),
            color: "opt-color".into(),
            background: "opt-background".into(),
            box_shadow: "opt-box-shadow".into(),
            z_index: "opt-z-index".into(),
            position: "opt-position".into(),
            backdrop_color: "opt-backdrop-color".into(),
            backdrop_blur: "opt-backdrop-blur".into(),

            anchor: Some("--opt-anchor".into()),
            anchor_to_id: Some("opt-target".into()),
            anchor_margin: "opt-anchor-margin".into(),
            position_area: "opt-position-area".into(),
            position_try_fallbacks: "opt-try-fallbacks".into(),
            position_try_order: "opt-try-order".into(),

            tail: Some(TailPlacement::RightBottom),
            tail_color: "opt-tail-color".into(),

            transition: true,
            transition_kind: TransitionKind::SlideDown,
            transition_duration: "opt-duration".into(),
        };

        assert_eq!(resolve(&options, false), expected);
        // The dark preference must not leak through explicit values either.
        assert_eq!(resolve(&options, true), expected);
    }

    #[test]
    fn test_unknown_theme_is_light() {
        let unknown = resolve(&PopoverOptions::new().theme("holographic"), true);
        let light = resolve(&PopoverOptions::new().theme("light"), true);
        assert_eq!(unknown, light);
    }

    #[test]
    fn test_close_forced_for_hard_dismiss() {
        let options = PopoverOptions::new()
            .dismiss_mode(DismissMode::Manual)
            .show_close_button(false);
        let config = resolve(&options, false);
        assert!(config.close_button);
        assert!(config.controls().contains(Controls::CLOSE));

        let options = PopoverOptions::new().show_close_button(false);
        let config = resolve(&options, false);
        assert!(!config.close_button);
        assert!(config.controls().is_empty());
    }

    #[test]
    fn test_dismiss_mode_from_attr() {
        assert_eq!(DismissMode::from_attr("auto"), DismissMode::Auto);
        assert_eq!(DismissMode::from_attr("manual"), DismissMode::Manual);
        assert_eq!(DismissMode::from_attr("hint"), DismissMode::Manual);
        assert_eq!(DismissMode::from_attr(""), DismissMode::Manual);
    }

    #[test]
    fn test_anchor_name_normalized() {
        let config = resolve(&PopoverOptions::new().anchor("help-icon"), false);
        assert_eq!(config.anchor.as_deref(), Some("--help-icon"));

        let config = resolve(&PopoverOptions::new().anchor("--help-icon"), false);
        assert_eq!(config.anchor.as_deref(), Some("--help-icon"));

        let config = resolve(&PopoverOptions::new().anchor("  "), false);
        assert_eq!(config.anchor, None);
    }

    #[test]
    fn test_escape_listener_only_for_hard_dismiss() {
        let auto = resolve(&PopoverOptions::new(), false);
        assert!(!auto.wants_escape_listener());

        let manual = resolve(&PopoverOptions::new().dismiss_mode(DismissMode::Manual), false);
        assert!(manual.wants_escape_listener());

        let opted_out = resolve(
            &PopoverOptions::new()
                .dismiss_mode(DismissMode::Manual)
                .escape_closes(false),
            false,
        );
        assert!(!opted_out.wants_escape_listener());
    }

    #[test]
    fn test_confirm_preset_controls() {
        let config = resolve(&PopoverOptions::confirm("Delete?", "This cannot be undone."), false);
        assert_eq!(
            config.controls(),
            Controls::CLOSE | Controls::OK | Controls::CANCEL
        );
        assert!(config.controls().has_button_row());
    }

    #[test]
    fn test_transition_kind_parse() {
        assert_eq!("slide_up".parse(), Ok(TransitionKind::SlideUp));
        assert_eq!("Fade".parse(), Ok(TransitionKind::Fade));
        assert!("wobble".parse::<TransitionKind>().is_err());
        assert_eq!(TransitionKind::Scale.class_name(), "bobpop-transition-scale");
    }

    #[test]
    fn test_text_align_parse() {
        assert_eq!("start".parse(), Ok(TextAlign::Left));
        assert_eq!("CENTER".parse(), Ok(TextAlign::Center));
        assert!("middle".parse::<TextAlign>().is_err());
    }

    #[test]
    fn test_blank_id_falls_back_to_default() {
        let config = resolve(&PopoverOptions::new().id(""), false);
        assert_eq!(config.id, DEFAULT_ID);
    }
}
