//! Builder patterns for ergonomic component construction.
//!
//! Buttons and select menus have enough optional fields that filling in
//! structs by hand gets noisy. The builders here fill in defaults (a random
//! `custom_id`, `min_values = max_values = 1`) and run validation in
//! `build()`, so a malformed component is rejected at composition time.
//!
//! The helper functions (`button`, `link_button`, `select`, `action_row`)
//! cover the common cases in one call.

use crate::error::ValidationError;
use crate::types::component::{
    generate_custom_id, ActionRow, Button, ButtonStyle, Component, PartialEmoji, Select,
    SelectOption,
};

// ===========================================================================
// Button builder
// ===========================================================================

/// Ergonomic builder for [`Button`].
///
/// # Examples
///
/// ```
/// use hello_components::types::{ButtonBuilder, ButtonStyle};
///
/// let button = ButtonBuilder::new(ButtonStyle::Success)
///     .label("Accept")
///     .custom_id("accept")
///     .build()
///     .unwrap();
/// assert_eq!(button.custom_id(), Some("accept"));
/// ```
#[derive(Debug, Clone)]
pub struct ButtonBuilder {
    inner: Button,
}

impl ButtonBuilder {
    /// Start building a button of the given style.
    pub fn new(style: ButtonStyle) -> Self {
        Self {
            inner: Button {
                style,
                label: None,
                custom_id: None,
                url: None,
                emoji: None,
                disabled: false,
            },
        }
    }

    /// Start building a link button pointing at `url`.
    pub fn link(url: impl Into<String>) -> Self {
        let mut builder = Self::new(ButtonStyle::Link);
        builder.inner.url = Some(url.into());
        builder
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.inner.label = Some(label.into());
        self
    }

    /// Set the correlation id. When omitted, interactive buttons get a
    /// generated one.
    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.inner.custom_id = Some(custom_id.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.inner.url = Some(url.into());
        self
    }

    pub fn emoji(mut self, emoji: PartialEmoji) -> Self {
        self.inner.emoji = Some(emoji);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.inner.disabled = disabled;
        self
    }

    /// Validate and return the finished [`Button`].
    pub fn build(mut self) -> Result<Button, ValidationError> {
        if !self.inner.style.is_link() && self.inner.custom_id.is_none() {
            self.inner.custom_id = Some(generate_custom_id());
        }
        self.inner.validate()?;
        Ok(self.inner)
    }
}

// ===========================================================================
// Select builder
// ===========================================================================

/// Ergonomic builder for [`Select`].
///
/// # Examples
///
/// ```
/// use hello_components::types::{SelectBuilder, SelectOption};
///
/// let select = SelectBuilder::new()
///     .custom_id("language")
///     .placeholder("Pick a language")
///     .option(SelectOption::new("Rust", "rust"))
///     .option(SelectOption::new("Zig", "zig"))
///     .build()
///     .unwrap();
/// assert_eq!(select.options().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    inner: Select,
    custom_id: Option<String>,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self {
            inner: Select {
                custom_id: String::new(),
                placeholder: None,
                min_values: 1,
                max_values: 1,
                options: Vec::new(),
                disabled: false,
            },
            custom_id: None,
        }
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = Some(custom_id.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.inner.placeholder = Some(placeholder.into());
        self
    }

    pub fn min_values(mut self, min_values: u8) -> Self {
        self.inner.min_values = min_values;
        self
    }

    pub fn max_values(mut self, max_values: u8) -> Self {
        self.inner.max_values = max_values;
        self
    }

    pub fn option(mut self, option: SelectOption) -> Self {
        self.inner.options.push(option);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.inner.options.extend(options);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.inner.disabled = disabled;
        self
    }

    /// Validate and return the finished [`Select`].
    pub fn build(mut self) -> Result<Select, ValidationError> {
        self.inner.custom_id = self.custom_id.unwrap_or_else(generate_custom_id);
        self.inner.validate()?;
        Ok(self.inner)
    }
}

impl Default for SelectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Component helper functions
// ===========================================================================

/// Build an Action Row wrapping other components.
pub fn action_row(components: Vec<Component>) -> Result<ActionRow, ValidationError> {
    ActionRow::new(components)
}

/// Build an interactive button component.
///
/// For link buttons use [`link_button`] instead.
pub fn button(
    style: ButtonStyle,
    label: impl Into<String>,
    custom_id: impl Into<String>,
) -> Result<Component, ValidationError> {
    ButtonBuilder::new(style)
        .label(label)
        .custom_id(custom_id)
        .build()
        .map(Component::Button)
}

/// Build a link button (style 5, no custom_id, requires url).
pub fn link_button(
    label: impl Into<String>,
    url: impl Into<String>,
) -> Result<Component, ValidationError> {
    ButtonBuilder::link(url)
        .label(label)
        .build()
        .map(Component::Button)
}

/// Build a single-choice select menu component.
pub fn select(
    custom_id: impl Into<String>,
    placeholder: impl Into<String>,
    options: Vec<SelectOption>,
) -> Result<Component, ValidationError> {
    SelectBuilder::new()
        .custom_id(custom_id)
        .placeholder(placeholder)
        .options(options)
        .build()
        .map(Component::Select)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<SelectOption> {
        (0..n)
            .map(|i| SelectOption::new(format!("Option {i}"), format!("opt_{i}")))
            .collect()
    }

    #[test]
    fn button_builder_generates_custom_id() {
        let button = ButtonBuilder::new(ButtonStyle::Primary)
            .label("Click")
            .build()
            .unwrap();
        assert_eq!(button.custom_id().map(str::len), Some(32));
    }

    #[test]
    fn link_builder_has_url_and_no_custom_id() {
        let button = ButtonBuilder::link("https://example.com")
            .label("Visit")
            .build()
            .unwrap();
        assert!(button.custom_id().is_none());
        assert_eq!(button.url(), Some("https://example.com"));
        assert_eq!(button.style(), ButtonStyle::Link);
    }

    #[test]
    fn link_builder_rejects_custom_id() {
        let err = ButtonBuilder::link("https://example.com")
            .label("Visit")
            .custom_id("nope")
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidButton(_)));
    }

    #[test]
    fn interactive_button_rejects_url() {
        let err = ButtonBuilder::new(ButtonStyle::Danger)
            .label("Delete")
            .url("https://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidButton(_)));
    }

    #[test]
    fn button_needs_label_or_emoji() {
        assert!(ButtonBuilder::new(ButtonStyle::Secondary).build().is_err());
        assert!(ButtonBuilder::new(ButtonStyle::Secondary)
            .emoji(PartialEmoji::unicode("🔥"))
            .build()
            .is_ok());
    }

    #[test]
    fn oversized_custom_id_is_rejected() {
        let err = ButtonBuilder::new(ButtonStyle::Primary)
            .label("x")
            .custom_id("a".repeat(101))
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidArgument(_)));
    }

    #[test]
    fn select_builder_rejects_min_above_max() {
        let err = SelectBuilder::new()
            .options(options(3))
            .min_values(3)
            .max_values(2)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidSelectBounds {
                min: 3,
                max: 2,
                options: 3
            }
        );
    }

    #[test]
    fn select_builder_rejects_max_above_option_count() {
        let err = SelectBuilder::new()
            .options(options(2))
            .max_values(3)
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSelectBounds { .. }));
    }

    #[test]
    fn select_builder_rejects_empty_options() {
        assert!(matches!(
            SelectBuilder::new().build(),
            Err(ValidationError::InvalidSelectBounds { options: 0, .. })
        ));
    }

    #[test]
    fn select_builder_rejects_26_options() {
        assert_eq!(
            SelectBuilder::new().options(options(26)).build(),
            Err(ValidationError::TooManyOptions(26))
        );
    }

    #[test]
    fn select_builder_allows_zero_minimum() {
        let select = SelectBuilder::new()
            .options(options(25))
            .min_values(0)
            .max_values(25)
            .build()
            .unwrap();
        assert_eq!(select.min_values(), 0);
        assert_eq!(select.max_values(), 25);
    }

    #[test]
    fn select_builder_allows_zero_maximum() {
        let select = SelectBuilder::new()
            .custom_id("s")
            .option(SelectOption::new("Only", "only"))
            .min_values(0)
            .max_values(0)
            .build()
            .unwrap();
        assert_eq!(select.max_values(), 0);
    }

    #[test]
    fn action_row_wraps_components() {
        let row = action_row(vec![button(ButtonStyle::Primary, "Click", "btn_click").unwrap()])
            .unwrap();
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn button_creates_correct_component() {
        match button(ButtonStyle::Success, "OK", "btn_ok").unwrap() {
            Component::Button(b) => {
                assert_eq!(b.label(), Some("OK"));
                assert_eq!(b.custom_id(), Some("btn_ok"));
                assert_eq!(b.style(), ButtonStyle::Success);
            }
            other => panic!("expected Button, got {other:?}"),
        }
    }

    #[test]
    fn select_helper_sets_placeholder() {
        let component = select("lang", "Pick one", options(2)).unwrap();
        let select = component.as_select().unwrap();
        assert_eq!(select.placeholder(), Some("Pick one"));
        assert_eq!(select.custom_id(), "lang");
    }
}
