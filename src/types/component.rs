//! Message components: buttons, select menus, and the action rows holding them.
//!
//! Every concrete type here upholds its invariants from construction onward.
//! Builders in [`builders`](crate::types::builders) and the serde `try_from`
//! conversions share the same validation functions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::error::{DecodeError, ValidationError};
use crate::types::id::{EmojiMarker, Id};

/// Maximum number of components in one [`ActionRow`].
pub const ROW_CAPACITY: usize = 5;

/// Maximum number of options in one [`Select`].
pub const SELECT_OPTION_LIMIT: usize = 25;

/// Maximum length of a `custom_id`.
pub const CUSTOM_ID_MAX_LEN: usize = 100;

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !value
}

/// Generate a fresh correlation id for a component.
pub fn generate_custom_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

// ---------------------------------------------------------------------------
// Discriminants
// ---------------------------------------------------------------------------

/// Wire discriminant of a component object (`type` field).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ComponentType {
    ActionRow = 1,
    Button = 2,
    Select = 3,
}

impl ComponentType {
    /// Map a raw `type` value to a known component type.
    pub const fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            1 => Some(Self::ActionRow),
            2 => Some(Self::Button),
            3 => Some(Self::Select),
            _ => None,
        }
    }
}

/// Visual style of a [`Button`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    /// Opens `url`; never produces an interaction.
    Link = 5,
}

impl ButtonStyle {
    pub const fn is_link(self) -> bool {
        matches!(self, Self::Link)
    }
}

/// Emoji shown on a button or select option.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialEmoji {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id<EmojiMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub animated: bool,
}

impl PartialEmoji {
    /// A standard unicode emoji such as `"👍"`.
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            animated: false,
        }
    }

    /// A custom guild emoji.
    pub fn custom(id: Id<EmojiMarker>, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            animated,
        }
    }
}

fn validate_custom_id(custom_id: &str) -> Result<(), ValidationError> {
    if custom_id.is_empty() {
        return Err(ValidationError::InvalidArgument(
            "custom_id must not be empty".to_string(),
        ));
    }
    if custom_id.len() > CUSTOM_ID_MAX_LEN {
        return Err(ValidationError::InvalidArgument(format!(
            "custom_id is {} bytes long (max {CUSTOM_ID_MAX_LEN})",
            custom_id.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A clickable button.
///
/// Link buttons carry a `url` and no `custom_id`; every other style carries a
/// `custom_id` and no `url`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawButton", into = "RawButton")]
pub struct Button {
    pub(crate) style: ButtonStyle,
    pub(crate) label: Option<String>,
    pub(crate) custom_id: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) emoji: Option<PartialEmoji>,
    pub(crate) disabled: bool,
}

impl Button {
    pub fn style(&self) -> ButtonStyle {
        self.style
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// `None` only for link buttons.
    pub fn custom_id(&self) -> Option<&str> {
        self.custom_id.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn emoji(&self) -> Option<&PartialEmoji> {
        self.emoji.as_ref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether a click on this button can be simulated.
    pub fn is_clickable(&self) -> bool {
        !self.style.is_link() && !self.disabled
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.label.is_none() && self.emoji.is_none() {
            return Err(ValidationError::InvalidButton(
                "a button needs a label or an emoji".to_string(),
            ));
        }

        if self.style.is_link() {
            if self.url.is_none() {
                return Err(ValidationError::InvalidButton(
                    "link buttons require a url".to_string(),
                ));
            }
            if self.custom_id.is_some() {
                return Err(ValidationError::InvalidButton(
                    "link buttons cannot carry a custom_id".to_string(),
                ));
            }
            return Ok(());
        }

        if self.url.is_some() {
            return Err(ValidationError::InvalidButton(format!(
                "only link buttons may carry a url (style is {:?})",
                self.style
            )));
        }
        match self.custom_id.as_deref() {
            Some(custom_id) => validate_custom_id(custom_id),
            None => Err(ValidationError::InvalidButton(
                "interactive buttons require a custom_id".to_string(),
            )),
        }
    }
}

/// Wire shape of a button object.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawButton {
    #[serde(rename = "type")]
    kind: ComponentType,
    style: ButtonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emoji: Option<PartialEmoji>,
    #[serde(default, skip_serializing_if = "is_false")]
    disabled: bool,
}

impl TryFrom<RawButton> for Button {
    type Error = ValidationError;

    fn try_from(raw: RawButton) -> Result<Self, Self::Error> {
        if raw.kind != ComponentType::Button {
            return Err(ValidationError::InvalidButton(format!(
                "expected component type 2, got {:?}",
                raw.kind
            )));
        }

        let button = Self {
            style: raw.style,
            label: raw.label,
            custom_id: raw.custom_id,
            url: raw.url,
            emoji: raw.emoji,
            disabled: raw.disabled,
        };
        button.validate()?;
        Ok(button)
    }
}

impl From<Button> for RawButton {
    fn from(button: Button) -> Self {
        Self {
            kind: ComponentType::Button,
            style: button.style,
            label: button.label,
            // Link buttons never send a custom_id.
            custom_id: button.custom_id.filter(|_| !button.style.is_link()),
            url: button.url,
            emoji: button.emoji,
            disabled: button.disabled,
        }
    }
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

/// One choice inside a [`Select`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    /// Identifier returned in `values` when this option is chosen.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
    #[serde(rename = "default", default, skip_serializing_if = "is_false")]
    pub is_default: bool,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            emoji: None,
            is_default: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn emoji(mut self, emoji: PartialEmoji) -> Self {
        self.emoji = Some(emoji);
        self
    }

    /// Mark the option as pre-selected.
    pub fn selected_by_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// A dropdown select menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSelect", into = "RawSelect")]
pub struct Select {
    pub(crate) custom_id: String,
    pub(crate) placeholder: Option<String>,
    pub(crate) min_values: u8,
    pub(crate) max_values: u8,
    pub(crate) options: Vec<SelectOption>,
    pub(crate) disabled: bool,
}

impl Select {
    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn min_values(&self) -> u8 {
        self.min_values
    }

    pub fn max_values(&self) -> u8 {
        self.max_values
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether `option` is one of this menu's options.
    pub fn contains(&self, option: &SelectOption) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Look up an option by its wire value.
    pub fn option(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_custom_id(&self.custom_id)?;

        let count = self.options.len();
        if count > SELECT_OPTION_LIMIT {
            return Err(ValidationError::TooManyOptions(count));
        }
        // 0 <= min <= max <= len(options), and at least one option to choose.
        if count == 0
            || self.min_values > self.max_values
            || usize::from(self.max_values) > count
        {
            return Err(ValidationError::InvalidSelectBounds {
                min: self.min_values,
                max: self.max_values,
                options: count,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawSelect {
    #[serde(rename = "type")]
    kind: ComponentType,
    custom_id: String,
    #[serde(default)]
    options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_values: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_values: Option<u8>,
    #[serde(default, skip_serializing_if = "is_false")]
    disabled: bool,
}

impl TryFrom<RawSelect> for Select {
    type Error = ValidationError;

    fn try_from(raw: RawSelect) -> Result<Self, Self::Error> {
        if raw.kind != ComponentType::Select {
            return Err(ValidationError::InvalidArgument(format!(
                "expected component type 3, got {:?}",
                raw.kind
            )));
        }

        let select = Self {
            custom_id: raw.custom_id,
            placeholder: raw.placeholder,
            min_values: raw.min_values.unwrap_or(1),
            max_values: raw.max_values.unwrap_or(1),
            options: raw.options,
            disabled: raw.disabled,
        };
        select.validate()?;
        Ok(select)
    }
}

impl From<Select> for RawSelect {
    fn from(select: Select) -> Self {
        Self {
            kind: ComponentType::Select,
            custom_id: select.custom_id,
            options: select.options,
            placeholder: select.placeholder,
            min_values: Some(select.min_values),
            max_values: Some(select.max_values),
            disabled: select.disabled,
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// Any component that can live inside an [`ActionRow`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Component {
    Button(Button),
    Select(Select),
}

impl Component {
    pub fn kind(&self) -> ComponentType {
        match self {
            Self::Button(_) => ComponentType::Button,
            Self::Select(_) => ComponentType::Select,
        }
    }

    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Self::Button(button) => button.custom_id(),
            Self::Select(select) => Some(select.custom_id()),
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Self::Button(button) => button.disabled,
            Self::Select(select) => select.disabled,
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        match self {
            Self::Button(button) => button.disabled = disabled,
            Self::Select(select) => select.disabled = disabled,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Self::Button(button) => Some(button),
            Self::Select(_) => None,
        }
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            Self::Button(_) => None,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }

    /// Decode one component object, dispatching on its `type` field.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let raw_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or(DecodeError::MissingType)?;

        match ComponentType::from_raw(raw_type) {
            Some(ComponentType::Button) => serde_json::from_value(value)
                .map(Self::Button)
                .map_err(|e| DecodeError::Malformed {
                    kind: ComponentType::Button,
                    reason: e.to_string(),
                }),
            Some(ComponentType::Select) => serde_json::from_value(value)
                .map(Self::Select)
                .map_err(|e| DecodeError::Malformed {
                    kind: ComponentType::Select,
                    reason: e.to_string(),
                }),
            // Rows never nest inside rows.
            Some(ComponentType::ActionRow) | None => {
                Err(DecodeError::UnknownComponentType(raw_type))
            }
        }
    }
}

impl From<Button> for Component {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl From<Select> for Component {
    fn from(select: Select) -> Self {
        Self::Select(select)
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Button(button) => button.serialize(serializer),
            Self::Select(select) => select.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ActionRow
// ---------------------------------------------------------------------------

/// A horizontal row of components.
///
/// Holds either a single [`Select`] or up to [`ROW_CAPACITY`] buttons.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionRow {
    components: Vec<Component>,
}

fn validate_row(components: &[Component]) -> Result<(), ValidationError> {
    if components.len() > ROW_CAPACITY {
        return Err(ValidationError::InvalidRowComposition(format!(
            "row holds {} components (max {ROW_CAPACITY})",
            components.len()
        )));
    }
    let selects = components.iter().filter(|c| c.is_select()).count();
    if selects > 0 && components.len() > 1 {
        return Err(ValidationError::InvalidRowComposition(
            "a select menu must be the only component in its row".to_string(),
        ));
    }
    Ok(())
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> Result<Self, ValidationError> {
        validate_row(&components)?;
        Ok(Self { components })
    }

    /// Whether `component` can be appended without breaking the row rules.
    pub fn accepts(&self, component: &Component) -> bool {
        match self.components.first() {
            None => true,
            Some(first) => {
                !first.is_select()
                    && !component.is_select()
                    && self.components.len() < ROW_CAPACITY
            }
        }
    }

    pub fn push(&mut self, component: Component) -> Result<(), ValidationError> {
        if !self.accepts(&component) {
            return Err(ValidationError::InvalidRowComposition(format!(
                "cannot add a {:?} to a row of {} component(s)",
                component.kind(),
                self.components.len()
            )));
        }
        self.components.push(component);
        Ok(())
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn into_components(self) -> Vec<Component> {
        self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Mark every component in the row as disabled.
    pub fn disable_components(&mut self) {
        for component in &mut self.components {
            component.set_disabled(true);
        }
    }

    /// Consuming form of [`disable_components`](Self::disable_components).
    pub fn disabled(mut self) -> Self {
        self.disable_components();
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_row(&self.components)
    }
}

impl Serialize for ActionRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct RawRow<'a> {
            #[serde(rename = "type")]
            kind: ComponentType,
            components: &'a [Component],
        }

        RawRow {
            kind: ComponentType::ActionRow,
            components: &self.components,
        }
        .serialize(serializer)
    }
}
