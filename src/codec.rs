//! Component tree encoding and decoding.
//!
//! Callers hand over components in whichever shape is convenient (one
//! component, a flat list, or explicit rows). [`ComponentTree::build`]
//! normalises that into validated rows; [`encode`] turns the rows into the
//! wire array. [`decode`] goes the other way for received payloads and skips
//! anything it doesn't understand.

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DecodeError, ValidationError};
use crate::types::component::{ActionRow, Component, ComponentType};

/// Maximum number of action rows on one message.
pub const MAX_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Input shapes
// ---------------------------------------------------------------------------

/// The shapes a caller may supply components in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentInput {
    /// Wrapped in a single row.
    Single(Component),
    /// Grouped into rows automatically.
    Flat(Vec<Component>),
    /// Used as-is.
    Rows(Vec<ActionRow>),
}

impl From<Component> for ComponentInput {
    fn from(component: Component) -> Self {
        Self::Single(component)
    }
}

impl From<Vec<Component>> for ComponentInput {
    fn from(components: Vec<Component>) -> Self {
        Self::Flat(components)
    }
}

impl From<ActionRow> for ComponentInput {
    fn from(row: ActionRow) -> Self {
        Self::Rows(vec![row])
    }
}

impl From<Vec<ActionRow>> for ComponentInput {
    fn from(rows: Vec<ActionRow>) -> Self {
        Self::Rows(rows)
    }
}

impl From<crate::types::component::Button> for ComponentInput {
    fn from(button: crate::types::component::Button) -> Self {
        Self::Single(button.into())
    }
}

impl From<crate::types::component::Select> for ComponentInput {
    fn from(select: crate::types::component::Select) -> Self {
        Self::Single(select.into())
    }
}

// ---------------------------------------------------------------------------
// ComponentTree
// ---------------------------------------------------------------------------

/// The ordered rows attached to a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentTree {
    rows: Vec<ActionRow>,
}

/// Group a flat list into rows: a select always gets a row of its own and
/// buttons fill rows of up to five.
fn group_into_rows(components: Vec<Component>) -> Result<Vec<ActionRow>, ValidationError> {
    let mut rows: Vec<ActionRow> = Vec::new();

    for component in components {
        if let Some(row) = rows.last_mut().filter(|row| row.accepts(&component)) {
            row.push(component)?;
        } else {
            rows.push(ActionRow::new(vec![component])?);
        }
    }

    Ok(rows)
}

impl ComponentTree {
    /// An empty tree; encoding it clears a message's components.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalise `input` into validated rows.
    pub fn build(input: impl Into<ComponentInput>) -> Result<Self, ValidationError> {
        let rows = match input.into() {
            ComponentInput::Single(component) => vec![ActionRow::new(vec![component])?],
            ComponentInput::Flat(components) => group_into_rows(components)?,
            ComponentInput::Rows(rows) => {
                for row in &rows {
                    row.validate()?;
                }
                rows
            }
        };

        if rows.len() > MAX_ROWS {
            return Err(ValidationError::TooManyRows(rows.len()));
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ActionRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ActionRow> {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every component, in row-then-position order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.rows.iter().flat_map(|row| row.components())
    }

    /// First component whose `custom_id` matches.
    ///
    /// Uniqueness is not enforced; when two components share an id the one
    /// earlier in row-then-position order wins.
    pub fn find(&self, custom_id: &str) -> Option<&Component> {
        self.components()
            .find(|component| component.custom_id() == Some(custom_id))
    }

    /// A copy of the tree with every component disabled.
    pub fn disabled(&self) -> Self {
        Self {
            rows: self.rows.iter().cloned().map(ActionRow::disabled).collect(),
        }
    }
}

impl Serialize for ComponentTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// Encode components into the wire array of row objects.
pub fn encode(input: impl Into<ComponentInput>) -> Result<Vec<Value>, ValidationError> {
    let tree = ComponentTree::build(input)?;
    tree.rows
        .iter()
        .map(|row| {
            serde_json::to_value(row).map_err(|e| ValidationError::InvalidArgument(e.to_string()))
        })
        .collect()
}

/// Decode a single component object.
///
/// Thin wrapper over [`Component::from_value`] for symmetry with [`encode`].
pub fn decode_component(value: &Value) -> Result<Component, DecodeError> {
    Component::from_value(value.clone())
}

fn decode_row(index: usize, value: &Value) -> Option<ActionRow> {
    let row_type = value.get("type").and_then(Value::as_u64);
    if row_type != Some(ComponentType::ActionRow as u64) {
        warn!(row = index, ?row_type, "skipping top-level object that is not an action row");
        return None;
    }

    let children = value
        .get("components")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut components = Vec::with_capacity(children.len());
    for (position, child) in children.iter().enumerate() {
        match decode_component(child) {
            Ok(component) => components.push(component),
            Err(error) => {
                warn!(row = index, position, %error, "skipping undecodable component");
            }
        }
    }

    match ActionRow::new(components) {
        Ok(row) => Some(row),
        Err(error) => {
            warn!(row = index, %error, "skipping action row that breaks composition rules");
            None
        }
    }
}

/// Decode the `components` array of a received message.
///
/// Never fails: unknown component types and malformed objects are logged and
/// left out, so a platform addition can't break decoding of the rest.
pub fn decode(rows: &[Value]) -> ComponentTree {
    let rows: Vec<ActionRow> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, value)| decode_row(index, value))
        .collect();
    debug!(rows = rows.len(), "decoded component tree");
    ComponentTree { rows }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
