//! State and action descriptors.

use serde::{Deserialize, Serialize};

/// One named field of a payload shape.
///
/// `kind` is a free-form type label. It documents the field and is never
/// compared during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub kind: String,
}

/// Open record of named fields carried by a state or action.
///
/// # Example
///
/// ```rust
/// use statecraft::core::PayloadShape;
///
/// let shape = PayloadShape::new().field("money_inserted", "u32");
/// assert_eq!(shape.fields().len(), 1);
/// assert!(PayloadShape::new().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadShape {
    fields: Vec<Field>,
}

impl PayloadShape {
    /// Shape with no fields.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field, returning the extended shape.
    pub fn field(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            kind: kind.into(),
        });
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A declared state or action: a unique name plus its payload shape.
///
/// Only the name identifies a descriptor. Two descriptors with the same
/// name and different shapes still collide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "PayloadShape::is_empty")]
    pub shape: PayloadShape,
}

impl Descriptor {
    pub fn new(name: impl Into<String>, shape: PayloadShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Descriptor without payload.
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, PayloadShape::new())
    }
}

/// Descriptor of a declared state.
pub type StateDescriptor = Descriptor;

/// Descriptor of a declared action.
pub type ActionDescriptor = Descriptor;
