//! Model descriptions consumed by the layout engine.
//!
//! These types mirror the JSON shape produced by schema compilers (a
//! datamodel with `models` and `types`, each holding ordered fields). The
//! engine never parses schema text itself; it always receives materialized
//! [`Model`] values.
//!
//! # Example
//!
//! ```
//! # use erd_core::model::{Field, Model};
//! let post = Model::new("Post")
//!     .with_field(Field::scalar("id", "Int"))
//!     .with_field(
//!         Field::relation("author", "User", "Author").with_relation_fields(["authorId"], ["id"]),
//!     );
//!
//! assert_eq!(post.linking_fields().count(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// How a field's type is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Scalar,
    Enum,
    /// A field whose type is another model (DMMF calls these `object`).
    Object,
    Relation,
    Unsupported,
}

/// A single field of a [`Model`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    name: String,

    #[serde(rename = "type")]
    field_type: String,

    #[serde(default)]
    kind: FieldKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    relation_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    relation_from_fields: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    relation_to_fields: Option<Vec<String>>,
}

impl Field {
    /// Creates a plain scalar field.
    pub fn scalar(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            kind: FieldKind::Scalar,
            relation_name: None,
            relation_from_fields: None,
            relation_to_fields: None,
        }
    }

    /// Creates an enum-typed field.
    pub fn enumeration(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Enum,
            ..Self::scalar(name, field_type)
        }
    }

    /// Creates a field pointing at another model through a named relation.
    pub fn relation(
        name: impl Into<String>,
        field_type: impl Into<String>,
        relation_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: FieldKind::Relation,
            relation_name: Some(relation_name.into()),
            ..Self::scalar(name, field_type)
        }
    }

    /// Sets the local (`from`) and referenced (`to`) field lists of the relation.
    pub fn with_relation_fields<F, T>(mut self, from: F, to: T) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        self.relation_from_fields = Some(from.into_iter().map(Into::into).collect());
        self.relation_to_fields = Some(to.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type; for relation fields this is the referenced model's name.
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The relation name, if one is set and non-empty.
    pub fn relation_name(&self) -> Option<&str> {
        self.relation_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn relation_from_fields(&self) -> &[String] {
        self.relation_from_fields.as_deref().unwrap_or_default()
    }

    pub fn relation_to_fields(&self) -> &[String] {
        self.relation_to_fields.as_deref().unwrap_or_default()
    }

    /// A linking field carries a non-empty relation name and gets its own row in the box.
    pub fn is_linking(&self) -> bool {
        self.relation_name().is_some()
    }

    /// True when this field holds the foreign key side of a relation.
    pub fn owns_foreign_key(&self) -> bool {
        !self.relation_from_fields().is_empty()
    }
}

/// A model (table) with its ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    name: String,

    #[serde(default)]
    fields: Vec<Field>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field (builder style).
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields with a relation name, in declaration order.
    pub fn linking_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_linking())
    }
}

/// A materialized datamodel: models plus composite types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datamodel {
    #[serde(default)]
    models: Vec<Model>,

    #[serde(default)]
    types: Vec<Model>,
}

impl Datamodel {
    pub fn new(models: Vec<Model>, types: Vec<Model>) -> Self {
        Self { models, types }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn types(&self) -> &[Model] {
        &self.types
    }

    /// Models and composite types combined, models first.
    ///
    /// Both are drawn the same way, so the renderer treats them as one list.
    pub fn into_model_likes(self) -> Vec<Model> {
        let mut all = self.models;
        all.extend(self.types);
        all
    }
}
