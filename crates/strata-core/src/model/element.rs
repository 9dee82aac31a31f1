//! Model element types: entities and relations.

use serde::Deserialize;

use crate::identifier::{Id, PATH_SEPARATOR};

/// A typed architecture entity (system, container, component, person, ...).
///
/// Entities may contain child entities; a container's children form their own
/// nesting scope that is laid out independently and then embedded.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    id: Id,

    #[serde(default)]
    label: Option<String>,

    #[serde(default)]
    kind: Option<String>,

    #[serde(default)]
    width: Option<u32>,

    #[serde(default)]
    height: Option<u32>,

    /// Direction used for this entity's own children, when it differs from the parent scope.
    #[serde(default)]
    direction: Option<String>,

    #[serde(default)]
    children: Vec<Entity>,
}

impl Entity {
    /// Create a leaf entity with the given id.
    pub fn new(id: &str) -> Self {
        Self {
            id: Id::new(id),
            label: None,
            kind: None,
            width: None,
            height: None,
            direction: None,
            children: Vec::new(),
        }
    }

    /// Set the display label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the entity kind (builder style).
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set an explicit box size (builder style).
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the direction for this entity's children (builder style).
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Set the child entities (builder style).
    pub fn with_children(mut self, children: Vec<Entity>) -> Self {
        self.children = children;
        self
    }

    /// Get the entity identifier, unique within its scope.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the entity kind, if declared.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Get the label, if declared.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the display text for this entity
    /// Uses the label if present, otherwise falls back to the identifier
    pub fn display_text(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.id.to_string())
    }

    /// Get the explicit width, if declared.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Get the explicit height, if declared.
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Get the direction override for this entity's children, if declared.
    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }

    /// Borrow the child entities.
    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    /// Returns true if this entity has children of its own.
    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true if an entity with `id` is nested anywhere below this entity.
    pub fn contains_descendant(&self, id: Id) -> bool {
        self.children
            .iter()
            .any(|child| child.id == id || child.contains_descendant(id))
    }
}

/// A directed relation between two entities, addressed by qualified paths.
#[derive(Debug, Clone, Deserialize)]
pub struct Relation {
    from: String,
    to: String,

    #[serde(default)]
    label: Option<String>,
}

impl Relation {
    /// Create a relation between two dot-qualified endpoint paths.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    /// Set the relation label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the source endpoint path.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Get the target endpoint path.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Get the relation label, if declared.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Splits a dot-qualified path into its non-empty segments.
///
/// ```
/// use strata_core::model::path_segments;
///
/// let segments: Vec<_> = path_segments("backend.api.handler").collect();
/// assert_eq!(segments, ["backend", "api", "handler"]);
/// ```
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}
