//! Architecture model types consumed by the layout engine.
//!
//! The model is the already-parsed form of an architecture description: a tree
//! of typed entities plus directed relations whose endpoints are dot-qualified
//! paths (`backend.api`). Producing the model from a description language is
//! the job of an upstream collaborator; every type here is
//! [`serde::Deserialize`] so a model can also be loaded from a data document.
//!
//! # Organization
//!
//! - [`Model`] - The root: entities, relations and document style
//! - [`Style`] - Document-level style metadata relevant to layout
//! - [`element`] - [`Entity`] and [`Relation`]

pub mod element;

pub use element::*;

use serde::Deserialize;

/// Document-level style metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Style {
    /// Layout direction as written in the document (`LR`, `rl`, `top-to-bottom`, ...).
    #[serde(default)]
    direction: Option<String>,
}

impl Style {
    /// Create a style with the given direction string.
    pub fn new(direction: Option<String>) -> Self {
        Self { direction }
    }

    /// Returns the raw direction string, if the document declares one.
    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }
}

/// A complete architecture model: top-level entities, relations and style.
///
/// # Examples
///
/// ```
/// use strata_core::model::{Entity, Model, Relation};
///
/// let model = Model::new(
///     vec![Entity::new("web"), Entity::new("api")],
///     vec![Relation::new("web", "api")],
/// );
/// assert_eq!(model.entities().len(), 2);
/// assert_eq!(model.relations()[0].from(), "web");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Model {
    #[serde(default)]
    entities: Vec<Entity>,

    #[serde(default)]
    relations: Vec<Relation>,

    #[serde(default)]
    style: Style,
}

impl Model {
    /// Create a model from top-level entities and relations with default style.
    pub fn new(entities: Vec<Entity>, relations: Vec<Relation>) -> Self {
        Self {
            entities,
            relations,
            style: Style::default(),
        }
    }

    /// Set the document style (builder style).
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Borrow the top-level entities.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Borrow every relation of the document.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Borrow the document style.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Returns the total number of entities at every nesting depth.
    pub fn entity_count(&self) -> usize {
        fn count(entities: &[Entity]) -> usize {
            entities
                .iter()
                .map(|entity| 1 + count(entity.children()))
                .sum()
        }
        count(&self.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_model_document() {
        let source = r#"
            [style]
            direction = "tb"

            [[entities]]
            id = "web"
            label = "Web App"
            kind = "container"

            [[entities]]
            id = "backend"

            [[entities.children]]
            id = "api"
            width = 140
            height = 70

            [[relations]]
            from = "web"
            to = "backend.api"
            label = "calls"
        "#;

        let model: Model = toml::from_str(source).expect("valid model document");

        assert_eq!(model.style().direction(), Some("tb"));
        assert_eq!(model.entities().len(), 2);
        assert_eq!(model.entity_count(), 3);

        let web = &model.entities()[0];
        assert_eq!(web.id(), "web");
        assert_eq!(web.display_text(), "Web App");
        assert_eq!(web.kind(), Some("container"));

        let backend = &model.entities()[1];
        assert!(backend.is_container());
        let api = &backend.children()[0];
        assert_eq!(api.width(), Some(140));
        assert_eq!(api.height(), Some(70));

        let relation = &model.relations()[0];
        assert_eq!(relation.from(), "web");
        assert_eq!(relation.to(), "backend.api");
        assert_eq!(relation.label(), Some("calls"));
    }

    #[test]
    fn test_empty_document() {
        let model: Model = toml::from_str("").expect("empty document is a valid model");
        assert!(model.entities().is_empty());
        assert!(model.relations().is_empty());
        assert_eq!(model.style().direction(), None);
        assert_eq!(model.entity_count(), 0);
    }
}
