//! Strata - Hierarchical layered layout for architecture diagrams.
//!
//! Takes an architecture model (typed entities, possibly nested, and directed
//! relations between them) and assigns every entity an absolute box and every
//! relation a pair of anchor points, ready for a renderer. Each nesting level
//! is laid out with a layered (Sugiyama-style) pipeline and embedded into its
//! container as a single sized node.

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use strata_core::{direction, geometry, identifier, model};

pub use error::StrataError;

use log::{debug, info, trace};

use config::AppConfig;
use direction::Direction;
use layout::{Composer, DiagramLayout};
use model::Model;

/// Builder for laying out and exporting architecture models.
///
/// # Examples
///
/// ```rust
/// use strata::{LayoutBuilder, config::AppConfig};
///
/// let source = r#"
/// [[entities]]
/// id = "web"
///
/// [[entities]]
/// id = "api"
///
/// [[relations]]
/// from = "web"
/// to = "api"
/// "#;
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let model = builder.parse(source).expect("Failed to parse");
///
/// let layout = builder.layout(&model);
/// assert_eq!(layout.nodes().len(), 2);
///
/// let json = builder.render_json(&model).expect("Failed to render");
/// assert!(json.contains("\"web\""));
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
    direction: Option<Direction>,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Spacing, node sizing and container frame settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            direction: None,
        }
    }

    /// Force the root direction, overriding both configuration and model style.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the root direction used for `model`.
    ///
    /// An explicit direction wins, then the configured override, then the
    /// model's style, then left-to-right.
    pub fn direction_for(&self, model: &Model) -> Direction {
        self.direction.unwrap_or_else(|| {
            Direction::resolve(self.config.layout().direction(), model.style().direction())
        })
    }

    /// Parse a TOML model document.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Model` carrying the source when the document is
    /// not a valid model.
    pub fn parse(&self, source: &str) -> Result<Model, StrataError> {
        info!("Parsing model");

        let model: Model =
            toml::from_str(source).map_err(|err| StrataError::new_model_error(err, source))?;

        debug!(entities = model.entity_count(), relations = model.relations().len(); "Model parsed successfully");
        trace!(model:?; "Parsed model");

        Ok(model)
    }

    /// Lay out a model.
    ///
    /// Layout never fails: unknown relation endpoints become external nodes
    /// and cycles are layered breadth-first.
    pub fn layout(&self, model: &Model) -> DiagramLayout {
        let direction = self.direction_for(model);
        info!(direction:% = direction; "Laying out model");

        let layout = Composer::from_config(&self.config).compose(model, direction);
        info!(width = layout.width(), height = layout.height(); "Layout calculated");
        layout
    }

    /// Lay out a model and render the layout as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Export` if serialization fails.
    pub fn render_json(&self, model: &Model) -> Result<String, StrataError> {
        let layout = self.layout(model);
        let json = export::json::to_string(&layout)?;

        info!("JSON rendered successfully");
        Ok(json)
    }
}
