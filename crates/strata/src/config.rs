//! Configuration types for Strata layouts.
//!
//! This module provides configuration structures that control how models are
//! sized and laid out. All types implement [`serde::Deserialize`] with every
//! field defaulted, so a partial document only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Direction override, canvas padding and spacing.
//! - [`NodeConfig`] - Default and label-derived sizes of leaf entities.
//! - [`ContainerConfig`] - The frame a container adds around its children.
//!
//! # Example
//!
//! ```
//! # use strata::config::AppConfig;
//! let config: AppConfig = toml::from_str("[layout]\npadding = 8").unwrap();
//! assert_eq!(config.layout().padding(), 8);
//! assert_eq!(config.layout().layer_spacing(), 60);
//! ```

use serde::Deserialize;

use strata_core::{geometry::Size, model::Entity};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    node: NodeConfig,

    #[serde(default)]
    container: ContainerConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, node: NodeConfig, container: ContainerConfig) -> Self {
        Self {
            layout,
            node,
            container,
        }
    }

    /// Returns the layout section.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the node sizing section.
    pub fn node(&self) -> &NodeConfig {
        &self.node
    }

    /// Returns the container frame section.
    pub fn container(&self) -> &ContainerConfig {
        &self.container
    }

    /// Replaces the direction override of the layout section.
    pub fn with_direction(mut self, direction: Option<String>) -> Self {
        self.layout.direction = direction;
        self
    }
}

/// Canvas padding, spacing and the optional direction override.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Direction override; wins over the model's style when it parses.
    #[serde(default)]
    direction: Option<String>,

    #[serde(default = "default_padding")]
    padding: u32,

    #[serde(default = "default_layer_spacing")]
    layer_spacing: u32,

    #[serde(default = "default_node_spacing")]
    node_spacing: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: None,
            padding: default_padding(),
            layer_spacing: default_layer_spacing(),
            node_spacing: default_node_spacing(),
        }
    }
}

impl LayoutConfig {
    /// Creates a layout section with explicit spacing values.
    pub fn new(padding: u32, layer_spacing: u32, node_spacing: u32) -> Self {
        Self {
            direction: None,
            padding,
            layer_spacing,
            node_spacing,
        }
    }

    /// Returns the configured direction override, if any.
    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }

    /// Outer padding around every scope's canvas.
    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Gap between consecutive layers along the primary axis.
    pub fn layer_spacing(&self) -> u32 {
        self.layer_spacing
    }

    /// Gap between neighbours inside one layer.
    pub fn node_spacing(&self) -> u32 {
        self.node_spacing
    }
}

/// Sizing of leaf entities that declare no explicit size.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    #[serde(default = "default_node_width")]
    default_width: u32,

    #[serde(default = "default_node_height")]
    default_height: u32,

    /// Estimated advance of one label character.
    #[serde(default = "default_char_width")]
    char_width: u32,

    /// Horizontal room added around the estimated label width.
    #[serde(default = "default_label_padding")]
    label_padding: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            default_width: default_node_width(),
            default_height: default_node_height(),
            char_width: default_char_width(),
            label_padding: default_label_padding(),
        }
    }
}

impl NodeConfig {
    /// Returns the size used for synthesized external nodes and the minimum
    /// size of estimated leaves.
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    /// Returns the box size of a leaf entity.
    ///
    /// Explicit dimensions win; otherwise the width is estimated from the
    /// display text and never drops below the default size.
    ///
    /// ```
    /// # use strata::config::NodeConfig;
    /// # use strata_core::{geometry::Size, model::Entity};
    /// let config = NodeConfig::default();
    /// assert_eq!(config.size_for(&Entity::new("db")), Size::new(120, 60));
    ///
    /// let wide = Entity::new("svc").with_label("Notification dispatcher");
    /// assert_eq!(config.size_for(&wide).width(), 23 * 8 + 24);
    ///
    /// let fixed = Entity::new("x").with_size(10, 15);
    /// assert_eq!(config.size_for(&fixed), Size::new(10, 15));
    /// ```
    pub fn size_for(&self, entity: &Entity) -> Size {
        let label_len = u32::try_from(entity.display_text().chars().count()).unwrap_or(u32::MAX);
        let estimated = label_len
            .saturating_mul(self.char_width)
            .saturating_add(self.label_padding);

        Size::new(
            entity
                .width()
                .unwrap_or_else(|| estimated.max(self.default_width)),
            entity.height().unwrap_or(self.default_height),
        )
    }
}

/// The frame a container draws around its child canvas.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerConfig {
    /// Height of the title band above the child canvas.
    #[serde(default = "default_title_margin")]
    title_margin: u32,

    #[serde(default = "default_inner_padding")]
    inner_padding: u32,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            title_margin: default_title_margin(),
            inner_padding: default_inner_padding(),
        }
    }
}

impl ContainerConfig {
    /// Creates a container section.
    pub fn new(title_margin: u32, inner_padding: u32) -> Self {
        Self {
            title_margin,
            inner_padding,
        }
    }

    pub fn title_margin(&self) -> u32 {
        self.title_margin
    }

    pub fn inner_padding(&self) -> u32 {
        self.inner_padding
    }
}

fn default_padding() -> u32 {
    20
}

fn default_layer_spacing() -> u32 {
    60
}

fn default_node_spacing() -> u32 {
    40
}

fn default_node_width() -> u32 {
    120
}

fn default_node_height() -> u32 {
    60
}

fn default_char_width() -> u32 {
    8
}

fn default_label_padding() -> u32 {
    24
}

fn default_title_margin() -> u32 {
    30
}

fn default_inner_padding() -> u32 {
    20
}
