//! Configuration types for antibody graph layering and layout.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the CLI. Every field has a default, so a partial file (or no
//! file at all) is valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layering and layout settings.
//! - [`LayeringConfig`] - Tunables of the layering passes.
//! - [`LayoutConfig`] - Spacing used by the reference grid layout engine.
//!
//! # Example
//!
//! ```
//! # use abgraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layering().satellite_max_depth(), 5);
//! assert_eq!(config.layering().light_chain_offset(), 0);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layering pass settings.
    #[serde(default)]
    layering: LayeringConfig,

    /// Layout engine settings.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(layering: LayeringConfig, layout: LayoutConfig) -> Self {
        Self { layering, layout }
    }

    /// Returns the layering configuration.
    pub fn layering(&self) -> &LayeringConfig {
        &self.layering
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Tunables of the layering passes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayeringConfig {
    /// Maximum number of connection hops searched from a satellite to a domain.
    satellite_max_depth: usize,

    /// Shift applied to a mirrored light chain relative to its heavy-chain anchor.
    ///
    /// With `0` the aligned light domain shares the anchor layer; `-1` places it
    /// one layer above.
    light_chain_offset: i32,

    /// Group labels longer than this are cut and suffixed with `(..)`.
    group_label_max_len: usize,
}

impl Default for LayeringConfig {
    fn default() -> Self {
        Self {
            satellite_max_depth: 5,
            light_chain_offset: 0,
            group_label_max_len: 20,
        }
    }
}

impl LayeringConfig {
    pub fn satellite_max_depth(&self) -> usize {
        self.satellite_max_depth
    }

    pub fn light_chain_offset(&self) -> i32 {
        self.light_chain_offset
    }

    pub fn group_label_max_len(&self) -> usize {
        self.group_label_max_len
    }

    pub fn with_satellite_max_depth(mut self, depth: usize) -> Self {
        self.satellite_max_depth = depth;
        self
    }

    pub fn with_light_chain_offset(mut self, offset: i32) -> Self {
        self.light_chain_offset = offset;
        self
    }

    pub fn with_group_label_max_len(mut self, len: usize) -> Self {
        self.group_label_max_len = len;
        self
    }
}

/// Spacing of the reference grid layout, in diagram units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between two swimlane columns.
    horizontal_spacing: f32,

    /// Distance between two layers.
    vertical_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 120.0,
            vertical_spacing: 60.0,
        }
    }
}

impl LayoutConfig {
    pub fn new(horizontal_spacing: f32, vertical_spacing: f32) -> Self {
        Self {
            horizontal_spacing,
            vertical_spacing,
        }
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }
}
