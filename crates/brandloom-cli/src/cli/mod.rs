//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `render` - Render a design document to SVG/PNG
//! - `patterns` - List pattern tags
//! - `presets` - List mesh presets
//! - `palette` - Show brand colors and pairs
//! - `defaults` - Print a default design document

pub mod common;
pub mod defaults;
pub mod palette;
pub mod patterns;
pub mod presets;
pub mod render;

pub use defaults::{DefaultsArgs, cmd_defaults};
pub use palette::cmd_palette;
pub use patterns::cmd_patterns;
pub use presets::{PresetsArgs, cmd_presets};
pub use render::{RenderArgs, cmd_render};
