//! # brandloom
//!
//! Deterministic brand pattern generation.
//!
//! Every generator is a pure function of a typed parameter record and a
//! [`GlobalState`] snapshot, returning an immutable [`Scene`]. The export
//! module turns a scene into a standalone SVG document or an RGBA bitmap.
//!
//! ```
//! use brandloom::{generate, GlobalState, PatternParams, PatternTag};
//!
//! let globals = GlobalState::with_canvas(400.0, 300.0, 20.0);
//! let scene = generate(&PatternParams::defaults_for(PatternTag::VerticalBars), &globals);
//! let svg = brandloom::export::serialize(&scene).unwrap();
//! assert!(svg.contains("<rect"));
//! ```

pub mod color;
pub mod context;
pub mod density;
pub mod error;
pub mod export;
pub mod geometry;
pub mod mesh;
pub mod palette;
pub mod patterns;
pub mod rng;
pub mod scene;

// Re-export common types at crate root for convenience.
pub use color::{Color, interpolate};
pub use context::{BrandPair, CanvasSpec, DimensionPreset, GlobalState};
pub use density::DensityCurve;
pub use error::{BrandloomError, BrandloomResult};
pub use geometry::{Point, Rect};
pub use mesh::{ColorPin, MeshVariant, Pins};
pub use patterns::{PatternParams, PatternTag, generate, generate_strict};
pub use rng::Mulberry32;
pub use scene::{Node, Scene, SceneStats};
