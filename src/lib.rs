//! # bmtext
//!
//! Bitmap font text geometry for GPU rendering.
//!
//! ## Overview
//!
//! `bmtext` turns a laid-out block of bitmap font glyphs into the flat buffers a
//! GPU draw call needs: quad positions, atlas texture coordinates, an optional
//! per-vertex page index for multi-texture fonts, and 16-bit triangle indices.
//! The center of the library is [`TextGeometry`], which re-runs layout and
//! rebuilds all buffers whenever the text or its options change.
//!
//! Layout itself is not done here. Any [`TextLayouter`] works, including a
//! closure or a precomputed [`TextBlock`].
//!
//! ## Usage
//!
//! ```rust
//! use bmtext::{
//!     BitmapFont, GlyphPlacement, TextBlock, TextGeometry, TextGeometryOptions,
//!     euclid::rect,
//!     shader::{ShaderOptions, basic_shader},
//! };
//!
//! // 1. Lay out the text (normally done by a BMFont layout engine)
//! let block = TextBlock::new(vec![
//!     GlyphPlacement::new(rect(0.0, 0.0, 10.0, 10.0), rect(0.0, 0.0, 10.0, 10.0)),
//!     GlyphPlacement::new(rect(10.0, 0.0, 10.0, 10.0), rect(10.0, 0.0, 10.0, 10.0)),
//! ]);
//!
//! // 2. Build the geometry
//! let geometry = TextGeometry::new(
//!     block,
//!     TextGeometryOptions::new().text("Hi").font(BitmapFont::new(20, 10)),
//! )?;
//! assert_eq!(geometry.indices(), &[0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]);
//!
//! // 3. Generate a matching shader
//! let shader = basic_shader::<()>(&ShaderOptions::default(), None);
//! assert!(shader.fragment_shader.contains("sampler2D map"));
//! # Ok::<(), bmtext::TextGeometryError>(())
//! ```
//!
//! ## Features
//!
//! *   **Multi-page fonts**: per-vertex page indices and a branch-per-page shader.
//! *   **Distance fields**: SDF and MSDF fragment shaders.
//! *   **Lazy bounds**: bounding box and circle cached until the next update.
//! *   **wgpu** (feature `wgpu`): buffer upload, vertex layouts and a uniform block.

pub mod error;
pub mod font;
pub mod geometry;
pub mod options;
pub mod shader;
pub mod text;
#[cfg(feature = "wgpu")]
pub mod wgpu_buffers;

// common re-exports
pub use error::TextGeometryError;
pub use font::{BitmapFont, FontCommon};
pub use geometry::{BoundingBox, BoundingSphere, GlyphBuffers, TextGeometry};
pub use options::TextGeometryOptions;
pub use text::{GlyphPlacement, LayoutRequest, TextBlock, TextLayouter, TextMetrics};

// re-export dependencies
pub use euclid;
pub use palette;
pub use parking_lot;

#[cfg(feature = "wgpu")]
pub use wgpu;
