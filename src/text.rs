/// Request handed to the layout engine.
pub mod request;
/// Glyph placements and block metrics returned by the layout engine.
pub mod layout;

pub use layout::{AtlasSpace, GlyphPlacement, ScreenSpace, TextBlock, TextLayouter, TextMetrics};
pub use request::{HorizontalAlign, LayoutRequest, WrapStyle};
