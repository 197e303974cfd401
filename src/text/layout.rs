use euclid::Rect;

use super::LayoutRequest;

/// Unit marker for layout output coordinates. **Y-axis goes down**
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenSpace;

/// Unit marker for atlas texture pixels, origin at the top-left of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AtlasSpace;

/// One glyph slot emitted by the layout engine.
///
/// Whitespace still produces a placement but with an empty atlas rectangle,
/// so consumers can keep character indices stable.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// Quad to draw, in layout coordinates.
    pub screen: Rect<f32, ScreenSpace>,
    /// Source rectangle inside the atlas page.
    pub atlas: Rect<f32, AtlasSpace>,
    /// Atlas page (texture) the glyph lives on.
    pub page: u32,
    /// Visual line the glyph belongs to.
    pub line_index: usize,
    /// Index of the source character in the laid-out text.
    pub index: usize,
}

impl GlyphPlacement {
    /// Creates a placement on page 0 of line 0.
    pub fn new(screen: Rect<f32, ScreenSpace>, atlas: Rect<f32, AtlasSpace>) -> Self {
        Self {
            screen,
            atlas,
            page: 0,
            line_index: 0,
            index: 0,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_line_index(mut self, line_index: usize) -> Self {
        self.line_index = line_index;
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Whether the glyph has any pixels to sample.
    pub fn is_visible(&self) -> bool {
        !self.atlas.is_empty()
    }
}

/// Block-level metrics reported alongside the glyphs.
///
/// Geometry building ignores these; renderers use them to anchor the block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
    pub descender: f32,
    pub ascender: f32,
    pub x_height: f32,
    pub baseline: f32,
    pub cap_height: f32,
    pub line_height: f32,
    pub lines_total: usize,
}

/// Final layout output consumed by [`TextGeometry`](crate::TextGeometry).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextBlock {
    pub glyphs: Vec<GlyphPlacement>,
    pub metrics: TextMetrics,
}

impl TextBlock {
    pub fn new(glyphs: Vec<GlyphPlacement>) -> Self {
        Self {
            glyphs,
            metrics: TextMetrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

/// The text layout engine seen from the geometry side.
///
/// Line breaking, alignment and kerning all happen behind this trait.
pub trait TextLayouter {
    fn layout(&self, request: &LayoutRequest<'_>) -> TextBlock;
}

/// A block that was laid out ahead of time. The request is ignored.
impl TextLayouter for TextBlock {
    fn layout(&self, _request: &LayoutRequest<'_>) -> TextBlock {
        self.clone()
    }
}

impl<F> TextLayouter for F
where
    F: Fn(&LayoutRequest<'_>) -> TextBlock,
{
    fn layout(&self, request: &LayoutRequest<'_>) -> TextBlock {
        self(request)
    }
}
