/// Axis-aligned box and bounding circle over the position buffer.
pub mod bounds;
/// Whitespace removal ahead of buffer construction.
pub mod filter;
/// Triangulation of glyph quads.
pub mod indices;
/// Position, texture coordinate and page buffers.
pub mod vertices;

use parking_lot::Mutex;

use crate::{
    error::TextGeometryError,
    options::{DEFAULT_TAB_SIZE, TextGeometryOptions},
    text::{GlyphPlacement, LayoutRequest, TextBlock, TextLayouter, TextMetrics},
};

pub use bounds::{BoundingBox, BoundingSphere, compute_bounding_box, compute_bounding_sphere};
pub use filter::visible_glyphs;
pub use indices::{MAX_GLYPHS, quad_indices};

pub const VERTICES_PER_GLYPH: usize = 4;
pub const INDICES_PER_GLYPH: usize = 6;

/// Attribute arrays produced for one layout.
///
/// `page` is `None` unless multi-page mode is on. Its absence is what tells a
/// renderer to use the single-texture shader.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphBuffers {
    pub position: Vec<[f32; 2]>,
    pub uv: Vec<[f32; 2]>,
    pub page: Option<Vec<u32>>,
    pub index: Vec<u16>,
}

impl GlyphBuffers {
    /// Builds every buffer for an already filtered glyph list.
    pub fn build(
        glyphs: &[GlyphPlacement],
        atlas_size: [u32; 2],
        flip_y: bool,
        multipage: bool,
    ) -> Result<Self, TextGeometryError> {
        // the index buffer is the only fallible part, build it first
        let index = indices::quad_indices(glyphs.len())?;

        Ok(Self {
            position: vertices::positions(glyphs),
            uv: vertices::uvs(glyphs, atlas_size, flip_y),
            page: multipage.then(|| vertices::pages(glyphs)),
            index,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.position.len()
    }
}

#[derive(Default)]
struct BoundsCache {
    bounding_box: Option<BoundingBox>,
    bounding_sphere: Option<BoundingSphere>,
}

/// Text block geometry: glyph quads as GPU-ready buffers.
///
/// The geometry keeps the options it was created with as defaults. Each
/// [`update`](Self::update) merges new options over them, asks the layouter
/// for a fresh [`TextBlock`], and replaces every buffer at once. Bounds are
/// computed lazily and dropped on every successful update.
///
/// The bounds cache sits behind a `Mutex` so it can be filled through `&self`.
pub struct TextGeometry<L> {
    layouter: L,
    defaults: TextGeometryOptions,

    layout: TextBlock,
    visible_glyphs: Vec<GlyphPlacement>,
    buffers: GlyphBuffers,

    bounds: Mutex<BoundsCache>,
}

impl<L: TextLayouter> TextGeometry<L> {
    /// Stores `defaults` and builds the geometry once.
    pub fn new(
        layouter: L,
        defaults: impl Into<TextGeometryOptions>,
    ) -> Result<Self, TextGeometryError> {
        let mut geometry = Self::with_defaults(layouter, defaults);
        geometry.update(TextGeometryOptions::default())?;
        Ok(geometry)
    }

    /// Stores `defaults` without building anything. All buffers start empty.
    pub fn with_defaults(layouter: L, defaults: impl Into<TextGeometryOptions>) -> Self {
        Self {
            layouter,
            defaults: defaults.into(),
            layout: TextBlock::default(),
            visible_glyphs: Vec::new(),
            buffers: GlyphBuffers::default(),
            bounds: Mutex::new(BoundsCache::default()),
        }
    }

    /// Re-runs layout and rebuilds every buffer.
    ///
    /// `options` override the construction-time defaults for this call only. A
    /// plain string updates just the text. On error nothing is changed.
    pub fn update(
        &mut self,
        options: impl Into<TextGeometryOptions>,
    ) -> Result<(), TextGeometryError> {
        let options = options.into().merged_over(&self.defaults);

        let Some(font) = options.font.as_deref() else {
            return Err(TextGeometryError::MissingFont);
        };

        let [width, height] = font.atlas_size();
        if width == 0 || height == 0 {
            return Err(TextGeometryError::InvalidAtlasSize { width, height });
        }

        let request = LayoutRequest {
            text: options.text.as_deref().unwrap_or_default(),
            font,
            width: options.width,
            align: options.align.unwrap_or_default(),
            letter_spacing: options.letter_spacing.unwrap_or(0.0),
            line_height: options
                .line_height
                .unwrap_or(font.common.line_height as f32),
            tab_size: options.tab_size.unwrap_or(DEFAULT_TAB_SIZE),
            wrap_style: options.wrap_style.unwrap_or_default(),
        };

        let layout = self.layouter.layout(&request);
        let visible = filter::visible_glyphs(&layout.glyphs);
        let buffers = GlyphBuffers::build(
            &visible,
            font.atlas_size(),
            options.flip_y_or_default(),
            options.multipage_or_default(),
        )?;

        log::debug!(
            "Text geometry rebuilt: {} of {} glyphs visible, {} vertices{}.",
            visible.len(),
            layout.glyphs.len(),
            buffers.vertex_count(),
            if buffers.page.is_some() { ", multipage" } else { "" }
        );

        // install everything together
        self.layout = layout;
        self.visible_glyphs = visible;
        self.buffers = buffers;
        *self.bounds.get_mut() = BoundsCache::default();

        Ok(())
    }
}

/// buffers
impl<L> TextGeometry<L> {
    pub fn buffers(&self) -> &GlyphBuffers {
        &self.buffers
    }

    /// Two components per vertex.
    pub fn positions(&self) -> &[[f32; 2]] {
        &self.buffers.position
    }

    /// Positions as a flat `x, y, x, y, ...` slice.
    pub fn position_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.buffers.position)
    }

    /// Two components per vertex.
    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.buffers.uv
    }

    /// Texture coordinates as a flat `u, v, u, v, ...` slice.
    pub fn uv_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.buffers.uv)
    }

    /// One page per vertex, `None` when multi-page mode is off.
    pub fn pages(&self) -> Option<&[u32]> {
        self.buffers.page.as_deref()
    }

    pub fn indices(&self) -> &[u16] {
        &self.buffers.index
    }

    pub fn is_multipage(&self) -> bool {
        self.buffers.page.is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.buffers.index.len()
    }
}

/// layout
impl<L> TextGeometry<L> {
    /// Glyphs that produced quads, in buffer order.
    ///
    /// Glyph `i` owns vertices `4 * i .. 4 * i + 4`.
    pub fn visible_glyphs(&self) -> &[GlyphPlacement] {
        &self.visible_glyphs
    }

    /// The full layout from the last update, whitespace included.
    pub fn layout(&self) -> &TextBlock {
        &self.layout
    }

    pub fn metrics(&self) -> &TextMetrics {
        &self.layout.metrics
    }

    pub fn defaults(&self) -> &TextGeometryOptions {
        &self.defaults
    }

    pub fn layouter(&self) -> &L {
        &self.layouter
    }
}

/// bounds
impl<L> TextGeometry<L> {
    /// Cached bounding box, computed on first use after an update.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut cache = self.bounds.lock();
        *cache
            .bounding_box
            .get_or_insert_with(|| bounds::compute_bounding_box(&self.buffers.position))
    }

    /// Cached bounding sphere, computed on first use after an update.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        let mut cache = self.bounds.lock();
        *cache
            .bounding_sphere
            .get_or_insert_with(|| bounds::compute_bounding_sphere(&self.buffers.position))
    }

    /// Recomputes the bounding box and refreshes the cache.
    pub fn compute_bounding_box(&self) -> BoundingBox {
        let bbox = bounds::compute_bounding_box(&self.buffers.position);
        self.bounds.lock().bounding_box = Some(bbox);
        bbox
    }

    /// Recomputes the bounding sphere and refreshes the cache.
    pub fn compute_bounding_sphere(&self) -> BoundingSphere {
        let sphere = bounds::compute_bounding_sphere(&self.buffers.position);
        self.bounds.lock().bounding_sphere = Some(sphere);
        sphere
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use euclid::{point2, rect};

    use super::*;
    use crate::font::BitmapFont;

    fn hi_block() -> TextBlock {
        // "H i" with a space between, laid out on one line
        TextBlock::new(vec![
            GlyphPlacement::new(rect(0.0, 0.0, 10.0, 10.0), rect(0.0, 0.0, 10.0, 10.0)),
            GlyphPlacement::new(rect(10.0, 0.0, 4.0, 10.0), rect(0.0, 0.0, 0.0, 0.0))
                .with_index(1),
            GlyphPlacement::new(rect(14.0, 0.0, 10.0, 10.0), rect(10.0, 0.0, 10.0, 10.0))
                .with_index(2),
        ])
    }

    fn font() -> Arc<BitmapFont> {
        Arc::new(BitmapFont::new(20, 10))
    }

    #[test]
    fn test_hi_scenario() {
        let geometry = TextGeometry::new(
            hi_block(),
            TextGeometryOptions::new().text("H i").font(font()).flip_y(false),
        )
        .unwrap();

        assert_eq!(geometry.visible_glyphs().len(), 2);
        assert_eq!(
            geometry.visible_glyphs().iter().map(|g| g.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(
            geometry.position_data(),
            &[
                0.0, 0.0, 10.0, 0.0, 0.0, 10.0, 10.0, 10.0, //
                14.0, 0.0, 24.0, 0.0, 14.0, 10.0, 24.0, 10.0,
            ]
        );
        assert_eq!(
            geometry.uv_data(),
            &[
                0.0, 0.0, 0.5, 0.0, 0.0, 1.0, 0.5, 1.0, //
                0.5, 0.0, 1.0, 0.0, 0.5, 1.0, 1.0, 1.0,
            ]
        );
        assert_eq!(geometry.indices(), &[0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]);
        assert_eq!(geometry.pages(), None);
    }

    #[test]
    fn test_buffer_cardinality() {
        let geometry =
            TextGeometry::new(hi_block(), TextGeometryOptions::new().font(font())).unwrap();
        let n = geometry.visible_glyphs().len();
        assert_eq!(geometry.position_data().len(), 8 * n);
        assert_eq!(geometry.uv_data().len(), 8 * n);
        assert_eq!(geometry.index_count(), 6 * n);
        assert!(geometry.indices().iter().all(|&i| (i as usize) < 4 * n));
    }

    #[test]
    fn test_flip_y_is_default() {
        let flipped =
            TextGeometry::new(hi_block(), TextGeometryOptions::new().font(font())).unwrap();
        let plain = TextGeometry::new(
            hi_block(),
            TextGeometryOptions::new().font(font()).flip_y(false),
        )
        .unwrap();

        assert_eq!(flipped.positions(), plain.positions());
        for (a, b) in plain.uvs().iter().zip(flipped.uvs()) {
            assert_eq!(a[0], b[0]);
            assert_eq!(b[1], 1.0 - a[1]);
        }
    }

    #[test]
    fn test_multipage_toggle() {
        let block = TextBlock::new(vec![
            GlyphPlacement::new(rect(0.0, 0.0, 8.0, 8.0), rect(0.0, 0.0, 8.0, 8.0)).with_page(2),
        ]);
        let mut geometry = TextGeometry::new(
            block,
            TextGeometryOptions::new().font(font()).multipage(true),
        )
        .unwrap();

        assert!(geometry.is_multipage());
        assert_eq!(geometry.pages(), Some(&[2, 2, 2, 2][..]));

        geometry
            .update(TextGeometryOptions::new().multipage(false))
            .unwrap();
        assert!(!geometry.is_multipage());
        assert_eq!(geometry.pages(), None);

        // the default still applies when the override is not given
        geometry.update("again").unwrap();
        assert_eq!(geometry.pages().map(<[u32]>::len), Some(4));
    }

    #[test]
    fn test_missing_font_keeps_previous_state() {
        let mut geometry = TextGeometry::with_defaults(hi_block(), "H i");
        assert_eq!(geometry.vertex_count(), 0);
        assert_eq!(geometry.update("H i"), Err(TextGeometryError::MissingFont));
        assert_eq!(geometry.vertex_count(), 0);

        geometry
            .update(TextGeometryOptions::new().font(font()))
            .unwrap();
        let before = geometry.buffers().clone();

        // the font given above was a per-call override, not a default
        assert_eq!(geometry.update("H i"), Err(TextGeometryError::MissingFont));
        assert_eq!(geometry.buffers(), &before);
        assert_eq!(geometry.visible_glyphs().len(), 2);
    }

    #[test]
    fn test_index_overflow_keeps_previous_state() {
        let glyph_count = Cell::new(1);
        let layouter = |_: &LayoutRequest<'_>| {
            TextBlock::new(
                (0..glyph_count.get())
                    .map(|i| {
                        GlyphPlacement::new(
                            rect(i as f32, 0.0, 1.0, 1.0),
                            rect(0.0, 0.0, 1.0, 1.0),
                        )
                        .with_index(i)
                    })
                    .collect(),
            )
        };

        let mut geometry =
            TextGeometry::new(&layouter, TextGeometryOptions::new().font(font())).unwrap();
        let before = geometry.buffers().clone();
        let bbox = geometry.bounding_box();
        assert_eq!(geometry.vertex_count(), 4);

        glyph_count.set(MAX_GLYPHS + 1);
        assert_eq!(
            geometry.update("overflow"),
            Err(TextGeometryError::IndexOverflow {
                glyphs: MAX_GLYPHS + 1,
                max: MAX_GLYPHS,
            })
        );

        assert_eq!(geometry.buffers(), &before);
        assert_eq!(geometry.vertex_count(), 4);
        assert_eq!(geometry.visible_glyphs().len(), 1);
        assert_eq!(geometry.layout().glyphs.len(), 1);
        assert_eq!(geometry.bounding_box(), bbox);
    }

    #[test]
    fn test_invalid_atlas_size() {
        let result = TextGeometry::new(
            hi_block(),
            TextGeometryOptions::new().font(BitmapFont::new(0, 64)),
        );
        assert!(matches!(
            result,
            Err(TextGeometryError::InvalidAtlasSize { width: 0, height: 64 })
        ));
    }

    #[test]
    fn test_empty_text() {
        let geometry = TextGeometry::new(
            |_: &LayoutRequest<'_>| TextBlock::default(),
            TextGeometryOptions::new().font(font()).multipage(true),
        )
        .unwrap();

        assert!(geometry.positions().is_empty());
        assert!(geometry.uvs().is_empty());
        assert!(geometry.indices().is_empty());
        assert_eq!(geometry.pages(), Some(&[][..]));
        assert!(geometry.bounding_box().is_empty());
        assert_eq!(geometry.bounding_sphere(), BoundingSphere::default());
    }

    #[test]
    fn test_layout_request_uses_merged_options() {
        let seen = Cell::new(None);
        let layouter = |request: &LayoutRequest<'_>| {
            seen.set(Some((
                request.text.to_string(),
                request.width,
                request.line_height,
                request.tab_size,
            )));
            TextBlock::default()
        };

        let mut font = BitmapFont::new(64, 64);
        font.common.line_height = 32;

        let mut geometry = TextGeometry::new(
            &layouter,
            TextGeometryOptions::new().text("first").font(font).width(120.0),
        )
        .unwrap();
        assert_eq!(
            seen.take(),
            Some(("first".to_string(), Some(120.0), 32.0, DEFAULT_TAB_SIZE))
        );

        geometry.update("second").unwrap();
        assert_eq!(
            seen.take(),
            Some(("second".to_string(), Some(120.0), 32.0, DEFAULT_TAB_SIZE))
        );
    }

    #[test]
    fn test_bounds_follow_updates() {
        let wide = TextBlock::new(vec![GlyphPlacement::new(
            rect(0.0, 0.0, 30.0, 40.0),
            rect(0.0, 0.0, 4.0, 4.0),
        )]);
        let narrow = TextBlock::new(vec![GlyphPlacement::new(
            rect(10.0, 10.0, 6.0, 8.0),
            rect(0.0, 0.0, 4.0, 4.0),
        )]);

        let current = Cell::new(true);
        let layouter = |_: &LayoutRequest<'_>| {
            if current.get() { wide.clone() } else { narrow.clone() }
        };

        let mut geometry =
            TextGeometry::new(&layouter, TextGeometryOptions::new().font(font())).unwrap();

        let bbox = geometry.bounding_box();
        assert_eq!(bbox.max, point2(30.0, 40.0));
        assert_relative_eq!(geometry.bounding_sphere().radius, 25.0);

        current.set(false);
        geometry.update(TextGeometryOptions::default()).unwrap();

        let bbox = geometry.bounding_box();
        assert_eq!(bbox.min, point2(10.0, 10.0));
        assert_eq!(bbox.max, point2(16.0, 18.0));
        let sphere = geometry.bounding_sphere();
        assert_eq!(sphere.center, point2(13.0, 14.0));
        assert_relative_eq!(sphere.radius, 5.0);

        assert_eq!(geometry.compute_bounding_box(), bbox);
        assert_eq!(geometry.compute_bounding_sphere(), sphere);
    }
}
