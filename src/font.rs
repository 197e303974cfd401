/// Subset of a BMFont descriptor needed to build text geometry.
///
/// Parsing `.fnt` files is left to the caller; only the `common` block and the
/// page file names are kept here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BitmapFont {
    pub common: FontCommon,
    /// Atlas texture file names, indexed by glyph page.
    pub pages: Vec<String>,
}

/// The BMFont `common` block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FontCommon {
    pub line_height: u32,
    pub base: u32,
    /// Atlas width in pixels.
    pub scale_w: u32,
    /// Atlas height in pixels.
    pub scale_h: u32,
    /// Number of atlas pages.
    pub pages: u32,
}

impl BitmapFont {
    /// Creates a single-page font descriptor for an atlas of the given size.
    pub fn new(scale_w: u32, scale_h: u32) -> Self {
        Self {
            common: FontCommon {
                scale_w,
                scale_h,
                pages: 1,
                ..Default::default()
            },
            pages: vec![],
        }
    }

    /// Atlas size in pixels as `[width, height]`.
    pub fn atlas_size(&self) -> [u32; 2] {
        [self.common.scale_w, self.common.scale_h]
    }
}
