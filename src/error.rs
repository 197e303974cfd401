/// Errors that abort a [`TextGeometry::update`](crate::TextGeometry::update).
///
/// A failed update leaves the previously installed buffers untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextGeometryError {
    #[error("must specify a font in the text geometry options")]
    MissingFont,

    #[error("font atlas size must be non-zero (got {width}x{height})")]
    InvalidAtlasSize { width: u32, height: u32 },

    #[error("{glyphs} visible glyphs exceed the 16-bit index limit of {max} glyphs")]
    IndexOverflow { glyphs: usize, max: usize },
}
