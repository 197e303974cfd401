use crate::text::GlyphPlacement;

/// Drops glyphs without atlas pixels (spaces, control characters).
///
/// Layout order is kept because it fixes the vertex numbering of every quad.
pub fn visible_glyphs<'a>(
    glyphs: impl IntoIterator<Item = &'a GlyphPlacement>,
) -> Vec<GlyphPlacement> {
    glyphs
        .into_iter()
        .filter(|glyph| glyph.is_visible())
        .cloned()
        .collect()
}
