//! Per-vertex attribute builders.
//!
//! Every glyph quad contributes four vertices in this order, y pointing down:
//!
//! ```text
//! 0 ---- 1
//! |      |
//! 2 ---- 3
//! ```
//!
//! [`super::indices::quad_indices`] triangulates with the same numbering.

use crate::text::GlyphPlacement;

use super::VERTICES_PER_GLYPH;

/// Screen-space quad corners of every glyph.
pub fn positions(glyphs: &[GlyphPlacement]) -> Vec<[f32; 2]> {
    let mut out = Vec::with_capacity(glyphs.len() * VERTICES_PER_GLYPH);
    for glyph in glyphs {
        let min = glyph.screen.min();
        let max = glyph.screen.max();
        out.extend_from_slice(&[
            [min.x, min.y],
            [max.x, min.y],
            [min.x, max.y],
            [max.x, max.y],
        ]);
    }
    out
}

/// Atlas texture coordinates of every glyph corner.
///
/// Atlas pixels are normalized by `atlas_size`. With `flip_y` each V becomes
/// `1 - v`, for atlases uploaded with a bottom-left origin.
pub fn uvs(glyphs: &[GlyphPlacement], atlas_size: [u32; 2], flip_y: bool) -> Vec<[f32; 2]> {
    let tex_width = atlas_size[0] as f32;
    let tex_height = atlas_size[1] as f32;

    let v = |y: f32| {
        let v = y / tex_height;
        if flip_y { 1.0 - v } else { v }
    };

    let mut out = Vec::with_capacity(glyphs.len() * VERTICES_PER_GLYPH);
    for glyph in glyphs {
        let min = glyph.atlas.min();
        let max = glyph.atlas.max();

        let u0 = min.x / tex_width;
        let u1 = max.x / tex_width;
        let v0 = v(min.y);
        let v1 = v(max.y);

        out.extend_from_slice(&[[u0, v0], [u1, v0], [u0, v1], [u1, v1]]);
    }
    out
}

/// Page index of every vertex, for multi-texture fonts.
pub fn pages(glyphs: &[GlyphPlacement]) -> Vec<u32> {
    glyphs
        .iter()
        .flat_map(|glyph| [glyph.page; VERTICES_PER_GLYPH])
        .collect()
}
