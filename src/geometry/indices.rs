use crate::error::TextGeometryError;

use super::{INDICES_PER_GLYPH, VERTICES_PER_GLYPH};

/// Largest glyph count whose vertices still fit in 16-bit indices.
pub const MAX_GLYPHS: usize = (u16::MAX as usize + 1) / VERTICES_PER_GLYPH;

/// Two clockwise triangles per quad, `0 1 2` and `2 1 3` relative to the
/// glyph's first vertex (see [`super::vertices`] for the corner numbering).
///
/// Only the glyph count matters here. Counts above [`MAX_GLYPHS`] are rejected
/// instead of letting the indices wrap.
pub fn quad_indices(glyph_count: usize) -> Result<Vec<u16>, TextGeometryError> {
    if glyph_count > MAX_GLYPHS {
        return Err(TextGeometryError::IndexOverflow {
            glyphs: glyph_count,
            max: MAX_GLYPHS,
        });
    }

    let mut indices = Vec::with_capacity(glyph_count * INDICES_PER_GLYPH);
    for glyph in 0..glyph_count {
        // fits: glyph < MAX_GLYPHS, so base + 3 <= u16::MAX
        let base = (glyph * VERTICES_PER_GLYPH) as u16;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }
    Ok(indices)
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_quads() {
        assert_eq!(
            quad_indices(2).unwrap(),
            vec![0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]
        );
    }

    #[test]
    fn test_empty() {
        assert!(quad_indices(0).unwrap().is_empty());
    }

    #[test]
    fn test_count_and_range() {
        for count in [1, 7, 100] {
            let indices = quad_indices(count).unwrap();
            assert_eq!(indices.len(), 6 * count);
            assert!(indices.iter().all(|&i| (i as usize) < 4 * count));
        }
    }

    #[test]
    fn test_limit() {
        let indices = quad_indices(MAX_GLYPHS).unwrap();
        assert_eq!(indices.last().copied(), Some(u16::MAX));

        assert_eq!(
            quad_indices(MAX_GLYPHS + 1),
            Err(TextGeometryError::IndexOverflow {
                glyphs: MAX_GLYPHS + 1,
                max: MAX_GLYPHS,
            })
        );
    }
}
