use euclid::{Box2D, Point2D, Size2D, point2};

use crate::text::ScreenSpace;

/// Axis-aligned bounds of the position buffer.
///
/// The empty state (`min = +inf`, `max = -inf`) is distinct from the
/// zero-sized box of a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point2D<f32, ScreenSpace>,
    pub max: Point2D<f32, ScreenSpace>,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: point2(f32::INFINITY, f32::INFINITY),
            max: point2(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    /// Grows the box to contain `point`.
    pub fn expand_by_point(&mut self, point: Point2D<f32, ScreenSpace>) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Zero for the empty box.
    pub fn size(&self) -> Size2D<f32, ScreenSpace> {
        if self.is_empty() {
            Size2D::zero()
        } else {
            (self.max - self.min).to_size()
        }
    }

    pub fn center(&self) -> Option<Point2D<f32, ScreenSpace>> {
        (!self.is_empty()).then(|| self.min.lerp(self.max, 0.5))
    }

    pub fn to_box2d(&self) -> Option<Box2D<f32, ScreenSpace>> {
        (!self.is_empty()).then(|| Box2D::new(self.min, self.max))
    }
}

/// Circle enclosing the position buffer.
///
/// Empty input gives the origin with radius 0 rather than the box's empty
/// state, so consumers never see infinities here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Point2D<f32, ScreenSpace>,
    pub radius: f32,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self {
            center: Point2D::origin(),
            radius: 0.0,
        }
    }
}

/// Box over every finite position.
///
/// Points with a NaN or infinite coordinate are skipped with a warning, so the
/// result does not depend on where they sit in the buffer.
pub fn compute_bounding_box(positions: &[[f32; 2]]) -> BoundingBox {
    let (bbox, skipped) = finite_bounds(positions);
    if skipped > 0 {
        log::warn!(
            "Skipped {} of {} positions with non-finite coordinates while computing the bounding box.",
            skipped,
            positions.len()
        );
    }
    bbox
}

/// Folds the finite points, returning the box and the number skipped.
fn finite_bounds(positions: &[[f32; 2]]) -> (BoundingBox, usize) {
    let mut bbox = BoundingBox::empty();
    let mut skipped = 0;
    for &[x, y] in positions {
        if x.is_finite() && y.is_finite() {
            bbox.expand_by_point(point2(x, y));
        } else {
            skipped += 1;
        }
    }
    (bbox, skipped)
}

/// Centered on the bounding box, radius is half its diagonal.
///
/// Non-finite coordinates are reported with a warning and yield the default
/// sphere.
pub fn compute_bounding_sphere(positions: &[[f32; 2]]) -> BoundingSphere {
    if positions.is_empty() {
        return BoundingSphere::default();
    }

    let (bbox, skipped) = finite_bounds(positions);
    let size = bbox.max - bbox.min;
    let radius = size.length() / 2.0;

    if skipped > 0 || !radius.is_finite() {
        log::warn!(
            "Computed bounding sphere radius is not finite ({}). The position buffer likely contains NaN or infinite values.",
            radius
        );
        return BoundingSphere::default();
    }

    BoundingSphere {
        center: bbox.min + size / 2.0,
        radius,
    }
}
