//! Geometric primitives for detected regions.
//!
//! [`BBox`] is the axis-aligned rectangle reported by the detector. All
//! operations are pure; a box with inverted or collapsed corners is still
//! representable so that callers can report it instead of silently clamping.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum fraction of a child's own area that must lie inside a parent
/// for the parent to contain it.
pub const CONTAINMENT_OVERLAP_THRESHOLD: f64 = 0.6;

/// Reasons a [`BBox`] cannot take part in containment tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("inverted box {0}: max corner lies before min corner")]
    Inverted(BBox),

    #[error("degenerate box {0}: area is zero")]
    Degenerate(BBox),
}

/// A point in the shared pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }
}

/// Width and height of a box, in pixels.
///
/// Wider than the corner coordinates so that any pair of `i32` corners fits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    width: i64,
    height: i64,
}

impl Size {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> i64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> i64 {
        self.height
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_degenerate(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// An axis-aligned bounding box given by its top-left `(x1, y1)` and
/// bottom-right `(x2, y2)` corners.
///
/// Serialized as the four-element array `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BBox {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl BBox {
    /// Creates a box from its corner coordinates without validating them.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn x1(self) -> i32 {
        self.x1
    }

    pub fn y1(self) -> i32 {
        self.y1
    }

    pub fn x2(self) -> i32 {
        self.x2
    }

    pub fn y2(self) -> i32 {
        self.y2
    }

    /// Returns the width of the box; negative for inverted boxes
    pub fn width(self) -> i64 {
        i64::from(self.x2) - i64::from(self.x1)
    }

    /// Returns the height of the box; negative for inverted boxes
    pub fn height(self) -> i64 {
        i64::from(self.y2) - i64::from(self.y1)
    }

    pub fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns `(x2 - x1) * (y2 - y1)`.
    ///
    /// The result is not clamped: zero marks a degenerate box and a negative
    /// value marks a box inverted along one axis. Use [`BBox::validate`] to
    /// reject boxes inverted along both. Saturates at the `i64` bounds, which
    /// only boxes spanning most of the `i32` range reach.
    pub fn area(self) -> i64 {
        self.width().saturating_mul(self.height())
    }

    /// Returns the center point `((x1 + x2) / 2, (y1 + y2) / 2)`.
    pub fn center(self) -> Point {
        Point::new(
            (f64::from(self.x1) + f64::from(self.x2)) / 2.0,
            (f64::from(self.y1) + f64::from(self.y2)) / 2.0,
        )
    }

    /// Checks that the box can take part in containment tests.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Inverted`] when a max corner precedes its min
    /// corner, and [`GeometryError::Degenerate`] when the area is zero.
    pub fn validate(self) -> Result<(), GeometryError> {
        if self.x2 < self.x1 || self.y2 < self.y1 {
            return Err(GeometryError::Inverted(self));
        }
        if self.area() == 0 {
            return Err(GeometryError::Degenerate(self));
        }
        Ok(())
    }

    /// Returns true if `point` lies inside the closed rectangle.
    pub fn contains_point(self, point: Point) -> bool {
        f64::from(self.x1) <= point.x()
            && point.x() <= f64::from(self.x2)
            && f64::from(self.y1) <= point.y()
            && point.y() <= f64::from(self.y2)
    }

    /// Returns the area of the overlap rectangle, or 0 when the boxes are
    /// disjoint.
    pub fn intersection_area(self, other: BBox) -> i64 {
        let left = self.x1.max(other.x1);
        let top = self.y1.max(other.y1);
        let right = self.x2.min(other.x2);
        let bottom = self.y2.min(other.y2);

        if right < left || bottom < top {
            return 0;
        }

        let width = i64::from(right) - i64::from(left);
        let height = i64::from(bottom) - i64::from(top);
        width.saturating_mul(height)
    }

    /// Fraction of this box's own area that lies inside `reference`.
    ///
    /// Returns `0.0` when this box has no positive area.
    pub fn overlap_fraction_of(self, reference: BBox) -> f64 {
        let area = self.area();
        if area <= 0 {
            return 0.0;
        }
        self.intersection_area(reference) as f64 / area as f64
    }

    /// Returns true if this box is a valid parent for `child`.
    ///
    /// All three must hold:
    /// 1. the child's center lies inside this box (edges included);
    /// 2. this box is strictly larger than the child;
    /// 3. more than [`CONTAINMENT_OVERLAP_THRESHOLD`] of the child's own area
    ///    overlaps this box.
    pub fn contains(self, child: BBox) -> bool {
        self.contains_point(child.center())
            && self.area() > child.area()
            && child.overlap_fraction_of(self) > CONTAINMENT_OVERLAP_THRESHOLD
    }
}

impl From<[i32; 4]> for BBox {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<BBox> for [i32; 4] {
    fn from(bbox: BBox) -> Self {
        [bbox.x1, bbox.y1, bbox.x2, bbox.y2]
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x1, self.y1, self.x2, self.y2)
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bbox_strategy() -> impl Strategy<Value = BBox> {
        (-500i32..500, -500i32..500, 1i32..400, 1i32..400)
            .prop_map(|(x, y, w, h)| BBox::new(x, y, x + w, y + h))
    }

    fn any_bbox_strategy() -> impl Strategy<Value = BBox> {
        any::<[i32; 4]>().prop_map(BBox::from)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Overlap fractions of valid boxes stay within `[0, 1]`.
    fn check_overlap_fraction_in_unit_range(a: BBox, b: BBox) -> Result<(), TestCaseError> {
        let fraction = a.overlap_fraction_of(b);
        prop_assert!(
            (0.0..=1.0).contains(&fraction),
            "fraction {fraction} out of range"
        );
        Ok(())
    }

    /// Containment is never mutual.
    fn check_containment_is_antisymmetric(a: BBox, b: BBox) -> Result<(), TestCaseError> {
        prop_assert!(!(a.contains(b) && b.contains(a)));
        Ok(())
    }

    /// Containment implies all three underlying conditions.
    fn check_containment_conditions(parent: BBox, child: BBox) -> Result<(), TestCaseError> {
        if parent.contains(child) {
            prop_assert!(parent.contains_point(child.center()));
            prop_assert!(parent.area() > child.area());
            prop_assert!(child.overlap_fraction_of(parent) > CONTAINMENT_OVERLAP_THRESHOLD);
        }
        Ok(())
    }

    /// A strictly nested, smaller box is always contained.
    fn check_strict_nesting_is_contained(outer: BBox) -> Result<(), TestCaseError> {
        prop_assume!(outer.width() > 2 && outer.height() > 2);
        let inner = BBox::new(outer.x1() + 1, outer.y1() + 1, outer.x2() - 1, outer.y2() - 1);
        prop_assert!(outer.contains(inner));
        Ok(())
    }

    /// Width and height match the exact difference of the corners.
    fn check_extents_are_exact(a: BBox) -> Result<(), TestCaseError> {
        prop_assert_eq!(i128::from(a.width()), i128::from(a.x2()) - i128::from(a.x1()));
        prop_assert_eq!(i128::from(a.height()), i128::from(a.y2()) - i128::from(a.y1()));
        let _ = (a.validate(), a.contains(a), a.intersection_area(a));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn overlap_fraction_in_unit_range(a in bbox_strategy(), b in bbox_strategy()) {
            check_overlap_fraction_in_unit_range(a, b)?;
        }

        #[test]
        fn containment_is_antisymmetric(a in bbox_strategy(), b in bbox_strategy()) {
            check_containment_is_antisymmetric(a, b)?;
        }

        #[test]
        fn containment_conditions(a in bbox_strategy(), b in bbox_strategy()) {
            check_containment_conditions(a, b)?;
        }

        #[test]
        fn extents_are_exact(a in any_bbox_strategy()) {
            check_extents_are_exact(a)?;
        }

        #[test]
        fn strict_nesting_is_contained(outer in bbox_strategy()) {
            check_strict_nesting_is_contained(outer)?;
        }
    }
}
