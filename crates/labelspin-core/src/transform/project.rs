//! Point projection from the source frame into the rotated output frame.
//!
//! ```text
//! expanded   = (x + width_pad / 2, y + height_pad / 2)
//! translated = (expanded.x - dest_w / 2, dest_h / 2 - expanded.y)   // y up
//! rotated    = R(radian) * translated
//! restored   = (round(rotated.x + dest_w / 2), round(dest_h / 2 - rotated.y))
//! ```
//!
//! The y flip turns image rows (growing downward) into a math frame where a
//! positive angle turns counter-clockwise, then flips back.

use super::ResolvedTransform;
use crate::geometry::Point;

impl ResolvedTransform {
    /// Map a source-frame point to integer output-frame pixel coordinates.
    ///
    /// Rounds half away from zero. The result may fall outside the canvas
    /// when the canvas was not expanded.
    pub fn project_point(&self, point: Point) -> Point {
        let half_w = self.dest_w as f64 / 2.0;
        let half_h = self.dest_h as f64 / 2.0;

        let expanded_x = point.x + self.width_pad as f64 / 2.0;
        let expanded_y = point.y + self.height_pad as f64 / 2.0;

        let tx = expanded_x - half_w;
        let ty = half_h - expanded_y;

        let (sin, cos) = self.radian.sin_cos();
        let rx = tx * cos - ty * sin;
        let ry = tx * sin + ty * cos;

        Point::new((rx + half_w).round(), (-ry + half_h).round())
    }

    /// Project every point of `points`, preserving order.
    pub fn project_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.project_point(p)).collect()
    }
}
