//! Minimum-area enclosing rectangle by rotating calipers.
//!
//! The optimal rectangle has one side collinear with an edge of the convex
//! hull, so each hull edge direction is tried in turn and the one giving the
//! smallest area wins. The hull itself comes from `imageproc`.

use std::collections::HashMap;

use imageproc::geometry::convex_hull;
use imageproc::point::Point as GridPoint;

use super::CenterSizeAngleRect;
use crate::error::RotateError;
use crate::geometry::{Point, Size};

/// Angles closer than this to 0 or 90 degrees are snapped.
const ANGLE_EPSILON: f64 = 1e-9;

/// Hulls with less area than this are treated as collinear.
const AREA_EPSILON: f64 = 1e-9;

/// Sub-pixel grid used to hand f64 points to the integer hull.
///
/// Projected corners are whole pixels, so they land on the grid exactly.
const HULL_GRID: f64 = 256.0;

/// Hull vertices of `points`, in hull order.
///
/// Points are snapped to a 1/256 pixel grid for `imageproc`, and each hull
/// vertex maps back to the first input point that snapped onto it. Fewer than
/// 3 distinct grid points are returned as-is.
fn hull_points(points: &[Point]) -> Vec<Point> {
    let mut originals: HashMap<(i64, i64), Point> = HashMap::with_capacity(points.len());
    for p in points {
        let key = (
            (p.x * HULL_GRID).round() as i64,
            (p.y * HULL_GRID).round() as i64,
        );
        originals.entry(key).or_insert(*p);
    }
    if originals.len() < 3 {
        return originals.into_values().collect();
    }

    let mut keys: Vec<(i64, i64)> = originals.keys().copied().collect();
    keys.sort_unstable();
    let grid: Vec<GridPoint<i64>> = keys.iter().map(|&(x, y)| GridPoint::new(x, y)).collect();

    convex_hull(grid)
        .iter()
        .filter_map(|g| originals.get(&(g.x, g.y)).copied())
        .collect()
}

/// Twice the signed area of the polygon `ring`.
fn doubled_area(ring: &[Point]) -> f64 {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}

/// Fit the smallest-area rectangle, in any orientation, around `points`.
///
/// The returned angle lies in `[0, 90)`; `size.width` is measured along that
/// angle. Fails with [`RotateError::DegenerateGeometry`] when the points have
/// fewer than 3 distinct, non-collinear members, and with
/// [`RotateError::InvalidConfig`] on NaN or infinite coordinates.
pub fn min_area_rect(points: &[Point]) -> Result<CenterSizeAngleRect, RotateError> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(RotateError::invalid(
            "minimum-area rect input has non-finite points".to_string(),
        ));
    }

    let hull = hull_points(points);
    if hull.len() < 3 || doubled_area(&hull).abs() < AREA_EPSILON {
        return Err(RotateError::degenerate(format!(
            "minimum-area rect needs 3 non-collinear points, got {} hull points",
            hull.len()
        )));
    }

    let mut best: Option<(f64, CenterSizeAngleRect)> = None;

    for (i, &start) in hull.iter().enumerate() {
        let end = hull[(i + 1) % hull.len()];
        let edge = end - start;
        let len = edge.x.hypot(edge.y);
        if len == 0.0 {
            continue;
        }

        let u = Point::new(edge.x / len, edge.y / len);
        let v = Point::new(-u.y, u.x);

        let (mut u_min, mut u_max) = (f64::MAX, f64::MIN);
        let (mut v_min, mut v_max) = (f64::MAX, f64::MIN);
        for &p in &hull {
            let pu = p.dot(u);
            let pv = p.dot(v);
            u_min = u_min.min(pu);
            u_max = u_max.max(pu);
            v_min = v_min.min(pv);
            v_max = v_max.max(pv);
        }

        let width = u_max - u_min;
        let height = v_max - v_min;
        let area = width * height;

        if best.as_ref().is_some_and(|(best_area, _)| area >= *best_area) {
            continue;
        }

        let mid_u = (u_min + u_max) / 2.0;
        let mid_v = (v_min + v_max) / 2.0;
        let center = Point::new(u.x * mid_u + v.x * mid_v, u.y * mid_u + v.y * mid_v);
        let angle = u.y.atan2(u.x).to_degrees();

        best = Some((
            area,
            normalize_rect(CenterSizeAngleRect::new(center, Size::new(width, height), angle)),
        ));
    }

    best.map(|(_, rect)| rect).ok_or_else(|| {
        RotateError::degenerate("convex hull has no non-zero edges".to_string())
    })
}

/// Bring the angle into `[0, 90)`, swapping width and height when the
/// reference side changes.
fn normalize_rect(rect: CenterSizeAngleRect) -> CenterSizeAngleRect {
    let mut angle = rect.angle.rem_euclid(180.0);
    let mut size = rect.size;

    if angle >= 90.0 {
        angle -= 90.0;
        size = Size::new(size.height, size.width);
    }
    if 90.0 - angle < ANGLE_EPSILON {
        angle = 0.0;
        size = Size::new(size.height, size.width);
    }
    if angle < ANGLE_EPSILON {
        angle = 0.0;
    }

    CenterSizeAngleRect::new(rect.center, size, angle)
}
