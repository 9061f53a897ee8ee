//! Re-projection of each annotation encoding through a [`ResolvedTransform`].
//!
//! Every adapter splits its shape into source-frame points, sends each one
//! through [`ResolvedTransform::project_point`], and rebuilds the shape in its
//! own encoding.

use serde::{Deserialize, Serialize};

use super::{
    min_area_rect, Annotations, AxisRect, CenterSizeAngleRect, EncodedOrientedRect,
    OrientedRect, Polygon, Quadrilateral,
};
use crate::error::RotateError;
use crate::geometry::Point;
use crate::transform::ResolvedTransform;

/// Annotation collections in the output frame.
///
/// Each field is `Some` exactly when the matching input collection was
/// non-empty, and then has the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReprojectedAnnotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_rects: Option<Vec<OrientedRect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_oriented_rects: Option<Vec<EncodedOrientedRect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_size_angle_rects: Option<Vec<CenterSizeAngleRect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrilaterals: Option<Vec<Quadrilateral>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polygons: Option<Vec<Polygon>>,
}

/// Project the center and the four corners of an axis-aligned rect.
///
/// Width and height are carried over unchanged from the source rect.
pub fn reproject_axis_rect(rect: &AxisRect, transform: &ResolvedTransform) -> OrientedRect {
    OrientedRect {
        center: transform.project_point(rect.center()),
        width: rect.width,
        height: rect.height,
        angle: transform.angle,
        box_points: rect.corners().map(|c| transform.project_point(c)),
    }
}

/// Project the two diagonal corners and subtract the rotation from theta.
///
/// Only `(x_min, y_min)` and `(x_max, y_max)` are tracked, which suits
/// box-style labels but is not a full oriented-rectangle re-projection.
pub fn reproject_encoded_oriented_rect(
    rect: &EncodedOrientedRect,
    transform: &ResolvedTransform,
) -> EncodedOrientedRect {
    let min = transform.project_point(Point::new(rect.x_min, rect.y_min));
    let max = transform.project_point(Point::new(rect.x_max, rect.y_max));
    EncodedOrientedRect::new(
        min.x,
        min.y,
        max.x,
        max.y,
        rect.theta - transform.angle as f64,
    )
}

/// Expand to corners, project them, and re-fit a minimum-area rect.
pub fn reproject_center_size_angle_rect(
    rect: &CenterSizeAngleRect,
    transform: &ResolvedTransform,
) -> Result<CenterSizeAngleRect, RotateError> {
    let corners = rect.box_points().map(|c| transform.project_point(c));
    min_area_rect(&corners)
}

pub fn reproject_quadrilateral(
    quad: &Quadrilateral,
    transform: &ResolvedTransform,
) -> Quadrilateral {
    Quadrilateral::new(quad.points.map(|p| transform.project_point(p)))
}

/// Project every vertex, keeping order and count.
pub fn reproject_polygon(polygon: &Polygon, transform: &ResolvedTransform) -> Polygon {
    Polygon::from_vertices_unchecked(transform.project_points(polygon.vertices()))
}

fn non_empty<T>(collection: &Option<Vec<T>>) -> Option<&[T]> {
    collection.as_deref().filter(|c| !c.is_empty())
}

/// Re-project every present collection of `annotations`.
///
/// Fails on the first rect whose re-fit is degenerate; nothing is returned
/// for the other collections in that case.
pub fn reproject_all(
    annotations: &Annotations,
    transform: &ResolvedTransform,
) -> Result<ReprojectedAnnotations, RotateError> {
    let points = non_empty(&annotations.points).map(|pts| transform.project_points(pts));

    let axis_rects = non_empty(&annotations.axis_rects).map(|rects| {
        rects
            .iter()
            .map(|r| reproject_axis_rect(r, transform))
            .collect::<Vec<_>>()
    });

    let encoded_oriented_rects = non_empty(&annotations.encoded_oriented_rects).map(|rects| {
        rects
            .iter()
            .map(|r| reproject_encoded_oriented_rect(r, transform))
            .collect::<Vec<_>>()
    });

    let center_size_angle_rects = non_empty(&annotations.center_size_angle_rects)
        .map(|rects| {
            rects
                .iter()
                .map(|r| reproject_center_size_angle_rect(r, transform))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let quadrilaterals = non_empty(&annotations.quadrilaterals).map(|quads| {
        quads
            .iter()
            .map(|q| reproject_quadrilateral(q, transform))
            .collect::<Vec<_>>()
    });

    let polygons = non_empty(&annotations.polygons).map(|polys| {
        polys
            .iter()
            .map(|p| reproject_polygon(p, transform))
            .collect::<Vec<_>>()
    });

    log::trace!(
        "re-projected {} points, {} axis rects, {} encoded rects, {} cv rects, {} quads, {} polygons",
        points.as_ref().map_or(0, Vec::len),
        axis_rects.as_ref().map_or(0, Vec::len),
        encoded_oriented_rects.as_ref().map_or(0, Vec::len),
        center_size_angle_rects.as_ref().map_or(0, Vec::len),
        quadrilaterals.as_ref().map_or(0, Vec::len),
        polygons.as_ref().map_or(0, Vec::len),
    );

    Ok(ReprojectedAnnotations {
        points,
        axis_rects,
        encoded_oriented_rects,
        center_size_angle_rects,
        quadrilaterals,
        polygons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn transform_15() -> ResolvedTransform {
        ResolvedTransform::new(400, 300, 15, true)
    }

    #[test]
    fn test_axis_rect_keeps_extent_and_corner_order() {
        let t = transform_15();
        let rect = AxisRect::new(117.0, 188.0, 108.0, 57.0);
        let out = reproject_axis_rect(&rect, &t);

        assert_eq!(out.width, 108.0);
        assert_eq!(out.height, 57.0);
        assert_eq!(out.angle, 15);
        assert_eq!(out.center, t.project_point(Point::new(171.0, 216.5)));
        assert_eq!(out.box_points[0], t.project_point(Point::new(117.0, 188.0)));
        assert_eq!(out.box_points[1], t.project_point(Point::new(225.0, 188.0)));
        assert_eq!(out.box_points[2], t.project_point(Point::new(225.0, 245.0)));
        assert_eq!(out.box_points[3], t.project_point(Point::new(117.0, 245.0)));
    }

    #[test]
    fn test_axis_rect_at_zero_degrees_is_unchanged() {
        let t = ResolvedTransform::new(400, 300, 0, true);
        let rect = AxisRect::new(10.0, 20.0, 30.0, 40.0);
        let out = reproject_axis_rect(&rect, &t);
        assert_eq!(out.bounding_rect(), rect);
    }

    #[test]
    fn test_encoded_rect_theta_and_diagonal() {
        let t = transform_15();
        let rect = EncodedOrientedRect::new(113.0, 127.0, 156.0, 170.0, 40.0);
        let out = reproject_encoded_oriented_rect(&rect, &t);
        assert_eq!(out.theta, 25.0);
        assert_eq!(
            Point::new(out.x_min, out.y_min),
            t.project_point(Point::new(113.0, 127.0))
        );
        assert_eq!(
            Point::new(out.x_max, out.y_max),
            t.project_point(Point::new(156.0, 170.0))
        );
    }

    #[test]
    fn test_center_size_angle_rect_refit() {
        let t = ResolvedTransform::new(400, 300, 90, true);
        let rect = CenterSizeAngleRect::new(Point::new(100.0, 100.0), Size::new(60.0, 20.0), 0.0);
        let out = reproject_center_size_angle_rect(&rect, &t).unwrap();

        // A horizontal 60x20 box becomes vertical: width along 0 degrees is 20
        assert!(out.angle.abs() < 1e-6, "angle {}", out.angle);
        assert!((out.size.width - 20.0).abs() < 1e-6);
        assert!((out.size.height - 60.0).abs() < 1e-6);
        let center = t.project_point(Point::new(100.0, 100.0));
        assert!((out.center.x - center.x).abs() <= 1.0);
        assert!((out.center.y - center.y).abs() <= 1.0);
    }

    #[test]
    fn test_center_size_angle_rect_tracks_rotation() {
        let t = ResolvedTransform::new(400, 300, 30, true);
        let rect =
            CenterSizeAngleRect::new(Point::new(200.0, 150.0), Size::new(120.0, 40.0), 0.0);
        let out = reproject_center_size_angle_rect(&rect, &t).unwrap();

        // Counter-clockwise on screen is -30 in image coordinates, i.e. 60
        // after normalization with the sides swapped
        assert!((out.angle - 60.0).abs() < 1.5, "angle {}", out.angle);
        assert!((out.size.width - 40.0).abs() < 2.0, "width {}", out.size.width);
        assert!((out.size.height - 120.0).abs() < 2.0, "height {}", out.size.height);
    }

    #[test]
    fn test_degenerate_rect_errors() {
        let t = transform_15();
        let rect = CenterSizeAngleRect::new(Point::new(50.0, 50.0), Size::new(0.0, 0.0), 0.0);
        assert!(matches!(
            reproject_center_size_angle_rect(&rect, &t),
            Err(RotateError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_quadrilateral_pointwise() {
        let t = transform_15();
        // Self-intersecting bow tie
        let quad = Quadrilateral::from_flat(&[0.0, 0.0, 10.0, 10.0, 10.0, 0.0, 0.0, 10.0]).unwrap();
        let out = reproject_quadrilateral(&quad, &t);
        for (o, i) in out.points.iter().zip(&quad.points) {
            assert_eq!(*o, t.project_point(*i));
        }
    }

    #[test]
    fn test_polygon_preserves_order_and_count() {
        let t = transform_15();
        let poly = Polygon::new(vec![
            Point::new(10.0, 10.0),
            Point::new(50.0, 12.0),
            Point::new(30.0, 30.0),
            Point::new(52.0, 60.0),
            Point::new(8.0, 55.0),
        ])
        .unwrap();
        let out = reproject_polygon(&poly, &t);
        assert_eq!(out.len(), 5);
        for (o, i) in out.vertices().iter().zip(poly.vertices()) {
            assert_eq!(*o, t.project_point(*i));
        }
    }

    #[test]
    fn test_absent_and_empty_collections_stay_absent() {
        let t = transform_15();
        let annotations = Annotations::new().with_points(vec![]);
        let out = reproject_all(&annotations, &t).unwrap();
        assert_eq!(out, ReprojectedAnnotations::default());
    }

    #[test]
    fn test_reproject_all_mirrors_present_collections() {
        let t = transform_15();
        let annotations = Annotations::new()
            .with_points(vec![Point::new(113.0, 127.0), Point::new(156.0, 127.0)])
            .with_axis_rects(vec![AxisRect::new(117.0, 188.0, 108.0, 57.0)]);
        let out = reproject_all(&annotations, &t).unwrap();

        assert_eq!(
            out.points,
            Some(vec![Point::new(142.0, 197.0), Point::new(184.0, 186.0)])
        );
        assert_eq!(out.axis_rects.map(|r| r.len()), Some(1));
        assert!(out.encoded_oriented_rects.is_none());
        assert!(out.center_size_angle_rects.is_none());
        assert!(out.quadrilaterals.is_none());
        assert!(out.polygons.is_none());
    }
}
