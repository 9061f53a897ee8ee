//! Annotation encodings carried alongside the image.
//!
//! Each encoding is a plain value type. Flat numeric encodings (axis rects,
//! the 5-tuple oriented rect, quadrilaterals) serialize as arrays and are
//! arity-checked when deserialized.
//!
//! | Encoding | Wire form | Re-projected as |
//! |----------|-----------|-----------------|
//! | [`Point`] | `[x, y]` | [`Point`] |
//! | [`AxisRect`] | `[x, y, w, h]` | [`OrientedRect`] |
//! | [`EncodedOrientedRect`] | `[x_min, y_min, x_max, y_max, theta]` | same |
//! | [`CenterSizeAngleRect`] | `{center, size, angle}` | same, re-fitted |
//! | [`Quadrilateral`] | `[x1, y1, ..., x4, y4]` | same |
//! | [`Polygon`] | `[[x, y], ...]` | same |

mod min_area;
mod reproject;

use serde::{Deserialize, Serialize};

pub use crate::geometry::{Point, Size};
pub use min_area::min_area_rect;
pub use reproject::{
    reproject_all, reproject_axis_rect, reproject_center_size_angle_rect,
    reproject_encoded_oriented_rect, reproject_polygon, reproject_quadrilateral,
    ReprojectedAnnotations,
};

use crate::error::RotateError;

fn check_arity(kind: &str, expected: usize, values: &[f64]) -> Result<(), RotateError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(RotateError::invalid(format!(
            "{} needs {} values, got {}",
            kind,
            expected,
            values.len()
        )))
    }
}

fn check_finite(kind: &str, values: &[f64]) -> Result<(), RotateError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RotateError::invalid(format!(
            "{} has non-finite values: {:?}",
            kind, values
        )))
    }
}

/// An axis-aligned rectangle: top-left corner plus extent, in the source frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct AxisRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AxisRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, RotateError> {
        check_arity("axis rect", 4, values)?;
        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners ordered top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let right = self.x + self.width;
        let bottom = self.y + self.height;
        [
            Point::new(self.x, self.y),
            Point::new(right, self.y),
            Point::new(right, bottom),
            Point::new(self.x, bottom),
        ]
    }

    pub fn validate(&self) -> Result<(), RotateError> {
        check_finite("axis rect", &[self.x, self.y, self.width, self.height])?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(RotateError::invalid(format!(
                "axis rect has negative extent {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl TryFrom<Vec<f64>> for AxisRect {
    type Error = RotateError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<AxisRect> for Vec<f64> {
    fn from(r: AxisRect) -> Self {
        vec![r.x, r.y, r.width, r.height]
    }
}

/// An [`AxisRect`] after rotation.
///
/// `width` and `height` are the source rect's extent, not a tight fit of the
/// rotated corners; use [`OrientedRect::bounding_rect`] or the corners for that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    /// Projected center of the source rect.
    pub center: Point,
    pub width: f64,
    pub height: f64,
    /// The rotation angle applied, in degrees.
    pub angle: i32,
    /// Projected corners, in the source rect's top-left, top-right,
    /// bottom-right, bottom-left order.
    pub box_points: [Point; 4],
}

impl OrientedRect {
    pub fn box_points(&self) -> &[Point; 4] {
        &self.box_points
    }

    /// The axis-aligned rectangle enclosing the four corners.
    pub fn bounding_rect(&self) -> AxisRect {
        let mut min = self.box_points[0];
        let mut max = self.box_points[0];
        for p in &self.box_points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        AxisRect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

/// The 5-tuple oriented rect: bounding diagonal plus an orientation angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct EncodedOrientedRect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    /// Orientation in degrees.
    pub theta: f64,
}

impl EncodedOrientedRect {
    pub const fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64, theta: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
            theta,
        }
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, RotateError> {
        check_arity("encoded oriented rect", 5, values)?;
        Ok(Self::new(
            values[0], values[1], values[2], values[3], values[4],
        ))
    }

    pub fn validate(&self) -> Result<(), RotateError> {
        check_finite(
            "encoded oriented rect",
            &[self.x_min, self.y_min, self.x_max, self.y_max, self.theta],
        )
    }
}

impl TryFrom<Vec<f64>> for EncodedOrientedRect {
    type Error = RotateError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<EncodedOrientedRect> for Vec<f64> {
    fn from(r: EncodedOrientedRect) -> Self {
        vec![r.x_min, r.y_min, r.x_max, r.y_max, r.theta]
    }
}

/// A minimum-area-rect style descriptor: center, size and angle in degrees.
///
/// `size.width` runs along the direction `(cos angle, sin angle)` in image
/// coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CenterSizeAngleRect {
    pub center: Point,
    pub size: Size,
    pub angle: f64,
}

impl CenterSizeAngleRect {
    pub const fn new(center: Point, size: Size, angle: f64) -> Self {
        Self {
            center,
            size,
            angle,
        }
    }

    /// The four corners, in the same order as OpenCV's `boxPoints`.
    pub fn box_points(&self) -> [Point; 4] {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let a = sin * 0.5;
        let b = cos * 0.5;
        let Size { width, height } = self.size;
        let c = self.center;

        let p0 = Point::new(
            c.x - a * height - b * width,
            c.y + b * height - a * width,
        );
        let p1 = Point::new(
            c.x + a * height - b * width,
            c.y - b * height - a * width,
        );
        let p2 = Point::new(2.0 * c.x - p0.x, 2.0 * c.y - p0.y);
        let p3 = Point::new(2.0 * c.x - p1.x, 2.0 * c.y - p1.y);

        [p0, p1, p2, p3]
    }

    pub fn validate(&self) -> Result<(), RotateError> {
        check_finite(
            "center-size-angle rect",
            &[
                self.center.x,
                self.center.y,
                self.size.width,
                self.size.height,
                self.angle,
            ],
        )
    }
}

/// Four independent points, serialized flat as 8 numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Quadrilateral {
    pub points: [Point; 4],
}

impl Quadrilateral {
    pub const fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Build from `x1, y1, x2, y2, x3, y3, x4, y4`.
    pub fn from_flat(values: &[f64]) -> Result<Self, RotateError> {
        check_arity("quadrilateral", 8, values)?;
        let mut points = [Point::default(); 4];
        for (point, pair) in points.iter_mut().zip(values.chunks_exact(2)) {
            *point = Point::new(pair[0], pair[1]);
        }
        Ok(Self { points })
    }

    pub fn to_flat(&self) -> [f64; 8] {
        let mut flat = [0.0; 8];
        for (pair, p) in flat.chunks_exact_mut(2).zip(&self.points) {
            pair[0] = p.x;
            pair[1] = p.y;
        }
        flat
    }

    pub fn validate(&self) -> Result<(), RotateError> {
        self.points.iter().try_for_each(Point::validate)
    }
}

impl TryFrom<Vec<f64>> for Quadrilateral {
    type Error = RotateError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_flat(&values)
    }
}

impl From<Quadrilateral> for Vec<f64> {
    fn from(q: Quadrilateral) -> Self {
        q.to_flat().to_vec()
    }
}

/// An ordered ring of at least 3 vertices. No convexity is assumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Result<Self, RotateError> {
        let polygon = Self { vertices };
        polygon.validate()?;
        Ok(polygon)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn validate(&self) -> Result<(), RotateError> {
        if self.vertices.len() < 3 {
            return Err(RotateError::invalid(format!(
                "polygon needs at least 3 vertices, got {}",
                self.vertices.len()
            )));
        }
        self.vertices.iter().try_for_each(Point::validate)
    }

    /// Build without the vertex-count check, for vertices that came from an
    /// already validated polygon.
    pub(crate) fn from_vertices_unchecked(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = RotateError;

    fn try_from(vertices: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(p: Polygon) -> Self {
        p.vertices
    }
}

/// The optional annotation collections of one rotation request.
///
/// A `None` or empty collection produces `None` in the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_rects: Option<Vec<AxisRect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_oriented_rects: Option<Vec<EncodedOrientedRect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_size_angle_rects: Option<Vec<CenterSizeAngleRect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrilaterals: Option<Vec<Quadrilateral>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polygons: Option<Vec<Polygon>>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_axis_rects(mut self, rects: Vec<AxisRect>) -> Self {
        self.axis_rects = Some(rects);
        self
    }

    pub fn with_encoded_oriented_rects(mut self, rects: Vec<EncodedOrientedRect>) -> Self {
        self.encoded_oriented_rects = Some(rects);
        self
    }

    pub fn with_center_size_angle_rects(mut self, rects: Vec<CenterSizeAngleRect>) -> Self {
        self.center_size_angle_rects = Some(rects);
        self
    }

    pub fn with_quadrilaterals(mut self, quads: Vec<Quadrilateral>) -> Self {
        self.quadrilaterals = Some(quads);
        self
    }

    pub fn with_polygons(mut self, polygons: Vec<Polygon>) -> Self {
        self.polygons = Some(polygons);
        self
    }

    /// True when no collection holds any entry.
    pub fn is_empty(&self) -> bool {
        fn empty<T>(c: &Option<Vec<T>>) -> bool {
            c.as_ref().is_none_or(|v| v.is_empty())
        }
        empty(&self.points)
            && empty(&self.axis_rects)
            && empty(&self.encoded_oriented_rects)
            && empty(&self.center_size_angle_rects)
            && empty(&self.quadrilaterals)
            && empty(&self.polygons)
    }

    /// Validate every entry of every collection.
    pub fn validate(&self) -> Result<(), RotateError> {
        fn each<T>(
            c: &Option<Vec<T>>,
            check: impl Fn(&T) -> Result<(), RotateError>,
        ) -> Result<(), RotateError> {
            c.iter().flatten().try_for_each(check)
        }
        each(&self.points, Point::validate)?;
        each(&self.axis_rects, AxisRect::validate)?;
        each(&self.encoded_oriented_rects, EncodedOrientedRect::validate)?;
        each(&self.center_size_angle_rects, CenterSizeAngleRect::validate)?;
        each(&self.quadrilaterals, Quadrilateral::validate)?;
        each(&self.polygons, Polygon::validate)
    }
}
