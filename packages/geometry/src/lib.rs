#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Tagged boundary geometry and the representative-point helpers used for
//! map labels and heatmap points.
//!
//! Boundary features arrive as `GeoJSON` `Polygon` or `MultiPolygon`
//! geometries. They are converted once into [`Shape`], a tagged variant,
//! and every traversal (centroid, bounds) goes through the single
//! recursive [`Shape::walk`] visitor instead of sniffing array depth.

use std::ops::ControlFlow;

use geo::Centroid as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `[longitude, latitude]` pair.
pub type Coord = [f64; 2];

/// An ordered ring of vertices. `GeoJSON` rings repeat the first vertex at
/// the end; that closing vertex is kept as-is.
pub type Ring = Vec<Coord>;

/// Errors converting `GeoJSON` geometries into [`Shape`].
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The geometry type is not a point, polygon or multipolygon.
    #[error("Unsupported geometry type: {kind}")]
    Unsupported {
        /// `GeoJSON` type name.
        kind: String,
    },

    /// A position had fewer than two ordinates.
    #[error("Invalid position with {len} ordinates")]
    InvalidPosition {
        /// Number of ordinates found.
        len: usize,
    },
}

/// Boundary geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single position.
    Point(Coord),
    /// Exterior ring followed by holes.
    Polygon(Vec<Ring>),
    /// A list of polygons.
    MultiPolygon(Vec<Vec<Ring>>),
}

/// Callbacks driven by [`Shape::walk`].
///
/// Returning [`ControlFlow::Break`] stops the traversal.
pub trait ShapeVisitor {
    /// Called for a point geometry.
    fn visit_point(&mut self, _coord: Coord) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called for every ring in document order.
    fn visit_ring(&mut self, ring: &[Coord]) -> ControlFlow<()>;
}

impl Shape {
    /// Walks the shape, recursing from multipolygon into its polygons and
    /// from polygons into their rings.
    pub fn walk<V: ShapeVisitor>(&self, visitor: &mut V) -> ControlFlow<()> {
        match self {
            Self::Point(coord) => visitor.visit_point(*coord),
            Self::Polygon(rings) => walk_rings(rings, visitor),
            Self::MultiPolygon(polygons) => {
                for rings in polygons {
                    walk_rings(rings, visitor)?;
                }
                ControlFlow::Continue(())
            }
        }
    }

    /// The first ring: a polygon's exterior, or the first polygon's exterior
    /// for a multipolygon.
    #[must_use]
    pub fn first_ring(&self) -> Option<&[Coord]> {
        match self {
            Self::Point(_) => None,
            Self::Polygon(rings) => rings.first().map(Vec::as_slice),
            Self::MultiPolygon(polygons) => polygons.first()?.first().map(Vec::as_slice),
        }
    }

    /// Whether the shape has no vertices at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        struct AnyVertex(bool);
        impl ShapeVisitor for AnyVertex {
            fn visit_point(&mut self, _coord: Coord) -> ControlFlow<()> {
                self.0 = true;
                ControlFlow::Break(())
            }
            fn visit_ring(&mut self, ring: &[Coord]) -> ControlFlow<()> {
                if ring.is_empty() {
                    ControlFlow::Continue(())
                } else {
                    self.0 = true;
                    ControlFlow::Break(())
                }
            }
        }

        let mut any = AnyVertex(false);
        let _ = self.walk(&mut any);
        !any.0
    }

    fn to_geo(&self) -> geo::Geometry<f64> {
        fn polygon(rings: &[Ring]) -> geo::Polygon<f64> {
            let mut lines = rings.iter().map(|r| geo::LineString::from(r.clone()));
            let exterior = lines
                .next()
                .unwrap_or_else(|| geo::LineString::new(Vec::new()));
            geo::Polygon::new(exterior, lines.collect())
        }

        match self {
            Self::Point(c) => geo::Geometry::Point(geo::Point::new(c[0], c[1])),
            Self::Polygon(rings) => geo::Geometry::Polygon(polygon(rings)),
            Self::MultiPolygon(polygons) => geo::Geometry::MultiPolygon(geo::MultiPolygon(
                polygons.iter().map(|p| polygon(p)).collect(),
            )),
        }
    }
}

fn walk_rings<V: ShapeVisitor>(rings: &[Ring], visitor: &mut V) -> ControlFlow<()> {
    for ring in rings {
        visitor.visit_ring(ring)?;
    }
    ControlFlow::Continue(())
}

fn position(p: &[f64]) -> Result<Coord, GeometryError> {
    match p {
        [x, y, ..] => Ok([*x, *y]),
        _ => Err(GeometryError::InvalidPosition { len: p.len() }),
    }
}

fn ring(r: &[Vec<f64>]) -> Result<Ring, GeometryError> {
    r.iter().map(|p| position(p)).collect()
}

fn rings(rs: &[Vec<Vec<f64>>]) -> Result<Vec<Ring>, GeometryError> {
    rs.iter().map(|r| ring(r)).collect()
}

fn unsupported(kind: &str) -> GeometryError {
    GeometryError::Unsupported {
        kind: kind.to_string(),
    }
}

impl TryFrom<&geojson::Value> for Shape {
    type Error = GeometryError;

    fn try_from(value: &geojson::Value) -> Result<Self, Self::Error> {
        match value {
            geojson::Value::Point(p) => Ok(Self::Point(position(p)?)),
            geojson::Value::Polygon(rs) => Ok(Self::Polygon(rings(rs)?)),
            geojson::Value::MultiPolygon(ps) => Ok(Self::MultiPolygon(
                ps.iter().map(|p| rings(p)).collect::<Result<_, _>>()?,
            )),
            geojson::Value::MultiPoint(_) => Err(unsupported("MultiPoint")),
            geojson::Value::LineString(_) => Err(unsupported("LineString")),
            geojson::Value::MultiLineString(_) => Err(unsupported("MultiLineString")),
            geojson::Value::GeometryCollection(_) => Err(unsupported("GeometryCollection")),
        }
    }
}

impl TryFrom<&geojson::Geometry> for Shape {
    type Error = GeometryError;

    fn try_from(geometry: &geojson::Geometry) -> Result<Self, Self::Error> {
        Self::try_from(&geometry.value)
    }
}

impl From<&Shape> for geojson::Value {
    fn from(shape: &Shape) -> Self {
        fn positions(ring: &[Coord]) -> Vec<Vec<f64>> {
            ring.iter().map(|c| c.to_vec()).collect()
        }

        match shape {
            Shape::Point(c) => Self::Point(c.to_vec()),
            Shape::Polygon(rings) => Self::Polygon(rings.iter().map(|r| positions(r)).collect()),
            Shape::MultiPolygon(polygons) => Self::MultiPolygon(
                polygons
                    .iter()
                    .map(|p| p.iter().map(|r| positions(r)).collect())
                    .collect(),
            ),
        }
    }
}

/// How the representative point of a boundary is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentroidStrategy {
    /// Unweighted mean of the first ring's vertices.
    #[default]
    VertexMean,
    /// True area-weighted centroid of the whole shape.
    AreaWeighted,
}

impl CentroidStrategy {
    /// Applies the strategy to a shape.
    #[must_use]
    pub fn apply(self, shape: &Shape) -> Option<Coord> {
        match self {
            Self::VertexMean => centroid(shape),
            Self::AreaWeighted => area_centroid(shape),
        }
    }
}

/// Arithmetic mean of the vertices of the shape's first ring.
///
/// This is a vertex average, not an area centroid: good enough for label
/// placement. A point geometry is its own centroid. Returns `None` when
/// there is no first ring or it is empty.
#[must_use]
pub fn centroid(shape: &Shape) -> Option<Coord> {
    if let Shape::Point(c) = shape {
        return Some(*c);
    }

    let Some(ring) = shape.first_ring().filter(|ring| !ring.is_empty()) else {
        log::debug!("No vertices in the first ring, no centroid");
        return None;
    };

    #[allow(clippy::cast_precision_loss)]
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), c| (sx + c[0], sy + c[1]));
    Some([sx / n, sy / n])
}

/// Area-weighted centroid over all polygons, holes included.
#[must_use]
pub fn area_centroid(shape: &Shape) -> Option<Coord> {
    if shape.is_empty() {
        return None;
    }
    let point = shape.to_geo().centroid()?;
    let (x, y) = (point.x(), point.y());
    (x.is_finite() && y.is_finite()).then_some([x, y])
}

/// A longitude/latitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Degenerate box around a single coordinate.
    #[must_use]
    pub const fn from_coord(c: Coord) -> Self {
        Self::new(c[0], c[1], c[0], c[1])
    }

    /// Grows the box to include a coordinate.
    #[must_use]
    pub fn extend(self, c: Coord) -> Self {
        Self::new(
            self.west.min(c[0]),
            self.south.min(c[1]),
            self.east.max(c[0]),
            self.north.max(c[1]),
        )
    }

    /// Smallest box covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.west.min(other.west),
            self.south.min(other.south),
            self.east.max(other.east),
            self.north.max(other.north),
        )
    }

    /// `[[west, south], [east, north]]`, the order `fitBounds` expects.
    #[must_use]
    pub const fn corners(self) -> [Coord; 2] {
        [[self.west, self.south], [self.east, self.north]]
    }
}

/// Bounding box of every vertex in the shape.
#[must_use]
pub fn bounds(shape: &Shape) -> Option<BoundingBox> {
    struct Bounds(Option<BoundingBox>);
    impl Bounds {
        fn push(&mut self, c: Coord) {
            self.0 = Some(self.0.map_or_else(|| BoundingBox::from_coord(c), |b| b.extend(c)));
        }
    }
    impl ShapeVisitor for Bounds {
        fn visit_point(&mut self, coord: Coord) -> ControlFlow<()> {
            self.push(coord);
            ControlFlow::Continue(())
        }
        fn visit_ring(&mut self, ring: &[Coord]) -> ControlFlow<()> {
            for c in ring {
                self.push(*c);
            }
            ControlFlow::Continue(())
        }
    }

    let mut acc = Bounds(None);
    let _ = shape.walk(&mut acc);
    if acc.0.is_none() {
        log::debug!("Shape has no vertices, no bounding box");
    }
    acc.0
}

/// Bounding box of a collection of shapes, `None` if all are empty.
pub fn bounds_all<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Option<BoundingBox> {
    shapes
        .into_iter()
        .filter_map(bounds)
        .reduce(BoundingBox::union)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        vec![[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]
    }

    #[test]
    fn square_centroid_is_center() {
        let shape = Shape::Polygon(vec![square()]);
        assert_eq!(centroid(&shape), Some([1.0, 1.0]));
    }

    #[test]
    fn multipolygon_uses_first_polygon_first_ring() {
        let far = vec![[10.0, 10.0], [10.0, 12.0], [12.0, 12.0], [12.0, 10.0]];
        let shape = Shape::MultiPolygon(vec![vec![square()], vec![far]]);
        assert_eq!(centroid(&shape), Some([1.0, 1.0]));
    }

    #[test]
    fn holes_do_not_affect_vertex_mean() {
        let hole = vec![[0.5, 0.5], [0.5, 1.0], [1.0, 1.0]];
        let shape = Shape::Polygon(vec![square(), hole]);
        assert_eq!(centroid(&shape), Some([1.0, 1.0]));
    }

    #[test]
    fn empty_ring_has_no_centroid() {
        assert_eq!(centroid(&Shape::Polygon(vec![Vec::new()])), None);
        assert_eq!(centroid(&Shape::Polygon(Vec::new())), None);
        assert_eq!(centroid(&Shape::MultiPolygon(Vec::new())), None);
        assert_eq!(centroid(&Shape::MultiPolygon(vec![Vec::new()])), None);
        assert_eq!(area_centroid(&Shape::Polygon(Vec::new())), None);
    }

    #[test]
    fn closing_vertex_is_counted() {
        let mut closed = square();
        closed.push([0.0, 0.0]);
        let c = centroid(&Shape::Polygon(vec![closed])).unwrap();
        assert!((c[0] - 0.8).abs() < 1e-12);
        assert!((c[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn area_centroid_of_closed_square() {
        let mut closed = square();
        closed.push([0.0, 0.0]);
        let c = area_centroid(&Shape::Polygon(vec![closed])).unwrap();
        assert!((c[0] - 1.0).abs() < 1e-12);
        assert!((c[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bounds_cover_all_polygons() {
        let far = vec![[10.0, -3.0], [10.0, 12.0], [12.0, 12.0]];
        let shape = Shape::MultiPolygon(vec![vec![square()], vec![far]]);
        assert_eq!(
            bounds(&shape),
            Some(BoundingBox::new(0.0, -3.0, 12.0, 12.0))
        );
        assert_eq!(bounds(&Shape::Polygon(Vec::new())), None);
    }

    #[test]
    fn empty_shapes_are_skipped_in_combined_bounds() {
        let shapes = [
            Shape::Polygon(vec![Vec::new()]),
            Shape::Polygon(vec![square()]),
            Shape::MultiPolygon(Vec::new()),
        ];
        assert_eq!(bounds_all(&shapes), Some(BoundingBox::new(0.0, 0.0, 2.0, 2.0)));
        assert_eq!(bounds_all(&shapes[..1]), None);
        assert_eq!(bounds(&Shape::Polygon(vec![Vec::new(), Vec::new()])), None);
    }

    #[test]
    fn converts_geojson_polygon() {
        let value = geojson::Value::Polygon(vec![vec![
            vec![30.0, 59.0],
            vec![30.0, 60.0],
            vec![31.0, 60.0, 5.0],
        ]]);
        let shape = Shape::try_from(&value).unwrap();
        assert_eq!(
            shape,
            Shape::Polygon(vec![vec![[30.0, 59.0], [30.0, 60.0], [31.0, 60.0]]])
        );
    }

    #[test]
    fn rejects_line_strings_and_short_positions() {
        let line = geojson::Value::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        assert!(matches!(
            Shape::try_from(&line),
            Err(GeometryError::Unsupported { .. })
        ));
        let bad = geojson::Value::Polygon(vec![vec![vec![1.0]]]);
        assert!(matches!(
            Shape::try_from(&bad),
            Err(GeometryError::InvalidPosition { len: 1 })
        ));
    }

    #[test]
    fn walk_stops_on_break() {
        struct CountRings(usize);
        impl ShapeVisitor for CountRings {
            fn visit_ring(&mut self, _ring: &[Coord]) -> ControlFlow<()> {
                self.0 += 1;
                ControlFlow::Break(())
            }
        }
        let shape = Shape::MultiPolygon(vec![vec![square()], vec![square()]]);
        let mut visitor = CountRings(0);
        assert!(shape.walk(&mut visitor).is_break());
        assert_eq!(visitor.0, 1);
    }
}
