//! Core types used throughout shptools

pub mod bounds;
pub mod point;

pub use bounds::BoundingBox;
pub use point::Point;

/// Shape type enumeration
///
/// Every record in a shapefile is tagged with one of these codes; the file
/// header additionally declares the type shared by all records. Only
/// `Point`, `Polyline` and `MultiPoint` records can be traversed by the
/// geometry cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// Reported before the file header has been loaded
    Undefined,
    /// Null shape (no geometry)
    Null,
    /// Single point
    Point,
    /// Polyline (one or more parts, flattened to one point sequence)
    Polyline,
    /// Polygon
    Polygon,
    /// Set of points
    MultiPoint,
    /// Point with Z
    PointZ,
    /// Polyline with Z
    PolylineZ,
    /// Polygon with Z
    PolygonZ,
    /// Set of points with Z
    MultiPointZ,
    /// Point with measure
    PointM,
    /// Polyline with measure
    PolylineM,
    /// Polygon with measure
    PolygonM,
    /// Set of points with measure
    MultiPointM,
    /// Multipatch surface
    MultiPatch,
}

impl ShapeType {
    /// Get the type name as used in the shapefile documentation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Undefined => "Undefined",
            ShapeType::Null => "Null",
            ShapeType::Point => "Point",
            ShapeType::Polyline => "PolyLine",
            ShapeType::Polygon => "Polygon",
            ShapeType::MultiPoint => "MultiPoint",
            ShapeType::PointZ => "PointZ",
            ShapeType::PolylineZ => "PolyLineZ",
            ShapeType::PolygonZ => "PolygonZ",
            ShapeType::MultiPointZ => "MultiPointZ",
            ShapeType::PointM => "PointM",
            ShapeType::PolylineM => "PolyLineM",
            ShapeType::PolygonM => "PolygonM",
            ShapeType::MultiPointM => "MultiPointM",
            ShapeType::MultiPatch => "MultiPatch",
        }
    }

    /// Parse a shape type from its numeric code
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(ShapeType::Null),
            1 => Some(ShapeType::Point),
            3 => Some(ShapeType::Polyline),
            5 => Some(ShapeType::Polygon),
            8 => Some(ShapeType::MultiPoint),
            11 => Some(ShapeType::PointZ),
            13 => Some(ShapeType::PolylineZ),
            15 => Some(ShapeType::PolygonZ),
            18 => Some(ShapeType::MultiPointZ),
            21 => Some(ShapeType::PointM),
            23 => Some(ShapeType::PolylineM),
            25 => Some(ShapeType::PolygonM),
            28 => Some(ShapeType::MultiPointM),
            31 => Some(ShapeType::MultiPatch),
            _ => None,
        }
    }

    /// Get the numeric code stored in the file
    pub fn to_i32(&self) -> i32 {
        match self {
            ShapeType::Undefined => -1,
            ShapeType::Null => 0,
            ShapeType::Point => 1,
            ShapeType::Polyline => 3,
            ShapeType::Polygon => 5,
            ShapeType::MultiPoint => 8,
            ShapeType::PointZ => 11,
            ShapeType::PolylineZ => 13,
            ShapeType::PolygonZ => 15,
            ShapeType::MultiPointZ => 18,
            ShapeType::PointM => 21,
            ShapeType::PolylineM => 23,
            ShapeType::PolygonM => 25,
            ShapeType::MultiPointM => 28,
            ShapeType::MultiPatch => 31,
        }
    }

    /// Whether a geometry cursor exists for records of this type
    pub fn is_traversable(&self) -> bool {
        matches!(
            self,
            ShapeType::Point | ShapeType::Polyline | ShapeType::MultiPoint
        )
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
