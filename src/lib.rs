//! # shptools
//!
//! A pure Rust library for streaming geometry records from ESRI Shapefile
//! (`.shp`) files.
//!
//! The reader decodes the 100-byte main header once, then walks the
//! record chain by offset and streams each record's points lazily from
//! the shared file stream. Point, PolyLine and MultiPoint records can be
//! traversed; other shape types are recognized but not decoded.
//!
//! ```no_run
//! use shptools::{ShapeType, ShpReader};
//!
//! # fn main() -> shptools::Result<()> {
//! let mut reader = ShpReader::from_file("coastlines.shp")?;
//! reader.load()?;
//!
//! if reader.shape_type() == ShapeType::Polyline {
//!     let mut records = reader.records()?;
//!     while let Some(record) = records.advance()?.copied() {
//!         let mut points = records.polyline_points()?;
//!         while let Some(point) = points.next_point()? {
//!             println!("record {}: {}", record.number(), point);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod io;
pub mod types;

pub use error::{Result, ShpError};
pub use io::shp::{
    MultiPointCursor, PolylineCursor, Record, RecordCursor, ShpReader, ShpReaderConfiguration,
};
pub use types::{BoundingBox, Point, ShapeType};
