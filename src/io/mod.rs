//! I/O module for reading ESRI Shapefile geometry

pub mod shp;

pub use shp::ShpReader;
