//! Main file header and record header codecs

use crate::error::{Result, ShpError};
use crate::types::{BoundingBox, ShapeType};

use super::data_buffer::{DataBuffer, Endianness};

/// Size of the main file header in bytes
pub const FILE_HEADER_LEN: usize = 100;

/// Magic code at offset 0 of every shapefile
pub const FILE_MAGIC: i32 = 9994;

/// The only shapefile version ever published
pub const FILE_VERSION: i32 = 1000;

/// Size of the per-record header in bytes
pub const RECORD_HEADER_LEN: usize = 8;

/// Size of the shape type tag that opens every record's content
pub const SHAPE_TAG_LEN: usize = 4;

/// The 100-byte header at the start of every `.shp` file
///
/// Parsed once at load time and immutable thereafter. The magic code,
/// file length and the five reserved slots are big-endian; everything
/// from the version on is little-endian.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    /// Magic code, expected to be [`FILE_MAGIC`]
    pub file_code: i32,
    /// Total file length in 16-bit words, header included
    pub file_length: i32,
    /// Format version, expected to be [`FILE_VERSION`]
    pub version: i32,
    /// Shape type shared by all records in the file
    pub shape_type: ShapeType,
    /// Extent of all shapes in the file
    pub bounding_box: BoundingBox,
    pub min_z: f64,
    pub max_z: f64,
    pub min_m: f64,
    pub max_m: f64,
}

impl FileHeader {
    /// Decode the header from the first [`FILE_HEADER_LEN`] bytes of the file
    pub fn decode(buffer: &DataBuffer) -> Result<Self> {
        let mut index = 0;
        let file_code = buffer.i32_at(&mut index, Endianness::Big)?;
        // Five reserved int32 slots, not decoded
        buffer.skip(&mut index, 20)?;
        let file_length = buffer.i32_at(&mut index, Endianness::Big)?;
        let version = buffer.i32_at(&mut index, Endianness::Little)?;
        let shape_code = buffer.i32_at(&mut index, Endianness::Little)?;
        let shape_type =
            ShapeType::from_i32(shape_code).ok_or(ShpError::UnknownShapeType(shape_code))?;

        let min_x = buffer.f64_at(&mut index, Endianness::Little)?;
        let min_y = buffer.f64_at(&mut index, Endianness::Little)?;
        let max_x = buffer.f64_at(&mut index, Endianness::Little)?;
        let max_y = buffer.f64_at(&mut index, Endianness::Little)?;
        let min_z = buffer.f64_at(&mut index, Endianness::Little)?;
        let max_z = buffer.f64_at(&mut index, Endianness::Little)?;
        let min_m = buffer.f64_at(&mut index, Endianness::Little)?;
        let max_m = buffer.f64_at(&mut index, Endianness::Little)?;

        Ok(Self {
            file_code,
            file_length,
            version,
            shape_type,
            bounding_box: BoundingBox::new(min_x, min_y, max_x, max_y),
            min_z,
            max_z,
            min_m,
            max_m,
        })
    }

    /// Check the magic code and version
    pub fn validate(&self) -> Result<()> {
        if self.file_code != FILE_MAGIC {
            return Err(ShpError::InvalidHeader(format!(
                "bad magic code {} (expected {})",
                self.file_code, FILE_MAGIC
            )));
        }
        if self.version != FILE_VERSION {
            return Err(ShpError::InvalidHeader(format!(
                "unsupported version {} (expected {})",
                self.version, FILE_VERSION
            )));
        }
        Ok(())
    }

    /// Declared total file length in bytes
    pub fn file_length_bytes(&self) -> u64 {
        self.file_length as u64 * 2
    }
}

/// The header opening each record, together with the shape type tag that
/// starts the record's content
///
/// The record number and content length are big-endian, the shape tag is
/// little-endian. The next record begins at
/// `record_start + 8 + content_length * 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordHeader {
    /// 1-based record number
    pub record_number: i32,
    /// Content length in 16-bit words, shape tag included
    pub content_length: i32,
    /// Shape type of this record's payload
    pub shape_type: ShapeType,
}

impl RecordHeader {
    /// Bytes read per record boundary: the 8-byte header plus the 4-byte
    /// shape tag
    pub const ENCODED_LEN: usize = RECORD_HEADER_LEN + SHAPE_TAG_LEN;

    /// Decode a record header (and its shape tag) from
    /// [`RecordHeader::ENCODED_LEN`] bytes
    pub fn decode(buffer: &DataBuffer) -> Result<Self> {
        let mut index = 0;
        let record_number = buffer.i32_at(&mut index, Endianness::Big)?;
        let content_length = buffer.i32_at(&mut index, Endianness::Big)?;
        let shape_code = buffer.i32_at(&mut index, Endianness::Little)?;
        let shape_type =
            ShapeType::from_i32(shape_code).ok_or(ShpError::UnknownShapeType(shape_code))?;

        if content_length < 0 {
            return Err(ShpError::InvalidFormat(format!(
                "record {} has negative content length {}",
                record_number, content_length
            )));
        }

        Ok(Self {
            record_number,
            content_length,
            shape_type,
        })
    }

    /// Content length in bytes
    pub fn content_length_bytes(&self) -> u64 {
        self.content_length as u64 * 2
    }
}
