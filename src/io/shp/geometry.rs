//! Shape payload codecs and per-record point cursors
//!
//! Geometry cursors stream a record's points lazily from the shared file
//! stream. A cursor is valid for one traversal; re-reading a record means
//! constructing a new cursor from the same record offset.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Result, ShpError};
use crate::types::{BoundingBox, Point};

use super::data_buffer::{DataBuffer, Endianness};
use super::header::{RECORD_HEADER_LEN, SHAPE_TAG_LEN};

/// Byte offset from a record's start to its shape payload (past the
/// record header and the shape tag)
pub const PAYLOAD_OFFSET: u64 = (RECORD_HEADER_LEN + SHAPE_TAG_LEN) as u64;

/// Size of the fixed polyline header: bounding box + part and point counts
pub const POLYLINE_HEADER_LEN: usize = 40;

/// Size of the fixed multipoint header: bounding box + point count
pub const MULTI_POINT_HEADER_LEN: usize = 36;

/// Size of one encoded point (two little-endian doubles)
pub const POINT_LEN: usize = 16;

fn point_at(buffer: &DataBuffer, index: &mut usize) -> Result<Point> {
    let x = buffer.f64_at(index, Endianness::Little)?;
    let y = buffer.f64_at(index, Endianness::Little)?;
    Ok(Point::new(x, y))
}

fn bounding_box_at(buffer: &DataBuffer, index: &mut usize) -> Result<BoundingBox> {
    let min_x = buffer.f64_at(index, Endianness::Little)?;
    let min_y = buffer.f64_at(index, Endianness::Little)?;
    let max_x = buffer.f64_at(index, Endianness::Little)?;
    let max_y = buffer.f64_at(index, Endianness::Little)?;
    Ok(BoundingBox::new(min_x, min_y, max_x, max_y))
}

/// Read the single point of a Point record.
///
/// Point records have no shape header; the point follows the shape tag
/// directly at `record_start + 12`.
pub fn read_point<S: Read + Seek>(stream: &mut S, record_start: u64) -> Result<Point> {
    stream.seek(SeekFrom::Start(record_start + PAYLOAD_OFFSET))?;
    let buffer = DataBuffer::from_stream(stream, POINT_LEN)?;
    let mut index = 0;
    point_at(&buffer, &mut index)
}

/// Fixed header of a polyline payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineHeader {
    pub bounding_box: BoundingBox,
    pub num_parts: i32,
    pub num_points: i32,
}

impl PolylineHeader {
    /// Decode from the [`POLYLINE_HEADER_LEN`] bytes following the shape tag
    pub fn decode(buffer: &DataBuffer) -> Result<Self> {
        let mut index = 0;
        let bounding_box = bounding_box_at(buffer, &mut index)?;
        let num_parts = buffer.i32_at(&mut index, Endianness::Little)?;
        let num_points = buffer.i32_at(&mut index, Endianness::Little)?;

        if num_parts < 0 || num_points < 0 {
            return Err(ShpError::InvalidFormat(format!(
                "polyline header with negative counts (parts {}, points {})",
                num_parts, num_points
            )));
        }

        Ok(Self {
            bounding_box,
            num_parts,
            num_points,
        })
    }
}

/// Fixed header of a multipoint payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiPointHeader {
    pub bounding_box: BoundingBox,
    pub num_points: i32,
}

impl MultiPointHeader {
    /// Decode from the [`MULTI_POINT_HEADER_LEN`] bytes following the shape tag
    pub fn decode(buffer: &DataBuffer) -> Result<Self> {
        let mut index = 0;
        let bounding_box = bounding_box_at(buffer, &mut index)?;
        let num_points = buffer.i32_at(&mut index, Endianness::Little)?;

        if num_points < 0 {
            return Err(ShpError::InvalidFormat(format!(
                "multipoint header with negative point count {}",
                num_points
            )));
        }

        Ok(Self {
            bounding_box,
            num_points,
        })
    }
}

/// Streams the points of one polyline record
///
/// Construction seeks to the record's payload, decodes the fixed header
/// and skips the part index table; the part boundaries are not retained.
/// Points from all parts surface as one flat sequence.
pub struct PolylineCursor<'a, S: Read + Seek> {
    stream: &'a mut S,
    header: PolylineHeader,
    points_read: i32,
}

impl<'a, S: Read + Seek> PolylineCursor<'a, S> {
    pub(crate) fn new(stream: &'a mut S, record_start: u64) -> Result<Self> {
        stream.seek(SeekFrom::Start(record_start + PAYLOAD_OFFSET))?;
        let buffer = DataBuffer::from_stream(stream, POLYLINE_HEADER_LEN)?;
        let header = PolylineHeader::decode(&buffer)?;

        // Part index table, 4 bytes per part
        stream.seek(SeekFrom::Current(4 * header.num_parts as i64))?;

        Ok(Self {
            stream,
            header,
            points_read: 0,
        })
    }

    /// The record's decoded shape header
    pub fn header(&self) -> &PolylineHeader {
        &self.header
    }

    /// Points yielded so far
    pub fn points_read(&self) -> i32 {
        self.points_read
    }

    /// Read the next point, or `Ok(None)` once all points have been
    /// yielded. An exhausted cursor never touches the stream again; a
    /// short read mid-record is [`ShpError::Truncated`].
    pub fn next_point(&mut self) -> Result<Option<Point>> {
        if self.points_read >= self.header.num_points {
            return Ok(None);
        }
        let buffer = DataBuffer::from_stream(self.stream, POINT_LEN)?;
        let mut index = 0;
        let point = point_at(&buffer, &mut index)?;
        self.points_read += 1;
        Ok(Some(point))
    }
}

/// Streams the points of one multipoint record
///
/// Identical to [`PolylineCursor`] except the fixed header carries no part
/// count and there is no part index table to skip.
pub struct MultiPointCursor<'a, S: Read + Seek> {
    stream: &'a mut S,
    header: MultiPointHeader,
    points_read: i32,
}

impl<'a, S: Read + Seek> MultiPointCursor<'a, S> {
    pub(crate) fn new(stream: &'a mut S, record_start: u64) -> Result<Self> {
        stream.seek(SeekFrom::Start(record_start + PAYLOAD_OFFSET))?;
        let buffer = DataBuffer::from_stream(stream, MULTI_POINT_HEADER_LEN)?;
        let header = MultiPointHeader::decode(&buffer)?;

        Ok(Self {
            stream,
            header,
            points_read: 0,
        })
    }

    /// The record's decoded shape header
    pub fn header(&self) -> &MultiPointHeader {
        &self.header
    }

    /// Points yielded so far
    pub fn points_read(&self) -> i32 {
        self.points_read
    }

    /// Read the next point, or `Ok(None)` once all points have been yielded
    pub fn next_point(&mut self) -> Result<Option<Point>> {
        if self.points_read >= self.header.num_points {
            return Ok(None);
        }
        let buffer = DataBuffer::from_stream(self.stream, POINT_LEN)?;
        let mut index = 0;
        let point = point_at(&buffer, &mut index)?;
        self.points_read += 1;
        Ok(Some(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{LittleEndian, WriteBytesExt};
    use std::io::Cursor;

    fn polyline_payload(parts: &[i32], points: &[(f64, f64)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for value in [0.0, 0.0, 100.0, 100.0] {
            bytes.write_f64::<LittleEndian>(value).unwrap();
        }
        bytes.write_i32::<LittleEndian>(parts.len() as i32).unwrap();
        bytes.write_i32::<LittleEndian>(points.len() as i32).unwrap();
        for part in parts {
            bytes.write_i32::<LittleEndian>(*part).unwrap();
        }
        for (x, y) in points {
            bytes.write_f64::<LittleEndian>(*x).unwrap();
            bytes.write_f64::<LittleEndian>(*y).unwrap();
        }
        bytes
    }

    fn record_with_payload(payload: &[u8]) -> Cursor<Vec<u8>> {
        // 12 bytes of record header + shape tag, zero-filled; the geometry
        // cursors only care about what sits past PAYLOAD_OFFSET
        let mut bytes = vec![0u8; PAYLOAD_OFFSET as usize];
        bytes.extend_from_slice(payload);
        Cursor::new(bytes)
    }

    #[test]
    fn test_polyline_streams_all_points() {
        let payload = polyline_payload(&[0, 2], &[(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
        let mut stream = record_with_payload(&payload);
        let mut cursor = PolylineCursor::new(&mut stream, 0).unwrap();

        assert_eq!(cursor.header().num_parts, 2);
        assert_eq!(cursor.header().num_points, 3);
        assert_eq!(cursor.next_point().unwrap(), Some(Point::new(1.0, 2.0)));
        assert_eq!(cursor.next_point().unwrap(), Some(Point::new(3.0, 4.0)));
        assert_eq!(cursor.next_point().unwrap(), Some(Point::new(5.0, 6.0)));
        assert_eq!(cursor.next_point().unwrap(), None);
        assert_eq!(cursor.next_point().unwrap(), None);
        assert_eq!(cursor.points_read(), 3);
    }

    #[test]
    fn test_polyline_zero_parts() {
        let payload = polyline_payload(&[], &[(7.0, 8.0)]);
        let mut stream = record_with_payload(&payload);
        let mut cursor = PolylineCursor::new(&mut stream, 0).unwrap();
        assert_eq!(cursor.next_point().unwrap(), Some(Point::new(7.0, 8.0)));
        assert_eq!(cursor.next_point().unwrap(), None);
    }

    #[test]
    fn test_polyline_zero_points() {
        let payload = polyline_payload(&[], &[]);
        let mut stream = record_with_payload(&payload);
        let mut cursor = PolylineCursor::new(&mut stream, 0).unwrap();
        assert_eq!(cursor.next_point().unwrap(), None);
    }

    #[test]
    fn test_polyline_truncated_mid_record() {
        let mut payload = polyline_payload(&[0], &[(1.0, 2.0), (3.0, 4.0)]);
        payload.truncate(payload.len() - 10);
        let mut stream = record_with_payload(&payload);
        let mut cursor = PolylineCursor::new(&mut stream, 0).unwrap();

        assert_eq!(cursor.next_point().unwrap(), Some(Point::new(1.0, 2.0)));
        assert!(matches!(
            cursor.next_point(),
            Err(ShpError::Truncated { .. })
        ));
    }

    #[test]
    fn test_polyline_rejects_negative_counts() {
        let mut payload = polyline_payload(&[], &[]);
        // Overwrite numPoints with -1
        let offset = 36;
        payload[offset..offset + 4].copy_from_slice(&(-1i32).to_le_bytes());
        let mut stream = record_with_payload(&payload);
        assert!(matches!(
            PolylineCursor::new(&mut stream, 0),
            Err(ShpError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_multi_point_streams_all_points() {
        let mut payload = Vec::new();
        for value in [0.0, 0.0, 10.0, 10.0] {
            payload.write_f64::<LittleEndian>(value).unwrap();
        }
        payload.write_i32::<LittleEndian>(2).unwrap();
        for (x, y) in [(9.0, 8.0), (7.0, 6.0)] {
            payload.write_f64::<LittleEndian>(x).unwrap();
            payload.write_f64::<LittleEndian>(y).unwrap();
        }

        let mut stream = record_with_payload(&payload);
        let mut cursor = MultiPointCursor::new(&mut stream, 0).unwrap();
        assert_eq!(cursor.header().num_points, 2);
        assert_eq!(cursor.next_point().unwrap(), Some(Point::new(9.0, 8.0)));
        assert_eq!(cursor.next_point().unwrap(), Some(Point::new(7.0, 6.0)));
        assert_eq!(cursor.next_point().unwrap(), None);
    }

    #[test]
    fn test_read_point() {
        let mut payload = Vec::new();
        payload.write_f64::<LittleEndian>(10.0).unwrap();
        payload.write_f64::<LittleEndian>(20.0).unwrap();
        let mut stream = record_with_payload(&payload);
        assert_eq!(read_point(&mut stream, 0).unwrap(), Point::new(10.0, 20.0));
    }
}
