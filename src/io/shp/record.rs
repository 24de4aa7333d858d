//! Sequential traversal over the record sequence of an open shapefile

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Result, ShpError};
use crate::types::{Point, ShapeType};

use super::data_buffer::DataBuffer;
use super::geometry::{read_point, MultiPointCursor, PolylineCursor};
use super::header::{RecordHeader, FILE_HEADER_LEN, RECORD_HEADER_LEN};

/// A record discovered by the cursor: its header plus its starting byte
/// offset in the file. The offset is the handle geometry cursors consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub header: RecordHeader,
    /// Byte offset of the record's 8-byte header
    pub offset: u64,
}

impl Record {
    /// 1-based record number
    pub fn number(&self) -> i32 {
        self.header.record_number
    }

    /// Shape type of the record's payload
    pub fn shape_type(&self) -> ShapeType {
        self.header.shape_type
    }

    /// Byte offset of the record that follows this one
    pub fn next_offset(&self) -> u64 {
        self.offset + RECORD_HEADER_LEN as u64 + self.header.content_length_bytes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    NotStarted,
    Positioned,
    Exhausted,
}

/// Single-pass cursor over the records of a shapefile
///
/// The cursor borrows the reader's stream mutably for its whole lifetime,
/// so no other cursor can reposition the stream mid-traversal. Termination
/// is an explicit state: a clean end of the record sequence leaves the
/// cursor `Exhausted`, while a partial header read surfaces
/// [`ShpError::Truncated`].
pub struct RecordCursor<'a, S: Read + Seek> {
    stream: &'a mut S,
    state: CursorState,
    current: Option<Record>,
}

impl<'a, S: Read + Seek> RecordCursor<'a, S> {
    pub(crate) fn new(stream: &'a mut S) -> Self {
        Self {
            stream,
            state: CursorState::NotStarted,
            current: None,
        }
    }

    /// Move to the next record and decode its header.
    ///
    /// The first call positions on the record at offset
    /// [`FILE_HEADER_LEN`]; later calls seek past the current record's
    /// content. Returns `Ok(None)` once the record sequence ends; after
    /// that the cursor stays exhausted and no further reads are issued.
    pub fn advance(&mut self) -> Result<Option<&Record>> {
        let offset = match self.state {
            CursorState::NotStarted => FILE_HEADER_LEN as u64,
            CursorState::Positioned => {
                // current is always present while positioned
                self.current.as_ref().ok_or(ShpError::NoRecord)?.next_offset()
            }
            CursorState::Exhausted => return Ok(None),
        };

        self.stream.seek(SeekFrom::Start(offset))?;

        let mut buffer = DataBuffer::new(RecordHeader::ENCODED_LEN);
        let filled = buffer.fill_from(self.stream)?;
        if filled == 0 {
            self.state = CursorState::Exhausted;
            self.current = None;
            return Ok(None);
        }
        if filled < buffer.len() {
            self.state = CursorState::Exhausted;
            self.current = None;
            return Err(ShpError::Truncated {
                needed: buffer.len(),
                available: filled,
            });
        }

        let header = match RecordHeader::decode(&buffer) {
            Ok(header) => header,
            Err(err) => {
                self.state = CursorState::Exhausted;
                self.current = None;
                return Err(err);
            }
        };
        self.state = CursorState::Positioned;
        self.current = Some(Record { header, offset });
        Ok(self.current.as_ref())
    }

    /// The record the cursor is positioned on, if any
    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    /// Whether the cursor has reached the end of the record sequence
    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    /// Decode the current record's payload as a single point.
    ///
    /// Point records carry no shape header; the 16-byte point follows the
    /// shape tag directly.
    pub fn point(&mut self) -> Result<Point> {
        let offset = self.current.as_ref().ok_or(ShpError::NoRecord)?.offset;
        read_point(&mut *self.stream, offset)
    }

    /// Stream the current record's payload as polyline points.
    ///
    /// The returned cursor borrows this one, so the record cursor cannot
    /// be advanced until the points are consumed or the cursor is dropped.
    pub fn polyline_points(&mut self) -> Result<PolylineCursor<'_, S>> {
        let offset = self.current.as_ref().ok_or(ShpError::NoRecord)?.offset;
        PolylineCursor::new(&mut *self.stream, offset)
    }

    /// Stream the current record's payload as multipoint points.
    pub fn multi_point_points(&mut self) -> Result<MultiPointCursor<'_, S>> {
        let offset = self.current.as_ref().ok_or(ShpError::NoRecord)?.offset;
        MultiPointCursor::new(&mut *self.stream, offset)
    }
}
