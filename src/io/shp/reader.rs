//! Shapefile reader facade

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Result, ShpError};
use crate::types::{BoundingBox, Point, ShapeType};

use super::data_buffer::DataBuffer;
use super::geometry::{read_point, MultiPointCursor, PolylineCursor};
use super::header::{FileHeader, FILE_HEADER_LEN};
use super::record::RecordCursor;

/// Reader behavior configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ShpReaderConfiguration {
    /// Skip magic-code and version validation when loading the header.
    /// Lets damaged or nonstandard files through; record and payload
    /// decoding still reports truncation and malformed counts.
    pub failsafe: bool,
}

/// Shapefile reader
///
/// Owns the input stream exclusively. Opening does not parse anything;
/// [`load`](ShpReader::load) decodes the 100-byte main header, after which
/// record and geometry cursors can be handed out. Cursors borrow the
/// stream mutably, so only one can be mid-traversal at a time.
pub struct ShpReader<S: Read + Seek> {
    stream: S,
    configuration: ShpReaderConfiguration,
    header: Option<FileHeader>,
}

impl ShpReader<BufReader<File>> {
    /// Open a shapefile from a path. The header is not read until
    /// [`load`](ShpReader::load).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<S: Read + Seek> ShpReader<S> {
    /// Create a reader over any seekable stream
    pub fn from_reader(stream: S) -> Self {
        Self {
            stream,
            configuration: ShpReaderConfiguration::default(),
            header: None,
        }
    }

    /// Set the reader configuration
    pub fn with_configuration(mut self, configuration: ShpReaderConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Read and decode the main file header. Safe to call more than once;
    /// a reader that already loaded is left untouched.
    pub fn load(&mut self) -> Result<()> {
        if self.header.is_some() {
            return Ok(());
        }

        self.stream.seek(SeekFrom::Start(0))?;
        let buffer = DataBuffer::from_stream(&mut self.stream, FILE_HEADER_LEN)?;
        let header = FileHeader::decode(&buffer)?;
        if !self.configuration.failsafe {
            header.validate()?;
        }

        self.header = Some(header);
        Ok(())
    }

    /// Whether [`load`](ShpReader::load) has succeeded
    pub fn is_loaded(&self) -> bool {
        self.header.is_some()
    }

    /// The decoded main header, if loaded
    pub fn header(&self) -> Option<&FileHeader> {
        self.header.as_ref()
    }

    /// Shape type declared by the file header, or
    /// [`ShapeType::Undefined`] before a successful load
    pub fn shape_type(&self) -> ShapeType {
        self.header
            .as_ref()
            .map_or(ShapeType::Undefined, |header| header.shape_type)
    }

    /// Extent declared by the file header, if loaded
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.header.as_ref().map(|header| header.bounding_box)
    }

    /// Start a traversal over the file's records.
    ///
    /// The cursor borrows the reader mutably for its whole lifetime; drop
    /// it before requesting another cursor.
    pub fn records(&mut self) -> Result<RecordCursor<'_, S>> {
        if self.header.is_none() {
            return Err(ShpError::NotLoaded);
        }
        Ok(RecordCursor::new(&mut self.stream))
    }

    /// Decode the Point record starting at `record_start`.
    ///
    /// The caller is responsible for passing the offset of a record whose
    /// shape tag is actually [`ShapeType::Point`]; the reader does not
    /// cross-check the tag.
    pub fn point_at(&mut self, record_start: u64) -> Result<Point> {
        if self.header.is_none() {
            return Err(ShpError::NotLoaded);
        }
        read_point(&mut self.stream, record_start)
    }

    /// Stream the polyline record starting at `record_start`
    pub fn polyline_cursor(&mut self, record_start: u64) -> Result<PolylineCursor<'_, S>> {
        if self.header.is_none() {
            return Err(ShpError::NotLoaded);
        }
        PolylineCursor::new(&mut self.stream, record_start)
    }

    /// Stream the multipoint record starting at `record_start`
    pub fn multi_point_cursor(&mut self, record_start: u64) -> Result<MultiPointCursor<'_, S>> {
        if self.header.is_none() {
            return Err(ShpError::NotLoaded);
        }
        MultiPointCursor::new(&mut self.stream, record_start)
    }
}
