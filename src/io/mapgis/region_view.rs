//! Bounds-checked access into loaded data regions.
//!
//! Every offset stored in a MapGIS record is relative to the start of some
//! region. A [`RegionView`] pairs the region's bytes with its kind and file
//! position so that out-of-range offsets become errors that point back to
//! the offending bytes in the file.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{MapGisError, Result};

use super::region_directory::{DataRegion, RegionKind};

/// Seek to `offset` and read exactly `len` bytes, reporting a short read as
/// [`MapGisError::TruncatedFile`].
pub(crate) fn read_fully<R: Read + Seek>(
    stream: &mut R,
    offset: u64,
    len: usize,
    structure: &'static str,
) -> Result<Vec<u8>> {
    stream.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::new();
    let available = stream.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if available < len {
        return Err(MapGisError::TruncatedFile {
            structure,
            offset,
            expected: len,
            available,
        });
    }
    Ok(buf)
}

/// A region read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRegion {
    kind: RegionKind,
    base: u64,
    bytes: Vec<u8>,
}

impl LoadedRegion {
    pub fn new(kind: RegionKind, base: u64, bytes: Vec<u8>) -> Self {
        Self { kind, base, bytes }
    }

    /// Load the region described by a directory entry.
    pub fn load<R: Read + Seek>(stream: &mut R, kind: RegionKind, region: &DataRegion) -> Result<Self> {
        let (offset, length) = region.bounds(kind)?;
        let bytes = if length == 0 {
            Vec::new()
        } else {
            read_fully(stream, offset, length, "data region")?
        };
        Ok(Self::new(kind, offset, bytes))
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn view(&self) -> RegionView<'_> {
        RegionView::new(self.kind, self.base, &self.bytes)
    }
}

/// Borrowed `(kind, file offset, bytes)` view of one region.
#[derive(Debug, Clone, Copy)]
pub struct RegionView<'a> {
    kind: RegionKind,
    base: u64,
    bytes: &'a [u8],
}

impl<'a> RegionView<'a> {
    pub fn new(kind: RegionKind, base: u64, bytes: &'a [u8]) -> Self {
        Self { kind, base, bytes }
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    /// File offset of the first byte.
    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// `len` bytes at `offset`, or `None` when any of them lies outside the
    /// region. Negative offsets are always outside.
    pub fn get(&self, offset: i64, len: usize) -> Option<&'a [u8]> {
        let start = usize::try_from(offset).ok()?;
        let end = start.checked_add(len)?;
        self.bytes.get(start..end)
    }

    /// Like [`get`](Self::get) for offsets taken from geometry records.
    pub fn geometry_slice(&self, offset: i64, len: usize) -> Result<&'a [u8]> {
        self.get(offset, len)
            .ok_or(MapGisError::GeometryOffsetOutOfRange {
                offset,
                required: len,
                length: self.bytes.len(),
            })
    }

    /// The first `len` bytes as a view of the same region.
    pub fn prefix(&self, len: usize) -> Option<RegionView<'a>> {
        self.bytes.get(..len).map(|bytes| RegionView::new(self.kind, self.base, bytes))
    }

    /// A sub-view starting at `offset` (relative to this view).
    pub fn subview(&self, offset: usize, len: usize) -> Option<RegionView<'a>> {
        let end = offset.checked_add(len)?;
        self.bytes
            .get(offset..end)
            .map(|bytes| RegionView::new(self.kind, self.base + offset as u64, bytes))
    }
}
