//! Region directory: the fixed table of `(offset, length)` pairs that
//! locates every data region of a MapGIS file.

use std::fmt;
use std::io::{Cursor, Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{MapGisError, Result};

use super::region_view::read_fully;

/// Size in bytes of one directory entry.
pub const DATA_REGION_SIZE: usize = 10;

/// Number of entries in the directory.
pub const REGION_COUNT: usize = 16;

/// Size in bytes of the whole directory.
pub const REGION_DIRECTORY_SIZE: usize = DATA_REGION_SIZE * REGION_COUNT;

/// The named slots of the region directory, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKind {
    /// Line records (line and polygon files) or point records (point files).
    LineOrPointInfo,
    /// Coordinate blob (also holds polygon line-index arrays) or point strings.
    LineCoordsOrPointString,
    /// Line or point attributes.
    LineOrPointAttr,
    LineTopoRelation,
    NodeInfo,
    NodeAttr,
    UnknownInfo,
    UnknownAttr,
    /// Polygon records.
    PolygonInfo,
    /// Polygon attributes.
    PolygonAttr,
    Reserved0,
    Reserved1,
    Reserved2,
    Reserved3,
    Reserved4,
    Reserved5,
}

impl RegionKind {
    /// All kinds in directory order.
    pub const ALL: [RegionKind; REGION_COUNT] = [
        RegionKind::LineOrPointInfo,
        RegionKind::LineCoordsOrPointString,
        RegionKind::LineOrPointAttr,
        RegionKind::LineTopoRelation,
        RegionKind::NodeInfo,
        RegionKind::NodeAttr,
        RegionKind::UnknownInfo,
        RegionKind::UnknownAttr,
        RegionKind::PolygonInfo,
        RegionKind::PolygonAttr,
        RegionKind::Reserved0,
        RegionKind::Reserved1,
        RegionKind::Reserved2,
        RegionKind::Reserved3,
        RegionKind::Reserved4,
        RegionKind::Reserved5,
    ];

    /// Position of this slot in the directory.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            RegionKind::LineOrPointInfo => "line/point info",
            RegionKind::LineCoordsOrPointString => "line coordinates/point strings",
            RegionKind::LineOrPointAttr => "line/point attributes",
            RegionKind::LineTopoRelation => "line topology",
            RegionKind::NodeInfo => "node info",
            RegionKind::NodeAttr => "node attributes",
            RegionKind::UnknownInfo => "unknown info",
            RegionKind::UnknownAttr => "unknown attributes",
            RegionKind::PolygonInfo => "polygon info",
            RegionKind::PolygonAttr => "polygon attributes",
            RegionKind::Reserved0 => "reserved 0",
            RegionKind::Reserved1 => "reserved 1",
            RegionKind::Reserved2 => "reserved 2",
            RegionKind::Reserved3 => "reserved 3",
            RegionKind::Reserved4 => "reserved 4",
            RegionKind::Reserved5 => "reserved 5",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataRegion {
    /// Absolute file offset of the region.
    pub offset: i32,
    /// Length of the region in bytes.
    pub length: i32,
    /// Trailing marker, usually `0xFFFF`. Kept as read.
    pub pad: i16,
}

impl DataRegion {
    pub fn new(offset: i32, length: i32) -> Self {
        Self {
            offset,
            length,
            pad: -1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Validated `(file offset, length)` pair.
    pub fn bounds(&self, kind: RegionKind) -> Result<(u64, usize)> {
        match (u64::try_from(self.offset), usize::try_from(self.length)) {
            (Ok(offset), Ok(length)) => Ok((offset, length)),
            _ => Err(MapGisError::InvalidRegionBounds {
                region: kind,
                offset: self.offset,
                length: self.length,
            }),
        }
    }

    /// Last byte of the region, as the legacy tools print it.
    fn end_inclusive(&self) -> i64 {
        self.offset as i64 + self.length as i64 - 1
    }
}

impl fmt::Display for DataRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start {} (0x{:x}) | end {} (0x{:x}) | size {} (0x{:x})",
            self.offset,
            self.offset,
            self.end_inclusive(),
            self.end_inclusive(),
            self.length,
            self.length
        )
    }
}

/// The fixed-arity region directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionDirectory {
    entries: [DataRegion; REGION_COUNT],
}

impl RegionDirectory {
    pub fn new(entries: [DataRegion; REGION_COUNT]) -> Self {
        Self { entries }
    }

    /// Parse the directory from its 160 raw bytes.
    pub fn parse(bytes: &[u8; REGION_DIRECTORY_SIZE]) -> Result<Self> {
        let mut cursor = Cursor::new(&bytes[..]);
        let mut entries = [DataRegion::default(); REGION_COUNT];
        for entry in entries.iter_mut() {
            entry.offset = cursor.read_i32::<LittleEndian>()?;
            entry.length = cursor.read_i32::<LittleEndian>()?;
            entry.pad = cursor.read_i16::<LittleEndian>()?;
        }
        Ok(Self { entries })
    }

    /// Seek to `offset` and read the directory.
    pub fn read<R: Read + Seek>(stream: &mut R, offset: u64) -> Result<Self> {
        let bytes = read_fully(stream, offset, REGION_DIRECTORY_SIZE, "region directory")?;
        let mut raw = [0u8; REGION_DIRECTORY_SIZE];
        raw.copy_from_slice(&bytes);
        Self::parse(&raw)
    }

    pub fn get(&self, kind: RegionKind) -> &DataRegion {
        &self.entries[kind.index()]
    }

    pub fn set(&mut self, kind: RegionKind, region: DataRegion) {
        self.entries[kind.index()] = region;
    }

    /// Entries paired with their kind, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionKind, &DataRegion)> {
        RegionKind::ALL.iter().copied().zip(self.entries.iter())
    }
}

impl fmt::Display for RegionDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, region) in self.iter() {
            writeln!(f, "{:<32} {}", kind.name(), region)?;
        }
        Ok(())
    }
}
