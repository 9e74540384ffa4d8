//! MapGIS file header (the first 336 bytes of every `.WL`, `.WT` and `.WP`
//! file).

use std::fmt;
use std::io::{Cursor, Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{MapGisError, Result};
use crate::types::{BoundingBox2D, FileType};

use super::region_view::read_fully;

/// Size of the fixed file header.
pub const FILE_HEADER_SIZE: usize = 336;

/// Size of the reserved block between the directory hint and the counts.
const RESERVED_SIZE: usize = 240;

/// The fixed file header.
///
/// Each object count is followed by a companion field of unknown meaning;
/// those are kept as read and never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGisFileHeader {
    /// Eight-byte signature, e.g. ``WMAP`D23``.
    pub signature: [u8; 8],
    pub file_type: FileType,
    /// Absolute offset of the region directory.
    pub off_data_headers: i32,
    /// Probably the number of directory entries; informational only.
    pub data_header_count_hint: i32,
    pub reserved: Vec<u8>,
    pub num_lines: i32,
    pub num_lines_pad: i32,
    pub num_points: i32,
    pub num_points_pad: i32,
    pub num_polygons: i32,
    pub num_polygons_pad: i32,
    pub reserved_counts: [i32; 5],
    pub bounds: BoundingBox2D,
}

impl MapGisFileHeader {
    /// A header for `file_type` with every other field zeroed.
    pub fn new(file_type: FileType) -> Self {
        Self {
            signature: *file_type.signature(),
            file_type,
            off_data_headers: 0,
            data_header_count_hint: 0,
            reserved: vec![0; RESERVED_SIZE],
            num_lines: 0,
            num_lines_pad: 0,
            num_points: 0,
            num_points_pad: 0,
            num_polygons: 0,
            num_polygons_pad: 0,
            reserved_counts: [0; 5],
            bounds: BoundingBox2D::default(),
        }
    }

    /// Parse the header from its raw bytes.
    pub fn parse(bytes: &[u8; FILE_HEADER_SIZE]) -> Result<Self> {
        let mut cursor = Cursor::new(&bytes[..]);

        let mut signature = [0u8; 8];
        cursor.read_exact(&mut signature)?;

        let type_id = cursor.read_i32::<LittleEndian>()?;
        let file_type =
            FileType::from_type_id(type_id).ok_or(MapGisError::UnsupportedFileType { type_id })?;

        let off_data_headers = cursor.read_i32::<LittleEndian>()?;
        let data_header_count_hint = cursor.read_i32::<LittleEndian>()?;

        let mut reserved = vec![0u8; RESERVED_SIZE];
        cursor.read_exact(&mut reserved)?;

        let num_lines = cursor.read_i32::<LittleEndian>()?;
        let num_lines_pad = cursor.read_i32::<LittleEndian>()?;
        let num_points = cursor.read_i32::<LittleEndian>()?;
        let num_points_pad = cursor.read_i32::<LittleEndian>()?;
        let num_polygons = cursor.read_i32::<LittleEndian>()?;
        let num_polygons_pad = cursor.read_i32::<LittleEndian>()?;

        let mut reserved_counts = [0i32; 5];
        cursor.read_i32_into::<LittleEndian>(&mut reserved_counts)?;

        let xmin = cursor.read_f64::<LittleEndian>()?;
        let ymin = cursor.read_f64::<LittleEndian>()?;
        let xmax = cursor.read_f64::<LittleEndian>()?;
        let ymax = cursor.read_f64::<LittleEndian>()?;

        Ok(Self {
            signature,
            file_type,
            off_data_headers,
            data_header_count_hint,
            reserved,
            num_lines,
            num_lines_pad,
            num_points,
            num_points_pad,
            num_polygons,
            num_polygons_pad,
            reserved_counts,
            bounds: BoundingBox2D::new(xmin, ymin, xmax, ymax),
        })
    }

    /// Read the header from the start of a stream.
    pub fn read<R: Read + Seek>(stream: &mut R) -> Result<Self> {
        let bytes = read_fully(stream, 0, FILE_HEADER_SIZE, "file header")?;
        let mut raw = [0u8; FILE_HEADER_SIZE];
        raw.copy_from_slice(&bytes);
        Self::parse(&raw)
    }

    /// Whether the signature agrees with the type id.
    pub fn signature_matches(&self) -> bool {
        &self.signature == self.file_type.signature()
    }

    /// Offset of the region directory, rejecting negative values.
    pub fn directory_offset(&self) -> Result<u64> {
        u64::try_from(self.off_data_headers).map_err(|_| {
            MapGisError::InvalidHeader(format!(
                "negative region directory offset {}",
                self.off_data_headers
            ))
        })
    }

    pub fn line_count(&self) -> usize {
        usize::try_from(self.num_lines).unwrap_or(0)
    }

    pub fn point_count(&self) -> usize {
        usize::try_from(self.num_points).unwrap_or(0)
    }

    pub fn polygon_count(&self) -> usize {
        usize::try_from(self.num_polygons).unwrap_or(0)
    }
}

impl fmt::Display for MapGisFileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Type: {} ({})", self.file_type, String::from_utf8_lossy(&self.signature))?;
        writeln!(
            f,
            "Region directory offset: {}, entry hint: {}",
            self.off_data_headers, self.data_header_count_hint
        )?;
        writeln!(
            f,
            "Lines: {}({}), points: {}({}), polygons: {}({})",
            self.num_lines,
            self.num_lines_pad,
            self.num_points,
            self.num_points_pad,
            self.num_polygons,
            self.num_polygons_pad
        )?;
        write!(
            f,
            "xmin: {}, ymin: {}, xmax: {}, ymax: {}",
            self.bounds.min.x, self.bounds.min.y, self.bounds.max.x, self.bounds.max.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_header(type_id: i32) -> [u8; FILE_HEADER_SIZE] {
        let mut raw = [0u8; FILE_HEADER_SIZE];
        raw[0..8].copy_from_slice(b"WMAP`D23");
        raw[8..12].copy_from_slice(&type_id.to_le_bytes());
        raw[12..16].copy_from_slice(&336i32.to_le_bytes());
        raw[16..20].copy_from_slice(&16i32.to_le_bytes());
        raw[260..264].copy_from_slice(&7i32.to_le_bytes());
        raw[264..268].copy_from_slice(&0x55i32.to_le_bytes());
        raw[276..280].copy_from_slice(&3i32.to_le_bytes());
        raw[304..312].copy_from_slice(&1.5f64.to_le_bytes());
        raw[328..336].copy_from_slice(&99.0f64.to_le_bytes());
        raw
    }

    #[test]
    fn test_parse_fields() {
        let header = MapGisFileHeader::parse(&raw_header(2)).unwrap();
        assert_eq!(header.file_type, FileType::Polygon);
        assert!(header.signature_matches());
        assert_eq!(header.off_data_headers, 336);
        assert_eq!(header.data_header_count_hint, 16);
        assert_eq!(header.num_lines, 7);
        assert_eq!(header.num_lines_pad, 0x55);
        assert_eq!(header.num_polygons, 3);
        assert_eq!(header.bounds.min.x, 1.5);
        assert_eq!(header.bounds.max.y, 99.0);
        assert_eq!(header.reserved.len(), RESERVED_SIZE);
    }

    #[test]
    fn test_unsupported_type() {
        let err = MapGisFileHeader::parse(&raw_header(5)).unwrap_err();
        assert!(matches!(err, MapGisError::UnsupportedFileType { type_id: 5 }));
    }

    #[test]
    fn test_signature_mismatch_is_detected() {
        let header = MapGisFileHeader::parse(&raw_header(0)).unwrap();
        assert_eq!(header.file_type, FileType::Line);
        assert!(!header.signature_matches());
    }

    #[test]
    fn test_short_read() {
        let raw = raw_header(2);
        let mut stream = Cursor::new(raw[..200].to_vec());
        let err = MapGisFileHeader::read(&mut stream).unwrap_err();
        assert!(matches!(
            err,
            MapGisError::TruncatedFile {
                structure: "file header",
                expected: FILE_HEADER_SIZE,
                available: 200,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_directory_offset() {
        let mut raw = raw_header(2);
        raw[12..16].copy_from_slice(&(-1i32).to_le_bytes());
        let header = MapGisFileHeader::parse(&raw).unwrap();
        assert!(matches!(header.directory_offset(), Err(MapGisError::InvalidHeader(_))));
        assert_eq!(MapGisFileHeader::parse(&raw_header(2)).unwrap().directory_offset().unwrap(), 336);
    }

    #[test]
    fn test_negative_counts_read_as_zero() {
        let mut header = MapGisFileHeader::new(FileType::Line);
        header.num_lines = -3;
        assert_eq!(header.line_count(), 0);
    }
}
