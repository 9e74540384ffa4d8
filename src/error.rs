//! Error types for MapGIS reading

use thiserror::Error;

use crate::io::mapgis::RegionKind;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, MapGisError>;

/// Errors raised while decoding a MapGIS file or color table.
///
/// Every variant except [`MapGisError::UnknownAttributeType`] aborts the
/// read; the latter is only ever surfaced as a notification.
#[derive(Error, Debug)]
pub enum MapGisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Truncated file: {structure} at offset {offset} needs {expected} bytes, {available} available")]
    TruncatedFile {
        structure: &'static str,
        offset: u64,
        expected: usize,
        available: usize,
    },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Unsupported file type id {type_id} (expected 0 = line, 1 = point, 2 = polygon)")]
    UnsupportedFileType { type_id: i32 },

    #[error("Invalid bounds for region {region}: offset {offset}, length {length}")]
    InvalidRegionBounds {
        region: RegionKind,
        offset: i32,
        length: i32,
    },

    #[error("Corrupt region {region}: length {length} is not usable with record stride {stride}")]
    CorruptRegion {
        region: RegionKind,
        length: usize,
        stride: usize,
    },

    #[error("Geometry offset {offset} (+{required} bytes) is outside the coordinate region of {length} bytes")]
    GeometryOffsetOutOfRange {
        offset: i64,
        required: usize,
        length: usize,
    },

    #[error("Line number {line} is outside the line table ({available} lines)")]
    LineIndexOutOfRange { line: i64, available: usize },

    #[error("Unknown color number {index} (color table holds numbers 1..{available})")]
    UnknownColorIndex { index: i32, available: usize },

    #[error("Invalid color table: {0}")]
    InvalidColorTable(String),

    #[error("Attribute '{attribute}' at offset {offset} (+{size} bytes) is outside its {available} byte value area")]
    AttributeOffsetOutOfRange {
        attribute: String,
        offset: i64,
        size: usize,
        available: usize,
    },

    #[error("Attribute '{attribute}' has unknown type code {type_code}")]
    UnknownAttributeType { attribute: String, type_code: u8 },
}

impl MapGisError {
    /// Whether this error aborts the whole read.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, MapGisError::UnknownAttributeType { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unknown_attribute_type_is_recoverable() {
        let err = MapGisError::UnknownAttributeType {
            attribute: "NAME".to_string(),
            type_code: 9,
        };
        assert!(!err.is_fatal());
        assert!(MapGisError::UnsupportedFileType { type_id: 7 }.is_fatal());
    }

    #[test]
    fn test_messages_carry_location() {
        let err = MapGisError::GeometryOffsetOutOfRange {
            offset: 4096,
            required: 32,
            length: 4100,
        };
        let msg = err.to_string();
        assert!(msg.contains("4096"));
        assert!(msg.contains("4100"));

        let err = MapGisError::CorruptRegion {
            region: RegionKind::PolygonInfo,
            length: 81,
            stride: 40,
        };
        let msg = err.to_string();
        assert!(msg.contains("81"));
        assert!(msg.contains("40"));
        assert!(msg.contains("polygon info"));
    }
}
