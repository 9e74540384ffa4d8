//! Attribute region header and 39-byte attribute definitions.
//!
//! An attribute region starts with a 348-byte header, followed directly by
//! `num_attrs` definitions. Values live further on, one fixed-size slot per
//! record starting at `off_attr_value` (relative to the header start).

use std::fmt;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{MapGisError, Result};
use crate::io::mapgis::region_view::RegionView;

use super::FixedRecord;

/// Size of the attribute region header.
pub const ATTRIBUTE_HEADER_SIZE: usize = 348;

/// Size of one attribute definition.
pub const ATTRIBUTE_DEFINITION_SIZE: usize = 39;

/// Width of the name field.
pub const ATTRIBUTE_NAME_SIZE: usize = 20;

/// Attribute value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// Legacy-encoded, NUL-padded text.
    String,
    Int32,
    Float32,
    Float64,
}

impl AttributeType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AttributeType::String),
            3 => Some(AttributeType::Int32),
            4 => Some(AttributeType::Float32),
            5 => Some(AttributeType::Float64),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            AttributeType::String => 0,
            AttributeType::Int32 => 3,
            AttributeType::Float32 => 4,
            AttributeType::Float64 => 5,
        }
    }

    /// Bytes a value of this type occupies, `None` for strings.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            AttributeType::String => None,
            AttributeType::Int32 | AttributeType::Float32 => Some(4),
            AttributeType::Float64 => Some(8),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::String => "string",
            AttributeType::Int32 => "int32",
            AttributeType::Float32 => "float32",
            AttributeType::Float64 => "float64",
        };
        f.write_str(name)
    }
}

/// Header of an attribute region.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeHeader {
    /// Twelve leading bytes, constant in the files seen so far.
    pub magic: [u8; 12],
    /// Start of the value slots, relative to the header start.
    pub off_attr_value: i32,
    pub num_attrs: i16,
    pub unknown_int: i32,
    /// Size of one value slot.
    pub attrs_size: i32,
    /// Every byte not covered above, in file order.
    pub reserved: Vec<u8>,
}

impl AttributeHeader {
    pub fn new(off_attr_value: i32, num_attrs: i16, attrs_size: i32) -> Self {
        Self {
            magic: [0; 12],
            off_attr_value,
            num_attrs,
            unknown_int: 0,
            attrs_size,
            reserved: vec![0; 306 + 16],
        }
    }

    /// Parse the header at the start of an attribute region.
    pub fn parse(region: RegionView<'_>) -> Result<Self> {
        let bytes = region.get(0, ATTRIBUTE_HEADER_SIZE).ok_or(MapGisError::TruncatedFile {
            structure: "attribute header",
            offset: region.base(),
            expected: ATTRIBUTE_HEADER_SIZE,
            available: region.len(),
        })?;
        let mut c = Cursor::new(bytes);

        let mut magic = [0u8; 12];
        c.read_exact(&mut magic)?;
        let off_attr_value = c.read_i32::<LittleEndian>()?;
        let mut reserved = vec![0u8; 306];
        c.read_exact(&mut reserved)?;
        let num_attrs = c.read_i16::<LittleEndian>()?;
        let unknown_int = c.read_i32::<LittleEndian>()?;
        let attrs_size = c.read_i32::<LittleEndian>()?;
        let mut tail = [0u8; 16];
        c.read_exact(&mut tail)?;
        reserved.extend_from_slice(&tail);

        Ok(Self {
            magic,
            off_attr_value,
            num_attrs,
            unknown_int,
            attrs_size,
            reserved,
        })
    }

    /// Number of definitions, negative counts read as zero.
    pub fn definition_count(&self) -> usize {
        usize::try_from(self.num_attrs).unwrap_or(0)
    }

    /// View over the definition array that follows the header.
    pub fn definitions_view<'a>(&self, region: RegionView<'a>) -> Result<RegionView<'a>> {
        let len = self.definition_count() * ATTRIBUTE_DEFINITION_SIZE;
        region
            .subview(ATTRIBUTE_HEADER_SIZE, len)
            .ok_or(MapGisError::TruncatedFile {
                structure: "attribute definitions",
                offset: region.base() + ATTRIBUTE_HEADER_SIZE as u64,
                expected: len,
                available: region.len().saturating_sub(ATTRIBUTE_HEADER_SIZE),
            })
    }
}

/// One attribute definition.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    /// Raw, NUL-padded, legacy-encoded name.
    pub name: [u8; ATTRIBUTE_NAME_SIZE],
    /// Raw type code, see [`AttributeType::from_code`].
    pub type_code: u8,
    /// Offset of the value inside a record slot.
    pub attr_offset: i32,
    /// Bytes occupied by the value.
    pub size: i16,
    /// Digits for integers, integer digits for floats, max length for strings.
    pub digits: i16,
    /// Decimal digits for floats.
    pub decimals: u8,
    pub unknown: [u8; 3],
    /// Declared position, usually from 0.
    pub index: i32,
    pub unknown_short: i16,
}

impl AttributeDefinition {
    /// Build a definition; `name` is truncated to the field width.
    pub fn new(name: &[u8], attribute_type: AttributeType, attr_offset: i32, size: i16, index: i32) -> Self {
        let mut raw = [0u8; ATTRIBUTE_NAME_SIZE];
        let n = name.len().min(ATTRIBUTE_NAME_SIZE - 1);
        raw[..n].copy_from_slice(&name[..n]);
        Self {
            name: raw,
            type_code: attribute_type.code(),
            attr_offset,
            size,
            digits: 0,
            decimals: 0,
            unknown: [1, 0, 0],
            index,
            unknown_short: 0,
        }
    }

    pub fn attribute_type(&self) -> Option<AttributeType> {
        AttributeType::from_code(self.type_code)
    }

    /// Name bytes up to the first NUL.
    pub fn name_bytes(&self) -> &[u8] {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        &self.name[..end]
    }
}

impl FixedRecord for AttributeDefinition {
    const STRIDE: usize = ATTRIBUTE_DEFINITION_SIZE;
    const NAME: &'static str = "attribute definitions";

    fn parse(bytes: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(bytes);
        let mut name = [0u8; ATTRIBUTE_NAME_SIZE];
        c.read_exact(&mut name)?;
        let type_code = c.read_u8()?;
        let attr_offset = c.read_i32::<LittleEndian>()?;
        let size = c.read_i16::<LittleEndian>()?;
        let digits = c.read_i16::<LittleEndian>()?;
        let decimals = c.read_u8()?;
        let mut unknown = [0u8; 3];
        c.read_exact(&mut unknown)?;
        let index = c.read_i32::<LittleEndian>()?;
        let unknown_short = c.read_i16::<LittleEndian>()?;
        Ok(Self {
            name,
            type_code,
            attr_offset,
            size,
            digits,
            decimals,
            unknown,
            index,
            unknown_short,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::mapgis::record_readers::decode_records;
    use crate::io::mapgis::RegionKind;

    #[test]
    fn test_type_codes() {
        assert_eq!(AttributeType::from_code(0), Some(AttributeType::String));
        assert_eq!(AttributeType::from_code(3), Some(AttributeType::Int32));
        assert_eq!(AttributeType::from_code(4), Some(AttributeType::Float32));
        assert_eq!(AttributeType::from_code(5), Some(AttributeType::Float64));
        assert_eq!(AttributeType::from_code(1), None);
        assert_eq!(AttributeType::Float64.fixed_width(), Some(8));
        assert_eq!(AttributeType::String.fixed_width(), None);
    }

    #[test]
    fn test_header_offsets() {
        let mut raw = vec![0u8; ATTRIBUTE_HEADER_SIZE];
        raw[12..16].copy_from_slice(&500i32.to_le_bytes());
        raw[322..324].copy_from_slice(&2i16.to_le_bytes());
        raw[328..332].copy_from_slice(&13i32.to_le_bytes());
        let view = RegionView::new(RegionKind::PolygonAttr, 0, &raw);

        let header = AttributeHeader::parse(view).unwrap();
        assert_eq!(header.off_attr_value, 500);
        assert_eq!(header.num_attrs, 2);
        assert_eq!(header.attrs_size, 13);
        assert_eq!(header.reserved.len(), 322);

        // No room for the two definitions.
        assert!(matches!(
            header.definitions_view(view),
            Err(MapGisError::TruncatedFile { .. })
        ));
    }

    #[test]
    fn test_short_header() {
        let raw = vec![0u8; 100];
        let view = RegionView::new(RegionKind::PolygonAttr, 40, &raw);
        assert!(matches!(
            AttributeHeader::parse(view),
            Err(MapGisError::TruncatedFile {
                offset: 40,
                available: 100,
                ..
            })
        ));
    }

    #[test]
    fn test_definition_offsets() {
        let mut raw = [0u8; ATTRIBUTE_DEFINITION_SIZE * 2];
        raw[0..2].copy_from_slice(b"ID");
        raw[20] = 3;
        raw[21..25].copy_from_slice(&1i32.to_le_bytes());
        raw[25..27].copy_from_slice(&4i16.to_le_bytes());
        raw[33..37].copy_from_slice(&0i32.to_le_bytes());
        let second = &mut raw[ATTRIBUTE_DEFINITION_SIZE..];
        second[0..4].copy_from_slice(b"AREA");
        second[20] = 5;
        second[21..25].copy_from_slice(&5i32.to_le_bytes());
        second[25..27].copy_from_slice(&8i16.to_le_bytes());
        second[29] = 2;
        second[33..37].copy_from_slice(&1i32.to_le_bytes());

        let view = RegionView::new(RegionKind::PolygonAttr, 0, &raw);
        let defs: Vec<AttributeDefinition> = decode_records(view).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name_bytes(), b"ID");
        assert_eq!(defs[0].attribute_type(), Some(AttributeType::Int32));
        assert_eq!(defs[0].attr_offset, 1);
        assert_eq!(defs[1].name_bytes(), b"AREA");
        assert_eq!(defs[1].attribute_type(), Some(AttributeType::Float64));
        assert_eq!(defs[1].size, 8);
        assert_eq!(defs[1].decimals, 2);
        assert_eq!(defs[1].index, 1);
    }

    #[test]
    fn test_new_truncates_name() {
        let def = AttributeDefinition::new(&[b'x'; 30], AttributeType::String, 1, 10, 0);
        assert_eq!(def.name_bytes().len(), ATTRIBUTE_NAME_SIZE - 1);
    }
}
