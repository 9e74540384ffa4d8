//! 40-byte polygon record.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::Result;

use super::FixedRecord;

/// Size of one polygon record.
pub const POLYGON_RECORD_SIZE: usize = 40;

/// A polygon (area) record.
///
/// The polygon is bounded by the lines listed in its line-index array: a
/// run of `num_lines` i32 values at [`off_line_info`](Self::off_line_info)
/// in the coordinate region. The first value is a point count, `0` separates
/// rings, and negative numbers reference lines traversed backwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonRecord {
    /// Usually 1.
    pub flag: u8,
    /// Length of the line-index array, leading count included.
    pub num_lines: i32,
    /// Offset of the line-index array, relative to the coordinate region.
    pub off_line_info: i32,
    /// Fill color number into the color table.
    pub color: i32,
    pub fill_pattern: u16,
    pub pattern_height: f32,
    pub pattern_width: f32,
    pub pen_width: u16,
    pub pattern_color: u32,
    pub transparent: u8,
    pub layer: u16,
    pub line_index1: i32,
    pub line_index2: i32,
}

impl PolygonRecord {
    /// A record with a line-index array of `num_lines` entries at `off_line_info`.
    pub fn with_lines(num_lines: i32, off_line_info: i32, color: i32) -> Self {
        Self {
            flag: 1,
            num_lines,
            off_line_info,
            color,
            ..Default::default()
        }
    }
}

impl FixedRecord for PolygonRecord {
    const STRIDE: usize = POLYGON_RECORD_SIZE;
    const NAME: &'static str = "polygon record table";

    fn parse(bytes: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(bytes);
        Ok(Self {
            flag: c.read_u8()?,
            num_lines: c.read_i32::<LittleEndian>()?,
            off_line_info: c.read_i32::<LittleEndian>()?,
            color: c.read_i32::<LittleEndian>()?,
            fill_pattern: c.read_u16::<LittleEndian>()?,
            pattern_height: c.read_f32::<LittleEndian>()?,
            pattern_width: c.read_f32::<LittleEndian>()?,
            pen_width: c.read_u16::<LittleEndian>()?,
            pattern_color: c.read_u32::<LittleEndian>()?,
            transparent: c.read_u8()?,
            layer: c.read_u16::<LittleEndian>()?,
            line_index1: c.read_i32::<LittleEndian>()?,
            line_index2: c.read_i32::<LittleEndian>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_offsets() {
        let mut raw = [0u8; POLYGON_RECORD_SIZE];
        raw[0] = 1;
        raw[1..5].copy_from_slice(&4i32.to_le_bytes());
        raw[5..9].copy_from_slice(&1024i32.to_le_bytes());
        raw[9..13].copy_from_slice(&12i32.to_le_bytes());
        raw[13..15].copy_from_slice(&7u16.to_le_bytes());
        raw[23..25].copy_from_slice(&3u16.to_le_bytes());
        raw[25..29].copy_from_slice(&0xABCDu32.to_le_bytes());
        raw[29] = 1;
        raw[30..32].copy_from_slice(&5u16.to_le_bytes());
        raw[36..40].copy_from_slice(&(-8i32).to_le_bytes());

        let rec = PolygonRecord::parse(&raw).unwrap();
        assert_eq!(rec.flag, 1);
        assert_eq!(rec.num_lines, 4);
        assert_eq!(rec.off_line_info, 1024);
        assert_eq!(rec.color, 12);
        assert_eq!(rec.fill_pattern, 7);
        assert_eq!(rec.pen_width, 3);
        assert_eq!(rec.pattern_color, 0xABCD);
        assert_eq!(rec.transparent, 1);
        assert_eq!(rec.layer, 5);
        assert_eq!(rec.line_index2, -8);
    }
}
