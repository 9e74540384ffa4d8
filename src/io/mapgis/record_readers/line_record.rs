//! 57-byte line record.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::Result;

use super::FixedRecord;

/// Size of one line record.
pub const LINE_RECORD_SIZE: usize = 57;

/// A line (arc) record.
///
/// Points are stored as consecutive `(x, y)` f64 pairs at
/// [`off_points`](Self::off_points) in the coordinate region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineRecord {
    pub int1: i32,
    pub int2: i32,
    pub num_points: i32,
    /// Offset of the first coordinate pair, relative to the coordinate region.
    pub off_points: i32,
    pub int3: i32,
    pub line_pattern: i16,
    pub aux_line_pattern: i8,
    pub cover_type: i8,
    /// Color number into the color table.
    pub color: i32,
    pub line_width: f32,
    pub line_type: i8,
    pub x_factor: f32,
    pub y_factor: f32,
    pub aux_color: i32,
    pub layer: i32,
    pub int4: i32,
    pub int5: i32,
}

impl LineRecord {
    /// A record pointing at `num_points` pairs at `off_points`.
    pub fn with_points(num_points: i32, off_points: i32) -> Self {
        Self {
            num_points,
            off_points,
            ..Default::default()
        }
    }
}

impl FixedRecord for LineRecord {
    const STRIDE: usize = LINE_RECORD_SIZE;
    const NAME: &'static str = "line record table";

    fn parse(bytes: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(bytes);
        Ok(Self {
            int1: c.read_i32::<LittleEndian>()?,
            int2: c.read_i32::<LittleEndian>()?,
            num_points: c.read_i32::<LittleEndian>()?,
            off_points: c.read_i32::<LittleEndian>()?,
            int3: c.read_i32::<LittleEndian>()?,
            line_pattern: c.read_i16::<LittleEndian>()?,
            aux_line_pattern: c.read_i8()?,
            cover_type: c.read_i8()?,
            color: c.read_i32::<LittleEndian>()?,
            line_width: c.read_f32::<LittleEndian>()?,
            line_type: c.read_i8()?,
            x_factor: c.read_f32::<LittleEndian>()?,
            y_factor: c.read_f32::<LittleEndian>()?,
            aux_color: c.read_i32::<LittleEndian>()?,
            layer: c.read_i32::<LittleEndian>()?,
            int4: c.read_i32::<LittleEndian>()?,
            int5: c.read_i32::<LittleEndian>()?,
        })
    }
}
