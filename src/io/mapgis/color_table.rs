//! `Pcolor.lib` color table.
//!
//! Layout: a 156-byte header (`"PCOLOR 3"`, color count, spot count, 36 spot
//! KCMY definitions) followed by 32-byte entries. Entry `n` defines color
//! number `n`; entry 0 is unused. Files are often larger than the declared
//! count needs, the surplus is ignored.

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{MapGisError, Result};
use crate::types::Kcmy;

/// Size of the color table header.
pub const COLOR_TABLE_HEADER_SIZE: usize = 156;

/// Size of one color entry.
pub const COLOR_ENTRY_SIZE: usize = 32;

/// Spot definitions stored in the header.
pub const MAX_SPOT_COLORS: usize = 36;

/// Spot weight bytes stored per entry.
pub const MAX_SPOT_WEIGHTS: usize = 28;

const SIGNATURE_PREFIX: &[u8] = b"PCOLOR";

/// One color number: base process color plus spot weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorEntry {
    pub kcmy: Kcmy,
    /// Weight (0..=255) of each spot color, in header order.
    pub spot_weights: [u8; MAX_SPOT_WEIGHTS],
}

impl ColorEntry {
    pub fn new(kcmy: Kcmy) -> Self {
        Self {
            kcmy,
            spot_weights: [0; MAX_SPOT_WEIGHTS],
        }
    }

    fn read(c: &mut Cursor<&[u8]>) -> Result<Self> {
        let kcmy = read_kcmy(c)?;
        let mut spot_weights = [0u8; MAX_SPOT_WEIGHTS];
        c.read_exact(&mut spot_weights)?;
        Ok(Self { kcmy, spot_weights })
    }
}

fn read_kcmy(c: &mut Cursor<&[u8]>) -> Result<Kcmy> {
    Ok(Kcmy::new(c.read_u8()?, c.read_u8()?, c.read_u8()?, c.read_u8()?))
}

/// Parsed color table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    signature: [u8; 8],
    spots: Vec<Kcmy>,
    /// Includes the unused entry 0.
    entries: Vec<ColorEntry>,
}

impl ColorTable {
    /// Read a color table from a file path.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_from_stream(BufReader::new(file))
    }

    /// Read a color table from a stream.
    pub fn read_from_stream<R: Read>(mut stream: R) -> Result<Self> {
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a complete color table file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < COLOR_TABLE_HEADER_SIZE {
            return Err(MapGisError::TruncatedFile {
                structure: "color table header",
                offset: 0,
                expected: COLOR_TABLE_HEADER_SIZE,
                available: bytes.len(),
            });
        }
        let mut c = Cursor::new(bytes);

        let mut signature = [0u8; 8];
        c.read_exact(&mut signature)?;
        if !signature.starts_with(SIGNATURE_PREFIX) {
            return Err(MapGisError::InvalidColorTable(format!(
                "bad signature {:?}",
                String::from_utf8_lossy(&signature)
            )));
        }

        let colors = c.read_i16::<LittleEndian>()?;
        let spot_count = c.read_i16::<LittleEndian>()?;
        let colors = usize::try_from(colors).map_err(|_| {
            MapGisError::InvalidColorTable(format!("negative color count {colors}"))
        })?;
        let spot_count = usize::try_from(spot_count).map_err(|_| {
            MapGisError::InvalidColorTable(format!("negative spot color count {spot_count}"))
        })?;

        let mut spots = Vec::with_capacity(MAX_SPOT_COLORS);
        for _ in 0..MAX_SPOT_COLORS {
            spots.push(read_kcmy(&mut c)?);
        }
        spots.truncate(spot_count.min(MAX_SPOT_COLORS).min(MAX_SPOT_WEIGHTS));

        let needed = COLOR_TABLE_HEADER_SIZE + colors * COLOR_ENTRY_SIZE;
        if bytes.len() < needed {
            return Err(MapGisError::TruncatedFile {
                structure: "color table entries",
                offset: COLOR_TABLE_HEADER_SIZE as u64,
                expected: colors * COLOR_ENTRY_SIZE,
                available: bytes.len() - COLOR_TABLE_HEADER_SIZE,
            });
        }
        let mut entries = Vec::with_capacity(colors);
        for _ in 0..colors {
            entries.push(ColorEntry::read(&mut c)?);
        }

        Ok(Self {
            signature,
            spots,
            entries,
        })
    }

    /// Build a table in memory. `entries[0]` becomes color number 1.
    ///
    /// Spot colors beyond the number of weight bytes are dropped.
    pub fn from_parts(mut spots: Vec<Kcmy>, entries: Vec<ColorEntry>) -> Self {
        spots.truncate(MAX_SPOT_WEIGHTS);
        let mut all = Vec::with_capacity(entries.len() + 1);
        all.push(ColorEntry::default());
        all.extend(entries);
        Self {
            signature: *b"PCOLOR 3",
            spots,
            entries: all,
        }
    }

    pub fn signature(&self) -> &[u8; 8] {
        &self.signature
    }

    /// Highest usable color number plus one.
    pub fn colors(&self) -> usize {
        self.entries.len()
    }

    /// Effective spot channel count.
    pub fn spot_count(&self) -> usize {
        self.spots.len()
    }

    pub fn spots(&self) -> &[Kcmy] {
        &self.spots
    }

    /// Entry for a color number, valid for `1 <= number < colors()`.
    pub fn entry(&self, number: i32) -> Result<&ColorEntry> {
        usize::try_from(number)
            .ok()
            .filter(|&n| n >= 1)
            .and_then(|n| self.entries.get(n))
            .ok_or(MapGisError::UnknownColorIndex {
                index: number,
                available: self.entries.len(),
            })
    }
}
