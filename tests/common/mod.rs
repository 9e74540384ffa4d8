//! Synthetic MapGIS files for integration tests.
#![allow(dead_code)]

use mapgis_tools_rs::io::mapgis::AttributeDefinition;
use mapgis_tools_rs::{FileType, Kcmy};

pub const HEADER_SIZE: usize = 336;
pub const DIRECTORY_OFFSET: usize = HEADER_SIZE;
pub const DIRECTORY_SIZE: usize = 160;

pub const LINE_INFO: usize = 0;
pub const COORDINATES: usize = 1;
pub const LINE_ATTR: usize = 2;
pub const POLYGON_INFO: usize = 8;
pub const POLYGON_ATTR: usize = 9;

pub struct LineFixture {
    pub points: Vec<(f64, f64)>,
    pub color: i32,
}

pub struct PolygonFixture {
    /// Line-index entries after the leading count.
    pub references: Vec<i32>,
    pub color: i32,
}

pub struct AttributeFixture {
    pub definitions: Vec<AttributeDefinition>,
    pub slot_size: i32,
    /// Value slots for records 1, 2, ...
    pub slots: Vec<Vec<u8>>,
}

/// Builds a complete `.WL` / `.WT` / `.WP` file in memory.
pub struct MapGisFileBuilder {
    pub file_type: FileType,
    pub type_id: Option<i32>,
    pub signature: Option<[u8; 8]>,
    pub lines: Vec<LineFixture>,
    pub polygons: Vec<PolygonFixture>,
    pub attributes: Option<AttributeFixture>,
    /// Junk appended to the polygon record region.
    pub polygon_region_trailer: usize,
}

impl MapGisFileBuilder {
    pub fn new(file_type: FileType) -> Self {
        Self {
            file_type,
            type_id: None,
            signature: None,
            lines: Vec::new(),
            polygons: Vec::new(),
            attributes: None,
            polygon_region_trailer: 0,
        }
    }

    pub fn line(mut self, points: &[(f64, f64)], color: i32) -> Self {
        self.lines.push(LineFixture {
            points: points.to_vec(),
            color,
        });
        self
    }

    pub fn polygon(mut self, references: &[i32], color: i32) -> Self {
        self.polygons.push(PolygonFixture {
            references: references.to_vec(),
            color,
        });
        self
    }

    pub fn attributes(mut self, definitions: Vec<AttributeDefinition>, slot_size: i32, slots: Vec<Vec<u8>>) -> Self {
        self.attributes = Some(AttributeFixture {
            definitions,
            slot_size,
            slots,
        });
        self
    }

    fn coordinates(&self) -> (Vec<u8>, Vec<i32>, Vec<(i32, i32)>) {
        let mut blob = Vec::new();
        let mut line_offsets = Vec::new();
        for line in &self.lines {
            line_offsets.push(blob.len() as i32);
            for (x, y) in &line.points {
                blob.extend_from_slice(&x.to_le_bytes());
                blob.extend_from_slice(&y.to_le_bytes());
            }
        }
        let mut polygon_arrays = Vec::new();
        for polygon in &self.polygons {
            let count = polygon.references.len() as i32 + 1;
            polygon_arrays.push((blob.len() as i32, count));
            blob.extend_from_slice(&count.to_le_bytes());
            for r in &polygon.references {
                blob.extend_from_slice(&r.to_le_bytes());
            }
        }
        (blob, line_offsets, polygon_arrays)
    }

    fn line_region(&self, offsets: &[i32]) -> Vec<u8> {
        let mut out = vec![0u8; 57];
        for (line, offset) in self.lines.iter().zip(offsets) {
            let mut rec = [0u8; 57];
            rec[8..12].copy_from_slice(&(line.points.len() as i32).to_le_bytes());
            rec[12..16].copy_from_slice(&offset.to_le_bytes());
            rec[24..28].copy_from_slice(&line.color.to_le_bytes());
            rec[28..32].copy_from_slice(&1.0f32.to_le_bytes());
            out.extend_from_slice(&rec);
        }
        out
    }

    fn polygon_region(&self, arrays: &[(i32, i32)]) -> Vec<u8> {
        let mut out = vec![0u8; 40];
        for (polygon, (offset, count)) in self.polygons.iter().zip(arrays) {
            let mut rec = [0u8; 40];
            rec[0] = 1;
            rec[1..5].copy_from_slice(&count.to_le_bytes());
            rec[5..9].copy_from_slice(&offset.to_le_bytes());
            rec[9..13].copy_from_slice(&polygon.color.to_le_bytes());
            out.extend_from_slice(&rec);
        }
        out.extend(std::iter::repeat(0xAB).take(self.polygon_region_trailer));
        out
    }

    pub fn build(&self) -> Vec<u8> {
        let mut regions: Vec<Vec<u8>> = vec![Vec::new(); 16];
        if self.file_type != FileType::Point {
            let (blob, line_offsets, polygon_arrays) = self.coordinates();
            regions[LINE_INFO] = self.line_region(&line_offsets);
            regions[COORDINATES] = blob;
            if self.file_type == FileType::Polygon {
                regions[POLYGON_INFO] = self.polygon_region(&polygon_arrays);
            }
            if let Some(fixture) = &self.attributes {
                let slot = if self.file_type == FileType::Polygon {
                    POLYGON_ATTR
                } else {
                    LINE_ATTR
                };
                regions[slot] = attribute_region(fixture);
            }
        }

        let mut header = vec![0u8; HEADER_SIZE];
        let signature = self.signature.unwrap_or(*self.file_type.signature());
        header[0..8].copy_from_slice(&signature);
        let type_id = self.type_id.unwrap_or(self.file_type.type_id());
        header[8..12].copy_from_slice(&type_id.to_le_bytes());
        header[12..16].copy_from_slice(&(DIRECTORY_OFFSET as i32).to_le_bytes());
        header[16..20].copy_from_slice(&10i32.to_le_bytes());
        header[260..264].copy_from_slice(&(self.lines.len() as i32).to_le_bytes());
        header[276..280].copy_from_slice(&(self.polygons.len() as i32).to_le_bytes());
        for (i, v) in [0.0f64, 0.0, 10.0, 10.0].iter().enumerate() {
            header[304 + i * 8..312 + i * 8].copy_from_slice(&v.to_le_bytes());
        }

        let mut directory = Vec::with_capacity(DIRECTORY_SIZE);
        let mut body = Vec::new();
        let body_start = DIRECTORY_OFFSET + DIRECTORY_SIZE;
        for region in &regions {
            let offset = if region.is_empty() { 0 } else { (body_start + body.len()) as i32 };
            directory.extend_from_slice(&offset.to_le_bytes());
            directory.extend_from_slice(&(region.len() as i32).to_le_bytes());
            directory.extend_from_slice(&(-1i16).to_le_bytes());
            body.extend_from_slice(region);
        }

        let mut file = header;
        file.extend_from_slice(&directory);
        file.extend_from_slice(&body);
        file
    }
}

fn attribute_region(fixture: &AttributeFixture) -> Vec<u8> {
    let off_values = 348 + fixture.definitions.len() * 39;
    let mut out = vec![0u8; 348];
    out[12..16].copy_from_slice(&(off_values as i32).to_le_bytes());
    out[322..324].copy_from_slice(&(fixture.definitions.len() as i16).to_le_bytes());
    out[328..332].copy_from_slice(&fixture.slot_size.to_le_bytes());
    for d in &fixture.definitions {
        out.extend_from_slice(&d.name);
        out.push(d.type_code);
        out.extend_from_slice(&d.attr_offset.to_le_bytes());
        out.extend_from_slice(&d.size.to_le_bytes());
        out.extend_from_slice(&d.digits.to_le_bytes());
        out.push(d.decimals);
        out.extend_from_slice(&d.unknown);
        out.extend_from_slice(&d.index.to_le_bytes());
        out.extend_from_slice(&d.unknown_short.to_le_bytes());
    }
    out.extend(std::iter::repeat(0).take(fixture.slot_size as usize));
    for slot in &fixture.slots {
        let mut s = slot.clone();
        s.resize(fixture.slot_size as usize, 0);
        out.extend_from_slice(&s);
    }
    out
}

/// Absolute `(offset, length)` of a directory entry in a built file.
pub fn directory_entry(file: &[u8], index: usize) -> (usize, usize) {
    let at = DIRECTORY_OFFSET + index * 10;
    let offset = i32::from_le_bytes(file[at..at + 4].try_into().unwrap());
    let length = i32::from_le_bytes(file[at + 4..at + 8].try_into().unwrap());
    (offset as usize, length as usize)
}

/// A `Pcolor.lib` image; `entries[0]` is color number 1.
pub fn color_table_bytes(spots: &[Kcmy], entries: &[(Kcmy, Vec<u8>)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"PCOLOR 3");
    out.extend_from_slice(&((entries.len() + 1) as i16).to_le_bytes());
    out.extend_from_slice(&(spots.len() as i16).to_le_bytes());
    for i in 0..36 {
        let s = spots.get(i).copied().unwrap_or_default();
        out.extend_from_slice(&[s.k, s.c, s.m, s.y]);
    }
    out.extend_from_slice(&[0u8; 32]);
    for (kcmy, weights) in entries {
        out.extend_from_slice(&[kcmy.k, kcmy.c, kcmy.m, kcmy.y]);
        let mut w = weights.clone();
        w.resize(28, 0);
        out.extend_from_slice(&w);
    }
    // Pre-allocated slack, as real tables carry.
    out.extend_from_slice(&[0u8; 64]);
    out
}
