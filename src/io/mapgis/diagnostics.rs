//! Human-readable dumps of a file's raw structures.
//!
//! [`dump`] works from the header, the region directory and the decoded
//! record tables only. No geometry is assembled, so a file whose polygons
//! reference missing lines still gets a full listing.

use std::io::{self, Read, Seek, Write};

use crate::error::Result;
use crate::notification::NotificationCollection;
use crate::types::FileType;

use super::attribute_binder::AttributeBinder;
use super::file_header::MapGisFileHeader;
use super::mapgis_reader_configuration::MapGisReaderConfiguration;
use super::record_readers::{LineRecord, PolygonRecord, RecordTable};
use super::region_directory::{RegionDirectory, RegionKind};
use super::region_view::LoadedRegion;
use super::text_transcoder::EncodingTranscoder;
use super::topology_reconstructor::TopologyReconstructor;

/// Write the header, the region directory, and for line and polygon files
/// the polygon line references, the line records with their coordinates and
/// the attribute definitions.
///
/// Stops at the first structure that cannot be decoded; everything before it
/// has already been written.
pub fn dump<R: Read + Seek, W: Write>(
    stream: &mut R,
    configuration: &MapGisReaderConfiguration,
    out: &mut W,
) -> Result<()> {
    let header = MapGisFileHeader::read(stream)?;
    writeln!(out, "{header}")?;
    let directory = RegionDirectory::read(stream, header.directory_offset()?)?;
    writeln!(out)?;
    write!(out, "{directory}")?;

    if header.file_type == FileType::Point {
        return Ok(());
    }

    // Table warnings surface again when the file is read.
    let mut notifications = NotificationCollection::new();
    let strict = configuration.strict_region_length;
    let line_info = load(stream, &directory, RegionKind::LineOrPointInfo)?;
    let coordinates = load(stream, &directory, RegionKind::LineCoordsOrPointString)?;
    let lines = RecordTable::<LineRecord>::from_region(
        line_info.view(),
        header.line_count(),
        strict,
        &mut notifications,
    )?;
    let reconstructor = TopologyReconstructor::new(&lines, coordinates.view());

    let attribute_kind = if header.file_type == FileType::Polygon {
        let polygon_info = load(stream, &directory, RegionKind::PolygonInfo)?;
        let polygons = RecordTable::<PolygonRecord>::from_region(
            polygon_info.view(),
            header.polygon_count(),
            strict,
            &mut notifications,
        )?;
        writeln!(out)?;
        write_polygons(out, &polygons, &reconstructor, header.line_count())?;
        RegionKind::PolygonAttr
    } else {
        RegionKind::LineOrPointAttr
    };

    writeln!(out)?;
    write_lines(out, &lines, &reconstructor)?;

    if !directory.get(attribute_kind).is_empty() {
        let attributes = load(stream, &directory, attribute_kind)?;
        let transcoder = EncodingTranscoder::new(configuration.encoding);
        let binder = AttributeBinder::new(attributes.view(), &transcoder, &mut notifications)?;
        writeln!(out)?;
        write_attributes(out, attribute_kind, &binder)?;
    }
    Ok(())
}

fn load<R: Read + Seek>(
    stream: &mut R,
    directory: &RegionDirectory,
    kind: RegionKind,
) -> Result<LoadedRegion> {
    LoadedRegion::load(stream, kind, directory.get(kind))
}

/// One polygon's line-index array on a single line.
///
/// `0` separators print as `|`. References past `declared_line_count` (the
/// header's line count) are marked with `!`.
fn reference_listing(number: usize, references: &[i32], declared_line_count: usize) -> String {
    let Some((count, references)) = references.split_first() else {
        return format!("polygon {number}: no line references");
    };
    let mut line = format!("polygon {number} [{count}]:");
    for &reference in references {
        if reference == 0 {
            line.push_str(" |");
            continue;
        }
        line.push(' ');
        line.push_str(&reference.to_string());
        if reference.unsigned_abs() as usize > declared_line_count {
            line.push('!');
        }
    }
    line
}

fn write_polygons<W: Write>(
    out: &mut W,
    polygons: &RecordTable<PolygonRecord>,
    reconstructor: &TopologyReconstructor<'_>,
    declared_line_count: usize,
) -> io::Result<()> {
    writeln!(out, "Polygon line references:")?;
    for (number, polygon) in polygons.iter() {
        match reconstructor.line_indices(polygon) {
            Ok(references) => writeln!(
                out,
                "{}",
                reference_listing(number, &references, declared_line_count)
            )?,
            Err(e) => writeln!(out, "polygon {number}: {e}")?,
        }
    }
    Ok(())
}

fn write_lines<W: Write>(
    out: &mut W,
    lines: &RecordTable<LineRecord>,
    reconstructor: &TopologyReconstructor<'_>,
) -> io::Result<()> {
    writeln!(out, "Line records:")?;
    for (number, line) in lines.iter() {
        write!(
            out,
            "line {number}: {} points at {}, color {}, pattern {}, width {}, layer {}:",
            line.num_points, line.off_points, line.color, line.line_pattern, line.line_width, line.layer
        )?;
        match reconstructor.line_points(line) {
            Ok(points) => {
                for point in points {
                    write!(out, " {point}")?;
                }
                writeln!(out)?;
            }
            Err(e) => writeln!(out, " {e}")?,
        }
    }
    Ok(())
}

fn write_attributes<W: Write>(
    out: &mut W,
    kind: RegionKind,
    binder: &AttributeBinder<'_>,
) -> io::Result<()> {
    let header = binder.header();
    writeln!(
        out,
        "Attributes ({kind}): {} definitions, values at {}, slot size {}",
        header.num_attrs, header.off_attr_value, header.attrs_size
    )?;
    for (definition, name) in binder.definitions().iter().zip(binder.names()) {
        let type_name = match definition.attribute_type() {
            Some(t) => t.to_string(),
            None => format!("type {}", definition.type_code),
        };
        writeln!(
            out,
            "  {name}: {type_name}, size {}, offset {}, index {}",
            definition.size, definition.attr_offset, definition.index
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_listing_marks_undeclared_lines() {
        let references = [6, 1, -2, 0, 3, -4];
        assert_eq!(reference_listing(1, &references, 3), "polygon 1 [6]: 1 -2 | 3 -4!");
        assert_eq!(reference_listing(1, &references, 4), "polygon 1 [6]: 1 -2 | 3 -4");
        assert_eq!(reference_listing(2, &[], 4), "polygon 2: no line references");
    }

    #[test]
    fn test_point_file_dumps_header_and_directory() {
        let mut raw = vec![0u8; 336 + 160];
        raw[0..8].copy_from_slice(FileType::Point.signature());
        raw[8..12].copy_from_slice(&1i32.to_le_bytes());
        raw[12..16].copy_from_slice(&336i32.to_le_bytes());

        let mut out = Vec::new();
        dump(&mut Cursor::new(raw), &MapGisReaderConfiguration::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Type: Point"));
        assert!(text.contains("polygon info"));
        assert!(!text.contains("Line records"));
    }
}
