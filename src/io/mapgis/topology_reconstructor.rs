//! Polygon ring assembly from line references.
//!
//! A polygon does not store coordinates itself. Its line-index array (in the
//! coordinate region) lists the lines that bound it, in order:
//!
//! ```text
//! [count, l1, l2, 0, l3, -l4, 0, l5, ...]
//!    |    '-shell-'  '-hole 1-'  '-hole 2..
//!    '- skipped
//! ```
//!
//! `0` ends the current ring, a negative number walks that line backwards.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{MapGisError, Result};
use crate::geometry::{make_ring_closed, LineString, Polygon, Ring, RingClosure};
use crate::types::Vector2;

use super::record_readers::{LineRecord, PolygonRecord, RecordTable};
use super::region_view::RegionView;

/// Bytes per coordinate pair.
const POINT_SIZE: usize = 16;

/// Bytes per line-index entry.
const LINE_INDEX_SIZE: usize = 4;

/// A polygon's rings plus what was needed to build them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedPolygon {
    pub polygon: Polygon,
    /// Closure outcome of each ring, same order as the rings.
    pub closures: Vec<RingClosure>,
    /// The raw line-index array, leading count included.
    pub line_references: Vec<i32>,
}

/// Builds polygon rings and line strings over a shared coordinate region.
///
/// Read-only over its inputs, so one reconstructor can serve many polygons
/// in parallel.
#[derive(Debug, Clone, Copy)]
pub struct TopologyReconstructor<'a> {
    lines: &'a RecordTable<LineRecord>,
    coordinates: RegionView<'a>,
}

impl<'a> TopologyReconstructor<'a> {
    pub fn new(lines: &'a RecordTable<LineRecord>, coordinates: RegionView<'a>) -> Self {
        Self { lines, coordinates }
    }

    /// Line record by 1-based number.
    pub fn line(&self, number: i64) -> Result<&'a LineRecord> {
        usize::try_from(number)
            .ok()
            .and_then(|n| self.lines.get(n))
            .ok_or(MapGisError::LineIndexOutOfRange {
                line: number,
                available: self.lines.len(),
            })
    }

    /// Bytes of `count` elements of `size` bytes at `offset`.
    fn span(&self, offset: i32, count: i32, size: usize) -> Result<&'a [u8]> {
        let out_of_range = |required| MapGisError::GeometryOffsetOutOfRange {
            offset: offset as i64,
            required,
            length: self.coordinates.len(),
        };
        let count = usize::try_from(count).map_err(|_| out_of_range(0))?;
        let required = count.checked_mul(size).ok_or_else(|| out_of_range(usize::MAX))?;
        self.coordinates.geometry_slice(offset as i64, required)
    }

    /// Points of a line in stored order.
    pub fn line_points(&self, line: &LineRecord) -> Result<Vec<Vector2>> {
        let bytes = self.span(line.off_points, line.num_points, POINT_SIZE)?;
        Ok(bytes
            .chunks_exact(POINT_SIZE)
            .map(|pair| {
                Vector2::new(
                    LittleEndian::read_f64(&pair[0..8]),
                    LittleEndian::read_f64(&pair[8..16]),
                )
            })
            .collect())
    }

    /// Points of a line, reversed when `reverse` is set.
    pub fn traverse(&self, line: &LineRecord, reverse: bool) -> Result<Vec<Vector2>> {
        let mut points = self.line_points(line)?;
        if reverse {
            points.reverse();
        }
        Ok(points)
    }

    /// The polygon's full line-index array, leading count included.
    pub fn line_indices(&self, polygon: &PolygonRecord) -> Result<Vec<i32>> {
        let bytes = self.span(polygon.off_line_info, polygon.num_lines, LINE_INDEX_SIZE)?;
        Ok(bytes.chunks_exact(LINE_INDEX_SIZE).map(LittleEndian::read_i32).collect())
    }

    /// Assemble the rings of one polygon: shell first, then holes in array
    /// order. Every ring is closed; `k` separators always give `k + 1` rings.
    pub fn reconstruct(&self, polygon: &PolygonRecord) -> Result<ReconstructedPolygon> {
        let line_references = self.line_indices(polygon)?;

        let mut rings = Vec::new();
        let mut closures = Vec::new();
        let mut ring = Ring::new();

        for &reference in line_references.iter().skip(1) {
            if reference == 0 {
                closures.push(make_ring_closed(&mut ring));
                rings.push(std::mem::take(&mut ring));
                continue;
            }
            let number = (reference as i64).abs();
            let line = self.line(number)?;
            ring.append_run(self.traverse(line, reference < 0)?);
        }
        closures.push(make_ring_closed(&mut ring));
        rings.push(ring);

        Ok(ReconstructedPolygon {
            polygon: Polygon::new(rings),
            closures,
            line_references,
        })
    }

    /// A line file feature: the line's points as stored.
    pub fn line_string(&self, line: &LineRecord) -> Result<LineString> {
        Ok(LineString::new(self.line_points(line)?))
    }
}
