//! Fixed-stride record tables.
//!
//! Line, polygon and attribute-definition regions are all flat arrays of
//! packed records. [`decode_records`] turns a region into a typed array;
//! [`RecordTable`] adds the placeholder-record convention used by the line
//! and polygon tables.

pub mod attribute_definition;
pub mod line_record;
pub mod polygon_record;

pub use attribute_definition::{
    AttributeDefinition, AttributeHeader, AttributeType, ATTRIBUTE_DEFINITION_SIZE,
    ATTRIBUTE_HEADER_SIZE,
};
pub use line_record::{LineRecord, LINE_RECORD_SIZE};
pub use polygon_record::{PolygonRecord, POLYGON_RECORD_SIZE};

use crate::error::{MapGisError, Result};
use crate::notification::{NotificationCollection, NotificationType};

use super::region_view::RegionView;

/// A packed, fixed-size binary record.
pub trait FixedRecord: Sized {
    /// Size of one record in bytes.
    const STRIDE: usize;
    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Parse one record from exactly [`STRIDE`](Self::STRIDE) bytes.
    fn parse(bytes: &[u8]) -> Result<Self>;
}

/// Decode a whole region as an array of `T`.
///
/// The region length must be an exact multiple of the record stride.
pub fn decode_records<T: FixedRecord>(region: RegionView<'_>) -> Result<Vec<T>> {
    if region.len() % T::STRIDE != 0 {
        return Err(MapGisError::CorruptRegion {
            region: region.kind(),
            length: region.len(),
            stride: T::STRIDE,
        });
    }
    region
        .bytes()
        .chunks_exact(T::STRIDE)
        .map(T::parse)
        .collect()
}

/// Record array with a leading placeholder.
///
/// MapGIS stores one more record than the header declares; record 0 carries
/// no geometry and real records are numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable<T> {
    records: Vec<T>,
}

impl<T: FixedRecord> RecordTable<T> {
    /// Build a table from records that already include the placeholder.
    pub fn from_records(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Decode `declared_count + 1` records from a region.
    ///
    /// With `strict` the region length must be a multiple of the stride.
    /// Without it only the needed prefix is decoded and any trailing bytes
    /// are reported as a warning.
    pub fn from_region(
        region: RegionView<'_>,
        declared_count: usize,
        strict: bool,
        notifications: &mut NotificationCollection,
    ) -> Result<Self> {
        let wanted = declared_count + 1;
        let needed = wanted * T::STRIDE;

        if strict {
            let mut records = decode_records::<T>(region)?;
            if records.len() < wanted {
                return Err(MapGisError::TruncatedFile {
                    structure: T::NAME,
                    offset: region.base(),
                    expected: needed,
                    available: region.len(),
                });
            }
            if records.len() > wanted {
                notifications.notify(
                    format!(
                        "{} region holds {} records, header declares {} (+1 placeholder); extra records ignored",
                        region.kind(),
                        records.len(),
                        declared_count
                    ),
                    NotificationType::Warning,
                );
                records.truncate(wanted);
            }
            return Ok(Self { records });
        }

        let prefix = region.prefix(needed).ok_or(MapGisError::TruncatedFile {
            structure: T::NAME,
            offset: region.base(),
            expected: needed,
            available: region.len(),
        })?;
        if region.len() > needed {
            notifications.notify(
                format!(
                    "{} region has {} bytes after the last declared record",
                    region.kind(),
                    region.len() - needed
                ),
                NotificationType::Warning,
            );
        }
        Ok(Self {
            records: decode_records(prefix)?,
        })
    }
}

impl<T> RecordTable<T> {
    /// Number of real records (placeholder excluded).
    pub fn len(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record by 1-based number. Number 0 is the placeholder and is never
    /// returned.
    pub fn get(&self, number: usize) -> Option<&T> {
        if number == 0 {
            return None;
        }
        self.records.get(number)
    }

    pub fn placeholder(&self) -> Option<&T> {
        self.records.first()
    }

    /// Real records with their 1-based numbers.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.records.iter().enumerate().skip(1)
    }
}
