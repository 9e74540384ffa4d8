//! Configuration for reading MapGIS files.

use encoding_rs::{Encoding, GB18030};

/// Configuration options for the MapGIS reader.
#[derive(Debug, Clone)]
pub struct MapGisReaderConfiguration {
    /// Encoding of attribute names and string values.
    /// Default: GB18030.
    pub encoding: &'static Encoding,

    /// When `true`, a record region must be an exact multiple of its record
    /// size. When `false`, only the records the header declares (plus the
    /// placeholder) must be present and trailing bytes are reported as a
    /// warning.
    /// Default: `true`.
    pub strict_region_length: bool,

    /// If `false`, the reader does not bind attributes and features carry
    /// an empty attribute map.
    /// Default: `true`.
    pub read_attributes: bool,

    /// Build features on the rayon thread pool. Feature order and
    /// notification order are the same as in a sequential read.
    /// Default: `false`.
    pub parallel: bool,
}

impl Default for MapGisReaderConfiguration {
    fn default() -> Self {
        Self {
            encoding: GB18030,
            strict_region_length: true,
            read_attributes: true,
            parallel: false,
        }
    }
}
