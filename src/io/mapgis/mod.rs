//! MapGIS 6.x vector files (`.WL`, `.WT`, `.WP`)
//!
//! The file starts with a fixed header pointing at a region directory; every
//! other structure lives in one of the sixteen directory regions and is
//! addressed by offsets relative to its region.

pub mod attribute_binder;
pub mod color_resolver;
pub mod color_table;
pub mod diagnostics;
pub mod file_header;
pub mod mapgis_reader;
pub mod mapgis_reader_configuration;
pub mod record_readers;
pub mod region_directory;
pub mod region_view;
pub mod text_transcoder;
pub mod topology_reconstructor;

pub use attribute_binder::{AttributeBinder, AttributeMap, AttributeValue};
pub use color_resolver::ColorResolver;
pub use color_table::{ColorEntry, ColorTable};
pub use file_header::{MapGisFileHeader, FILE_HEADER_SIZE};
pub use mapgis_reader::MapGisReader;
pub use mapgis_reader_configuration::MapGisReaderConfiguration;
pub use record_readers::{
    AttributeDefinition, AttributeHeader, AttributeType, LineRecord, PolygonRecord, RecordTable,
};
pub use region_directory::{DataRegion, RegionDirectory, RegionKind, REGION_DIRECTORY_SIZE};
pub use region_view::{LoadedRegion, RegionView};
pub use text_transcoder::{EncodingTranscoder, TextTranscoder};
pub use topology_reconstructor::{ReconstructedPolygon, TopologyReconstructor};
