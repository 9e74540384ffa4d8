//! I/O module for reading MapGIS files and writing GeoJSON

pub mod geojson;
pub mod mapgis;

pub use geojson::GeoJsonWriter;
pub use mapgis::{MapGisReader, MapGisReaderConfiguration};
