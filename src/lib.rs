//! # mapgis-tools-rs
//!
//! A pure Rust library for reading MapGIS 6.x vector files and converting
//! them to GeoJSON.
//!
//! ## Features
//!
//! - Line (`.WL`), point (`.WT`) and polygon (`.WP`) file headers and region
//!   directories
//! - Polygon ring reconstruction from signed line references, holes included
//! - KCMY + spot color resolution against a `Pcolor.lib` color table
//! - Typed attributes with legacy (GB18030) text decoding
//! - GeoJSON output
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mapgis_tools_rs::io::mapgis::{ColorTable, MapGisReader, MapGisReaderConfiguration};
//! use mapgis_tools_rs::io::GeoJsonWriter;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let table = ColorTable::read_from_file("Pcolor.lib")?;
//! let file = BufReader::new(File::open("parcels.WP")?);
//! let doc = MapGisReader::new(file, MapGisReaderConfiguration::default())
//!     .with_color_table(table)
//!     .read()?;
//!
//! for feature in &doc.features {
//!     println!("{feature}");
//! }
//! println!("{}", GeoJsonWriter::new(&doc).to_string_pretty()?);
//! ```
//!
//! ## Architecture
//!
//! - `MapGisReader` - loads regions and drives the decode
//! - `TopologyReconstructor` - assembles shells and holes from line records
//! - `ColorResolver` - color numbers to RGB
//! - `AttributeBinder` - per-record typed attribute maps
//! - `MapGisDocument` - header, directory, features and notifications
//!
//! Non-fatal problems are collected as notifications on the document rather
//! than logged.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod error;
pub mod geometry;
pub mod io;
pub mod notification;
pub mod types;

pub use document::{Feature, MapGisDocument};
pub use error::{MapGisError, Result};
pub use geometry::{make_ring_closed, Geometry, LineString, Polygon, Ring, RingClosure};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{BoundingBox2D, Cmy, FileType, Kcmy, Rgb, Vector2};

pub use io::mapgis::{ColorTable, MapGisReader, MapGisReaderConfiguration};
pub use io::GeoJsonWriter;
