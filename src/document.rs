//! Decoded MapGIS file

use std::fmt;

use crate::geometry::Geometry;
use crate::io::mapgis::{AttributeMap, MapGisFileHeader, RegionDirectory};
use crate::notification::NotificationCollection;
use crate::types::{FileType, Rgb};

/// One output feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// 1-based record number.
    pub number: usize,
    pub geometry: Geometry,
    /// Raw color number from the record.
    pub color_index: i32,
    /// Resolved color, `None` without a color table.
    pub color: Option<Rgb>,
    pub attributes: AttributeMap,
    /// Polygon line-index array (leading count included). Empty for lines.
    pub line_references: Vec<i32>,
}

impl Feature {
    pub fn new(number: usize, geometry: Geometry, color_index: i32) -> Self {
        Self {
            number,
            geometry,
            color_index,
            color: None,
            attributes: AttributeMap::new(),
            line_references: Vec::new(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} color={}",
            self.number,
            self.geometry.type_name(),
            self.color_index
        )?;
        if let Some(rgb) = self.color {
            write!(f, " ({rgb})")?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {name}={value}")?;
        }
        Ok(())
    }
}

/// Everything read from one file.
#[derive(Debug, Clone)]
pub struct MapGisDocument {
    pub header: MapGisFileHeader,
    pub directory: RegionDirectory,
    pub features: Vec<Feature>,
    pub notifications: NotificationCollection,
}

impl MapGisDocument {
    pub fn new(header: MapGisFileHeader, directory: RegionDirectory) -> Self {
        Self {
            header,
            directory,
            features: Vec::new(),
            notifications: NotificationCollection::new(),
        }
    }

    pub fn file_type(&self) -> FileType {
        self.header.file_type
    }

    /// Feature by 1-based record number.
    pub fn feature(&self, number: usize) -> Option<&Feature> {
        self.features.iter().find(|f| f.number == number)
    }
}
