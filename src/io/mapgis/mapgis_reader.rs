//! MapGIS file reader: drives the decode of one file into a
//! [`MapGisDocument`].
//!
//! Order of operations:
//! 1. File header (type id validated, signature checked)
//! 2. Region directory
//! 3. Record regions for the file type, loaded whole into memory
//! 4. Attribute definitions (optional)
//! 5. One feature per record: geometry, color, attributes

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use rayon::prelude::*;

use crate::document::{Feature, MapGisDocument};
use crate::error::{MapGisError, Result};
use crate::geometry::{Geometry, RingClosure};
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::FileType;

use super::attribute_binder::AttributeBinder;
use super::color_resolver::ColorResolver;
use super::color_table::ColorTable;
use super::file_header::MapGisFileHeader;
use super::mapgis_reader_configuration::MapGisReaderConfiguration;
use super::record_readers::{LineRecord, PolygonRecord, RecordTable};
use super::region_directory::{RegionDirectory, RegionKind};
use super::region_view::LoadedRegion;
use super::text_transcoder::EncodingTranscoder;
use super::topology_reconstructor::TopologyReconstructor;

/// Reads MapGIS line, point and polygon files.
///
/// # Usage
///
/// ```rust,no_run
/// use mapgis_tools_rs::io::mapgis::{MapGisReader, MapGisReaderConfiguration};
///
/// let doc = MapGisReader::read_from_file("parcels.WP", MapGisReaderConfiguration::default()).unwrap();
/// println!("{} features", doc.features.len());
/// ```
pub struct MapGisReader<R: Read + Seek> {
    /// Underlying byte stream.
    stream: R,
    /// Reader options.
    configuration: MapGisReaderConfiguration,
    /// Color table used to resolve fill colors, when one was supplied.
    color_table: Option<ColorTable>,
    /// Non-fatal diagnostics gathered so far; moved into the document.
    notifications: NotificationCollection,
}

impl MapGisReader<BufReader<File>> {
    /// Open and read a MapGIS file from disk.
    pub fn read_from_file(
        path: impl AsRef<Path>,
        configuration: MapGisReaderConfiguration,
    ) -> Result<MapGisDocument> {
        let file = File::open(path.as_ref()).map_err(MapGisError::Io)?;
        Self::read_from_stream(BufReader::new(file), configuration)
    }
}

impl<R: Read + Seek> MapGisReader<R> {
    /// Read a MapGIS file from an arbitrary seekable stream.
    pub fn read_from_stream(
        stream: R,
        configuration: MapGisReaderConfiguration,
    ) -> Result<MapGisDocument> {
        Self::new(stream, configuration).read()
    }

    pub fn new(stream: R, configuration: MapGisReaderConfiguration) -> Self {
        Self {
            stream,
            configuration,
            color_table: None,
            notifications: NotificationCollection::new(),
        }
    }

    /// Resolve feature colors against `table`.
    pub fn with_color_table(mut self, table: ColorTable) -> Self {
        self.color_table = Some(table);
        self
    }

    /// Decode the whole file. Any fatal error aborts with no partial output.
    pub fn read(&mut self) -> Result<MapGisDocument> {
        let header = self.read_file_header()?;
        let directory = RegionDirectory::read(&mut self.stream, header.directory_offset()?)?;

        let features = match header.file_type {
            FileType::Polygon => self.read_polygons(&header, &directory)?,
            FileType::Line => self.read_lines(&header, &directory)?,
            FileType::Point => {
                self.notifications.notify(
                    format!(
                        "point records are not decoded; {} declared points skipped",
                        header.point_count()
                    ),
                    NotificationType::NotImplemented,
                );
                Vec::new()
            }
        };

        let mut document = MapGisDocument::new(header, directory);
        document.features = features;
        document.notifications = std::mem::take(&mut self.notifications);
        Ok(document)
    }

    fn read_file_header(&mut self) -> Result<MapGisFileHeader> {
        let header = MapGisFileHeader::read(&mut self.stream)?;
        if !header.signature_matches() {
            self.notifications.notify(
                format!(
                    "signature {:?} does not match file type {}",
                    String::from_utf8_lossy(&header.signature),
                    header.file_type
                ),
                NotificationType::Warning,
            );
        }
        Ok(header)
    }

    fn load_region(&mut self, directory: &RegionDirectory, kind: RegionKind) -> Result<LoadedRegion> {
        LoadedRegion::load(&mut self.stream, kind, directory.get(kind))
    }

    /// The attribute region, or `None` when attributes are disabled or the
    /// file has none.
    fn load_attributes(
        &mut self,
        directory: &RegionDirectory,
        kind: RegionKind,
    ) -> Result<Option<LoadedRegion>> {
        if !self.configuration.read_attributes {
            return Ok(None);
        }
        if directory.get(kind).is_empty() {
            self.notifications.notify(
                format!("{kind} region is empty; features carry no attributes"),
                NotificationType::Warning,
            );
            return Ok(None);
        }
        self.load_region(directory, kind).map(Some)
    }

    fn read_polygons(
        &mut self,
        header: &MapGisFileHeader,
        directory: &RegionDirectory,
    ) -> Result<Vec<Feature>> {
        let strict = self.configuration.strict_region_length;
        let line_info = self.load_region(directory, RegionKind::LineOrPointInfo)?;
        let coordinates = self.load_region(directory, RegionKind::LineCoordsOrPointString)?;
        let polygon_info = self.load_region(directory, RegionKind::PolygonInfo)?;
        let attributes = self.load_attributes(directory, RegionKind::PolygonAttr)?;

        let lines = RecordTable::<LineRecord>::from_region(
            line_info.view(),
            header.line_count(),
            strict,
            &mut self.notifications,
        )?;
        let polygons = RecordTable::<PolygonRecord>::from_region(
            polygon_info.view(),
            header.polygon_count(),
            strict,
            &mut self.notifications,
        )?;

        let transcoder = EncodingTranscoder::new(self.configuration.encoding);
        let binder = match &attributes {
            Some(region) => Some(AttributeBinder::new(
                region.view(),
                &transcoder,
                &mut self.notifications,
            )?),
            None => None,
        };
        let builder = FeatureBuilder {
            reconstructor: TopologyReconstructor::new(&lines, coordinates.view()),
            binder: binder.as_ref(),
            resolver: self.color_table.as_ref().map(ColorResolver::new),
        };

        let records: Vec<(usize, &PolygonRecord)> = polygons.iter().collect();
        let (features, notes) =
            build_features(&records, self.configuration.parallel, |number, record, notes| {
                builder.polygon(number, record, notes)
            })?;
        self.notifications.extend(notes);
        Ok(features)
    }

    fn read_lines(
        &mut self,
        header: &MapGisFileHeader,
        directory: &RegionDirectory,
    ) -> Result<Vec<Feature>> {
        let line_info = self.load_region(directory, RegionKind::LineOrPointInfo)?;
        let coordinates = self.load_region(directory, RegionKind::LineCoordsOrPointString)?;
        let attributes = self.load_attributes(directory, RegionKind::LineOrPointAttr)?;

        let lines = RecordTable::<LineRecord>::from_region(
            line_info.view(),
            header.line_count(),
            self.configuration.strict_region_length,
            &mut self.notifications,
        )?;

        let transcoder = EncodingTranscoder::new(self.configuration.encoding);
        let binder = match &attributes {
            Some(region) => Some(AttributeBinder::new(
                region.view(),
                &transcoder,
                &mut self.notifications,
            )?),
            None => None,
        };
        let builder = FeatureBuilder {
            reconstructor: TopologyReconstructor::new(&lines, coordinates.view()),
            binder: binder.as_ref(),
            resolver: self.color_table.as_ref().map(ColorResolver::new),
        };

        let records: Vec<(usize, &LineRecord)> = lines.iter().collect();
        let (features, notes) =
            build_features(&records, self.configuration.parallel, |number, record, _| {
                builder.line(number, record)
            })?;
        self.notifications.extend(notes);
        Ok(features)
    }
}

/// Shared, read-only state for building features.
struct FeatureBuilder<'a> {
    reconstructor: TopologyReconstructor<'a>,
    binder: Option<&'a AttributeBinder<'a>>,
    resolver: Option<ColorResolver<'a>>,
}

impl FeatureBuilder<'_> {
    fn polygon(
        &self,
        number: usize,
        record: &PolygonRecord,
        notifications: &mut NotificationCollection,
    ) -> Result<Feature> {
        let reconstructed = self.reconstructor.reconstruct(record)?;
        for (ring, closure) in reconstructed.closures.iter().enumerate() {
            if let RingClosure::Appended { gap } = closure {
                if closure.is_near_miss() {
                    notifications.notify(
                        format!("polygon {number} ring {ring}: ends are {gap:e} apart, closed by repeating the first point"),
                        NotificationType::Warning,
                    );
                }
            }
        }

        let mut feature = Feature::new(number, Geometry::Polygon(reconstructed.polygon), record.color);
        feature.line_references = reconstructed.line_references;
        self.finish(feature)
    }

    fn line(&self, number: usize, record: &LineRecord) -> Result<Feature> {
        let geometry = Geometry::LineString(self.reconstructor.line_string(record)?);
        self.finish(Feature::new(number, geometry, record.color))
    }

    fn finish(&self, mut feature: Feature) -> Result<Feature> {
        if let Some(resolver) = &self.resolver {
            feature.color = Some(resolver.resolve(feature.color_index)?);
        }
        if let Some(binder) = self.binder {
            feature.attributes = binder.bind(feature.number)?;
        }
        Ok(feature)
    }
}

fn build_one<T, F>(build: &F, number: usize, record: &T) -> Result<(Feature, NotificationCollection)>
where
    F: Fn(usize, &T, &mut NotificationCollection) -> Result<Feature>,
{
    let mut notifications = NotificationCollection::new();
    let feature = build(number, record, &mut notifications)?;
    Ok((feature, notifications))
}

/// Build one feature per record, sequentially or on the rayon pool. Features
/// and their notifications come back in record order either way.
fn build_features<T, F>(
    records: &[(usize, &T)],
    parallel: bool,
    build: F,
) -> Result<(Vec<Feature>, NotificationCollection)>
where
    T: Sync,
    F: Fn(usize, &T, &mut NotificationCollection) -> Result<Feature> + Sync,
{
    let built: Vec<(Feature, NotificationCollection)> = if parallel {
        records
            .par_iter()
            .map(|&(number, record)| build_one(&build, number, record))
            .collect::<Result<_>>()?
    } else {
        records
            .iter()
            .map(|&(number, record)| build_one(&build, number, record))
            .collect::<Result<_>>()?
    };

    let mut notifications = NotificationCollection::new();
    let mut features = Vec::with_capacity(built.len());
    for (feature, notes) in built {
        features.push(feature);
        notifications.extend(notes);
    }
    Ok((features, notifications))
}
