//! GeoJSON output for decoded documents.

use std::io::Write;

use serde_json::{json, Map, Value};

use crate::document::{Feature, MapGisDocument};
use crate::geometry::Geometry;
use crate::types::{BoundingBox2D, Vector2};

/// Writes a [`MapGisDocument`] as a GeoJSON `FeatureCollection`.
///
/// The header's bounding box, when set, becomes the collection `bbox`.
/// Properties of each feature: `ID` (record number), every bound attribute,
/// `color_index`, and `fill` when the color was resolved. An attribute named
/// `ID` overrides the record number.
#[derive(Debug, Clone)]
pub struct GeoJsonWriter<'a> {
    document: &'a MapGisDocument,
    name: Option<String>,
    crs: Option<String>,
}

impl<'a> GeoJsonWriter<'a> {
    pub fn new(document: &'a MapGisDocument) -> Self {
        Self {
            document,
            name: None,
            crs: None,
        }
    }

    /// Collection name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Named CRS, e.g. `urn:ogc:def:crs:EPSG::4490`.
    pub fn crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    pub fn to_value(&self) -> Value {
        let features: Vec<Value> = self.document.features.iter().map(feature_value).collect();

        let mut collection = Map::new();
        collection.insert("type".into(), json!("FeatureCollection"));
        if let Some(name) = &self.name {
            collection.insert("name".into(), json!(name));
        }
        if let Some(crs) = &self.crs {
            collection.insert(
                "crs".into(),
                json!({ "type": "name", "properties": { "name": crs } }),
            );
        }
        let bounds = self.document.header.bounds;
        if bounds != BoundingBox2D::default() {
            collection.insert("bbox".into(), json!(bounds.to_array()));
        }
        collection.insert("features".into(), Value::Array(features));
        Value::Object(collection)
    }

    pub fn to_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_value())
    }

    pub fn write_to<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_value())
    }
}

fn positions(points: &[Vector2]) -> Value {
    Value::Array(points.iter().map(|p| json!(p.to_array())).collect())
}

fn geometry_value(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Polygon(polygon) => {
            // Ring 0 is the shell; an empty shell writes no rings at all.
            let rings: Vec<Value> = match polygon.shell() {
                Some(shell) if !shell.is_empty() => std::iter::once(shell)
                    .chain(polygon.holes().iter().filter(|ring| !ring.is_empty()))
                    .map(|ring| positions(ring.points()))
                    .collect(),
                _ => Vec::new(),
            };
            json!({ "type": "Polygon", "coordinates": rings })
        }
        Geometry::LineString(line) => {
            json!({ "type": "LineString", "coordinates": positions(line.points()) })
        }
    }
}

fn feature_value(feature: &Feature) -> Value {
    let mut properties = Map::new();
    properties.insert("ID".into(), json!(feature.number));
    for (name, value) in &feature.attributes {
        properties.insert(name.clone(), json!(value));
    }
    properties.insert("color_index".into(), json!(feature.color_index));
    if let Some(rgb) = feature.color {
        properties.insert("fill".into(), json!(rgb.to_hex()));
    }

    json!({
        "type": "Feature",
        "geometry": geometry_value(&feature.geometry),
        "properties": properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon, Ring};
    use crate::io::mapgis::{AttributeValue, MapGisFileHeader, RegionDirectory};
    use crate::types::{FileType, Rgb};

    fn square() -> Ring {
        Ring::from_points(
            [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]
                .into_iter()
                .map(Vector2::from)
                .collect(),
        )
    }

    #[test]
    fn test_polygon_feature() {
        let mut doc = MapGisDocument::new(
            MapGisFileHeader::new(FileType::Polygon),
            RegionDirectory::default(),
        );
        let mut feature = Feature::new(1, Geometry::Polygon(Polygon::new(vec![square(), Ring::new()])), 4);
        feature.color = Some(Rgb::new(125, 205, 205));
        feature.attributes.insert("NAME".into(), AttributeValue::String("a".into()));
        feature.attributes.insert("AREA".into(), AttributeValue::Double(0.5));
        doc.features.push(feature);

        let value = GeoJsonWriter::new(&doc).name("parcels").to_value();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["name"], "parcels");
        assert!(value.get("crs").is_none());
        assert!(value.get("bbox").is_none());

        let f = &value["features"][0];
        assert_eq!(f["geometry"]["type"], "Polygon");
        // The trailing empty ring is not written.
        assert_eq!(f["geometry"]["coordinates"].as_array().unwrap().len(), 1);
        assert_eq!(f["geometry"]["coordinates"][0][2], json!([1.0, 1.0]));
        assert_eq!(f["properties"]["ID"], 1);
        assert_eq!(f["properties"]["NAME"], "a");
        assert_eq!(f["properties"]["AREA"], 0.5);
        assert_eq!(f["properties"]["color_index"], 4);
        assert_eq!(f["properties"]["fill"], "#7dcdcd");
    }

    #[test]
    fn test_empty_shell_is_not_replaced_by_hole() {
        let mut doc = MapGisDocument::new(
            MapGisFileHeader::new(FileType::Polygon),
            RegionDirectory::default(),
        );
        doc.features.push(Feature::new(
            1,
            Geometry::Polygon(Polygon::new(vec![Ring::new(), square()])),
            0,
        ));
        doc.features.push(Feature::new(
            2,
            Geometry::Polygon(Polygon::new(vec![square(), Ring::new(), square()])),
            0,
        ));

        let value = GeoJsonWriter::new(&doc).to_value();
        assert_eq!(value["features"][0]["geometry"]["coordinates"], json!([]));
        // Empty holes are dropped, the shell stays first.
        let rings = value["features"][1]["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(rings.len(), 2);
    }

    #[test]
    fn test_line_feature_and_crs() {
        let mut header = MapGisFileHeader::new(FileType::Line);
        header.bounds = BoundingBox2D::new(0.0, 1.0, 2.0, 3.0);
        let mut doc = MapGisDocument::new(header, RegionDirectory::default());
        doc.features.push(Feature::new(
            2,
            Geometry::LineString(LineString::new(vec![Vector2::new(0.0, 1.0), Vector2::new(2.0, 3.0)])),
            0,
        ));

        let writer = GeoJsonWriter::new(&doc).crs("urn:ogc:def:crs:EPSG::4490");
        let value = writer.to_value();
        assert_eq!(value["crs"]["properties"]["name"], "urn:ogc:def:crs:EPSG::4490");
        assert_eq!(value["bbox"], json!([0.0, 1.0, 2.0, 3.0]));
        let f = &value["features"][0];
        assert_eq!(f["geometry"]["type"], "LineString");
        assert_eq!(f["geometry"]["coordinates"], json!([[0.0, 1.0], [2.0, 3.0]]));
        assert!(f["properties"].get("fill").is_none());

        let mut out = Vec::new();
        writer.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, writer.to_string_pretty().unwrap());
    }
}
