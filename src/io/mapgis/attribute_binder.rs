//! Typed attribute values for a record.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{MapGisError, Result};
use crate::notification::{NotificationCollection, NotificationType};

use super::record_readers::{decode_records, AttributeDefinition, AttributeHeader, AttributeType};
use super::region_view::RegionView;
use super::text_transcoder::TextTranscoder;

/// One decoded attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Int(i32),
    Float(f32),
    Double(f64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Double(v) => write!(f, "{v}"),
        }
    }
}

/// Ordered attribute map of one feature.
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// Binds the definitions of an attribute region to per-record value slots.
pub struct AttributeBinder<'a> {
    header: AttributeHeader,
    definitions: Vec<AttributeDefinition>,
    names: Vec<String>,
    region: RegionView<'a>,
    transcoder: &'a dyn TextTranscoder,
}

impl<'a> AttributeBinder<'a> {
    /// Parse the header and definitions of an attribute region.
    ///
    /// Definitions with an unknown type code are reported here, once, and
    /// skipped by every later [`bind`](Self::bind).
    pub fn new(
        region: RegionView<'a>,
        transcoder: &'a dyn TextTranscoder,
        notifications: &mut NotificationCollection,
    ) -> Result<Self> {
        let header = AttributeHeader::parse(region)?;
        let definitions: Vec<AttributeDefinition> =
            decode_records(header.definitions_view(region)?)?;
        let names: Vec<String> = definitions
            .iter()
            .map(|d| transcoder.transcode(d.name_bytes()))
            .collect();

        for (definition, name) in definitions.iter().zip(&names) {
            if definition.attribute_type().is_none() {
                let err = MapGisError::UnknownAttributeType {
                    attribute: name.clone(),
                    type_code: definition.type_code,
                };
                notifications.notify(format!("{err}; attribute skipped"), NotificationType::Warning);
            }
        }

        Ok(Self {
            header,
            definitions,
            names,
            region,
            transcoder,
        })
    }

    pub fn header(&self) -> &AttributeHeader {
        &self.header
    }

    pub fn definitions(&self) -> &[AttributeDefinition] {
        &self.definitions
    }

    /// Decoded attribute names, in definition order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Value slot of a record number.
    fn slot(&self, number: usize) -> Result<&'a [u8]> {
        let size = self.header.attrs_size as i64;
        let offset = (number as i64)
            .checked_mul(size)
            .and_then(|o| o.checked_add(self.header.off_attr_value as i64))
            .unwrap_or(i64::MAX);
        let out_of_range = || MapGisError::AttributeOffsetOutOfRange {
            attribute: format!("<value slot {number}>"),
            offset,
            size: size.max(0) as usize,
            available: self.region.len(),
        };
        let len = usize::try_from(size).map_err(|_| out_of_range())?;
        self.region.get(offset, len).ok_or_else(out_of_range)
    }

    /// Typed attributes of record `number`, keyed by name.
    ///
    /// When two definitions share a name the later value wins, at the
    /// position of the first.
    pub fn bind(&self, number: usize) -> Result<AttributeMap> {
        let slot = self.slot(number)?;
        let mut values = IndexMap::with_capacity(self.definitions.len());

        for (definition, name) in self.definitions.iter().zip(&self.names) {
            let Some(attribute_type) = definition.attribute_type() else {
                continue;
            };
            let size = usize::try_from(definition.size).unwrap_or(0);
            // Numbers are read from the start of the field, which must fit them.
            let width = attribute_type.fixed_width().unwrap_or(size);
            let field = usize::try_from(definition.attr_offset)
                .ok()
                .filter(|_| width <= size)
                .and_then(|start| slot.get(start..start.checked_add(width)?))
                .ok_or_else(|| MapGisError::AttributeOffsetOutOfRange {
                    attribute: name.clone(),
                    offset: definition.attr_offset as i64,
                    size,
                    available: slot.len(),
                })?;

            let value = match attribute_type {
                AttributeType::String => AttributeValue::String(self.transcoder.transcode(field)),
                AttributeType::Int32 => AttributeValue::Int(LittleEndian::read_i32(field)),
                AttributeType::Float32 => AttributeValue::Float(LittleEndian::read_f32(field)),
                AttributeType::Float64 => AttributeValue::Double(LittleEndian::read_f64(field)),
            };
            values.insert(name.clone(), value);
        }
        Ok(values)
    }
}

impl fmt::Debug for AttributeBinder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeBinder")
            .field("header", &self.header)
            .field("names", &self.names)
            .field("region", &self.region.kind())
            .finish()
    }
}
