//! Core types used throughout the crate

pub mod bounds;
pub mod color;
pub mod vector;

pub use bounds::BoundingBox2D;
pub use color::{remove_k, Cmy, Kcmy, Rgb};
pub use vector::Vector2;

/// MapGIS vector file kind, as stored in the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileType {
    /// Line file (`.WL`)
    Line,
    /// Point file (`.WT`)
    Point,
    /// Polygon file (`.WP`)
    Polygon,
}

impl FileType {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Line => "Line",
            FileType::Point => "Point",
            FileType::Polygon => "Polygon",
        }
    }

    /// Numeric id stored at offset 8 of the header.
    pub fn type_id(&self) -> i32 {
        match self {
            FileType::Line => 0,
            FileType::Point => 1,
            FileType::Polygon => 2,
        }
    }

    /// Create a file type from its numeric id.
    pub fn from_type_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(FileType::Line),
            1 => Some(FileType::Point),
            2 => Some(FileType::Polygon),
            _ => None,
        }
    }

    /// Eight-byte signature at the very start of the file.
    pub fn signature(&self) -> &'static [u8; 8] {
        match self {
            FileType::Line => b"WMAP`D21",
            FileType::Point => b"WMAP`D22",
            FileType::Polygon => b"WMAP`D23",
        }
    }

    /// Usual file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Line => "WL",
            FileType::Point => "WT",
            FileType::Polygon => "WP",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
