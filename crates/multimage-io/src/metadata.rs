use std::collections::BTreeMap;
use std::path::Path;

use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;

use crate::error::IoError;

/// The metadata entries a display image can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataKey {
    /// Free text describing the image.
    ImageDescription,
    /// Name of the author.
    Artist,
    /// Copyright notice.
    Copyright,
    /// Name of the software that produced the image.
    Software,
    /// EXIF orientation, an integer in 1..=8.
    Orientation,
}

impl MetadataKey {
    /// Every supported key.
    pub const ALL: [MetadataKey; 5] = [
        MetadataKey::ImageDescription,
        MetadataKey::Artist,
        MetadataKey::Copyright,
        MetadataKey::Software,
        MetadataKey::Orientation,
    ];

    // empty tag used to look the key up in an EXIF block
    fn exif_template(&self) -> ExifTag {
        match self {
            MetadataKey::ImageDescription => ExifTag::ImageDescription(String::new()),
            MetadataKey::Artist => ExifTag::Artist(String::new()),
            MetadataKey::Copyright => ExifTag::Copyright(String::new()),
            MetadataKey::Software => ExifTag::Software(String::new()),
            MetadataKey::Orientation => ExifTag::Orientation(Vec::new()),
        }
    }

    fn exif_tag(self, value: &MetadataValue) -> Option<ExifTag> {
        match (self, value) {
            (MetadataKey::ImageDescription, MetadataValue::Text(s)) => {
                Some(ExifTag::ImageDescription(s.clone()))
            }
            (MetadataKey::Artist, MetadataValue::Text(s)) => Some(ExifTag::Artist(s.clone())),
            (MetadataKey::Copyright, MetadataValue::Text(s)) => Some(ExifTag::Copyright(s.clone())),
            (MetadataKey::Software, MetadataValue::Text(s)) => Some(ExifTag::Software(s.clone())),
            (MetadataKey::Orientation, MetadataValue::Integer(v)) => {
                Some(ExifTag::Orientation(vec![*v]))
            }
            _ => None,
        }
    }

    fn exif_value(self, tag: &ExifTag) -> Option<MetadataValue> {
        let text = |s: &String| MetadataValue::Text(s.trim_end_matches('\0').to_string());
        match (self, tag) {
            (MetadataKey::ImageDescription, ExifTag::ImageDescription(s))
            | (MetadataKey::Artist, ExifTag::Artist(s))
            | (MetadataKey::Copyright, ExifTag::Copyright(s))
            | (MetadataKey::Software, ExifTag::Software(s)) => Some(text(s)),
            (MetadataKey::Orientation, ExifTag::Orientation(values)) => {
                values.first().map(|&v| MetadataValue::Integer(v))
            }
            _ => None,
        }
    }

    fn validate(&self, value: &MetadataValue) -> Result<(), IoError> {
        let valid = match (self, value) {
            (MetadataKey::Orientation, MetadataValue::Integer(v)) => (1..=8).contains(v),
            (MetadataKey::Orientation, MetadataValue::Text(_)) => false,
            (_, MetadataValue::Text(_)) => true,
            (_, MetadataValue::Integer(_)) => false,
        };

        if !valid {
            return Err(IoError::InvalidMetadata(self.to_string(), value.to_string()));
        }

        Ok(())
    }
}

impl std::fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MetadataKey::ImageDescription => "ImageDescription",
            MetadataKey::Artist => "Artist",
            MetadataKey::Copyright => "Copyright",
            MetadataKey::Software => "Software",
            MetadataKey::Orientation => "Orientation",
        };
        write!(f, "{name}")
    }
}

/// The value of a metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetadataValue {
    /// A text value.
    Text(String),
    /// An integer value.
    Integer(u16),
}

impl std::fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataValue::Text(s) => write!(f, "{s:?}"),
            MetadataValue::Integer(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<u16> for MetadataValue {
    fn from(value: u16) -> Self {
        MetadataValue::Integer(value)
    }
}

/// Metadata of a display image, stored as EXIF tags when the image is encoded.
///
/// # Example
///
/// ```
/// use multimage_io::{ImageMetadata, MetadataKey, MetadataValue};
///
/// let mut metadata = ImageMetadata::new();
/// metadata.insert(MetadataKey::Artist, "jane").unwrap();
/// metadata.insert(MetadataKey::Orientation, 6).unwrap();
///
/// assert_eq!(metadata.orientation(), Some(6));
/// assert!(metadata.insert(MetadataKey::Orientation, 9).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    entries: BTreeMap<MetadataKey, MetadataValue>,
}

impl ImageMetadata {
    /// Create an empty metadata set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an entry, returning the previous value of the key.
    ///
    /// # Errors
    ///
    /// Fails with [`IoError::InvalidMetadata`] if the kind of the value does not
    /// match the key or the orientation is outside of 1..=8.
    pub fn insert(
        &mut self,
        key: MetadataKey,
        value: impl Into<MetadataValue>,
    ) -> Result<Option<MetadataValue>, IoError> {
        let value = value.into();
        key.validate(&value)?;
        Ok(self.entries.insert(key, value))
    }

    /// Get the value of an entry.
    pub fn get(&self, key: MetadataKey) -> Option<&MetadataValue> {
        self.entries.get(&key)
    }

    /// Remove an entry, returning its value.
    pub fn remove(&mut self, key: MetadataKey) -> Option<MetadataValue> {
        self.entries.remove(&key)
    }

    /// The EXIF orientation, if set.
    pub fn orientation(&self) -> Option<u16> {
        match self.entries.get(&MetadataKey::Orientation) {
            Some(MetadataValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// Iterate over the entries ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&MetadataKey, &MetadataValue)> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn to_exif(&self) -> little_exif::metadata::Metadata {
        let mut exif = little_exif::metadata::Metadata::new();
        for (key, value) in &self.entries {
            if let Some(tag) = key.exif_tag(value) {
                exif.set_tag(tag);
            }
        }
        exif
    }
}

/// Resolve the EXIF container of a file from its extension.
pub(crate) fn file_type_from_path(path: &Path) -> Option<FileExtension> {
    // File type must be determined from extension
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => Some(FileExtension::JPEG),
        Some("tif") | Some("tiff") => Some(FileExtension::TIFF),
        Some("png") => Some(FileExtension::PNG {
            as_zTXt_chunk: false,
        }),
        _ => None,
    }
}

/// Extract the supported entries from the EXIF block of an encoded image.
pub(crate) fn decode_metadata(bytes: &[u8], file_type: FileExtension) -> ImageMetadata {
    let mut metadata = ImageMetadata::new();

    let Ok(exif) = little_exif::metadata::Metadata::new_from_vec(&bytes.to_vec(), file_type) else {
        return metadata;
    };

    for key in MetadataKey::ALL {
        let value = exif
            .get_tag(&key.exif_template())
            .into_iter()
            .find_map(|tag| key.exif_value(tag));

        if let Some(value) = value {
            if let Err(err) = metadata.insert(key, value) {
                log::warn!("skipping metadata entry: {err}");
            }
        }
    }

    metadata
}

/// Write the metadata into the EXIF block of an encoded image.
pub(crate) fn embed_metadata(
    bytes: &mut Vec<u8>,
    file_type: FileExtension,
    metadata: &ImageMetadata,
) -> Result<(), IoError> {
    if metadata.is_empty() {
        return Ok(());
    }

    metadata
        .to_exif()
        .write_to_vec(bytes, file_type)
        .map_err(|e| IoError::MetadataError(e.to_string()))
}
