use std::fmt;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;

use crate::foundation::error::{BrandpostError, BrandpostResult};

/// Addressable reference to raster image data, as stored in a document.
///
/// Picked bytes are embedded as a `data:<mime>;base64,...` URL, so the reference is
/// self-contained and safe to rasterize without any cross-origin fetch. Strings from older
/// documents are kept as-is; anything that is not an embedded image fails at [`ImageRef::decode`].
///
/// The payload is shared, so cloning a document on every pointer move stays cheap.
#[derive(Clone, Eq)]
pub struct ImageRef(Arc<str>);

impl ImageRef {
    /// Embed encoded image bytes. The format is sniffed from the content, not trusted from a name.
    pub fn from_bytes(bytes: &[u8]) -> BrandpostResult<Self> {
        let format = image::guess_format(bytes)
            .map_err(|e| BrandpostError::asset(format!("unrecognized image data: {e}")))?;
        let mime = mime_for(format).ok_or_else(|| {
            BrandpostError::asset(format!("unsupported image format {format:?}"))
        })?;
        Ok(Self(Arc::from(format!(
            "data:{mime};base64,{}",
            STANDARD.encode(bytes)
        ))))
    }

    /// Wrap an existing reference string without checking it.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(Arc::from(s.into()))
    }

    /// The reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `data:` URLs, which can be decoded without network access.
    pub fn is_embedded(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// MIME type of an embedded image.
    pub fn mime(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        rest.split_once(';').map(|(mime, _)| mime)
    }

    /// Raw encoded bytes of an embedded image.
    pub fn bytes(&self) -> BrandpostResult<Vec<u8>> {
        let payload = self
            .0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_, payload)| payload)
            .ok_or_else(|| {
                BrandpostError::asset("image reference is not an embedded base64 data URL")
            })?;
        STANDARD
            .decode(payload.trim())
            .map_err(|e| BrandpostError::asset(format!("invalid base64 image payload: {e}")))
    }

    /// Decode to straight RGBA8.
    pub fn decode(&self) -> BrandpostResult<image::RgbaImage> {
        let bytes = self.bytes()?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| BrandpostError::asset(format!("decode embedded image: {e}")))?;
        Ok(img.to_rgba8())
    }
}

impl PartialEq for ImageRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl std::hash::Hash for ImageRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl serde::Serialize for ImageRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ImageRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from_string)
    }
}

// Data URLs are large; keep debug output readable.
impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mime() {
            Some(mime) => write!(f, "ImageRef({mime}, {} chars)", self.0.len()),
            None => write!(f, "ImageRef({:?})", self.0),
        }
    }
}

fn mime_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::Bmp => Some("image/bmp"),
        _ => None,
    }
}

/// Which image slot an asset pick targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// The full-bleed background photo.
    Background,
    /// The circular inset photo.
    Circle,
}

/// Outcome of asking the user for an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickResult {
    /// Raw encoded image bytes.
    Picked(Vec<u8>),
    /// The user dismissed the picker.
    Cancelled,
}

/// File-selection surface, injected into the tap handler.
pub trait AssetPicker {
    /// Ask for an image for `kind`.
    fn request(&mut self, kind: AssetKind) -> BrandpostResult<PickResult>;
}

impl<F> AssetPicker for F
where
    F: FnMut(AssetKind) -> BrandpostResult<PickResult>,
{
    fn request(&mut self, kind: AssetKind) -> BrandpostResult<PickResult> {
        self(kind)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image_ref.rs"]
mod tests;
