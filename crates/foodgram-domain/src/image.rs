//! Images submitted inline as base64 data URIs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Image formats accepted for recipe pictures and avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Parse the MIME subtype of `image/<subtype>`.
    pub fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// Check the file signature.
    fn matches(self, bytes: &[u8]) -> bool {
        match self {
            Self::Png => bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
            Self::Jpeg => bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
            Self::Gif => bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a"),
            Self::Webp => bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP",
        }
    }
}

/// Errors returned by [`ImagePayload::from_data_uri`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("image must be a base64 data URI")]
    NotDataUri,
    #[error("unsupported image type: {0}")]
    UnsupportedFormat(String),
    #[error("image payload is not valid base64")]
    InvalidBase64,
    #[error("image payload is empty")]
    Empty,
    #[error("image content does not match its declared type")]
    FormatMismatch,
}

/// Decoded image bytes ready to hand to file storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    /// Decode `data:image/<subtype>;base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self, ImageError> {
        let rest = uri
            .trim()
            .strip_prefix("data:image/")
            .ok_or(ImageError::NotDataUri)?;
        let (subtype, payload) = rest
            .split_once(";base64,")
            .ok_or(ImageError::NotDataUri)?;
        let format = ImageFormat::from_subtype(subtype)
            .ok_or_else(|| ImageError::UnsupportedFormat(subtype.to_owned()))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| ImageError::InvalidBase64)?;
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if !format.matches(&bytes) {
            return Err(ImageError::FormatMismatch);
        }
        Ok(Self { format, bytes })
    }
}
