//! Data URL parsing for uploaded photos

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use std::fmt;

/// Standard alphabet, accepting payloads with or without trailing padding
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Image encodings accepted for uploaded photos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    Jpeg,
    Jpg,
    Png,
    Webp,
}

impl ImageMime {
    pub const SUPPORTED: &'static str = "jpeg, jpg, png, webp";

    /// Parse the subtype of an `image/*` MIME type, case-insensitively
    pub fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype.to_ascii_lowercase().as_str() {
            "jpeg" => Some(Self::Jpeg),
            "jpg" => Some(Self::Jpg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

/// Why a string was rejected as a photo data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataUrlError {
    /// Not shaped like `data:<mime>;base64,<payload>`
    Malformed,
    /// Well-formed, but the MIME type is outside the supported set
    UnsupportedMime(String),
    /// Payload empty or not valid base64
    InvalidPayload,
}

impl fmt::Display for DataUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataUrlError::Malformed => {
                write!(f, "expected a base64 data URL (data:image/<type>;base64,...)")
            }
            DataUrlError::UnsupportedMime(mime) => write!(
                f,
                "unsupported image type '{}', supported types are {}",
                mime,
                ImageMime::SUPPORTED
            ),
            DataUrlError::InvalidPayload => write!(f, "image payload is not valid base64"),
        }
    }
}

/// A borrowed view of a validated photo data URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    pub mime: ImageMime,
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Parse and check a `data:image/<type>;base64,<payload>` string
    pub fn parse(input: &'a str) -> Result<Self, DataUrlError> {
        let rest = input.strip_prefix("data:").ok_or(DataUrlError::Malformed)?;
        let (mime, payload) = rest.split_once(',').ok_or(DataUrlError::Malformed)?;
        let mime = mime.strip_suffix(";base64").ok_or(DataUrlError::Malformed)?;

        let (top_level, subtype) = mime.split_once('/').ok_or(DataUrlError::Malformed)?;
        if !top_level.eq_ignore_ascii_case("image") {
            return Err(DataUrlError::UnsupportedMime(mime.to_string()));
        }
        let mime = ImageMime::from_subtype(subtype)
            .ok_or_else(|| DataUrlError::UnsupportedMime(mime.to_string()))?;

        if payload.is_empty() || PAYLOAD_ENGINE.decode(payload).is_err() {
            return Err(DataUrlError::InvalidPayload);
        }

        Ok(Self { mime, payload })
    }
}
