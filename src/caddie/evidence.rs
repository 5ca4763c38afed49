use base64::{Engine as _, engine::general_purpose};
use regex::Regex;
use std::sync::OnceLock;

use crate::model::validation::{FieldError, parse_digits};

pub const MIN_TARGET_DISTANCE: u32 = 1;
pub const MAX_TARGET_DISTANCE: u32 = 999;

/// An image to send along with the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// `None` unless the mime type is `image/*` and there are bytes.
    #[must_use]
    pub fn new(mime: &str, bytes: Vec<u8>) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if bytes.is_empty() || !mime.starts_with("image/") {
            return None;
        }
        Some(ImageData { mime, bytes })
    }

    /// `data:<mime>;base64,<payload>` as the vision API expects.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Decode a camera capture posted as a `data:image/...;base64,` URL.
///
/// # Panics
///
/// Will panic if the regex is invalid
#[must_use]
pub fn parse_data_url(data_url: &str) -> Option<ImageData> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"^data:(image/[A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/=\s]+)$")
            .expect("Invalid regex pattern - this is a programming error")
    });

    let caps = re.captures(data_url.trim())?;
    let mime = caps.get(1)?.as_str();
    let payload = caps
        .get(2)?
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    let bytes = general_purpose::STANDARD.decode(payload).ok()?;
    ImageData::new(mime, bytes)
}

/// What the golfer supplied with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    None,
    Text(String),
    Image(ImageData),
    TextAndImage(String, ImageData),
}

impl Evidence {
    /// Blank text counts as absent.
    #[must_use]
    pub fn from_parts(text: Option<String>, image: Option<ImageData>) -> Self {
        let text = text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        match (text, image) {
            (None, None) => Evidence::None,
            (Some(t), None) => Evidence::Text(t),
            (None, Some(i)) => Evidence::Image(i),
            (Some(t), Some(i)) => Evidence::TextAndImage(t, i),
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Evidence::Text(t) | Evidence::TextAndImage(t, _) => Some(t),
            Evidence::None | Evidence::Image(_) => None,
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageData> {
        match self {
            Evidence::Image(i) | Evidence::TextAndImage(_, i) => Some(i),
            Evidence::None | Evidence::Text(_) => None,
        }
    }
}

/// Read the optional "distance to target" field.
///
/// # Errors
///
/// Will return `Err` if the value is present but not a whole number of yards
/// between `MIN_TARGET_DISTANCE` and `MAX_TARGET_DISTANCE`
pub fn parse_target_distance(raw: &str) -> Result<Option<u32>, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match parse_digits(raw) {
        Some(d) if (MIN_TARGET_DISTANCE..=MAX_TARGET_DISTANCE).contains(&d) => Ok(Some(d)),
        Some(_) => Err(FieldError::new(
            "distance_to_hole",
            format!(
                "Invalid 'Distance to Hole' entered. Please enter a number between {MIN_TARGET_DISTANCE} and {MAX_TARGET_DISTANCE}."
            ),
        )),
        None => Err(FieldError::new(
            "distance_to_hole",
            "Invalid 'Distance to Hole' input. Please enter a number.",
        )),
    }
}
