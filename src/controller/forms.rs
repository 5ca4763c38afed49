use std::collections::HashMap;

use actix_multipart::Multipart;
use futures::StreamExt;
use tracing::debug;

use crate::caddie::{ImageData, parse_data_url};
use crate::model::FieldError;

pub const UPLOAD_FIELD: &str = "uploaded_image";
pub const CAMERA_FIELD: &str = "camera_image_data";
pub const CONTEXT_FIELD: &str = "context";
pub const DISTANCE_FIELD: &str = "distance_to_hole";

/// Longest typed entry accepted in a text field.
pub const MAX_TEXT_FIELD_BYTES: usize = 4096;

/// A parsed advice form: the text fields, the chosen image, and any problem
/// with the image.
#[derive(Debug, Default)]
pub struct EvidenceForm {
    pub fields: HashMap<String, String>,
    pub image: Option<ImageData>,
    pub errors: Vec<FieldError>,
}

impl EvidenceForm {
    #[must_use]
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }
}

fn too_large(max_bytes: usize) -> FieldError {
    FieldError::new(
        UPLOAD_FIELD,
        format!(
            "That image is too large. The limit is {} MB.",
            max_bytes.div_ceil(1024 * 1024)
        ),
    )
}

/// Drain one part, keeping at most `cap` bytes. `None` when the part was
/// larger than that.
async fn read_capped(
    field: &mut actix_multipart::Field,
    cap: usize,
) -> Result<Option<Vec<u8>>, actix_web::Error> {
    let mut bytes = Vec::new();
    let mut oversize = false;
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if oversize {
            continue;
        }
        if bytes.len() + chunk.len() > cap {
            oversize = true;
            bytes = Vec::new();
            continue;
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok((!oversize).then_some(bytes))
}

/// Read a multipart advice form. An uploaded file wins over a camera capture;
/// either must be an image no larger than `max_bytes`. Parts the advice forms
/// do not use are drained and dropped.
///
/// # Errors
///
/// Will return `Err` if the multipart body is malformed
pub async fn read_evidence_form(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<EvidenceForm, actix_web::Error> {
    let mut form = EvidenceForm::default();
    let mut upload: Option<ImageData> = None;
    let mut camera_oversize = false;
    // base64 plus the data: prefix
    let camera_cap = max_bytes.saturating_mul(4) / 3 + 1024;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            UPLOAD_FIELD => {
                let mime = field
                    .content_type()
                    .map(|m| m.essence_str().to_owned())
                    .unwrap_or_default();
                match read_capped(&mut field, max_bytes).await? {
                    None => form.errors.push(too_large(max_bytes)),
                    Some(bytes) if bytes.is_empty() => {
                        // no file chosen
                        debug!("empty upload part");
                    }
                    Some(bytes) => match ImageData::new(&mime, bytes) {
                        Some(image) => upload = Some(image),
                        None => form.errors.push(FieldError::new(
                            UPLOAD_FIELD,
                            "Only image files can be uploaded.",
                        )),
                    },
                }
            }
            CAMERA_FIELD => match read_capped(&mut field, camera_cap).await? {
                Some(value) => {
                    form.fields
                        .insert(name.clone(), String::from_utf8_lossy(&value).into_owned());
                }
                None => camera_oversize = true,
            },
            CONTEXT_FIELD | DISTANCE_FIELD => {
                match read_capped(&mut field, MAX_TEXT_FIELD_BYTES).await? {
                    Some(value) => {
                        form.fields
                            .insert(name.clone(), String::from_utf8_lossy(&value).into_owned());
                    }
                    None => form.errors.push(FieldError::new(
                        name.clone(),
                        format!("That entry is too long. The limit is {MAX_TEXT_FIELD_BYTES} characters."),
                    )),
                }
            }
            _ => {
                debug!(field = %name, "ignoring unknown form part");
                while let Some(chunk) = field.next().await {
                    chunk?;
                }
            }
        }
    }

    form.image = match upload {
        Some(image) => Some(image),
        None if camera_oversize => {
            form.errors.push(too_large(max_bytes));
            None
        }
        None => camera_image(&form.fields, max_bytes, &mut form.errors),
    };
    Ok(form)
}

fn camera_image(
    fields: &HashMap<String, String>,
    max_bytes: usize,
    errors: &mut Vec<FieldError>,
) -> Option<ImageData> {
    let raw = fields.get(CAMERA_FIELD).map(|s| s.trim()).unwrap_or_default();
    if raw.is_empty() {
        return None;
    }
    match parse_data_url(raw) {
        Some(image) if image.bytes.len() <= max_bytes => Some(image),
        Some(_) => {
            errors.push(too_large(max_bytes));
            None
        }
        None => {
            errors.push(FieldError::new(
                UPLOAD_FIELD,
                "The camera capture could not be read. Please try again.",
            ));
            None
        }
    }
}
