use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use datenight_models::Photo;
use tracing::warn;

pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// One file from an upload request, as sent by the client
#[derive(Debug, Clone, Default)]
pub struct PhotoUpload {
    pub filename: Option<String>,
    /// Base64 payload, optionally as a `data:<mime>;base64,` URL
    pub data: Option<String>,
    pub size: Option<u64>,
    pub content_type: Option<String>,
}

/// Upload validated and ready to store
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PreparedPhoto {
    pub filename: String,
    pub data: String,
    pub file_size: u64,
    pub content_type: String,
}

impl PreparedPhoto {
    pub(crate) fn into_photo(self, id: u64, date_id: u64, description: &str, now: DateTime<Utc>) -> Photo {
        Photo {
            id,
            date_id,
            filename: self.filename,
            data: self.data,
            description: description.to_string(),
            uploaded_at: now,
            file_size: self.file_size,
            content_type: self.content_type,
        }
    }
}

/// Split a `data:<mime>;base64,<payload>` URL; plain payloads pass through
fn split_data_url(data: &str) -> (Option<&str>, &str) {
    match data.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((header, payload)) => {
            let mime = header.strip_suffix(";base64").unwrap_or(header);
            (Some(mime).filter(|m| !m.is_empty()), payload)
        }
        None => (None, data),
    }
}

/// Validate one upload. Entries without a filename or payload, or with a
/// payload that is not base64, are dropped.
pub(crate) fn prepare(upload: PhotoUpload) -> Option<PreparedPhoto> {
    let filename = upload.filename.filter(|f| !f.trim().is_empty())?;
    let data = upload.data.filter(|d| !d.trim().is_empty())?;

    let (mime, payload) = split_data_url(data.trim());
    let decoded_len = match STANDARD.decode(payload) {
        Ok(bytes) => bytes.len() as u64,
        Err(e) => {
            warn!(filename = %filename, error = %e, "Skipping photo with invalid base64 payload");
            return None;
        }
    };

    let content_type = upload
        .content_type
        .filter(|t| !t.trim().is_empty())
        .or_else(|| mime.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    Some(PreparedPhoto {
        filename,
        data: payload.to_string(),
        file_size: upload.size.unwrap_or(decoded_len),
        content_type,
    })
}
