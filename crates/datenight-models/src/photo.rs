use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A photo attached to a watch session, payload kept inline as base64
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: u64,
    pub date_id: u64,
    pub filename: String,
    pub data: String,
    pub description: String,
    pub uploaded_at: DateTime<Utc>,
    pub file_size: u64,
    pub content_type: String,
}

/// Trimmed view returned after upload, without the payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoSummary {
    pub id: u64,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&Photo> for PhotoSummary {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id,
            filename: photo.filename.clone(),
            uploaded_at: photo.uploaded_at,
        }
    }
}
