use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};

pub const JPEG_MIME: &str = "image/jpeg";

/// A JPEG snapshot of one camera frame. Immutable once taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
    timestamp: DateTime<Utc>,
}

impl CapturedImage {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Utc::now(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// `data:image/jpeg;base64,...`, ready to embed or post as a form field.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", JPEG_MIME, STANDARD.encode(&self.data))
    }
}
