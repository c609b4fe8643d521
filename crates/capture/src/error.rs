use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Permission denied, no camera present, or the device refused the format.
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    /// A frame was requested without an active stream or before the stream has dimensions.
    #[error("{0}")]
    NotReady(String),

    #[error("Frame decode failed: {0}")]
    Decode(String),

    #[error("JPEG encode failed: {0}")]
    Encode(String),
}

impl CaptureError {
    pub fn not_started() -> Self {
        CaptureError::NotReady("Camera is not started".to_string())
    }
}
