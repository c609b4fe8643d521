use crate::error::CaptureError;
use serde::Deserialize;

/// Which way the requested camera should face. Only meaningful on platforms that
/// report camera placement; V4L2 devices ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

/// Video-only stream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConstraints {
    pub width: u32,
    pub height: u32,
    pub facing: FacingMode,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            width: crate::config::DEFAULT_WIDTH,
            height: crate::config::DEFAULT_HEIGHT,
            facing: FacingMode::User,
        }
    }
}

/// What the device actually granted. Drivers may round the requested resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    pub label: String,
}

/// One decoded RGB frame at the stream's native size.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub sequence: u64,
    pub rgb: Vec<u8>,
}

impl Frame {
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A camera that can be opened once, read from, and released.
///
/// Implementations must make `close_stream` safe to call when no stream is open.
pub trait CaptureDevice {
    fn open_stream(&mut self, constraints: &StreamConstraints) -> Result<StreamInfo, CaptureError>;

    fn read_frame(&mut self) -> Result<Frame, CaptureError>;

    fn close_stream(&mut self);

    fn is_streaming(&self) -> bool;
}

impl<D: CaptureDevice + ?Sized> CaptureDevice for Box<D> {
    fn open_stream(&mut self, constraints: &StreamConstraints) -> Result<StreamInfo, CaptureError> {
        (**self).open_stream(constraints)
    }

    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        (**self).read_frame()
    }

    fn close_stream(&mut self) {
        (**self).close_stream()
    }

    fn is_streaming(&self) -> bool {
        (**self).is_streaming()
    }
}
