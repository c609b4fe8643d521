use crate::device::{FacingMode, StreamConstraints};
use serde::Deserialize;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
/// Matches the quality browsers use for `image/jpeg` when none is given.
pub const DEFAULT_JPEG_QUALITY: i32 = 92;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device_id: u32,
    pub width: u32,
    pub height: u32,
    pub facing: FacingMode,
    pub jpeg_quality: i32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            facing: FacingMode::User,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CameraConfig {
    pub fn constraints(&self) -> StreamConstraints {
        StreamConstraints {
            width: self.width,
            height: self.height,
            facing: self.facing,
        }
    }
}
