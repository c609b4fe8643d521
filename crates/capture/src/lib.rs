pub mod camera;
pub mod captured;
pub mod config;
pub mod decoder;
pub mod device;
pub mod error;
pub mod snapshot;
pub mod synthetic;
pub mod webcam;

pub use camera::{Camera, CameraHandle};
pub use captured::CapturedImage;
pub use config::CameraConfig;
pub use decoder::{Decoded, FrameDecoder, MjpegDecoder, YuyvDecoder};
pub use device::{CaptureDevice, FacingMode, Frame, StreamConstraints, StreamInfo};
pub use error::CaptureError;
pub use snapshot::{SnapshotExtractor, encode_jpeg};
pub use synthetic::SyntheticDevice;
pub use webcam::{PixelFormat, V4lDevice};
