use crate::camera::{Camera, CameraHandle};
use crate::captured::CapturedImage;
use crate::device::CaptureDevice;
use crate::error::CaptureError;
use common::span;

/// Turns the current frame of a live camera into a [`CapturedImage`].
#[derive(Debug, Clone, Copy)]
pub struct SnapshotExtractor {
    quality: i32,
}

impl SnapshotExtractor {
    pub fn new(quality: i32) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> i32 {
        self.quality
    }

    /// Encode the next frame at its native size. Storage is up to the caller.
    pub fn capture<D: CaptureDevice>(
        &self,
        camera: &mut Camera<D>,
        handle: CameraHandle,
    ) -> Result<CapturedImage, CaptureError> {
        let _s = span!("snapshot");

        let frame = camera.next_frame(handle)?;
        if !frame.has_dimensions() {
            return Err(CaptureError::NotReady(
                "Camera frame has no dimensions yet".to_string(),
            ));
        }

        let jpeg = encode_jpeg(&frame.rgb, frame.width, frame.height, self.quality)?;

        tracing::debug!(
            sequence = frame.sequence,
            width = frame.width,
            height = frame.height,
            bytes = jpeg.len(),
            "Snapshot encoded"
        );

        Ok(CapturedImage::new(jpeg, frame.width, frame.height))
    }
}

impl Default for SnapshotExtractor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_JPEG_QUALITY)
    }
}

/// Compress packed RGB to a baseline JPEG with 4:2:0 chroma subsampling.
pub fn encode_jpeg(rgb: &[u8], width: u32, height: u32, quality: i32) -> Result<Vec<u8>, CaptureError> {
    let (width, height) = (width as usize, height as usize);
    let expected = width * height * 3;
    if rgb.len() < expected {
        return Err(CaptureError::Encode(format!(
            "expected {} bytes of RGB, got {}",
            expected,
            rgb.len()
        )));
    }

    let image = turbojpeg::Image {
        pixels: &rgb[..expected],
        width,
        pitch: width * 3,
        height,
        format: turbojpeg::PixelFormat::RGB,
    };

    turbojpeg::compress(image, quality, turbojpeg::Subsamp::Sub2x2)
        .map(|buf| buf.to_vec())
        .map_err(|e| CaptureError::Encode(e.to_string()))
}
