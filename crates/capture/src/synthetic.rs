use crate::device::{CaptureDevice, Frame, StreamConstraints, StreamInfo};
use crate::error::CaptureError;

const MARKER_SIZE: u32 = 32;

/// Camera stand-in that renders a gradient with a marker block that moves on
/// every frame, so successive snapshots differ. Used by tests and `--synthetic`.
#[derive(Debug, Default)]
pub struct SyntheticDevice {
    denial: Option<String>,
    native: Option<(u32, u32)>,
    still: bool,
    stream: Option<(u32, u32)>,
    sequence: u64,
    acquisitions: u32,
}

impl SyntheticDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `open_stream` fails as if permission were refused.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            denial: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Ignore the requested size and stream at this resolution instead.
    pub fn with_native_resolution(mut self, width: u32, height: u32) -> Self {
        self.native = Some((width, height));
        self
    }

    /// Keep the marker in place so every frame is identical.
    pub fn still(mut self) -> Self {
        self.still = true;
        self
    }

    /// How many times a stream has actually been opened.
    pub fn acquisitions(&self) -> u32 {
        self.acquisitions
    }

    fn render(&self, width: u32, height: u32) -> Vec<u8> {
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let step = if self.still { 0 } else { self.sequence as u32 };
        let marker_x = (step * MARKER_SIZE) % width.max(1);
        let marker_y = (step * MARKER_SIZE / width.max(1) * MARKER_SIZE) % height.max(1);

        for y in 0..height {
            for x in 0..width {
                let in_marker = x >= marker_x
                    && x < marker_x + MARKER_SIZE
                    && y >= marker_y
                    && y < marker_y + MARKER_SIZE;
                if in_marker {
                    rgb.extend_from_slice(&[255, 255, 255]);
                } else {
                    rgb.push(((x * 255) / width) as u8);
                    rgb.push(((y * 255) / height) as u8);
                    rgb.push((((x + y) * 127) / (width + height)) as u8);
                }
            }
        }
        rgb
    }
}

impl CaptureDevice for SyntheticDevice {
    fn open_stream(&mut self, constraints: &StreamConstraints) -> Result<StreamInfo, CaptureError> {
        if let Some(reason) = &self.denial {
            return Err(CaptureError::DeviceUnavailable(reason.clone()));
        }

        let (width, height) = self
            .native
            .unwrap_or((constraints.width, constraints.height));
        self.stream = Some((width, height));
        self.acquisitions += 1;

        Ok(StreamInfo {
            width,
            height,
            label: "synthetic".to_string(),
        })
    }

    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        let (width, height) = self.stream.ok_or_else(CaptureError::not_started)?;
        let rgb = self.render(width, height);
        let frame = Frame {
            width,
            height,
            sequence: self.sequence,
            rgb,
        };
        self.sequence += 1;
        Ok(frame)
    }

    fn close_stream(&mut self) {
        self.stream = None;
    }

    fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }
}
