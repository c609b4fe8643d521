use crate::decoder::{FrameDecoder, MjpegDecoder, YuyvDecoder};
use crate::device::{CaptureDevice, FacingMode, Frame, StreamConstraints, StreamInfo};
use crate::error::CaptureError;
use v4l::{
    Device, FourCC,
    buffer::Type,
    io::{mmap::Stream, traits::CaptureStream},
    video::Capture,
};

const BUFFER_COUNT: u32 = 4;

const FOURCC_YUYV: FourCC = FourCC { repr: *b"YUYV" };
const FOURCC_MJPG: FourCC = FourCC { repr: *b"MJPG" };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Yuyv,
    Mjpeg,
}

impl PixelFormat {
    fn fourcc(self) -> FourCC {
        match self {
            PixelFormat::Yuyv => FOURCC_YUYV,
            PixelFormat::Mjpeg => FOURCC_MJPG,
        }
    }

    fn decoder(self) -> Result<Box<dyn FrameDecoder>, CaptureError> {
        Ok(match self {
            PixelFormat::Yuyv => Box::new(YuyvDecoder::new()),
            PixelFormat::Mjpeg => Box::new(MjpegDecoder::new()?),
        })
    }
}

fn unavailable(e: impl std::fmt::Display) -> CaptureError {
    CaptureError::DeviceUnavailable(e.to_string())
}

fn find_usable_camera() -> Option<usize> {
    v4l::context::enum_devices()
        .into_iter()
        .find(|dev| {
            Device::with_path(dev.path())
                .and_then(|d| d.query_caps())
                .map(|caps| {
                    caps.capabilities
                        .contains(v4l::capability::Flags::VIDEO_CAPTURE)
                })
                .unwrap_or(false)
        })
        .map(|dev| dev.index())
}

/// Opens the configured index, or the first capture-capable node if that one is
/// busy or missing. A single attempt: failures go straight back to the caller.
fn open_device(index: u32) -> Result<Device, CaptureError> {
    if let Ok(dev) = Device::new(index as usize)
        && dev.query_caps().is_ok()
    {
        return Ok(dev);
    }

    tracing::debug!(
        "Camera index {} busy or missing, scanning alternatives...",
        index
    );

    let fallback = find_usable_camera()
        .ok_or_else(|| unavailable("Requested device not found"))?;
    Device::new(fallback).map_err(unavailable)
}

/// Prefer YUYV (cheaper decode), fall back to MJPEG.
fn select_format(device: &Device) -> Result<PixelFormat, CaptureError> {
    let formats = device.enum_formats().map_err(unavailable)?;

    tracing::debug!("Available formats:");
    for fmt in &formats {
        tracing::debug!("  {:?}: {}", fmt.fourcc, fmt.description);
    }

    if formats.iter().any(|f| f.fourcc == FOURCC_YUYV) {
        return Ok(PixelFormat::Yuyv);
    }
    if formats.iter().any(|f| f.fourcc == FOURCC_MJPG) {
        return Ok(PixelFormat::Mjpeg);
    }

    Err(unavailable(format!(
        "Camera supports neither YUYV nor MJPEG - available: {:?}",
        formats.iter().map(|f| f.fourcc).collect::<Vec<_>>()
    )))
}

/// The mmap stream holds its own reference to the device handle, so the fd
/// stays open for as long as the stream does.
struct ActiveStream {
    stream: Stream<'static>,
    decoder: Box<dyn FrameDecoder>,
    width: u32,
    height: u32,
}

/// Linux webcam backed by V4L2 memory-mapped streaming.
pub struct V4lDevice {
    index: u32,
    active: Option<ActiveStream>,
}

impl V4lDevice {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            active: None,
        }
    }
}

impl CaptureDevice for V4lDevice {
    fn open_stream(&mut self, constraints: &StreamConstraints) -> Result<StreamInfo, CaptureError> {
        let _s = common::span!("v4l_open_stream");

        if constraints.facing != FacingMode::User {
            tracing::debug!(facing = ?constraints.facing, "V4L2 has no facing hint, ignoring");
        }

        let device = open_device(self.index)?;
        let caps = device.query_caps().map_err(unavailable)?;
        tracing::info!("Camera opened: {} ({})", caps.card, caps.driver);

        let pixel_format = select_format(&device)?;

        let mut format = device.format().map_err(unavailable)?;
        format.width = constraints.width;
        format.height = constraints.height;
        format.fourcc = pixel_format.fourcc();
        let format = device.set_format(&format).map_err(unavailable)?;

        if format.width != constraints.width || format.height != constraints.height {
            tracing::warn!(
                "Requested {}x{}, driver granted {}x{}",
                constraints.width,
                constraints.height,
                format.width,
                format.height
            );
        }
        tracing::info!(
            "Capture format: {}x{} {:?} ({:?})",
            format.width,
            format.height,
            format.fourcc,
            pixel_format
        );

        let stream = Stream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT)
            .map_err(unavailable)?;

        self.active = Some(ActiveStream {
            stream,
            decoder: pixel_format.decoder()?,
            width: format.width,
            height: format.height,
        });

        Ok(StreamInfo {
            width: format.width,
            height: format.height,
            label: caps.card,
        })
    }

    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        let ActiveStream {
            stream,
            decoder,
            width,
            height,
        } = self.active.as_mut().ok_or_else(CaptureError::not_started)?;

        let (buf, meta) = stream
            .next()
            .map_err(|e| CaptureError::Decode(format!("dequeue failed: {}", e)))?;
        let sequence = meta.sequence as u64;

        let decoded = decoder.decode(buf, *width, *height)?;
        Ok(Frame {
            width: decoded.width,
            height: decoded.height,
            sequence,
            rgb: decoded.rgb.to_vec(),
        })
    }

    fn close_stream(&mut self) {
        if self.active.take().is_some() {
            tracing::info!("Camera /dev/video{} released", self.index);
        }
    }

    fn is_streaming(&self) -> bool {
        self.active.is_some()
    }
}
