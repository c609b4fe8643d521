use crate::error::CaptureError;
use common::span_debug;

/// RGB pixels produced by a decoder, borrowed from its internal buffer.
pub struct Decoded<'a> {
    pub rgb: &'a [u8],
    pub width: u32,
    pub height: u32,
}

/// Trait for decoding raw camera buffers to packed RGB (3 bytes per pixel).
pub trait FrameDecoder: Send {
    fn decode(&mut self, raw: &[u8], width: u32, height: u32) -> Result<Decoded<'_>, CaptureError>;
}

/// YUYV (YUV 4:2:2) decoder.
///
/// YUYV packs 2 pixels in 4 bytes: [Y0, U, Y1, V]
#[derive(Default)]
pub struct YuyvDecoder {
    rgb_buffer: Vec<u8>,
}

impl YuyvDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameDecoder for YuyvDecoder {
    fn decode(&mut self, raw: &[u8], width: u32, height: u32) -> Result<Decoded<'_>, CaptureError> {
        let _s = span_debug!("decode_yuyv");

        if height == 0 || width == 0 {
            return Err(CaptureError::Decode("zero-sized frame".to_string()));
        }

        let bytes_per_row = (width * 2) as usize;
        let stride = raw.len() / height as usize;
        if stride < bytes_per_row {
            return Err(CaptureError::Decode(format!(
                "buffer of {} bytes is too short for {}x{} YUYV",
                raw.len(),
                width,
                height
            )));
        }

        let rgb_size = (width * height) as usize * 3;
        self.rgb_buffer.resize(rgb_size, 0);

        let mut out_idx = 0;
        for row in 0..height as usize {
            let row_start = row * stride;
            let row_data = &raw[row_start..row_start + bytes_per_row];

            for chunk in row_data.chunks_exact(4) {
                let y0 = chunk[0] as i32;
                let u = chunk[1] as i32 - 128;
                let y1 = chunk[2] as i32;
                let v = chunk[3] as i32 - 128;

                // BT.601 fixed-point coefficients (8-bit fraction)
                let rv = (359 * v) >> 8;
                let gu = (88 * u + 183 * v) >> 8;
                let bu = (454 * u) >> 8;

                for y in [y0, y1] {
                    self.rgb_buffer[out_idx] = (y + rv).clamp(0, 255) as u8;
                    self.rgb_buffer[out_idx + 1] = (y - gu).clamp(0, 255) as u8;
                    self.rgb_buffer[out_idx + 2] = (y + bu).clamp(0, 255) as u8;
                    out_idx += 3;
                }
            }
        }

        Ok(Decoded {
            rgb: &self.rgb_buffer[..rgb_size],
            width,
            height,
        })
    }
}

/// MJPEG decoder using turbojpeg (libjpeg-turbo). Frame size comes from the
/// JPEG header, not from the negotiated format.
pub struct MjpegDecoder {
    decompressor: turbojpeg::Decompressor,
    rgb_buffer: Vec<u8>,
}

impl MjpegDecoder {
    pub fn new() -> Result<Self, CaptureError> {
        let decompressor =
            turbojpeg::Decompressor::new().map_err(|e| CaptureError::Decode(e.to_string()))?;
        Ok(Self {
            decompressor,
            rgb_buffer: Vec::new(),
        })
    }
}

impl FrameDecoder for MjpegDecoder {
    fn decode(&mut self, raw: &[u8], _width: u32, _height: u32) -> Result<Decoded<'_>, CaptureError> {
        let _s = span_debug!("decode_mjpeg");

        let header = self
            .decompressor
            .read_header(raw)
            .map_err(|e| CaptureError::Decode(e.to_string()))?;
        let width = header.width;
        let height = header.height;
        let rgb_size = width * height * 3;

        self.rgb_buffer.resize(rgb_size, 0);

        let output = turbojpeg::Image {
            pixels: &mut self.rgb_buffer[..rgb_size],
            width,
            pitch: width * 3,
            height,
            format: turbojpeg::PixelFormat::RGB,
        };

        self.decompressor
            .decompress(raw, output)
            .map_err(|e| CaptureError::Decode(e.to_string()))?;

        Ok(Decoded {
            rgb: &self.rgb_buffer[..rgb_size],
            width: width as u32,
            height: height as u32,
        })
    }
}
