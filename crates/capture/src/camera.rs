use crate::device::{CaptureDevice, Frame, StreamConstraints, StreamInfo};
use crate::error::CaptureError;

/// Opaque token for one acquisition of the camera. Invalid once the stream is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraHandle(u64);

struct Active {
    handle: CameraHandle,
    info: StreamInfo,
}

/// Owns a capture device and at most one live stream on it.
///
/// The stream is released on [`Camera::stop`] and when the camera is dropped.
pub struct Camera<D: CaptureDevice> {
    device: D,
    constraints: StreamConstraints,
    active: Option<Active>,
    preview: Option<Frame>,
    next_handle: u64,
}

impl<D: CaptureDevice> Camera<D> {
    pub fn new(device: D, constraints: StreamConstraints) -> Self {
        Self {
            device,
            constraints,
            active: None,
            preview: None,
            next_handle: 1,
        }
    }

    /// Acquire the stream. Calling again while started returns the live handle
    /// without touching the device.
    pub fn start(&mut self) -> Result<CameraHandle, CaptureError> {
        if let Some(active) = &self.active {
            tracing::debug!(handle = ?active.handle, "Camera already started");
            return Ok(active.handle);
        }

        let info = self.device.open_stream(&self.constraints).inspect_err(|e| {
            tracing::warn!(error = %e, "Camera acquisition failed");
        })?;

        let handle = CameraHandle(self.next_handle);
        self.next_handle += 1;

        tracing::info!(
            handle = ?handle,
            width = info.width,
            height = info.height,
            label = %info.label,
            "Camera started"
        );

        self.active = Some(Active { handle, info });
        Ok(handle)
    }

    /// Release the stream and clear the preview. Returns the handle that was
    /// invalidated, or `None` when the camera was not started.
    pub fn stop(&mut self) -> Option<CameraHandle> {
        let active = self.active.take()?;
        self.device.close_stream();
        self.preview = None;
        tracing::info!(handle = ?active.handle, "Camera stopped");
        Some(active.handle)
    }

    pub fn handle(&self) -> Option<CameraHandle> {
        self.active.as_ref().map(|a| a.handle)
    }

    pub fn is_active(&self, handle: CameraHandle) -> bool {
        self.handle() == Some(handle)
    }

    pub fn stream_info(&self) -> Option<&StreamInfo> {
        self.active.as_ref().map(|a| &a.info)
    }

    /// Pull the next frame from the live stream; it also becomes the latest frame.
    pub fn next_frame(&mut self, handle: CameraHandle) -> Result<&Frame, CaptureError> {
        if !self.is_active(handle) {
            return Err(CaptureError::not_started());
        }
        let frame = self.device.read_frame()?;
        Ok(self.preview.insert(frame))
    }

    /// Live preview: a fresh frame from the active stream.
    pub fn preview(&mut self) -> Result<&Frame, CaptureError> {
        let handle = self.handle().ok_or_else(CaptureError::not_started)?;
        self.next_frame(handle)
    }

    /// Most recent frame seen on the live stream, without reading a new one.
    pub fn latest_frame(&self) -> Option<&Frame> {
        self.preview.as_ref()
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: CaptureDevice> Drop for Camera<D> {
    fn drop(&mut self) {
        if self.stop().is_some() {
            tracing::debug!("Camera released on teardown");
        }
    }
}
