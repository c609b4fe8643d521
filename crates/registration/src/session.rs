use crate::notifier::StatusKind;
use capture::CapturedImage;

/// Where a session stands against its quota after an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureProgress {
    pub count: usize,
    pub required: usize,
}

impl CaptureProgress {
    pub fn is_complete(&self) -> bool {
        self.count >= self.required
    }

    pub fn kind(&self) -> StatusKind {
        if self.is_complete() {
            StatusKind::Success
        } else {
            StatusKind::Info
        }
    }

    pub fn message(&self) -> String {
        if self.is_complete() {
            format!(
                "All required photos captured ({}/{})",
                self.count, self.required
            )
        } else {
            format!(
                "Photo captured! {}/{} photos taken",
                self.count, self.required
            )
        }
    }
}

/// Ordered, append-only set of photos for one registration. Only [`clear`]
/// removes images, and it removes all of them.
///
/// [`clear`]: CaptureSession::clear
#[derive(Debug, Clone)]
pub struct CaptureSession {
    images: Vec<CapturedImage>,
    required: usize,
}

impl CaptureSession {
    pub fn new(required: usize) -> Self {
        Self {
            images: Vec::with_capacity(required),
            required,
        }
    }

    /// Appending past the quota is allowed and keeps reporting completion.
    pub fn add_image(&mut self, image: CapturedImage) -> CaptureProgress {
        self.images.push(image);
        let progress = self.progress();
        tracing::debug!(
            count = progress.count,
            required = progress.required,
            "Photo added to session"
        );
        progress
    }

    pub fn clear(&mut self) {
        if !self.images.is_empty() {
            tracing::debug!(discarded = self.images.len(), "Capture session cleared");
        }
        self.images.clear();
    }

    pub fn is_complete(&self) -> bool {
        self.images.len() >= self.required
    }

    pub fn progress(&self) -> CaptureProgress {
        CaptureProgress {
            count: self.images.len(),
            required: self.required,
        }
    }

    pub fn images(&self) -> &[CapturedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn required(&self) -> usize {
        self.required
    }
}
