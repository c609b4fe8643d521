use crate::config::RegistrationConfig;
use crate::error::RegistrationError;
use crate::notifier::StatusNotifier;
use crate::registrar::Registrar;
use crate::session::{CaptureProgress, CaptureSession};
use crate::student::StudentData;
use crate::validation::SubmissionGate;
use capture::{Camera, CameraHandle, CaptureDevice, CaptureError, Frame, SnapshotExtractor};

/// One student's registration: their details, the camera, the photos taken so far
/// and the status line. Every failure is reported on the status line and leaves
/// the form as it was.
pub struct RegistrationForm<D: CaptureDevice, R: Registrar> {
    student: StudentData,
    camera: Camera<D>,
    extractor: SnapshotExtractor,
    session: CaptureSession,
    gate: SubmissionGate,
    notifier: StatusNotifier,
    registrar: R,
}

impl<D: CaptureDevice, R: Registrar> RegistrationForm<D, R> {
    pub fn new(config: &RegistrationConfig, device: D, registrar: R) -> Self {
        Self {
            student: StudentData::default(),
            camera: Camera::new(device, config.camera.constraints()),
            extractor: SnapshotExtractor::new(config.camera.jpeg_quality),
            session: CaptureSession::new(config.required_captures),
            gate: SubmissionGate::new(config.email_suffix.clone(), config.required_captures),
            notifier: StatusNotifier::new(config.status_ttl()),
            registrar,
        }
    }

    pub fn student(&self) -> &StudentData {
        &self.student
    }

    pub fn student_mut(&mut self) -> &mut StudentData {
        &mut self.student
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn notifier(&self) -> &StatusNotifier {
        &self.notifier
    }

    pub fn camera(&self) -> &Camera<D> {
        &self.camera
    }

    pub fn start_camera(&mut self) -> Result<CameraHandle, RegistrationError> {
        if let Some(handle) = self.camera.handle() {
            return Ok(handle);
        }

        match self.camera.start() {
            Ok(handle) => {
                self.notifier.success("Camera started successfully");
                Ok(handle)
            }
            Err(e) => {
                let reason = match &e {
                    CaptureError::DeviceUnavailable(reason) => reason.clone(),
                    other => other.to_string(),
                };
                self.notifier
                    .error(format!("Error starting camera: {}", reason));
                Err(e.into())
            }
        }
    }

    /// Returns whether a stream was actually released.
    pub fn stop_camera(&mut self) -> bool {
        let stopped = self.camera.stop().is_some();
        if stopped {
            self.notifier.info("Camera stopped");
        }
        stopped
    }

    /// Live preview frame. Polled continuously, so failures are not put on the
    /// status line.
    pub fn preview(&mut self) -> Result<&Frame, RegistrationError> {
        Ok(self.camera.preview()?)
    }

    pub fn capture_photo(&mut self) -> Result<CaptureProgress, RegistrationError> {
        let result = self
            .camera
            .handle()
            .ok_or_else(CaptureError::not_started)
            .and_then(|handle| self.extractor.capture(&mut self.camera, handle));

        match result {
            Ok(image) => {
                let progress = self.session.add_image(image);
                self.notifier.show(progress.message(), progress.kind());
                Ok(progress)
            }
            Err(e) => {
                self.notifier.error(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn clear_captures(&mut self) {
        self.session.clear();
    }

    /// Submission stays disabled until the quota is met.
    pub fn can_submit(&self) -> bool {
        self.session.is_complete()
    }

    pub async fn submit(&mut self) -> Result<(), RegistrationError> {
        if let Err(e) = self.gate.check(&self.student.email, self.session.len()) {
            self.notifier.error(e.to_string());
            return Err(e);
        }

        self.notifier.info("Registering student information...");

        match self
            .registrar
            .submit(&self.student, self.session.images())
            .await
        {
            Ok(()) => {
                tracing::info!(
                    images = self.session.len(),
                    "Registration accepted"
                );
                self.notifier.success("Registration completed successfully!");
                self.student = StudentData::default();
                self.session.clear();
                Ok(())
            }
            Err(e) => {
                let err = RegistrationError::SubmissionFailed(format!("{:#}", e));
                self.notifier.error(err.to_string());
                Err(err)
            }
        }
    }
}
