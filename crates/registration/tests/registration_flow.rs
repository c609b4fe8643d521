use capture::{CaptureError, CapturedImage, SyntheticDevice};
use registration::{
    Gender, Hall, Level, RegistrationConfig, RegistrationError, RegistrationForm, Registrar,
    StatusKind, StudentData,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Records every submission and answers with a fixed outcome.
#[derive(Clone, Default)]
struct RecordingRegistrar {
    fail_with: Option<&'static str>,
    calls: Rc<Cell<usize>>,
    last: Rc<RefCell<Option<(StudentData, usize)>>>,
}

impl RecordingRegistrar {
    fn failing(reason: &'static str) -> Self {
        Self {
            fail_with: Some(reason),
            ..Self::default()
        }
    }
}

impl Registrar for RecordingRegistrar {
    async fn submit(&self, student: &StudentData, images: &[CapturedImage]) -> anyhow::Result<()> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.calls.set(self.calls.get() + 1);
        *self.last.borrow_mut() = Some((student.clone(), images.len()));
        match self.fail_with {
            Some(reason) => anyhow::bail!(reason),
            None => Ok(()),
        }
    }
}

fn student(email: &str) -> StudentData {
    StudentData {
        name: "Ada Obi".to_string(),
        email: email.into(),
        program: "Computer Science".to_string(),
        matric_number: "21CG012345".to_string(),
        reg_number: "2100123".to_string(),
        room_number: "B204".to_string(),
        gender: Some(Gender::Female),
        hall_of_residence: Some(Hall::Esther),
        level: Some(Level::L300),
    }
}

fn form(
    device: SyntheticDevice,
    registrar: RecordingRegistrar,
) -> RegistrationForm<SyntheticDevice, RecordingRegistrar> {
    let config = RegistrationConfig::default();
    RegistrationForm::new(&config, device, registrar)
}

fn shown(form: &RegistrationForm<SyntheticDevice, RecordingRegistrar>) -> (StatusKind, String) {
    let status = form.notifier().visible().expect("a visible status");
    (status.kind, status.text)
}

#[tokio::test(start_paused = true)]
async fn capture_three_then_submit_resets_form() {
    let registrar = RecordingRegistrar::default();
    let mut form = form(SyntheticDevice::new(), registrar.clone());
    *form.student_mut() = student("ada.obi@stu.covenantuniversity.edu.ng");

    form.start_camera().unwrap();
    assert_eq!(
        shown(&form),
        (StatusKind::Success, "Camera started successfully".to_string())
    );

    for n in 1..=2 {
        form.capture_photo().unwrap();
        assert!(!form.can_submit());
        assert_eq!(
            shown(&form),
            (StatusKind::Info, format!("Photo captured! {}/3 photos taken", n))
        );
    }

    let progress = form.capture_photo().unwrap();
    assert!(progress.is_complete());
    assert!(form.can_submit());
    assert_eq!(
        shown(&form),
        (
            StatusKind::Success,
            "All required photos captured (3/3)".to_string()
        )
    );

    form.submit().await.unwrap();

    assert_eq!(registrar.calls.get(), 1);
    let (sent, images) = registrar.last.borrow().clone().unwrap();
    assert_eq!(sent.email, "ada.obi@stu.covenantuniversity.edu.ng");
    assert_eq!(images, 3);

    assert!(form.student().is_blank());
    assert!(form.session().is_empty());
    assert_eq!(
        shown(&form),
        (
            StatusKind::Success,
            "Registration completed successfully!".to_string()
        )
    );
}

#[tokio::test(start_paused = true)]
async fn non_student_email_is_rejected_and_form_untouched() {
    let registrar = RecordingRegistrar::default();
    let mut form = form(SyntheticDevice::new(), registrar.clone());
    *form.student_mut() = student("student@gmail.com");

    form.start_camera().unwrap();
    for _ in 0..3 {
        form.capture_photo().unwrap();
    }

    let err = form.submit().await.unwrap_err();
    assert_eq!(err, RegistrationError::InvalidEmail);
    assert_eq!(
        shown(&form),
        (
            StatusKind::Error,
            "Please use a valid Covenant University student email".to_string()
        )
    );

    assert_eq!(registrar.calls.get(), 0);
    assert_eq!(form.session().len(), 3);
    assert_eq!(form.student(), &student("student@gmail.com"));
}

#[tokio::test(start_paused = true)]
async fn two_photos_is_not_enough() {
    let registrar = RecordingRegistrar::default();
    let mut form = form(SyntheticDevice::new(), registrar.clone());
    *form.student_mut() = student("a@stu.covenantuniversity.edu.ng");

    form.start_camera().unwrap();
    form.capture_photo().unwrap();
    form.capture_photo().unwrap();

    let err = form.submit().await.unwrap_err();
    assert_eq!(
        err,
        RegistrationError::InsufficientCaptures {
            required: 3,
            captured: 2
        }
    );
    assert_eq!(
        shown(&form),
        (
            StatusKind::Error,
            "Please capture 3 photos before submitting".to_string()
        )
    );
    assert_eq!(registrar.calls.get(), 0);
    assert_eq!(form.session().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn backend_failure_keeps_everything_for_retry() {
    let registrar = RecordingRegistrar::failing("backend unreachable");
    let mut form = form(SyntheticDevice::new(), registrar.clone());
    *form.student_mut() = student("a@stu.covenantuniversity.edu.ng");

    form.start_camera().unwrap();
    for _ in 0..3 {
        form.capture_photo().unwrap();
    }

    let err = form.submit().await.unwrap_err();
    assert_eq!(
        err,
        RegistrationError::SubmissionFailed("backend unreachable".to_string())
    );
    assert_eq!(
        shown(&form),
        (
            StatusKind::Error,
            "Registration error: backend unreachable".to_string()
        )
    );
    assert_eq!(form.session().len(), 3);
    assert!(!form.student().is_blank());
}

#[tokio::test(start_paused = true)]
async fn denied_camera_reports_and_produces_no_handle() {
    let mut form = form(
        SyntheticDevice::denied("Permission denied"),
        RecordingRegistrar::default(),
    );

    let err = form.start_camera().unwrap_err();
    assert_eq!(
        err,
        RegistrationError::Capture(CaptureError::DeviceUnavailable(
            "Permission denied".to_string()
        ))
    );
    assert_eq!(
        shown(&form),
        (
            StatusKind::Error,
            "Error starting camera: Permission denied".to_string()
        )
    );
    assert_eq!(form.camera().handle(), None);
}

#[tokio::test(start_paused = true)]
async fn capture_before_start_is_not_ready() {
    let mut form = form(SyntheticDevice::new(), RecordingRegistrar::default());

    let err = form.capture_photo().unwrap_err();
    assert_eq!(err, RegistrationError::Capture(CaptureError::not_started()));
    assert_eq!(
        shown(&form),
        (StatusKind::Error, "Camera is not started".to_string())
    );
    assert!(form.session().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stop_without_start_is_silent() {
    let mut form = form(SyntheticDevice::new(), RecordingRegistrar::default());

    assert!(!form.stop_camera());
    assert!(form.notifier().current().is_none());
}

#[tokio::test(start_paused = true)]
async fn start_is_idempotent_and_stop_releases() {
    let mut form = form(SyntheticDevice::new(), RecordingRegistrar::default());

    let first = form.start_camera().unwrap();
    let second = form.start_camera().unwrap();
    assert_eq!(first, second);
    assert_eq!(form.camera().device().acquisitions(), 1);

    assert!(form.stop_camera());
    assert_eq!(shown(&form), (StatusKind::Info, "Camera stopped".to_string()));
    assert!(!form.camera().device().is_streaming());
    assert!(form.capture_photo().is_err());
}

#[tokio::test(start_paused = true)]
async fn clear_discards_all_photos() {
    let mut form = form(SyntheticDevice::new(), RecordingRegistrar::default());
    form.start_camera().unwrap();
    for _ in 0..4 {
        form.capture_photo().unwrap();
    }
    assert_eq!(form.session().len(), 4);

    form.clear_captures();
    assert!(form.session().is_empty());
    assert!(!form.can_submit());
}

#[tokio::test(start_paused = true)]
async fn status_disappears_after_five_seconds() {
    let mut form = form(SyntheticDevice::new(), RecordingRegistrar::default());
    form.start_camera().unwrap();

    tokio::time::sleep(Duration::from_secs(4)).await;
    form.capture_photo().unwrap();

    // The start message's timer fires at 5s and must leave the capture message alone.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(
        shown(&form),
        (StatusKind::Info, "Photo captured! 1/3 photos taken".to_string())
    );

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(form.notifier().visible().is_none());
}

#[tokio::test(start_paused = true)]
async fn preview_follows_camera_lifecycle() {
    let mut form = form(
        SyntheticDevice::new().with_native_resolution(320, 240),
        RecordingRegistrar::default(),
    );

    assert_eq!(
        form.preview().unwrap_err(),
        RegistrationError::Capture(CaptureError::not_started())
    );

    form.start_camera().unwrap();
    let frame = form.preview().unwrap();
    assert_eq!((frame.width, frame.height), (320, 240));
    assert_eq!(frame.rgb.len(), 320 * 240 * 3);

    form.stop_camera();
    assert_eq!(
        form.preview().unwrap_err(),
        RegistrationError::Capture(CaptureError::not_started())
    );
    assert!(form.camera().latest_frame().is_none());
}

#[tokio::test(start_paused = true)]
async fn configured_quota_drives_status_and_gate() {
    let config = RegistrationConfig {
        required_captures: 5,
        ..RegistrationConfig::default()
    };
    let registrar = RecordingRegistrar::default();
    let mut form = RegistrationForm::new(&config, SyntheticDevice::new(), registrar.clone());
    *form.student_mut() = student("ada.obi@stu.covenantuniversity.edu.ng");

    form.start_camera().unwrap();
    for _ in 0..4 {
        form.capture_photo().unwrap();
    }
    assert_eq!(
        shown(&form),
        (StatusKind::Info, "Photo captured! 4/5 photos taken".to_string())
    );
    assert!(!form.can_submit());

    let err = form.submit().await.unwrap_err();
    assert_eq!(
        err,
        RegistrationError::InsufficientCaptures {
            required: 5,
            captured: 4
        }
    );
    assert_eq!(
        shown(&form),
        (
            StatusKind::Error,
            "Please capture 5 photos before submitting".to_string()
        )
    );
    assert_eq!(registrar.calls.get(), 0);

    form.capture_photo().unwrap();
    assert!(form.can_submit());
    assert_eq!(
        shown(&form),
        (
            StatusKind::Success,
            "All required photos captured (5/5)".to_string()
        )
    );

    form.submit().await.unwrap();
    let (_, images) = registrar.last.borrow().clone().unwrap();
    assert_eq!(images, 5);
}
