pub mod config;
pub mod error;
pub mod form;
pub mod notifier;
pub mod registrar;
pub mod session;
pub mod student;
pub mod validation;

pub use crate::config::{RegistrationConfig, get_configuration};
pub use error::RegistrationError;
pub use form::RegistrationForm;
pub use notifier::{StatusKind, StatusMessage, StatusNotifier};
pub use registrar::{MockRegistrar, Registrar};
pub use session::{CaptureProgress, CaptureSession};
pub use student::{Gender, Hall, Level, StudentData};
pub use validation::{STUDENT_EMAIL_SUFFIX, SubmissionGate, is_student_email};
