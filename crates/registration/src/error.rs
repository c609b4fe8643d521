use capture::CaptureError;
use thiserror::Error;

/// Everything the form can reject. The display text is what the student sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Please use a valid Covenant University student email")]
    InvalidEmail,

    #[error("Please capture {required} photos before submitting")]
    InsufficientCaptures { required: usize, captured: usize },

    #[error("Registration error: {0}")]
    SubmissionFailed(String),

    #[error("Invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

impl RegistrationError {
    pub fn invalid_field(field: &'static str, value: &str) -> Self {
        RegistrationError::InvalidField {
            field,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formatting() {
        assert_eq!(
            RegistrationError::InvalidEmail.to_string(),
            "Please use a valid Covenant University student email"
        );
        assert_eq!(
            RegistrationError::InsufficientCaptures {
                required: 3,
                captured: 2
            }
            .to_string(),
            "Please capture 3 photos before submitting"
        );
        assert_eq!(
            RegistrationError::SubmissionFailed("503 Service Unavailable".into()).to_string(),
            "Registration error: 503 Service Unavailable"
        );
        assert_eq!(
            RegistrationError::invalid_field("level", "600").to_string(),
            "Invalid level: \"600\""
        );
    }

    #[test]
    fn capture_errors_pass_through_unchanged() {
        let err: RegistrationError = CaptureError::not_started().into();
        assert_eq!(err.to_string(), "Camera is not started");
    }
}
