use crate::error::RegistrationError;

pub const STUDENT_EMAIL_SUFFIX: &str = "@stu.covenantuniversity.edu.ng";

/// Exact, case-sensitive suffix match.
pub fn is_student_email(email: &str, suffix: &str) -> bool {
    email.ends_with(suffix)
}

/// Checks run before a registration leaves the form. Email first, then photos.
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    email_suffix: String,
    required_captures: usize,
}

impl SubmissionGate {
    pub fn new(email_suffix: impl Into<String>, required_captures: usize) -> Self {
        Self {
            email_suffix: email_suffix.into(),
            required_captures,
        }
    }

    pub fn check(&self, email: &str, captured: usize) -> Result<(), RegistrationError> {
        if !is_student_email(email, &self.email_suffix) {
            return Err(RegistrationError::InvalidEmail);
        }
        if captured < self.required_captures {
            return Err(RegistrationError::InsufficientCaptures {
                required: self.required_captures,
                captured,
            });
        }
        Ok(())
    }
}

impl Default for SubmissionGate {
    fn default() -> Self {
        Self::new(STUDENT_EMAIL_SUFFIX, 3)
    }
}
