use crate::validation::STUDENT_EMAIL_SUFFIX;
use capture::CameraConfig;
use common::Environment;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    pub environment: Environment,
    /// Photos needed before a registration may be submitted.
    pub required_captures: usize,
    pub status_ttl_ms: u64,
    pub email_suffix: String,
    pub submission_delay_ms: u64,
    pub otel_endpoint: Option<String>,
    #[serde(default)]
    pub camera: CameraConfig,
}

impl RegistrationConfig {
    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }

    fn validate(self) -> Result<Self, config::ConfigError> {
        if self.required_captures == 0 {
            return Err(config::ConfigError::Message(
                "required_captures must be at least 1".to_string(),
            ));
        }
        if !(1..=100).contains(&self.camera.jpeg_quality) {
            return Err(config::ConfigError::Message(format!(
                "camera.jpeg_quality must be within 1..=100, got {}",
                self.camera.jpeg_quality
            )));
        }
        Ok(self)
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            required_captures: 3,
            status_ttl_ms: 5_000,
            email_suffix: STUDENT_EMAIL_SUFFIX.to_string(),
            submission_delay_ms: 2_000,
            otel_endpoint: None,
            camera: CameraConfig::default(),
        }
    }
}

/// Defaults overlaid with `REGISTRATION_*` variables; nested keys use `__`,
/// e.g. `REGISTRATION_CAMERA__DEVICE_ID=2`.
pub fn get_configuration() -> Result<RegistrationConfig, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("environment", "development")?
        .set_default("required_captures", 3_i64)?
        .set_default("status_ttl_ms", 5_000_i64)?
        .set_default("email_suffix", STUDENT_EMAIL_SUFFIX)?
        .set_default("submission_delay_ms", 2_000_i64)?
        .add_source(
            config::Environment::with_prefix("REGISTRATION")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize::<RegistrationConfig>()?.validate()
}
