use crate::student::StudentData;
use capture::CapturedImage;
use std::future::Future;
use std::time::Duration;

/// The backend that accepts a finished registration.
pub trait Registrar {
    fn submit(
        &self,
        student: &StudentData,
        images: &[CapturedImage],
    ) -> impl Future<Output = anyhow::Result<()>>;
}

/// Stand-in backend: waits, logs what it would have sent, and accepts.
#[derive(Debug, Clone)]
pub struct MockRegistrar {
    delay: Duration,
}

impl MockRegistrar {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockRegistrar {
    fn default() -> Self {
        Self::new(Duration::from_millis(2_000))
    }
}

impl Registrar for MockRegistrar {
    async fn submit(&self, student: &StudentData, images: &[CapturedImage]) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;

        let payload = serde_json::to_string(student)?;
        let total_bytes: usize = images.iter().map(|i| i.data().len()).sum();
        tracing::info!(student = %payload, "Student data");
        tracing::info!(
            images = images.len(),
            total_bytes,
            first_taken = ?images.first().map(|i| i.timestamp()),
            "Captured images"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn mock_waits_then_accepts() {
        let registrar = MockRegistrar::default();
        let started = tokio::time::Instant::now();

        registrar
            .submit(&StudentData::default(), &[])
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
