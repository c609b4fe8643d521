use anyhow::Context;
use capture::{CaptureDevice, SyntheticDevice, V4lDevice};
use clap::Parser;
use common::{TelemetryGuard, setup_logging};
use registration::{
    Gender, Hall, Level, MockRegistrar, RegistrationConfig, RegistrationForm, StatusKind,
    StudentData, get_configuration,
};
use std::time::Duration;
use tokio::runtime::Runtime;

/// Register a student's face for hall sign-out.
#[derive(Parser, Debug)]
#[command(name = "registration", version)]
struct Args {
    #[arg(long)]
    name: String,

    /// University email, e.g. firstname.lastname@stu.covenantuniversity.edu.ng
    #[arg(long)]
    email: String,

    #[arg(long)]
    program: String,

    #[arg(long)]
    matric_number: String,

    #[arg(long)]
    reg_number: String,

    #[arg(long)]
    room_number: String,

    /// Male or Female
    #[arg(long)]
    gender: Gender,

    /// Hall of residence, e.g. "daniel" or "Daniel Hall"
    #[arg(long)]
    hall: Hall,

    /// 100, 200, 300, 400 or 500
    #[arg(long)]
    level: Level,

    /// Use a generated test pattern instead of a webcam
    #[arg(long)]
    synthetic: bool,

    /// Pause before each photo so the student can change pose
    #[arg(long, default_value_t = 1500)]
    capture_interval_ms: u64,
}

impl Args {
    fn student(&self) -> StudentData {
        StudentData {
            name: self.name.clone(),
            email: self.email.clone(),
            program: self.program.clone(),
            matric_number: self.matric_number.clone(),
            reg_number: self.reg_number.clone(),
            room_number: self.room_number.clone(),
            gender: Some(self.gender),
            hall_of_residence: Some(self.hall),
            level: Some(self.level),
        }
    }
}

fn report<D: CaptureDevice>(form: &RegistrationForm<D, MockRegistrar>) {
    if let Some(status) = form.notifier().visible() {
        let tag = match status.kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
            StatusKind::Info => "info",
        };
        println!("[{}] {}", tag, status.text);
    }
}

/// The OTLP batch exporter flushes on a runtime worker while the guard shuts
/// down, so telemetry needs a multi-thread runtime. Plain logging runs on one
/// thread.
fn build_runtime(telemetry: bool) -> std::io::Result<Runtime> {
    if telemetry {
        Runtime::new()
    } else {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = get_configuration().context("Failed to load configuration")?;

    let runtime =
        build_runtime(config.otel_endpoint.is_some()).context("Failed to create Tokio runtime")?;

    // Dropped before `runtime`, outside `block_on`, so shutdown can flush.
    let _telemetry = match config.otel_endpoint.as_deref() {
        Some(endpoint) => Some(runtime.block_on(async {
            TelemetryGuard::init("registration", endpoint, config.environment)
        })?),
        None => {
            setup_logging(config.environment);
            None
        }
    };

    runtime.block_on(run(args, &config))
}

async fn run(args: Args, config: &RegistrationConfig) -> anyhow::Result<()> {
    tracing::info!(
        environment = %config.environment,
        required_captures = config.required_captures,
        synthetic = args.synthetic,
        "Registration starting"
    );

    let device: Box<dyn CaptureDevice> = if args.synthetic {
        Box::new(SyntheticDevice::new())
    } else {
        Box::new(V4lDevice::new(config.camera.device_id))
    };
    let registrar = MockRegistrar::new(config.submission_delay());

    let mut form = RegistrationForm::new(config, device, registrar);
    *form.student_mut() = args.student();

    let started = form.start_camera();
    report(&form);
    started.context("Could not start the camera")?;

    let interval = Duration::from_millis(args.capture_interval_ms);
    while !form.can_submit() {
        tokio::time::sleep(interval).await;
        let captured = form.capture_photo();
        report(&form);
        captured.context("Photo capture failed")?;
    }

    form.stop_camera();
    report(&form);

    let submitted = form.submit().await;
    report(&form);
    submitted.context("Registration was not accepted")?;

    Ok(())
}
