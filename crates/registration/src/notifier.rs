use serde::Serialize;
use std::sync::{
    Arc, Weak,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;
use tokio::sync::watch;

pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub id: u64,
    pub text: String,
    pub kind: StatusKind,
    pub visible: bool,
}

struct Inner {
    tx: watch::Sender<Option<StatusMessage>>,
    next_id: AtomicU64,
    ttl: Duration,
}

impl Inner {
    /// Hide message `id` if it is still the one on display.
    fn expire(&self, id: u64) -> bool {
        self.tx.send_if_modified(|current| match current {
            Some(message) if message.id == id && message.visible => {
                message.visible = false;
                true
            }
            _ => false,
        })
    }
}

/// Single-slot status line. Each message gets its own hide timer, and a timer
/// only ever hides the message it was started for.
///
/// Timers are spawned on the ambient Tokio runtime. Outside a runtime messages
/// stay visible until replaced or dismissed.
#[derive(Clone)]
pub struct StatusNotifier {
    inner: Arc<Inner>,
}

impl StatusNotifier {
    pub fn new(ttl: Duration) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                tx,
                next_id: AtomicU64::new(1),
                ttl,
            }),
        }
    }

    pub fn show(&self, text: impl Into<String>, kind: StatusKind) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let text = text.into();

        match kind {
            StatusKind::Error => tracing::warn!(id, %text, "Status"),
            StatusKind::Success | StatusKind::Info => tracing::info!(id, %text, "Status"),
        }

        self.inner.tx.send_replace(Some(StatusMessage {
            id,
            text,
            kind,
            visible: true,
        }));

        self.schedule_expiry(id);
        id
    }

    pub fn success(&self, text: impl Into<String>) -> u64 {
        self.show(text, StatusKind::Success)
    }

    pub fn error(&self, text: impl Into<String>) -> u64 {
        self.show(text, StatusKind::Error)
    }

    pub fn info(&self, text: impl Into<String>) -> u64 {
        self.show(text, StatusKind::Info)
    }

    /// Hide whatever is showing now.
    pub fn dismiss(&self) {
        let current = self.inner.tx.borrow().as_ref().map(|m| m.id);
        if let Some(id) = current {
            self.inner.expire(id);
        }
    }

    /// Latest message, visible or not.
    pub fn current(&self) -> Option<StatusMessage> {
        self.inner.tx.borrow().clone()
    }

    pub fn visible(&self) -> Option<StatusMessage> {
        self.current().filter(|m| m.visible)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<StatusMessage>> {
        self.inner.tx.subscribe()
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    fn schedule_expiry(&self, id: u64) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(id, "No runtime, status will not auto-hide");
            return;
        };

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let ttl = self.inner.ttl;
        runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = inner.upgrade()
                && inner.expire(id)
            {
                tracing::trace!(id, "Status hidden");
            }
        });
    }
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_TTL)
    }
}
