/// Notification classes an adapter maps to its display styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }
}

/// Receives (severity, message) events for display. The workflow layer
/// reports every user-visible outcome through this seam and nothing else;
/// how the events are rendered is the adapter's business.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}
