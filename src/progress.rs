/// What the reporter tells us back after each update.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressSignal {
    pub stop_requested: bool,
}

/// Consumed interface of the surrounding UI: receives a fraction in `0..1`
/// with a human-readable label. When a pass announces itself as cancellable it
/// checks the returned signal after every item and stops promptly.
pub trait ProgressReporter {
    fn report(&self, fraction: f64, label: &str, cancellable: bool) -> ProgressSignal;
}

/// Reporter for headless runs: logs the progress and never asks to stop.
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, fraction: f64, label: &str, _cancellable: bool) -> ProgressSignal {
        tracing::info!(target: crate::LOGGER_MSG, "{:>3.0}% {}", fraction * 100.0, label);
        ProgressSignal::default()
    }
}
