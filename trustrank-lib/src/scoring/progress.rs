/// Receives progress updates from a scoring run.
pub trait Progress: Send + Sync {
    /// Set the label for the current phase (e.g., "Scoring").
    fn set_phase(&self, phase: &str);

    /// Configure determinate progress reporting.
    ///
    /// The callback is polled by the reporter and returns (total, current, message).
    fn set_determinate(&self, callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>);

    /// Finish and clear the progress indicator.
    fn done(&self);
}
