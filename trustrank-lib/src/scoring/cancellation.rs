use crate::Result;
use core::sync::atomic::{AtomicBool, Ordering};
use ohno::bail;
use std::sync::Arc;

/// A flag shared between a scoring run and whoever may want to stop it.
///
/// Clones observe the same flag. The run checks it before starting work on each
/// repository, so work already in flight finishes but nothing new starts.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    cancelled: Arc<AtomicBool>,
}

impl Cancellation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Fail if the run has been cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            bail!("the scoring run was cancelled");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let cancellation = Cancellation::new();
        let other = cancellation.clone();
        assert!(cancellation.check().is_ok());

        other.cancel();
        assert!(cancellation.is_cancelled());
        let err = cancellation.check().unwrap_err();
        assert!(err.to_string().contains("cancelled"), "{err}");
    }
}
