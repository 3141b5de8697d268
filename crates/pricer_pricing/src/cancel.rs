//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::mc::PricingError;

/// Shared cancellation flag checked between pricing stages.
///
/// Clones share the same flag, so a token handed to a pricer can be
/// cancelled from another thread.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::cancel::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(token.check("paths").is_ok());
///
/// handle.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check("paths").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        tracing::debug!("pricing cancellation requested");
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails with [`PricingError::Cancelled`] if cancellation was requested.
    #[inline]
    pub fn check(&self, stage: &'static str) -> Result<(), PricingError> {
        if self.is_cancelled() {
            tracing::debug!(stage, "pricing aborted");
            Err(PricingError::Cancelled { stage })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_is_not_cancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check("shocks").is_ok());
    }

    #[test]
    fn test_clones_share_flag() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert_eq!(
            token.check("lsm"),
            Err(PricingError::Cancelled { stage: "lsm" })
        );
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let token = CancellationToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }
}
