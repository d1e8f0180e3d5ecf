//! Progress updates and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::RaceError;
use crate::motion::MotionProfile;
use crate::participant::ParticipantId;

/// Progress update sent from workers to observers.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Participant producing this update.
    pub id: ParticipantId,
    /// Curve shaping the participant's display position.
    pub profile: MotionProfile,
    /// Raw progress as a fraction in [0.0, 1.0].
    pub progress: f64,
    /// Eased display position.
    pub position: f64,
    /// Number of ticks the participant has taken.
    pub tick: u64,
}

impl ProgressUpdate {
    /// Create a new progress update.
    #[must_use]
    pub fn new(
        id: ParticipantId,
        profile: MotionProfile,
        progress: f64,
        position: f64,
        tick: u64,
    ) -> Self {
        Self {
            id,
            profile,
            progress,
            position,
            tick,
        }
    }

    /// Whether this update reports a participant on the finish line.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Cooperative stop signal shared by the workers of one race.
///
/// # Example
/// ```
/// use gridrace_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check for cancellation, returning an error if cancelled.
    pub fn check_cancelled(&self) -> Result<(), RaceError> {
        if self.is_cancelled() {
            Err(RaceError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// A cancellation token with a deadline.
///
/// [`check_cancelled`](Self::check_cancelled) fails once the inner token was
/// cancelled or the deadline has passed.
#[derive(Clone, Debug)]
pub struct TimeoutCancellationToken {
    inner: CancellationToken,
    deadline: Instant,
    timeout: Duration,
}

impl TimeoutCancellationToken {
    /// Attach a deadline to an existing token.
    #[must_use]
    pub fn with_token(inner: CancellationToken, timeout: Duration) -> Self {
        Self {
            inner,
            deadline: Instant::now() + timeout,
            timeout,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Check for cancellation, distinguishing an expired deadline.
    pub fn check_cancelled(&self) -> Result<(), RaceError> {
        if self.inner.is_cancelled() {
            Err(RaceError::Cancelled)
        } else if self.is_expired() {
            Err(RaceError::Timeout(format!("{:?}", self.timeout)))
        } else {
            Ok(())
        }
    }
}
