//! Explicit cancellation deadlines.
//!
//! A [`Deadline`] owns a [`CancellationToken`] that a timer task cancels once
//! the budget elapses. Work is raced against the token, so expiry never
//! depends on timeout knobs of the underlying HTTP client. Each deadline is
//! independent: expiry cancels only the future it guards.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The guarded future did not finish within its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out after {}ms", .0.as_millis())]
pub struct Expired(pub Duration);

pub struct Deadline {
    token: CancellationToken,
    timer: JoinHandle<()>,
    budget: Duration,
}

impl Deadline {
    /// Starts the timer immediately.
    pub fn arm(budget: Duration) -> Self {
        let token = CancellationToken::new();
        let trigger = token.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(budget).await;
            trigger.cancel();
        });

        Self {
            token,
            timer,
            budget,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Drives `work` until it completes or the deadline fires, whichever is first.
    /// On expiry `work` is dropped, which aborts any in-flight request.
    pub async fn run<F: Future>(self, work: F) -> Result<F::Output, Expired> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(Expired(self.budget)),
            output = work => Ok(output),
        }
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

/// Shorthand for `Deadline::arm(budget).run(work)`.
pub async fn within<F: Future>(budget: Duration, work: F) -> Result<F::Output, Expired> {
    Deadline::arm(budget).run(work).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn completes_before_budget() {
        let output = within(Duration::from_secs(1), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            7
        })
        .await;

        assert_eq!(output, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn expires_exactly_at_budget() {
        let start = Instant::now();
        let output = within(Duration::from_secs(5), std::future::pending::<()>()).await;

        assert_eq!(output, Err(Expired(Duration::from_secs(5))));
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn sibling_deadlines_are_independent() {
        let fast = within(Duration::from_secs(1), async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            "fast"
        });
        let stuck = within(Duration::from_millis(100), std::future::pending::<&str>());

        let (fast, stuck) = tokio::join!(fast, stuck);

        assert_eq!(fast, Ok("fast"));
        assert_eq!(stuck, Err(Expired(Duration::from_millis(100))));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_deadline_releases_the_token() {
        let deadline = Deadline::arm(Duration::from_secs(1));
        let token = deadline.token().clone();
        drop(deadline);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!token.is_cancelled());
    }
}
