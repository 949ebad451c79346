//! Suspension points between attempts.

use std::{future::Future, pin::Pin, time::Duration};

/// Boxed future returned by [`Sleeper::sleep`].
pub type SleepFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Waits between retry attempts.
///
/// Swap the default [`TokioSleeper`] for a recording implementation to
/// observe backoff delays without waiting on a real clock.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, delay: Duration) -> SleepFuture;
}

/// Default sleeper.
///
/// On native targets: `tokio::time::sleep`.
/// On WASM targets: no-op — edge functions prefer fast failure over
/// sleeping, and `tokio::time::sleep` is not available.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, delay: Duration) -> SleepFuture {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Box::pin(tokio::time::sleep(delay))
        }

        #[cfg(target_arch = "wasm32")]
        {
            let _ = delay;
            Box::pin(std::future::ready(()))
        }
    }
}
