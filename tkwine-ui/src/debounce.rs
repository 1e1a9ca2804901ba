//! Trailing-edge debounce for rapid-fire UI input.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

/// Runs the most recent action after a quiet period. Each call bumps a
/// generation counter; a timer that wakes up to find itself stale
/// returns without firing, so only the last action in a burst runs.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Arm the debouncer and return the future that fires `action` after
    /// the quiet period. The caller spawns it; any later `debounced` call
    /// supersedes this one before it fires.
    pub fn debounced(&self, action: impl FnOnce() + 'static) -> impl Future<Output = ()> {
        let generation = Rc::clone(&self.generation);
        let armed = generation.get() + 1;
        generation.set(armed);
        let delay = self.delay;
        async move {
            sleep(delay).await;
            if generation.get() == armed {
                action();
            }
        }
    }
}

async fn sleep(delay: Duration) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::sleep(delay).await;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(delay).await;
    }
}
