use parking_lot::Mutex;

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone)]
enum InitState {
    Pending,
    Done,
    Failed(String),
}

/// Idempotent initializer: the closure passed to `ensure_initialized` runs at most
/// once for the lifetime of the guard, even when several threads race on the first
/// call. Callers that arrive while the first run is in progress block on the mutex
/// and then observe its outcome. A failed run is not retried; its error is replayed.
#[derive(Debug)]
pub struct InitGuard {
    state: Mutex<InitState>,
}

impl Default for InitGuard {
    fn default() -> Self { Self::new() }
}

impl InitGuard {
    pub fn new() -> Self { Self { state: Mutex::new(InitState::Pending) } }

    pub fn ensure_initialized<F>(&self, f: F) -> CatalogResult<()>
    where
        F: FnOnce() -> CatalogResult<()>,
    {
        let mut state = self.state.lock();
        match &*state {
            InitState::Done => return Ok(()),
            InitState::Failed(msg) => return Err(CatalogError::Init(msg.clone())),
            InitState::Pending => {}
        }
        match f() {
            Ok(()) => {
                *state = InitState::Done;
                Ok(())
            }
            Err(e) => {
                *state = InitState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub fn is_initialized(&self) -> bool { matches!(*self.state.lock(), InitState::Done) }
}
