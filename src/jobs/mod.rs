pub mod market_refresh;
pub mod ticker_refresh;

use tokio::task::JoinHandle;

/// Owner of a spawned refresh loop. Dropping the handle aborts the task;
/// no further request starts after teardown.
pub struct RefreshHandle {
    handle: JoinHandle<()>,
}

impl RefreshHandle {
    pub(crate) fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
