use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that ends the detection loop at the next iteration boundary.
///
/// Clones observe the same flag. Once stopped it stays stopped.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
