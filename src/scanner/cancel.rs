//! Cooperative cancellation, checked between documents and between files.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait StopCheck: Sync {
    fn should_stop(&self) -> bool;
}

/// Shared flag; clones observe the same stop request.
#[derive(Clone, Debug, Default)]
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

impl StopCheck for StopSignal {
    fn should_stop(&self) -> bool {
        self.is_stopped()
    }
}

impl<F> StopCheck for F
where
    F: Fn() -> bool + Sync,
{
    fn should_stop(&self) -> bool {
        self()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NeverStop;

impl StopCheck for NeverStop {
    fn should_stop(&self) -> bool {
        false
    }
}
