//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// One registered readiness signal on the loader.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SignalId(pub u32);

/// One transition run (reveal execution or pending navigation). Run tokens
/// are never reused, so resolution attempts can be checked by identity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RunId(pub u32);

/// Monotonic allocator for SignalId and RunId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_signal: u32,
    next_run: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_signal(&mut self) -> SignalId {
        let id = SignalId(self.next_signal);
        self.next_signal = self.next_signal.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_run(&mut self) -> RunId {
        let id = RunId(self.next_run);
        self.next_run = self.next_run.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_signal(), SignalId(0));
        assert_eq!(alloc.alloc_signal(), SignalId(1));
        assert_eq!(alloc.alloc_run(), RunId(0));
        assert_eq!(alloc.alloc_run(), RunId(1));
    }
}
