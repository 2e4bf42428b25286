use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::backend::{Snapshot, StorageBackend};
use crate::error::{PromptpadError, Result};

/// In-memory persistence for tests: holds the last saved snapshot and can
/// simulate write failures.
#[derive(Default)]
pub struct MemBackend {
    snapshot: Mutex<Option<Snapshot>>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail, for exercising the write-failure
    /// reporting path.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of saves attempted so far (successful or not).
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.lock().expect("backend poisoned").clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.save_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PromptpadError::Store("simulated save failure".to_string()));
        }
        *self.snapshot.lock().expect("backend poisoned") = Some(snapshot.clone());
        Ok(())
    }
}
