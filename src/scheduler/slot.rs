use std::sync::{Arc, Mutex, PoisonError};

/// Callback invoked on every refresh tick.
pub type RefreshCallback = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Shared, replaceable holder for the refresh callback.
///
/// The scheduler reads the slot at fire time, so replacing the callback takes
/// effect on the next tick without restarting any timer.
#[derive(Clone, Default)]
pub struct RefreshSlot {
    inner: Arc<Mutex<Option<RefreshCallback>>>,
}

impl RefreshSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<F>(&self, callback: F)
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        *self.lock() = Some(Arc::new(callback));
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn is_set(&self) -> bool {
        self.lock().is_some()
    }

    /// Snapshot of the callback currently installed.
    pub fn current(&self) -> Option<RefreshCallback> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<RefreshCallback>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RefreshSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshSlot")
            .field("set", &self.is_set())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn replacing_callback_changes_what_fires() {
        let slot = RefreshSlot::new();
        assert!(slot.current().is_none());

        let first = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&first);
        slot.set(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        slot.current().unwrap()().unwrap();

        let second = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&second);
        slot.set(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        slot.clone().current().unwrap()().unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        slot.clear();
        assert!(!slot.is_set());
    }
}
