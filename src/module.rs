//! Process-wide state of the loaded DLL: its module handle and the counts
//! `DllCanUnloadNow` answers from.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

static MODULE_HANDLE: OnceLock<usize> = OnceLock::new();
static OBJECT_COUNT: AtomicU32 = AtomicU32::new(0);
static LOCK_COUNT: AtomicU32 = AtomicU32::new(0);

/// Record the handle the loader gave us. Later calls are ignored.
pub fn set_module_handle(handle: usize) {
    if MODULE_HANDLE.set(handle).is_err() {
        tracing::warn!(target: "shellext::module", "Module handle already set");
    }
}

pub fn module_handle() -> Option<usize> {
    MODULE_HANDLE.get().copied()
}

/// Keeps the DLL loaded while a COM object is alive.
#[derive(Debug)]
pub struct ObjectToken(());

impl ObjectToken {
    pub fn acquire() -> Self {
        OBJECT_COUNT.fetch_add(1, Ordering::SeqCst);
        ObjectToken(())
    }
}

impl Drop for ObjectToken {
    fn drop(&mut self) {
        OBJECT_COUNT.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn object_count() -> u32 {
    OBJECT_COUNT.load(Ordering::SeqCst)
}

/// `IClassFactory::LockServer`.
pub fn lock_server(lock: bool) {
    if lock {
        LOCK_COUNT.fetch_add(1, Ordering::SeqCst);
    } else {
        // Unbalanced unlocks must not wrap around
        let _ = LOCK_COUNT.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}

pub fn can_unload_now() -> bool {
    object_count() == 0 && LOCK_COUNT.load(Ordering::SeqCst) == 0
}

/// Serializes tests that create COM objects or assert on the counters.
#[cfg(test)]
pub(crate) fn counters_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unload_tracks_objects_and_locks() {
        let _counters = counters_lock();
        assert!(can_unload_now());

        let first = ObjectToken::acquire();
        let second = ObjectToken::acquire();
        assert_eq!(object_count(), 2);
        assert!(!can_unload_now());

        drop(first);
        assert!(!can_unload_now());
        drop(second);
        assert!(can_unload_now());

        lock_server(true);
        assert!(!can_unload_now());
        lock_server(false);
        lock_server(false);
        assert!(can_unload_now());
    }

    #[test]
    fn test_module_handle_is_write_once() {
        set_module_handle(0x1000);
        set_module_handle(0x2000);
        assert_eq!(module_handle(), Some(0x1000));
    }
}
