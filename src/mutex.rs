use std::marker::PhantomData;

#[cfg(unix)]
mod pthread;

#[cfg(unix)]
use pthread as sys;

#[cfg(windows)]
mod synchapi;

#[cfg(windows)]
use synchapi as sys;

/// A lock that can be acquired and released, and that a [`LockGuard`] can drive.
pub trait Lockable {
    /// Acquires the lock, blocking until it is held.
    fn lock(&self);
    /// Releases the lock.
    fn unlock(&self);
}

/// A mutual-exclusion primitive of the host system.
///
/// The native lock object is heap-allocated so its address stays stable for the lifetime of the
/// `Mutex`, which both host interfaces require. Locking and unlocking pass directly to the host;
/// their native return codes are not surfaced.
pub struct Mutex {
    raw: Box<sys::RawMutex>,
}

impl Mutex {
    /// Creates a new, unlocked mutex.
    #[must_use]
    pub fn new() -> Self {
        Self { raw: sys::RawMutex::new() }
    }

    /// Acquires the native lock, blocking until it is held.
    pub fn lock(&self) {
        self.raw.lock();
    }

    /// Releases the native lock. The calling thread must currently hold it.
    pub fn unlock(&self) {
        self.raw.unlock();
    }
}

impl Default for Mutex {
    fn default() -> Self {
        Self::new()
    }
}

impl Lockable for Mutex {
    fn lock(&self) {
        Self::lock(self);
    }

    fn unlock(&self) {
        Self::unlock(self);
    }
}

/// A scope-bound critical section: acquires a [`Lockable`] on construction and releases it when
/// dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a, L: Lockable + ?Sized> {
    lock: &'a L,
    // Critical sections must be released on the thread that acquired them.
    _not_send: PhantomData<*mut ()>,
}

impl<'a, L: Lockable + ?Sized> LockGuard<'a, L> {
    /// Acquires `lock` and returns the guard holding it.
    pub fn new(lock: &'a L) -> Self {
        lock.lock();
        Self { lock, _not_send: PhantomData }
    }
}

impl<L: Lockable + ?Sized> Drop for LockGuard<'_, L> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

#[cfg(test)]
mod test {
    use std::{
        cell::UnsafeCell,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use super::{LockGuard, Lockable, Mutex};
    use crate::thread::ThreadGroup;

    struct Shared {
        lock: Mutex,
        value: UnsafeCell<u64>,
    }

    // All access to `value` happens under `lock`.
    unsafe impl Sync for Shared {}

    #[test]
    fn test_lock_serializes_access() {
        let shared = Arc::new(Shared {
            lock: Mutex::new(),
            value: UnsafeCell::new(0),
        });
        let mut group = ThreadGroup::new();
        for _ in 0..4 {
            let shared = Arc::clone(&shared);
            group
                .create_thread(move || {
                    for _ in 0..1000 {
                        let _guard = LockGuard::new(&shared.lock);
                        unsafe {
                            *shared.value.get() += 1;
                        }
                    }
                })
                .unwrap();
        }
        group.join_all();
        assert_eq!(unsafe { *shared.value.get() }, 4000);
    }

    #[test]
    fn test_manual_lock_unlock() {
        let mutex = Mutex::new();
        mutex.lock();
        mutex.unlock();
        mutex.lock();
        mutex.unlock();
    }

    #[test]
    fn test_guard_releases_at_scope_exit() {
        let mutex = Mutex::new();
        {
            let _guard = LockGuard::new(&mutex);
        }
        // Deadlocks here if the guard did not release.
        mutex.lock();
        mutex.unlock();
    }

    struct CountingLock {
        locks: AtomicUsize,
        unlocks: AtomicUsize,
    }

    impl Lockable for CountingLock {
        fn lock(&self) {
            self.locks.fetch_add(1, Ordering::SeqCst);
        }

        fn unlock(&self) {
            self.unlocks.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_guard_drives_any_lockable() {
        let lock = CountingLock {
            locks: AtomicUsize::new(0),
            unlocks: AtomicUsize::new(0),
        };
        {
            let _guard = LockGuard::new(&lock);
            assert_eq!(lock.locks.load(Ordering::SeqCst), 1);
            assert_eq!(lock.unlocks.load(Ordering::SeqCst), 0);
        }
        assert_eq!(lock.unlocks.load(Ordering::SeqCst), 1);
    }
}
