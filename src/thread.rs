use std::mem;

#[cfg(unix)]
mod pthread;

#[cfg(unix)]
use pthread as sys;

#[cfg(windows)]
mod processthreadsapi;

#[cfg(windows)]
use processthreadsapi as sys;

pub use sys::RawHandle;

/// Errors reported by the native threading interface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host refused to create a thread for lack of resources.
    #[error("could not create thread: resource unavailable, try again (os error {0})")]
    ResourceUnavailable(i32),
    /// The host reported a thread-creation failure with no further classification.
    #[error("could not create thread: internal error (os error {0})")]
    Internal(i32),
    /// [`Thread::native_handle`] was called on a thread that holds no live handle.
    #[error("native_handle: thread not joinable")]
    NotJoinable,
}

/// Result alias for operations against the native threading interface.
pub type Result<T> = core::result::Result<T, Error>;

/// The boxed form every callable is reduced to before it crosses the C ABI boundary.
pub(crate) type StartFn = Box<dyn FnOnce() + Send + 'static>;

/// A handle that owns at most one native thread.
///
/// A thread is *joinable* from the moment it is spawned until it is joined. A joinable thread
/// must be joined before the handle is dropped; dropping it earlier logs a warning and leaks the
/// native handle rather than failing.
#[derive(Default)]
pub struct Thread {
    raw: Option<sys::RawThread>,
}

impl Thread {
    /// Creates an empty thread object that refers to no native thread.
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: None }
    }

    /// Starts `f` on a new native thread.
    ///
    /// The callable is moved to the heap and handed to the host's thread entry point through a
    /// C-ABI trampoline. A panic escaping `f` is caught on the new thread and logged; it does not
    /// unwind into the host.
    ///
    /// # Errors
    /// Returns [`Error::ResourceUnavailable`] when the host is out of thread resources, and
    /// [`Error::Internal`] for any other native creation failure.
    pub fn spawn<F>(f: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        sys::RawThread::spawn(Box::new(f)).map(|raw| Self { raw: Some(raw) })
    }

    /// Returns whether this object holds a live native handle.
    #[must_use]
    pub const fn joinable(&self) -> bool {
        self.raw.is_some()
    }

    /// Blocks until the native thread finishes, then releases the handle.
    ///
    /// Joining a non-joinable thread is a no-op.
    pub fn join(&mut self) {
        let Some(raw) = self.raw.take() else { return };
        raw.join();
    }

    /// Returns the underlying handle of the native thread.
    ///
    /// # Errors
    /// Returns [`Error::NotJoinable`] when no live handle is held.
    pub fn native_handle(&self) -> Result<RawHandle> {
        self.raw.as_ref().map(sys::RawThread::handle).ok_or(Error::NotJoinable)
    }

    /// Exchanges the native handles of `self` and `other`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.raw, &mut other.raw);
    }
}

impl Drop for Thread {
    fn drop(&mut self) {
        if self.joinable() {
            log::warn!("dropping a joinable thread without joining it; the native handle is leaked");
        }
    }
}

/// An owning collection of [`Thread`]s that can be joined together.
#[derive(Default)]
pub struct ThreadGroup {
    threads: Vec<Thread>,
}

impl ThreadGroup {
    /// Creates an empty group.
    #[must_use]
    pub const fn new() -> Self {
        Self { threads: Vec::new() }
    }

    /// Spawns a thread running `f` and retains it in the group.
    ///
    /// # Errors
    /// Propagates the creation failure of [`Thread::spawn`]; the group is unchanged on error.
    pub fn create_thread<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let thread = Thread::spawn(f)?;
        self.threads.push(thread);
        Ok(())
    }

    /// Joins every thread in the group and releases them, leaving the group empty.
    pub fn join_all(&mut self) {
        for thread in &mut self.threads {
            thread.join();
        }
        self.threads.clear();
    }

    /// Returns the number of threads currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Returns whether the group holds no threads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}
