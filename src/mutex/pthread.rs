use std::cell::UnsafeCell;

pub struct RawMutex {
    mtx: UnsafeCell<libc::pthread_mutex_t>,
}

// The native mutex object is shared between threads by handing its address to the POSIX
// interface; the cell itself is never accessed from Rust.
unsafe impl Send for RawMutex {}
unsafe impl Sync for RawMutex {}

impl RawMutex {
    /// The static initializer is plain data until first use, so moving the value into the box
    /// before any lock is taken is sound. The box pins the object afterwards.
    pub fn new() -> Box<Self> {
        Box::new(Self {
            mtx: UnsafeCell::new(libc::PTHREAD_MUTEX_INITIALIZER),
        })
    }

    pub fn lock(&self) {
        unsafe {
            libc::pthread_mutex_lock(self.mtx.get());
        }
    }

    pub fn unlock(&self) {
        unsafe {
            libc::pthread_mutex_unlock(self.mtx.get());
        }
    }
}

impl Drop for RawMutex {
    fn drop(&mut self) {
        unsafe {
            libc::pthread_mutex_destroy(self.mtx.get());
        }
    }
}
