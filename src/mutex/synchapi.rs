use std::{cell::UnsafeCell, ffi::c_void, mem};

// Layout of RTL_CRITICAL_SECTION from minwinbase.h.
#[repr(C)]
struct CriticalSection {
    debug_info: *mut c_void,     // PRTL_CRITICAL_SECTION_DEBUG
    lock_count: i32,             // LONG
    recursion_count: i32,        // LONG
    owning_thread: *mut c_void,  // HANDLE
    lock_semaphore: *mut c_void, // HANDLE
    spin_count: usize,           // ULONG_PTR
}

extern "system" {
    fn InitializeCriticalSection(lpCriticalSection: *mut CriticalSection); // (LPCRITICAL_SECTION)
    fn EnterCriticalSection(lpCriticalSection: *mut CriticalSection); // (LPCRITICAL_SECTION)
    fn LeaveCriticalSection(lpCriticalSection: *mut CriticalSection); // (LPCRITICAL_SECTION)
    fn DeleteCriticalSection(lpCriticalSection: *mut CriticalSection); // (LPCRITICAL_SECTION)
}

pub struct RawMutex {
    cs: UnsafeCell<CriticalSection>,
}

// The critical section is shared between threads by handing its address to the Win32 interface;
// the cell itself is never accessed from Rust.
unsafe impl Send for RawMutex {}
unsafe impl Sync for RawMutex {}

impl RawMutex {
    /// The critical section is initialized in place after the box pins its address.
    pub fn new() -> Box<Self> {
        let raw = Box::new(Self {
            cs: UnsafeCell::new(unsafe { mem::zeroed() }),
        });
        unsafe {
            InitializeCriticalSection(raw.cs.get());
        }
        raw
    }

    pub fn lock(&self) {
        unsafe {
            EnterCriticalSection(self.cs.get());
        }
    }

    pub fn unlock(&self) {
        unsafe {
            LeaveCriticalSection(self.cs.get());
        }
    }
}

impl Drop for RawMutex {
    fn drop(&mut self) {
        unsafe {
            DeleteCriticalSection(self.cs.get());
        }
    }
}
