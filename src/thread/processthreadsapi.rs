use std::{ffi::c_void, panic, ptr};

use super::{Error, Result, StartFn};

extern "system" {
    fn CreateThread(
        lpThreadAttributes: *mut c_void,
        dwStackSize: usize,
        lpStartAddress: extern "system" fn(*mut c_void) -> u32,
        lpParameter: *mut c_void,
        dwCreationFlags: u32,
        lpThreadId: *mut u32,
    ) -> *mut c_void; // (LPSECURITY_ATTRIBUTES, SIZE_T, LPTHREAD_START_ROUTINE, LPVOID, DWORD, LPDWORD) -> HANDLE
    fn WaitForSingleObject(hHandle: *mut c_void, dwMilliseconds: u32) -> u32; // (HANDLE, DWORD) -> DWORD
    fn CloseHandle(hObject: *mut c_void) -> i32; // (HANDLE) -> BOOL
    fn GetLastError() -> u32; // () -> DWORD
}

const INFINITE: u32 = 0xFFFF_FFFF;

/// Native thread handle type of the Win32 interface.
pub type RawHandle = *mut c_void;

extern "system" fn thread_start(arg: *mut c_void) -> u32 {
    // Re-box the double-boxed callable; the outer box is what makes the pointer thin.
    let f = unsafe { Box::from_raw(arg.cast::<StartFn>()) };
    if panic::catch_unwind(panic::AssertUnwindSafe(move || (*f)())).is_err() {
        log::error!("thread body panicked");
    }
    0
}

pub struct RawThread {
    handle: *mut c_void,
}

// A Win32 thread handle may be waited on and closed from any thread.
unsafe impl Send for RawThread {}

impl RawThread {
    #[allow(clippy::cast_possible_wrap)]
    pub fn spawn(f: StartFn) -> Result<Self> {
        let arg = Box::into_raw(Box::new(f));
        let handle = unsafe {
            CreateThread(ptr::null_mut(), 0, thread_start, arg.cast(), 0, ptr::null_mut())
        };
        if handle.is_null() {
            // The callable never left this thread; reclaim it.
            drop(unsafe { Box::from_raw(arg) });
            return Err(Error::Internal(unsafe { GetLastError() } as i32));
        }
        Ok(Self { handle })
    }

    pub fn join(self) {
        unsafe {
            WaitForSingleObject(self.handle, INFINITE);
            CloseHandle(self.handle);
        }
    }

    pub const fn handle(&self) -> RawHandle {
        self.handle
    }
}
