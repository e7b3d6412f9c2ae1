#![deny(warnings, missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
//!
//! The [`host_threads`](crate) crate provides a uniform interface over the native threading
//! primitives of the host system: POSIX threads on unix hosts and Win32 threads on windows hosts.
//! The definition is such that unknown operating systems that provide one of the required
//! interfaces will function properly.
//!
//! The crate is deliberately thin. It manages thread lifecycles (create, join, and a leak
//! diagnostic when a joinable thread is dropped), wraps the host's mutual-exclusion object, and
//! provides scope-bound locking. It contains no scheduler, no work distribution, and no
//! coordination protocol beyond lock and unlock.

///
/// Mutual exclusion over the host's native lock interface, and scope-bound locking
pub mod mutex;
///
/// Threads and thread groups over the host's native thread interface
pub mod thread;

pub use mutex::{LockGuard, Lockable, Mutex};
pub use thread::{Error, RawHandle, Result, Thread, ThreadGroup};
