//! Platform Abstraction Layer (PAL). All operating system calls made by the package go through
//! the `Platform` trait defined here, with one implementation per family of build targets.

mod abstractions;
pub(crate) use abstractions::*;

#[cfg(all(unix, not(miri)))]
mod unix;
#[cfg(all(unix, not(miri)))]
pub(crate) use unix::*;

#[cfg(all(windows, not(miri)))]
mod windows;
#[cfg(all(windows, not(miri)))]
pub(crate) use windows::*;

// The fallback platform answers on Miri and on targets with no native facility. It is also
// compiled into unit tests everywhere so its logic is covered on the usual CI hosts. There only its
// own tests use it, since the native platform owns the unqualified names.
#[cfg(any(test, miri, not(any(unix, windows))))]
mod fallback;

#[cfg(any(miri, not(any(unix, windows))))]
pub(crate) use fallback::*;
