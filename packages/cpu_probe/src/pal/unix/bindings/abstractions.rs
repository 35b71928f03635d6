use std::fmt::Debug;
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
use std::ffi::CStr;
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
use std::io;

use libc::{c_int, c_long};

/// Bindings for FFI calls into the C library of the operating system.
///
/// All PAL FFI calls must go through this trait, enabling them to be mocked. The kernel control
/// table (`sysctl`) calls only exist on the kernels that implement them.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    /// `sysconf()`, returning the raw result. -1 means the value is not available.
    fn sysconf(&self, name: c_int) -> c_long;

    /// `sysctl()` read of an integer value by numeric identifier.
    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctl_u32(&self, mib: &[c_int]) -> io::Result<u32>;

    /// `sysctlbyname()` read of an integer value.
    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctlbyname_u32(&self, name: &CStr) -> io::Result<u32>;

    /// `sysctlnametomib()`, resolving a name to its numeric identifier.
    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctlnametomib(&self, name: &CStr) -> io::Result<Vec<c_int>>;
}
