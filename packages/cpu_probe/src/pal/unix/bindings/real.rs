#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
use std::ffi::CStr;
use std::fmt::Debug;
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
use std::{io, ptr};

use libc::{c_int, c_long};

use crate::pal::unix::Bindings;

/// Large enough for any numeric sysctl identifier (`CTL_MAXNAME` is 12 on Apple, 24 on FreeBSD).
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
const MIB_CAPACITY: usize = 24;

/// FFI bindings that target the real operating system that the build is targeting.
///
/// You would only use different bindings in PAL unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

// Real OS bindings are excluded from coverage measurement because:
// 1. They are tested via the real platform tests running on actual hardware.
// 2. Error paths require OS-level failures that are impractical to trigger in tests.
#[cfg_attr(coverage_nightly, coverage(off))]
impl Bindings for BuildTargetBindings {
    fn sysconf(&self, name: c_int) -> c_long {
        // SAFETY: No safety requirements. Unknown names are reported via the return value.
        unsafe { libc::sysconf(name) }
    }

    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctl_u32(&self, mib: &[c_int]) -> io::Result<u32> {
        // The C signature takes a mutable identifier on some targets, so hand it a copy it may own.
        let mut mib = mib.to_vec();
        let mut value: u32 = 0;
        let mut size = size_of::<u32>();

        #[expect(
            clippy::cast_possible_truncation,
            reason = "sysctl identifiers are at most CTL_MAXNAME long"
        )]
        let mib_len = mib.len() as libc::c_uint;

        // SAFETY: `mib` is valid for `mib_len` elements.
        // The output buffer is valid for `size` bytes and `size` is valid for writes.
        let result = unsafe {
            libc::sysctl(
                mib.as_mut_ptr(),
                mib_len,
                (&raw mut value).cast(),
                &raw mut size,
                ptr::null_mut(),
                0,
            )
        };

        if result != 0 {
            return Err(io::Error::last_os_error());
        }

        check_u32_size(size)?;
        Ok(value)
    }

    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctlbyname_u32(&self, name: &CStr) -> io::Result<u32> {
        let mut value: u32 = 0;
        let mut size = size_of::<u32>();

        // SAFETY: `name` is a valid C string. The output buffer is valid for `size` bytes and
        // `size` is valid for writes.
        let result = unsafe {
            libc::sysctlbyname(
                name.as_ptr(),
                (&raw mut value).cast(),
                &raw mut size,
                ptr::null_mut(),
                0,
            )
        };

        if result != 0 {
            return Err(io::Error::last_os_error());
        }

        check_u32_size(size)?;
        Ok(value)
    }

    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctlnametomib(&self, name: &CStr) -> io::Result<Vec<c_int>> {
        let mut mib: [c_int; MIB_CAPACITY] = [0; MIB_CAPACITY];
        let mut len = MIB_CAPACITY;

        // SAFETY: `name` is a valid C string. `mib` is valid for `len` elements and `len` is
        // valid for writes.
        let result =
            unsafe { libc::sysctlnametomib(name.as_ptr(), mib.as_mut_ptr(), &raw mut len) };

        if result != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(mib.get(..len).unwrap_or(&mib).to_vec())
    }
}

/// An integer sysctl value must be exactly 32 bits wide, otherwise we did not read the value we
/// think we read.
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
fn check_u32_size(size: usize) -> io::Result<()> {
    if size == size_of::<u32>() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("sysctl returned a {size}-byte value where a 4-byte integer was expected"),
        ))
    }
}
