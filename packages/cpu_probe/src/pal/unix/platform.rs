#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
use std::ffi::CStr;
use std::io;

use libc::c_int;

use crate::Facility;
use crate::pal::Platform;
use crate::pal::unix::{Bindings, BindingsFacade};

/// The kernel control table is consulted after `sysconf` on kernels that have one.
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
const ONLINE_FACILITIES: &[Facility] = &[
    Facility::Sysconf,
    Facility::SysctlMib,
    Facility::SysctlByName,
    Facility::SysctlNameToMib,
];

#[cfg(not(any(target_vendor = "apple", target_os = "freebsd")))]
const ONLINE_FACILITIES: &[Facility] = &[Facility::Sysconf];

// Apple kernels distinguish available processors from the total; HW_AVAILCPU is the one that
// corresponds to "online".
#[cfg(target_vendor = "apple")]
const HW_CPU_MIB: [c_int; 2] = [libc::CTL_HW, libc::HW_AVAILCPU];

#[cfg(target_os = "freebsd")]
const HW_CPU_MIB: [c_int; 2] = [libc::CTL_HW, libc::HW_NCPU];

#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
const HW_NCPU_NAME: &CStr = c"hw.ncpu";

/// Error numbers with which a facility tells us it does not implement what we asked for or has
/// no such value. Both permit falling back to the next facility.
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
const UNAVAILABLE_ERRNOS: [c_int; 5] = [
    libc::ENOENT,
    libc::ENOSYS,
    libc::EINVAL,
    libc::ENOTSUP,
    libc::EOPNOTSUPP,
];

/// Unix platform, shared by all Unix-like build targets. The set of facilities compiled in
/// depends on the target kernel.
#[derive(Debug)]
pub(crate) struct BuildTargetPlatform {
    bindings: BindingsFacade,
}

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform =
    BuildTargetPlatform::new(BindingsFacade::target());

impl BuildTargetPlatform {
    pub(crate) const fn new(bindings: BindingsFacade) -> Self {
        Self { bindings }
    }

    fn sysconf_count(&self, name: c_int) -> io::Result<u32> {
        let value = self.bindings.sysconf(name);

        // POSIX uses -1 both for unknown names and for values that exist but are indeterminate.
        // Either way there is nothing to read here.
        if value == -1 {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("sysconf({name}) has no value on this host"),
            ));
        }

        u32::try_from(value).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("sysconf({name}) returned out of range value {value}: {e}"),
            )
        })
    }

    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctl_name_then_mib(&self) -> io::Result<u32> {
        let mib = self
            .bindings
            .sysctlnametomib(HW_NCPU_NAME)
            .map_err(classify_errno)?;

        self.bindings.sysctl_u32(&mib).map_err(classify_errno)
    }
}

impl Platform for BuildTargetPlatform {
    fn online_facilities(&self) -> &'static [Facility] {
        ONLINE_FACILITIES
    }

    fn query_online(&self, facility: Facility) -> io::Result<u32> {
        match facility {
            Facility::Sysconf => self.sysconf_count(libc::_SC_NPROCESSORS_ONLN),
            #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
            Facility::SysctlMib => self
                .bindings
                .sysctl_u32(&HW_CPU_MIB)
                .map_err(classify_errno),
            #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
            Facility::SysctlByName => self
                .bindings
                .sysctlbyname_u32(HW_NCPU_NAME)
                .map_err(classify_errno),
            #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
            Facility::SysctlNameToMib => self.sysctl_name_then_mib(),
            _ => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("{facility} does not exist on this platform"),
            )),
        }
    }

    fn configured_facility(&self) -> Facility {
        Facility::Sysconf
    }

    fn query_configured(&self) -> io::Result<u32> {
        self.sysconf_count(libc::_SC_NPROCESSORS_CONF)
    }
}

/// Re-labels the error numbers that mean "not implemented" or "no such value" with the
/// `Unsupported` kind, so the facility chain knows it may fall through.
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
fn classify_errno(error: io::Error) -> io::Error {
    match error.raw_os_error() {
        Some(errno) if UNAVAILABLE_ERRNOS.contains(&errno) => {
            io::Error::new(io::ErrorKind::Unsupported, error)
        }
        _ => error,
    }
}
