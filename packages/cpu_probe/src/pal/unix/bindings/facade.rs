#![cfg_attr(coverage_nightly, coverage(off))]

#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
use std::ffi::CStr;
use std::fmt::Debug;
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
use std::io;
#[cfg(test)]
use std::sync::Arc;

use libc::{c_int, c_long};

#[cfg(test)]
use crate::pal::unix::MockBindings;
use crate::pal::unix::{Bindings, BuildTargetBindings};

/// Enum to hide the real/mock choice behind a single wrapper type.
#[derive(Clone)]
pub(crate) enum BindingsFacade {
    Target(&'static BuildTargetBindings),

    #[cfg(test)]
    Mock(Arc<MockBindings>),
}

impl BindingsFacade {
    pub(crate) const fn target() -> Self {
        Self::Target(&BuildTargetBindings)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockBindings) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Bindings for BindingsFacade {
    fn sysconf(&self, name: c_int) -> c_long {
        match self {
            Self::Target(bindings) => bindings.sysconf(name),
            #[cfg(test)]
            Self::Mock(mock) => mock.sysconf(name),
        }
    }

    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctl_u32(&self, mib: &[c_int]) -> io::Result<u32> {
        match self {
            Self::Target(bindings) => bindings.sysctl_u32(mib),
            #[cfg(test)]
            Self::Mock(mock) => mock.sysctl_u32(mib),
        }
    }

    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctlbyname_u32(&self, name: &CStr) -> io::Result<u32> {
        match self {
            Self::Target(bindings) => bindings.sysctlbyname_u32(name),
            #[cfg(test)]
            Self::Mock(mock) => mock.sysctlbyname_u32(name),
        }
    }

    #[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
    fn sysctlnametomib(&self, name: &CStr) -> io::Result<Vec<c_int>> {
        match self {
            Self::Target(bindings) => bindings.sysctlnametomib(name),
            #[cfg(test)]
            Self::Mock(mock) => mock.sysctlnametomib(name),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl Debug for BindingsFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Target(inner) => inner.fmt(f),
            #[cfg(test)]
            Self::Mock(inner) => inner.fmt(f),
        }
    }
}
