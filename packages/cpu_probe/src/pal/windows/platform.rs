use std::io;

use crate::Facility;
use crate::pal::Platform;
use crate::pal::windows::{Bindings, BindingsFacade};

/// Windows has a single facility for both counts, so there is no chain to fall back through.
const ONLINE_FACILITIES: &[Facility] = &[Facility::SystemInfo];

/// Windows platform, answering both questions from `GetSystemInfo()`.
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

    fn system_info_count(&self) -> u32 {
        self.bindings.get_system_info().dwNumberOfProcessors
    }
}

impl Platform for BuildTargetPlatform {
    fn online_facilities(&self) -> &'static [Facility] {
        ONLINE_FACILITIES
    }

    fn query_online(&self, facility: Facility) -> io::Result<u32> {
        match facility {
            Facility::SystemInfo => Ok(self.system_info_count()),
            _ => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("{facility} does not exist on Windows"),
            )),
        }
    }

    fn configured_facility(&self) -> Facility {
        Facility::SystemInfo
    }

    fn query_configured(&self) -> io::Result<u32> {
        Ok(self.system_info_count())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use windows::Win32::System::SystemInformation::SYSTEM_INFO;

    use super::*;
    use crate::Error;
    use crate::counts::{resolve_configured, resolve_online};
    use crate::pal::windows::MockBindings;

    fn platform_reporting(count: u32) -> BuildTargetPlatform {
        let mut bindings = MockBindings::new();

        // SYSTEM_INFO carries raw pointers and is therefore not Send, so it is built on demand.
        bindings.expect_get_system_info().returning(move || SYSTEM_INFO {
            dwNumberOfProcessors: count,
            ..SYSTEM_INFO::default()
        });

        BuildTargetPlatform::new(BindingsFacade::from_mock(bindings))
    }

    #[cfg(not(miri))] // Miri does not support talking to the real platform.
    #[test]
    fn real_count_is_plausible() {
        let count = BUILD_TARGET_PLATFORM
            .query_online(Facility::SystemInfo)
            .unwrap();

        assert!(count >= 1);
        assert_eq!(BUILD_TARGET_PLATFORM.query_configured().unwrap(), count);
    }

    #[test]
    fn single_facility_chain() {
        let platform = platform_reporting(8);

        assert_eq!(platform.online_facilities(), &[Facility::SystemInfo]);
        assert_eq!(platform.configured_facility(), Facility::SystemInfo);
    }

    #[test]
    fn both_counts_come_from_system_info() {
        let platform = platform_reporting(8);

        assert_eq!(resolve_online(&platform).unwrap().get(), 8);
        assert_eq!(resolve_configured(&platform).unwrap().get(), 8);
    }

    #[test]
    fn unix_facilities_are_unsupported() {
        let platform = platform_reporting(8);

        let error = platform.query_online(Facility::Sysconf).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn zero_processors_is_exhausted() {
        let platform = platform_reporting(0);

        assert!(matches!(
            resolve_online(&platform),
            Err(Error::Exhausted { attempted }) if attempted == [Facility::SystemInfo]
        ));
        assert!(matches!(
            resolve_configured(&platform),
            Err(Error::Exhausted { .. })
        ));
    }
}
