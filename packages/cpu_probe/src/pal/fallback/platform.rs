use std::io;
use std::thread;

use crate::Facility;
use crate::pal::Platform;

const ONLINE_FACILITIES: &[Facility] = &[Facility::AvailableParallelism];

/// Fallback platform implementation for build targets without a native facility, and for Miri.
///
/// The Rust standard library is the only source of information, and it makes no distinction
/// between online and configured processors, so both counts are the same.
#[derive(Debug)]
pub(crate) struct BuildTargetPlatform;

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform = BuildTargetPlatform;

impl BuildTargetPlatform {
    #[expect(clippy::unused_self, reason = "matches Platform trait signature")]
    fn available_parallelism(&self) -> io::Result<u32> {
        let count = thread::available_parallelism()?;

        // More than u32::MAX processors is not a realistic scenario. Saturate rather than fail.
        Ok(u32::try_from(count.get()).unwrap_or(u32::MAX))
    }
}

impl Platform for BuildTargetPlatform {
    fn online_facilities(&self) -> &'static [Facility] {
        ONLINE_FACILITIES
    }

    fn query_online(&self, facility: Facility) -> io::Result<u32> {
        match facility {
            Facility::AvailableParallelism => self.available_parallelism(),
            _ => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("{facility} does not exist on this platform"),
            )),
        }
    }

    fn configured_facility(&self) -> Facility {
        Facility::AvailableParallelism
    }

    fn query_configured(&self) -> io::Result<u32> {
        self.available_parallelism()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::num::NonZero;

    use super::*;
    use crate::counts::{resolve_configured, resolve_online};

    #[test]
    fn counts_match_standard_library() {
        let expected = thread::available_parallelism().map_or(0, NonZero::get);

        let online = BUILD_TARGET_PLATFORM
            .query_online(Facility::AvailableParallelism)
            .unwrap();
        let configured = BUILD_TARGET_PLATFORM.query_configured().unwrap();

        assert_eq!(online as usize, expected);
        assert_eq!(configured as usize, expected);
    }

    #[test]
    fn resolves_through_single_facility() {
        let online = resolve_online(&BUILD_TARGET_PLATFORM).unwrap();
        let configured = resolve_configured(&BUILD_TARGET_PLATFORM).unwrap();

        assert_eq!(online, configured);
        assert_eq!(
            BUILD_TARGET_PLATFORM.online_facilities(),
            &[Facility::AvailableParallelism]
        );
    }

    #[test]
    fn native_facilities_are_unsupported() {
        let error = BUILD_TARGET_PLATFORM
            .query_online(Facility::Sysconf)
            .unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::Unsupported);
    }
}
