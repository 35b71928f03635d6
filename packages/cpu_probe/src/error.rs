use std::io;

use thiserror::Error;

use crate::Facility;

/// Reasons why the operating system could not tell us how many processors there are.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Every facility available on this platform reported that it is not implemented or that the
    /// value does not exist.
    #[error("no facility could report the processor count (attempted: {})", facility_list(.attempted))]
    Exhausted {
        /// The facilities that were consulted, in the order they were consulted.
        attempted: Vec<Facility>,
    },

    /// A facility failed in a way that does not permit falling back to the next one.
    #[error("{facility} failed to report the processor count")]
    Facility {
        /// The facility that failed.
        facility: Facility,

        /// The error reported by the operating system.
        source: io::Error,
    },
}

/// A specialized `Result` type for processor count operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

fn facility_list(facilities: &[Facility]) -> String {
    facilities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::error::Error as _;
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn exhausted_lists_attempts_in_order() {
        let error = Error::Exhausted {
            attempted: vec![Facility::Sysconf, Facility::SysctlMib],
        };

        assert_eq!(
            error.to_string(),
            "no facility could report the processor count (attempted: sysconf, sysctl(CTL_HW))"
        );
    }

    #[test]
    fn facility_error_exposes_source() {
        let error = Error::Facility {
            facility: Facility::SysctlByName,
            source: io::Error::from(io::ErrorKind::OutOfMemory),
        };

        assert_eq!(
            error.to_string(),
            "sysctlbyname(hw.ncpu) failed to report the processor count"
        );
        assert!(error.source().is_some());
    }
}
