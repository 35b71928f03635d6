use std::fmt::Debug;
use std::io;

use crate::Facility;

/// Answers processor count questions for one family of build targets.
///
/// Implementations only translate between a single facility and the operating system. Walking
/// the fallback chain is the job of the caller.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// The facilities that can report the online processor count, in the order they should be
    /// consulted. Never empty.
    fn online_facilities(&self) -> &'static [Facility];

    /// Asks one facility for the online processor count.
    ///
    /// Facilities that are not implemented or have no value on this host report an error of kind
    /// `Unsupported` or `NotFound`. Other error kinds are hard failures.
    fn query_online(&self, facility: Facility) -> io::Result<u32>;

    /// The facility that reports the configured processor count.
    fn configured_facility(&self) -> Facility;

    /// Asks the configured count facility for the number of configured processors.
    fn query_configured(&self) -> io::Result<u32>;
}
