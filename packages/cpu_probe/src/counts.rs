use std::io;
use std::num::NonZero;

use tracing::{debug, trace};

use crate::pal::{BUILD_TARGET_PLATFORM, Platform};
use crate::{Error, Result};

/// The number of processors that are online, i.e. currently schedulable by the operating system.
///
/// Returns 0 if the operating system could not tell us. Since a running program implies at least
/// one processor, 0 is never a real count. Use [`try_online_processor_count()`] to find out why
/// the count could not be determined.
///
/// Every call queries the operating system again, consulting a fixed chain of facilities until
/// one of them answers. This is meant to be called when sizing a program to the host, not on a
/// hot path.
///
/// # Example
///
/// ```
/// let online = cpu_probe::online_processor_count();
///
/// // Treat an unknown count as a single processor.
/// let workers = online.max(1);
/// println!("Starting {workers} workers");
/// ```
#[cfg_attr(test, mutants::skip)] // Trivial layer, we only test the underlying logic.
#[must_use]
pub fn online_processor_count() -> u32 {
    try_online_processor_count().map_or(0, NonZero::get)
}

/// The number of processors that are configured, i.e. known to the operating system whether or
/// not they are currently schedulable.
///
/// Returns 0 if the operating system could not tell us.
///
/// If the operating system has no facility for the configured count, the online count is
/// returned instead. This under-reports on hosts where some processors are offline.
#[cfg_attr(test, mutants::skip)] // Trivial layer, we only test the underlying logic.
#[must_use]
pub fn configured_processor_count() -> u32 {
    try_configured_processor_count().map_or(0, NonZero::get)
}

/// The number of processors that are online, i.e. currently schedulable by the operating system.
///
/// # Errors
///
/// Returns [`Error::Exhausted`] if no facility on this platform could report the count and
/// [`Error::Facility`] if a facility failed in a way that does not permit trying the next one.
///
/// # Example
///
/// ```
/// match cpu_probe::try_online_processor_count() {
///     Ok(count) => println!("{count} processors online"),
///     Err(e) => println!("Processor count unknown: {e}"),
/// }
/// ```
#[cfg_attr(test, mutants::skip)] // Trivial layer, we only test the underlying logic.
pub fn try_online_processor_count() -> Result<NonZero<u32>> {
    resolve_online(&BUILD_TARGET_PLATFORM)
}

/// The number of processors that are configured, i.e. known to the operating system whether or
/// not they are currently schedulable.
///
/// Falls back to the online count if the configured count is not available.
///
/// # Errors
///
/// Same as [`try_online_processor_count()`], reported when the fallback to the online count also
/// fails.
#[cfg_attr(test, mutants::skip)] // Trivial layer, we only test the underlying logic.
pub fn try_configured_processor_count() -> Result<NonZero<u32>> {
    resolve_configured(&BUILD_TARGET_PLATFORM)
}

/// Consults the platform's online facilities in order until one reports a count.
///
/// A facility that is not implemented, has no value or reports zero processors passes the
/// question to the next one. Any other failure ends the search.
pub(crate) fn resolve_online(platform: &impl Platform) -> Result<NonZero<u32>> {
    let facilities = platform.online_facilities();

    for &facility in facilities {
        trace!(%facility, "querying online processor count");

        match platform.query_online(facility) {
            Ok(count) => {
                if let Some(count) = NonZero::new(count) {
                    debug!(%facility, count, "resolved online processor count");
                    return Ok(count);
                }

                debug!(%facility, "facility reported zero processors, trying next");
            }
            Err(e) if is_unavailable(&e) => {
                debug!(%facility, error = %e, "facility unavailable, trying next");
            }
            Err(source) => {
                debug!(%facility, error = %source, "facility failed");
                return Err(Error::Facility { facility, source });
            }
        }
    }

    debug!(
        attempted = facilities.len(),
        "no facility could report the online processor count"
    );

    Err(Error::Exhausted {
        attempted: facilities.to_vec(),
    })
}

/// Asks the platform's configured count facility, falling back to the online count if that
/// facility fails in any way.
pub(crate) fn resolve_configured(platform: &impl Platform) -> Result<NonZero<u32>> {
    let facility = platform.configured_facility();
    trace!(%facility, "querying configured processor count");

    match platform.query_configured() {
        Ok(count) => {
            if let Some(count) = NonZero::new(count) {
                debug!(%facility, count, "resolved configured processor count");
                return Ok(count);
            }

            debug!(%facility, "facility reported zero processors, using online count");
        }
        Err(e) => {
            debug!(%facility, error = %e, "configured count unavailable, using online count");
        }
    }

    resolve_online(platform)
}

fn is_unavailable(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::Unsupported | io::ErrorKind::NotFound
    )
}
