use derive_more::Display;

/// An operating system facility that can report the number of processors.
///
/// Which facilities exist, and the order they are consulted in, is fixed at compile time for each
/// build target. See the package documentation for the table.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Facility {
    /// `sysconf()` with `_SC_NPROCESSORS_ONLN` or `_SC_NPROCESSORS_CONF`.
    #[display("sysconf")]
    Sysconf,

    /// `sysctl()` with a numeric identifier in the hardware class (`HW_AVAILCPU` on Apple
    /// targets, `HW_NCPU` on FreeBSD).
    #[display("sysctl(CTL_HW)")]
    SysctlMib,

    /// `sysctlbyname()` with the `hw.ncpu` name.
    #[display("sysctlbyname(hw.ncpu)")]
    SysctlByName,

    /// `sysctlnametomib()` to resolve `hw.ncpu` to a numeric identifier, followed by `sysctl()`
    /// with the resolved identifier.
    #[display("sysctlnametomib(hw.ncpu)")]
    SysctlNameToMib,

    /// `GetSystemInfo()` on Windows.
    #[display("GetSystemInfo")]
    SystemInfo,

    /// The Rust standard library, on targets with no native facility.
    #[display("available_parallelism")]
    AvailableParallelism,
}
