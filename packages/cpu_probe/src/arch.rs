//! Architecture-specific access to the `CPUID` instruction.
//!
//! Exactly one of the architecture modules is compiled in and glob-imported. Each provides the
//! same three items: `CLASS`, `have_cpuid()` and `cpuid()`.

use derive_more::Display;

// The flags probe is only needed on 32-bit x86 but the instruction sequence is identical on
// x86_64, so we also compile it there in test mode to exercise it on common hardware.
#[cfg(any(target_arch = "x86", all(test, target_arch = "x86_64")))]
mod flags;

#[cfg(target_arch = "x86")]
mod x86;
#[cfg(target_arch = "x86")]
pub(crate) use x86::*;

#[cfg(all(target_arch = "x86_64", not(target_env = "sgx")))]
mod x86_64;
#[cfg(all(target_arch = "x86_64", not(target_env = "sgx")))]
pub(crate) use x86_64::*;

// SGX enclaves fault on CPUID, so they are treated like architectures without the instruction.
#[cfg(not(any(
    target_arch = "x86",
    all(target_arch = "x86_64", not(target_env = "sgx"))
)))]
mod other;
#[cfg(not(any(
    target_arch = "x86",
    all(target_arch = "x86_64", not(target_env = "sgx"))
)))]
pub(crate) use other::*;

/// How the build target architecture relates to availability of the `CPUID` instruction.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ArchitectureClass {
    /// 32-bit x86. `CPUID` exists on most but not all processors of this family and must be
    /// probed for before use.
    #[display("32-bit x86")]
    Legacy32,

    /// 64-bit x86. `CPUID` is always available.
    #[display("64-bit x86")]
    Modern64,

    /// Any other architecture. `CPUID` does not exist.
    #[display("other")]
    Other,
}

/// The architecture class of the build target.
pub const BUILD_TARGET_ARCHITECTURE: ArchitectureClass = CLASS;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn class_matches_target_arch() {
        let expected = if cfg!(target_arch = "x86") {
            ArchitectureClass::Legacy32
        } else if cfg!(all(target_arch = "x86_64", not(target_env = "sgx"))) {
            ArchitectureClass::Modern64
        } else {
            ArchitectureClass::Other
        };

        assert_eq!(BUILD_TARGET_ARCHITECTURE, expected);
    }

    #[test]
    fn class_display() {
        assert_eq!(ArchitectureClass::Legacy32.to_string(), "32-bit x86");
        assert_eq!(ArchitectureClass::Modern64.to_string(), "64-bit x86");
        assert_eq!(ArchitectureClass::Other.to_string(), "other");
    }
}
