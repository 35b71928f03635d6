#[cfg(test)]
use std::cell::Cell;

use crate::arch;

/// The four output registers of one `CPUID` invocation, exactly as the processor produced them.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_structs,
    reason = "mirrors the fixed output register set of the instruction"
)]
pub struct Registers {
    /// Value of EAX after the instruction.
    pub eax: u32,

    /// Value of EBX after the instruction.
    pub ebx: u32,

    /// Value of ECX after the instruction.
    pub ecx: u32,

    /// Value of EDX after the instruction.
    pub edx: u32,
}

/// Chooses which information `CPUID` reports.
///
/// The leaf is loaded into EAX and the subleaf into ECX before the instruction executes. Leaves
/// that have no subleaves ignore ECX.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_structs,
    reason = "mirrors the fixed input register set of the instruction"
)]
pub struct Selectors {
    /// The primary selector, loaded into EAX.
    pub leaf: u32,

    /// The secondary selector, loaded into ECX.
    pub subleaf: u32,
}

impl Selectors {
    /// Selects `leaf` with the given `subleaf`.
    #[must_use]
    pub const fn new(leaf: u32, subleaf: u32) -> Self {
        Self { leaf, subleaf }
    }

    /// Selects `leaf` with subleaf 0.
    #[must_use]
    pub const fn for_leaf(leaf: u32) -> Self {
        Self { leaf, subleaf: 0 }
    }
}

impl From<(u32, u32)> for Selectors {
    fn from((leaf, subleaf): (u32, u32)) -> Self {
        Self::new(leaf, subleaf)
    }
}

/// Whether the `CPUID` instruction can be executed on the current processor.
///
/// * On 64-bit x86 this is always `true`.
/// * On 32-bit x86 this toggles the AC and then the ID bit of the flags register. The instruction
///   is considered available only if both toggles stick. The flags register is restored before
///   returning.
/// * On every other architecture this is `false`.
///
/// The result is not cached. Call it once and keep the answer, or use [`Cpuid::detect()`].
#[cfg_attr(test, mutants::skip)] // Trivial layer, we only test the underlying logic.
#[inline]
#[must_use]
pub fn have_cpuid() -> bool {
    #[cfg(test)]
    PROBE_COUNT.with(|count| count.set(count.get().wrapping_add(1)));

    arch::have_cpuid()
}

// Per thread, so parallel tests do not see each other's probes.
#[cfg(test)]
thread_local! {
    static PROBE_COUNT: Cell<usize> = const { Cell::new(0) };
}

/// Executes `CPUID` with the given selectors and returns the output registers verbatim.
///
/// The base register that some targets reserve (EBX/RBX) is preserved across the call.
///
/// # Safety
///
/// The caller must have observed [`have_cpuid()`] returning `true` on this system. No check is
/// performed here, so that repeated invocations do not repeat the probe. Executing `CPUID` on a
/// processor without it raises an invalid opcode fault.
///
/// # Example
///
/// ```
/// use cpu_probe::{Selectors, cpuid_unchecked, have_cpuid};
///
/// if have_cpuid() {
///     // SAFETY: We just checked that CPUID is available.
///     let registers = unsafe { cpuid_unchecked(Selectors::new(4, 0)) };
///     println!("Cache parameters: {registers:?}");
/// }
/// ```
#[inline]
#[must_use]
pub unsafe fn cpuid_unchecked(selectors: Selectors) -> Registers {
    // SAFETY: Forwarding safety requirements to caller.
    unsafe { arch::cpuid(selectors) }
}

/// Proof that the `CPUID` instruction is available on the current processor.
///
/// Obtain one via [`Cpuid::detect()`], then invoke the instruction as often as needed without
/// `unsafe` code and without repeating the probe.
///
/// # Example
///
/// ```
/// use cpu_probe::Cpuid;
///
/// if let Some(cpuid) = Cpuid::detect() {
///     let first = cpuid.query((0, 0));
///     let second = cpuid.query((0, 0));
///
///     assert_eq!(first, second);
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cpuid {
    _available: (),
}

impl Cpuid {
    /// Probes for `CPUID`, returning `None` if the processor does not implement it.
    #[must_use]
    pub fn detect() -> Option<Self> {
        have_cpuid().then_some(Self { _available: () })
    }

    /// Executes `CPUID` with the given selectors and returns the output registers verbatim.
    #[inline]
    #[must_use]
    pub fn query(self, selectors: impl Into<Selectors>) -> Registers {
        // SAFETY: The existence of `self` proves that CPUID is available.
        unsafe { cpuid_unchecked(selectors.into()) }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::{ArchitectureClass, BUILD_TARGET_ARCHITECTURE};

    assert_impl_all!(Registers: Send, Sync, Copy, Debug);
    assert_impl_all!(Selectors: Send, Sync, Copy, Debug);
    assert_impl_all!(Cpuid: Send, Sync, Copy, Debug);

    #[test]
    fn selectors_constructors() {
        assert_eq!(Selectors::new(7, 1), Selectors { leaf: 7, subleaf: 1 });
        assert_eq!(Selectors::for_leaf(7), Selectors { leaf: 7, subleaf: 0 });
        assert_eq!(Selectors::from((0x8000_0000, 3)), Selectors::new(0x8000_0000, 3));
    }

    #[cfg(not(miri))] // Miri does not support inline assembly.
    #[test]
    fn detect_agrees_with_probe() {
        assert_eq!(Cpuid::detect().is_some(), have_cpuid());
    }

    #[cfg(not(miri))] // Miri does not support inline assembly.
    #[test]
    fn query_does_not_repeat_probe() {
        let Some(cpuid) = Cpuid::detect() else {
            return;
        };

        let probes_before = PROBE_COUNT.with(Cell::get);

        let registers: Vec<Registers> = (0..3)
            .map(|_| cpuid.query(Selectors::for_leaf(0)))
            .collect();

        // SAFETY: Cpuid::detect() above proved that CPUID is available.
        let unchecked = unsafe { cpuid_unchecked(Selectors::for_leaf(0)) };

        assert_eq!(registers.len(), 3);
        assert_eq!(registers.first(), Some(&unchecked));
        assert_eq!(PROBE_COUNT.with(Cell::get), probes_before);
    }

    #[test]
    fn modern64_always_has_cpuid() {
        if BUILD_TARGET_ARCHITECTURE != ArchitectureClass::Modern64 {
            return;
        }

        for _ in 0..3 {
            assert!(have_cpuid());
        }
    }

    #[test]
    fn other_architectures_never_have_cpuid() {
        if BUILD_TARGET_ARCHITECTURE != ArchitectureClass::Other {
            return;
        }

        assert!(!have_cpuid());
        assert!(Cpuid::detect().is_none());
    }

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(miri)))]
    mod x86_family {
        use super::*;

        fn cpuid() -> Cpuid {
            Cpuid::detect().expect("every processor that can run the test suite has CPUID")
        }

        #[test]
        fn vendor_leaf_is_idempotent() {
            let cpuid = cpuid();

            let first = cpuid.query(Selectors::new(0, 0));
            let second = cpuid.query(Selectors::new(0, 0));

            assert_eq!(first.ebx, second.ebx);
            assert_eq!(first.edx, second.edx);
            assert_eq!(first.ecx, second.ecx);
            assert_eq!(first, second);
        }

        #[test]
        fn vendor_is_printable_ascii() {
            let registers = cpuid().query(Selectors::for_leaf(0));

            let vendor: Vec<u8> = [registers.ebx, registers.edx, registers.ecx]
                .iter()
                .flat_map(|r| r.to_le_bytes())
                .collect();

            assert!(
                vendor.iter().all(|b| b.is_ascii_graphic() || *b == b' '),
                "vendor bytes {vendor:?} are not printable ASCII"
            );
        }

        #[test]
        fn basic_feature_leaf_is_supported() {
            // Leaf 1 (version and feature information) has existed since the first CPUID-capable
            // processors, so the highest basic leaf is always at least 1.
            let registers = cpuid().query(Selectors::for_leaf(0));

            assert!(registers.eax >= 1);
        }

        #[test]
        fn unchecked_matches_safe_wrapper() {
            let safe = cpuid().query(Selectors::for_leaf(0));

            // SAFETY: cpuid() above panics if CPUID is not available.
            let unchecked = unsafe { cpuid_unchecked(Selectors::for_leaf(0)) };

            assert_eq!(safe, unchecked);
        }
    }
}
