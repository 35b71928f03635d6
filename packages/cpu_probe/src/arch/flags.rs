//! Toggling of EFLAGS bits, the classic way to detect `CPUID` on x86 processors where the
//! instruction is optional.

use std::arch::asm;

/// EFLAGS.AC (alignment check). Can only be toggled on 486 and later processors.
pub(crate) const ALIGNMENT_CHECK: usize = 1 << 18;

/// EFLAGS.ID. Can be toggled if and only if the processor implements `CPUID`.
pub(crate) const IDENTIFICATION: usize = 1 << 21;

// TF, IF, DF, IOPL, NT, RF and VM.
const EXECUTION_CONTROL: usize = 0x0003_7700;

/// Attempts to flip `bit` in the flags register and reports whether the processor retained the
/// new value.
///
/// The original flags value is written back inside the same instruction sequence, so the flags
/// register is unchanged when this returns, whatever the result.
///
/// `bit` must not be one of the flags that alter execution (TF, IF, DF, IOPL, NT, RF, VM).
pub(crate) fn flag_toggles(bit: usize) -> bool {
    debug_assert_eq!(bit & EXECUTION_CONTROL, 0);

    let original: usize;
    let observed: usize;

    // The raw opcodes for PUSHF/POPF are used so the same sequence assembles with the native
    // operand size on both 32-bit and 64-bit targets.
    //
    // SAFETY: The sequence pops exactly what it pushes and only ever loads either the original
    // flags or the original flags with one bit flipped that does not affect execution. The
    // original flags are restored as the final step.
    unsafe {
        asm!(
            ".byte 0x9C", // PUSHF
            "pop {original}",
            "mov {observed}, {original}",
            "xor {observed}, {bit}",
            "push {observed}",
            ".byte 0x9D", // POPF
            ".byte 0x9C", // PUSHF
            "pop {observed}",
            "push {original}",
            ".byte 0x9D", // POPF
            bit = in(reg) bit,
            original = out(reg) original,
            observed = out(reg) observed,
        );
    }

    ((original ^ observed) & bit) != 0
}

#[cfg(all(test, not(miri)))] // Miri does not support inline assembly.
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const TOUCHED_BITS: usize = ALIGNMENT_CHECK | IDENTIFICATION;

    fn read_flags() -> usize {
        let flags: usize;

        // SAFETY: Pushes the flags and pops them into a register, no other effect.
        unsafe {
            asm!(
                ".byte 0x9C", // PUSHF
                "pop {flags}",
                flags = out(reg) flags,
                options(preserves_flags),
            );
        }

        flags
    }

    #[test]
    fn identification_bit_toggles_on_cpuid_capable_hardware() {
        // Every processor that can run the test suite implements CPUID.
        assert!(flag_toggles(IDENTIFICATION));
    }

    #[test]
    fn alignment_check_bit_toggles_on_486_and_later() {
        assert!(flag_toggles(ALIGNMENT_CHECK));
    }

    #[test]
    fn flags_restored_after_successful_toggle() {
        let before = read_flags();
        assert!(flag_toggles(IDENTIFICATION));
        let after = read_flags();

        assert_eq!(before & TOUCHED_BITS, after & TOUCHED_BITS);
    }

    #[test]
    fn flags_restored_after_failed_toggle() {
        // Bit 1 of EFLAGS is hardwired to 1, so toggling it never sticks.
        const RESERVED_ALWAYS_ONE: usize = 1 << 1;

        let before = read_flags();
        assert!(!flag_toggles(RESERVED_ALWAYS_ONE));
        let after = read_flags();

        assert_eq!(
            before & (TOUCHED_BITS | RESERVED_ALWAYS_ONE),
            after & (TOUCHED_BITS | RESERVED_ALWAYS_ONE)
        );
    }

    #[test]
    fn repeated_probes_agree() {
        let first = flag_toggles(IDENTIFICATION);
        let second = flag_toggles(IDENTIFICATION);

        assert_eq!(first, second);
    }
}
