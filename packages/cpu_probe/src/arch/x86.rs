use std::arch::asm;

use crate::arch::flags::{ALIGNMENT_CHECK, IDENTIFICATION, flag_toggles};
use crate::{ArchitectureClass, Registers, Selectors};

pub(crate) const CLASS: ArchitectureClass = ArchitectureClass::Legacy32;

/// Probes for `CPUID` in two stages.
///
/// A processor that cannot toggle AC predates the 486 and cannot have `CPUID`, whatever the ID
/// bit appears to do. Only after AC passes do we trust the ID toggle.
pub(crate) fn have_cpuid() -> bool {
    flag_toggles(ALIGNMENT_CHECK) && flag_toggles(IDENTIFICATION)
}

/// # Safety
///
/// The processor must implement `CPUID`.
pub(crate) unsafe fn cpuid(selectors: Selectors) -> Registers {
    let eax: u32;
    let ebx: u32;
    let ecx: u32;
    let edx: u32;

    // EBX may be claimed by the compiler as the PIC base register, so it is not named as an
    // operand. We park it in a scratch register and swap the CPUID result out of it afterwards.
    //
    // SAFETY: Caller guarantees the processor implements CPUID. EBX is restored before the block
    // ends.
    unsafe {
        asm!(
            "mov {scratch}, ebx",
            "cpuid",
            "xchg {scratch}, ebx",
            inout("eax") selectors.leaf => eax,
            scratch = out(reg) ebx,
            inout("ecx") selectors.subleaf => ecx,
            lateout("edx") edx,
            options(nostack, nomem, preserves_flags),
        );
    }

    Registers { eax, ebx, ecx, edx }
}
