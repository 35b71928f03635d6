use std::arch::asm;

use crate::{ArchitectureClass, Registers, Selectors};

pub(crate) const CLASS: ArchitectureClass = ArchitectureClass::Modern64;

/// Every x86_64 processor implements `CPUID`.
#[cfg_attr(test, mutants::skip)] // Constant, nothing to mutate meaningfully.
pub(crate) fn have_cpuid() -> bool {
    true
}

/// # Safety
///
/// The processor must implement `CPUID`. Always true on this architecture but the signature is
/// kept identical across architectures.
pub(crate) unsafe fn cpuid(selectors: Selectors) -> Registers {
    let eax: u32;
    let ebx: u32;
    let ecx: u32;
    let edx: u32;

    // RBX is reserved by LLVM, so it cannot be named as an operand. We park it in a scratch
    // register and swap the CPUID result out of it afterwards.
    //
    // SAFETY: Caller guarantees the processor implements CPUID. RBX is restored before the block
    // ends.
    unsafe {
        asm!(
            "mov {scratch:r}, rbx",
            "cpuid",
            "xchg {scratch:r}, rbx",
            inout("eax") selectors.leaf => eax,
            scratch = out(reg) ebx,
            inout("ecx") selectors.subleaf => ecx,
            lateout("edx") edx,
            options(nostack, nomem, preserves_flags),
        );
    }

    Registers { eax, ebx, ecx, edx }
}
