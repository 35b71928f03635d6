use crate::{ArchitectureClass, Registers, Selectors};

pub(crate) const CLASS: ArchitectureClass = ArchitectureClass::Other;

pub(crate) fn have_cpuid() -> bool {
    false
}

/// # Safety
///
/// The processor must implement `CPUID`, which is never the case here. Since the precondition
/// cannot be met, this panics instead of executing anything.
#[cfg_attr(test, mutants::skip)] // Unreachable by contract.
pub(crate) unsafe fn cpuid(selectors: Selectors) -> Registers {
    unreachable!(
        "CPUID does not exist on this architecture and cannot be invoked with {selectors:?}"
    )
}
