use std::fmt::Debug;

use windows::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};

use crate::pal::windows::Bindings;

/// FFI bindings that target the real operating system that the build is targeting.
///
/// You would only use different bindings in PAL unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

// Real OS bindings are excluded from coverage measurement because they are tested via the real
// platform tests running on actual Windows.
#[cfg_attr(coverage_nightly, coverage(off))]
impl Bindings for BuildTargetBindings {
    fn get_system_info(&self) -> SYSTEM_INFO {
        let mut info = SYSTEM_INFO::default();

        // SAFETY: The output buffer is a valid SYSTEM_INFO. The call cannot fail.
        unsafe {
            GetSystemInfo(&raw mut info);
        }

        info
    }
}
