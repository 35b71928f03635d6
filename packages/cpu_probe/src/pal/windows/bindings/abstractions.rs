use std::fmt::Debug;

use windows::Win32::System::SystemInformation::SYSTEM_INFO;

/// Bindings for FFI calls into the Windows API.
///
/// All PAL FFI calls must go through this trait, enabling them to be mocked.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    fn get_system_info(&self) -> SYSTEM_INFO;
}
