mod platform;

#[cfg(any(miri, not(any(unix, windows))))]
pub(crate) use platform::*;
