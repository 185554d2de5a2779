//! Owned HANDLE with automatic cleanup

use crate::core::types::{PilotError, PilotResult};
use crate::windows::bindings::kernel32;
use winapi::um::winnt::HANDLE;

/// A non-null Windows HANDLE closed on drop
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Take ownership of a raw handle; null is rejected
    pub fn from_raw(handle: HANDLE) -> PilotResult<Self> {
        if handle.is_null() {
            return Err(PilotError::InvalidHandle("handle is null".to_string()));
        }
        Ok(Handle { handle })
    }

    /// The raw handle, valid for as long as `self` lives
    pub fn as_raw(&self) -> HANDLE {
        self.handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        // SAFETY: the handle is owned and never used after drop
        if let Err(e) = unsafe { kernel32::close_handle(self.handle) } {
            tracing::debug!("{}", e);
        }
    }
}

// SAFETY: process handles may be used from any thread of the owning process
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_rejected() {
        let result = Handle::from_raw(std::ptr::null_mut());
        assert!(matches!(result, Err(PilotError::InvalidHandle(_))));
    }
}
