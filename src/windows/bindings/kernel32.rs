//! Kernel32.dll bindings for process and memory operations

use crate::core::types::{Address, PilotError, PilotResult, ProcessId};
use std::io;
use winapi::shared::minwindef::{DWORD, FALSE, LPVOID};
use winapi::um::handleapi::CloseHandle;
use winapi::um::memoryapi::ReadProcessMemory;
use winapi::um::processthreadsapi::OpenProcess;
use winapi::um::winnt::HANDLE;

/// Safe wrapper for OpenProcess
pub fn open_process(pid: ProcessId, desired_access: DWORD) -> PilotResult<HANDLE> {
    // SAFETY: OpenProcess has no pointer arguments
    let handle = unsafe { OpenProcess(desired_access, FALSE, pid) };
    if handle.is_null() {
        Err(PilotError::ProcessNotFound(format!(
            "PID {}: {}",
            pid,
            io::Error::last_os_error()
        )))
    } else {
        Ok(handle)
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle that is not used afterwards
pub unsafe fn close_handle(handle: HANDLE) -> PilotResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(PilotError::WindowsApi(format!(
            "CloseHandle failed: {}",
            io::Error::last_os_error()
        )))
    } else {
        Ok(())
    }
}

/// Safe wrapper for ReadProcessMemory, returning the number of bytes copied
///
/// # Safety
/// The handle must be a valid process handle with `PROCESS_VM_READ`
pub unsafe fn read_process_memory(
    handle: HANDLE,
    address: usize,
    buffer: &mut [u8],
) -> PilotResult<usize> {
    let mut bytes_read = 0;

    let result = ReadProcessMemory(
        handle,
        address as LPVOID,
        buffer.as_mut_ptr() as LPVOID,
        buffer.len(),
        &mut bytes_read,
    );

    if result == FALSE {
        Err(PilotError::read_failed(
            Address::new(address),
            format!("ReadProcessMemory failed: {}", io::Error::last_os_error()),
        ))
    } else {
        Ok(bytes_read)
    }
}
