//! Read-only process handle with RAII semantics

use crate::core::types::{Address, ModuleInfo, PilotError, PilotResult, ProcessId};
use crate::memory::{ProcessMemory, TargetProcess};
use crate::windows::bindings::{kernel32, psapi};
use crate::windows::Handle;
use std::fmt;
use winapi::shared::minwindef::HMODULE;
use winapi::um::winnt::{HANDLE, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ};

/// Handle to the target process, opened for memory reads and module queries
pub struct ProcessHandle {
    handle: Handle,
    pid: ProcessId,
}

impl ProcessHandle {
    /// Open a process for reading memory
    pub fn open_for_read(pid: ProcessId) -> PilotResult<Self> {
        let raw = kernel32::open_process(pid, PROCESS_QUERY_INFORMATION | PROCESS_VM_READ)?;
        Ok(ProcessHandle {
            handle: Handle::from_raw(raw)?,
            pid,
        })
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }
}

impl ProcessMemory for ProcessHandle {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> PilotResult<()> {
        // SAFETY: the handle was opened with PROCESS_VM_READ and lives as long as self
        let read = unsafe {
            kernel32::read_process_memory(self.handle.as_raw(), address.as_usize(), buffer)?
        };
        if read != buffer.len() {
            return Err(PilotError::read_failed(
                address,
                format!("partial read ({} of {} bytes)", read, buffer.len()),
            ));
        }
        Ok(())
    }
}

impl TargetProcess for ProcessHandle {
    fn modules(&self) -> PilotResult<Vec<ModuleInfo>> {
        let raw = self.handle.as_raw();
        // SAFETY: the handle was opened with PROCESS_QUERY_INFORMATION | PROCESS_VM_READ
        let modules = unsafe { psapi::enum_process_modules(raw)? };

        let mut infos = Vec::with_capacity(modules.len());
        for module in modules {
            // SAFETY: module handles come from EnumProcessModules on the same process
            match unsafe { module_info(raw, module) } {
                Ok(info) => infos.push(info),
                Err(e) => tracing::trace!("Skipping module {:p}: {}", module, e),
            }
        }
        Ok(infos)
    }
}

unsafe fn module_info(process: HANDLE, module: HMODULE) -> PilotResult<ModuleInfo> {
    let name = psapi::get_module_base_name(process, module)?;
    let info = psapi::get_module_information(process, module)?;
    Ok(ModuleInfo::new(
        name,
        Address::new(info.lpBaseOfDll as usize),
        info.SizeOfImage as usize,
    ))
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .finish()
    }
}
