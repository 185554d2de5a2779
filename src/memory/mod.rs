//! Memory access for the target process
//!
//! This module provides:
//! - The OS read facility as a trait (`ProcessMemory`), plus module listing (`TargetProcess`)
//! - Fail-soft typed reads and pointer-chain resolution (`MemoryClient`)
//! - The bounded coordinate scan used as the last resolution fallback
//! - An in-memory address space for tests and benchmarks

pub mod mock;
pub mod reader;
pub mod scanner;

pub use mock::MockMemory;
pub use reader::MemoryClient;
pub use scanner::{CoordinateScanner, ScanOptions};

use crate::core::types::{Address, ModuleInfo, PilotResult};
use std::sync::Arc;

/// Raw read access to another process's address space.
///
/// Implementations must either fill `buffer` completely or return
/// `PilotError::ReadFailed`; partial reads are failures.
pub trait ProcessMemory {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> PilotResult<()>;
}

/// A process whose loaded modules can be listed
pub trait TargetProcess: ProcessMemory {
    fn modules(&self) -> PilotResult<Vec<ModuleInfo>>;
}

impl<T: ProcessMemory + ?Sized> ProcessMemory for &T {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> PilotResult<()> {
        (**self).read_memory(address, buffer)
    }
}

impl<T: ProcessMemory + ?Sized> ProcessMemory for Arc<T> {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> PilotResult<()> {
        (**self).read_memory(address, buffer)
    }
}

impl<T: TargetProcess + ?Sized> TargetProcess for &T {
    fn modules(&self) -> PilotResult<Vec<ModuleInfo>> {
        (**self).modules()
    }
}

impl<T: TargetProcess + ?Sized> TargetProcess for Arc<T> {
    fn modules(&self) -> PilotResult<Vec<ModuleInfo>> {
        (**self).modules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_memory_forwards_reads() {
        let memory = Arc::new(MockMemory::new());
        memory.map_region(Address::new(0x1000), vec![7u8; 16]);

        let mut buffer = [0u8; 4];
        memory.clone().read_memory(Address::new(0x1004), &mut buffer).unwrap();
        assert_eq!(buffer, [7, 7, 7, 7]);

        let by_ref: &MockMemory = &memory;
        assert!(by_ref.read_memory(Address::new(0x2000), &mut buffer).is_err());
    }
}
