//! In-memory stand-in for a target process
//!
//! `MockMemory` holds a set of mapped regions and a module list. Reads that are
//! not fully contained in one region fail exactly like an uncommitted page in a
//! live process. Regions can be rewritten between reads through a shared
//! reference, so a test can move the "player" while a reader owns a clone.

use super::{ProcessMemory, TargetProcess};
use crate::core::types::{Address, ModuleInfo, PilotError, PilotResult};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// Mock address space
#[derive(Debug, Default)]
pub struct MockMemory {
    regions: RwLock<BTreeMap<usize, Vec<u8>>>,
    modules: RwLock<Vec<ModuleInfo>>,
}

impl MockMemory {
    /// Create an empty address space
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a region starting at `base`, replacing any region with the same base
    pub fn map_region(&self, base: Address, data: Vec<u8>) {
        self.regions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(base.as_usize(), data);
    }

    /// Map a zero-filled region
    pub fn map_zeroed(&self, base: Address, size: usize) {
        self.map_region(base, vec![0u8; size]);
    }

    /// Remove the region starting at `base`
    pub fn unmap_region(&self, base: Address) {
        self.regions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&base.as_usize());
    }

    /// Register a loaded module
    pub fn add_module(&self, name: &str, base: Address, size: usize) {
        self.modules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ModuleInfo::new(name, base, size));
    }

    /// Overwrite bytes inside an existing region.
    ///
    /// Fails with `InvalidAddress` if the write is not contained in one mapped
    /// region; regions are never grown by a write.
    pub fn write_bytes(&self, address: Address, bytes: &[u8]) -> PilotResult<()> {
        let mut regions = self.regions.write().unwrap_or_else(PoisonError::into_inner);
        let addr = address.as_usize();
        let end = addr.checked_add(bytes.len()).ok_or_else(|| {
            PilotError::InvalidAddress(format!("write at {} overflows", address))
        })?;

        match regions.range_mut(..=addr).next_back() {
            Some((base, data)) if end <= base + data.len() => {
                let start = addr - base;
                data[start..start + bytes.len()].copy_from_slice(bytes);
                Ok(())
            }
            _ => Err(PilotError::InvalidAddress(format!(
                "write at {} is outside every mapped region",
                address
            ))),
        }
    }

    pub fn write_f32(&self, address: Address, value: f32) -> PilotResult<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_i32(&self, address: Address, value: i32) -> PilotResult<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_i64(&self, address: Address, value: i64) -> PilotResult<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u32(&self, address: Address, value: u32) -> PilotResult<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u64(&self, address: Address, value: u64) -> PilotResult<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }
}

impl ProcessMemory for MockMemory {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> PilotResult<()> {
        let regions = self.regions.read().unwrap_or_else(PoisonError::into_inner);
        let addr = address.as_usize();
        let end = addr
            .checked_add(buffer.len())
            .ok_or_else(|| PilotError::read_failed(address, "range overflows"))?;

        match regions.range(..=addr).next_back() {
            Some((base, data)) if end <= base + data.len() => {
                let start = addr - base;
                buffer.copy_from_slice(&data[start..start + buffer.len()]);
                Ok(())
            }
            _ => Err(PilotError::read_failed(address, "region not mapped")),
        }
    }
}

impl TargetProcess for MockMemory {
    fn modules(&self) -> PilotResult<Vec<ModuleInfo>> {
        Ok(self
            .modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_inside_region() {
        let memory = MockMemory::new();
        memory.map_region(Address::new(0x1000), (0u8..32).collect());

        let mut buffer = [0u8; 4];
        memory.read_memory(Address::new(0x1010), &mut buffer).unwrap();
        assert_eq!(buffer, [16, 17, 18, 19]);
    }

    #[test]
    fn test_read_crossing_region_end_fails() {
        let memory = MockMemory::new();
        memory.map_zeroed(Address::new(0x1000), 16);

        let mut buffer = [0u8; 4];
        assert!(memory.read_memory(Address::new(0x100E), &mut buffer).is_err());
        assert!(memory.read_memory(Address::new(0x0FFF), &mut buffer).is_err());
    }

    #[test]
    fn test_write_then_read() {
        let memory = MockMemory::new();
        memory.map_zeroed(Address::new(0x2000), 64);
        memory.write_f32(Address::new(0x2004), -171.408).unwrap();

        let mut buffer = [0u8; 4];
        memory.read_memory(Address::new(0x2004), &mut buffer).unwrap();
        assert_eq!(f32::from_le_bytes(buffer), -171.408);
    }

    #[test]
    fn test_write_outside_regions_fails() {
        let memory = MockMemory::new();
        memory.map_zeroed(Address::new(0x2000), 8);

        assert!(memory.write_u32(Address::new(0x2004), 7).is_ok());
        assert!(matches!(
            memory.write_u32(Address::new(0x2006), 7),
            Err(PilotError::InvalidAddress(_))
        ));
        assert!(memory.write_f32(Address::new(0x9000), 1.0).is_err());
        assert!(memory.write_bytes(Address::new(usize::MAX), &[1, 2]).is_err());
    }

    #[test]
    fn test_unmap() {
        let memory = MockMemory::new();
        memory.map_zeroed(Address::new(0x2000), 8);
        memory.unmap_region(Address::new(0x2000));

        let mut buffer = [0u8; 1];
        assert!(memory.read_memory(Address::new(0x2000), &mut buffer).is_err());
    }

    #[test]
    fn test_modules() {
        let memory = MockMemory::new();
        memory.add_module("Wow.exe", Address::new(0x400000), 0x1000);
        let modules = memory.modules().unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "Wow.exe");
    }
}
