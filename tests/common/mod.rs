//! Fixtures shared by the integration tests
#![allow(dead_code)]

use memory_pilot::config::profiles::WOW_EXE;
use memory_pilot::config::OffsetProfile;
use memory_pilot::memory::{MemoryClient, MockMemory, ScanOptions};
use memory_pilot::{Address, ProcessArchitecture, Vec2, Vec3};
use std::sync::Arc;

pub const MODULE_BASE: usize = 0x0040_0000;
pub const MODULE_SIZE: usize = 0x0007_0000;
/// Page holding the profile's absolute addresses
pub const ABSOLUTE_PAGE: usize = 0x02CD_5000;

pub fn profile() -> &'static OffsetProfile {
    &WOW_EXE
}

/// A process with `wow.exe` loaded and its offset region zero-filled
pub fn process() -> Arc<MockMemory> {
    let memory = Arc::new(MockMemory::new());
    memory.add_module("Wow.exe", Address::new(MODULE_BASE), MODULE_SIZE);
    memory.map_zeroed(Address::new(MODULE_BASE), MODULE_SIZE);
    memory
}

pub fn client(memory: &Arc<MockMemory>) -> MemoryClient<Arc<MockMemory>> {
    MemoryClient::new(memory.clone(), ProcessArchitecture::X86)
}

/// Write a pose at module-relative offsets
pub fn place_relative(memory: &MockMemory, position: Vec3, facing: Vec2) {
    let p = profile();
    let at = |offset: usize| Address::new(MODULE_BASE + offset);
    memory.write_f32(at(p.position.x), position.x).unwrap();
    memory.write_f32(at(p.position.y), position.y).unwrap();
    memory.write_f32(at(p.position.z), position.z).unwrap();
    memory.write_f32(at(p.facing.x), facing.x).unwrap();
    memory.write_f32(at(p.facing.y), facing.y).unwrap();
}

/// Map the absolute page and write a pose there
pub fn place_absolute(memory: &MockMemory, position: Vec3, facing: Vec2) {
    let abs = &profile().absolute;
    memory.map_zeroed(Address::new(ABSOLUTE_PAGE), 0x1000);
    memory.write_f32(Address::new(abs.position.x), position.x).unwrap();
    memory.write_f32(Address::new(abs.position.y), position.y).unwrap();
    memory.write_f32(Address::new(abs.position.z), position.z).unwrap();
    memory.write_f32(Address::new(abs.facing.x), facing.x).unwrap();
    memory.write_f32(Address::new(abs.facing.y), facing.y).unwrap();
}

/// Scan options covering a single small heap page
pub fn scan_options(start: usize, len: usize, sample: Vec3) -> ScanOptions {
    ScanOptions {
        start_address: Address::new(start),
        end_address: Address::new(start + len),
        block_size: 256,
        alignment: 4,
        tolerance: 1.0,
        max_matches: 3,
        sample,
    }
}
