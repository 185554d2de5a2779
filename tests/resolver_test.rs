//! Address resolution against a staged process image

mod common;

use common::*;
use memory_pilot::config::profiles::FMOD_RELATIVE;
use memory_pilot::memory::{MockMemory, ScanOptions};
use memory_pilot::resolver::AddressResolver;
use memory_pilot::telemetry::{TelemetryFault, TelemetryReader, TelemetrySource};
use memory_pilot::{Address, CancelToken, PilotError, PilotResult, Scheme, Vec2, Vec3};
use std::sync::Arc;

const HEAP: usize = 0x1000_0000;
const NORTH: Vec2 = Vec2::new(0.0, 1.0);

fn resolve(memory: &Arc<MockMemory>, scan: &ScanOptions) -> PilotResult<AddressResolver> {
    AddressResolver::initialize(&client(memory), profile(), scan, &CancelToken::new())
}

fn empty_scan() -> ScanOptions {
    scan_options(HEAP, 0x1000, Vec3::new(100.0, 200.0, 10.0))
}

#[test]
fn test_offsets_adopted_when_valid() {
    let memory = process();
    place_relative(&memory, Vec3::new(-171.4, -9339.5, 63.7), NORTH);

    let resolver = resolve(&memory, &empty_scan()).unwrap();
    assert_eq!(resolver.scheme(), Scheme::OffsetDerived);
    assert_eq!(resolver.module_base(), Address::new(MODULE_BASE));
    assert_eq!(resolver.player_base(), Some(Address::new(MODULE_BASE)));
    assert_eq!(resolver.addresses().x, Address::new(MODULE_BASE + 0x65C24));
}

#[test]
fn test_absolute_used_when_offsets_invalid() {
    let memory = process();
    place_absolute(&memory, Vec3::new(12.0, 34.0, 5.0), NORTH);

    let resolver = resolve(&memory, &empty_scan()).unwrap();
    assert_eq!(resolver.scheme(), Scheme::AbsoluteFallback);
    assert_eq!(resolver.addresses().x, Address::new(0x02CD_5C24));
}

#[test]
fn test_scan_used_as_last_resort() {
    let memory = process();
    let sample = Vec3::new(100.0, 200.0, 10.0);
    let x = HEAP + 0x100;
    memory.map_zeroed(Address::new(HEAP), 0x1000);
    memory.write_f32(Address::new(x), 100.25).unwrap();
    memory.write_f32(Address::new(x + 4), 10.5).unwrap();
    memory.write_f32(Address::new(x + 8), 199.75).unwrap();
    memory.write_f32(Address::new(x + 0x10), 1.0).unwrap();

    let resolver = resolve(&memory, &scan_options(HEAP, 0x1000, sample)).unwrap();
    assert_eq!(resolver.scheme(), Scheme::ScanDiscovered);
    assert_eq!(resolver.addresses().x, Address::new(x));

    let mut reader = TelemetryReader::new(client(&memory), resolver);
    let snapshot = reader.read();
    assert!(snapshot.is_valid());
    assert_eq!(snapshot.position(), Vec3::new(100.25, 199.75, 10.5));
    assert_eq!(snapshot.orientation(), Vec2::new(1.0, 0.0));
}

#[test]
fn test_scan_adopted_even_when_facing_reads_zero() {
    let memory = process();
    let sample = Vec3::new(100.0, 200.0, 10.0);
    let x = HEAP + 0x200;
    memory.map_zeroed(Address::new(HEAP), 0x1000);
    memory.write_f32(Address::new(x), 100.0).unwrap();
    memory.write_f32(Address::new(x + 4), 10.0).unwrap();
    memory.write_f32(Address::new(x + 8), 200.0).unwrap();

    let resolver = resolve(&memory, &scan_options(HEAP, 0x1000, sample)).unwrap();
    assert_eq!(resolver.scheme(), Scheme::ScanDiscovered);

    let mut reader = TelemetryReader::new(client(&memory), resolver);
    assert_eq!(reader.read().fault(), Some(TelemetryFault::ZeroOrientation));
    assert_eq!(reader.resolver().scheme(), Scheme::ScanDiscovered);

    memory.write_f32(Address::new(x + 0x14), 1.0).unwrap();
    let snapshot = reader.read();
    assert!(snapshot.is_valid());
    assert_eq!(snapshot.orientation(), Vec2::new(0.0, 1.0));
}

#[test]
fn test_resolution_fails_when_nothing_validates() {
    let memory = process();
    memory.map_zeroed(Address::new(HEAP), 0x1000);

    let result = resolve(&memory, &empty_scan());
    assert!(matches!(result, Err(PilotError::AddressResolutionFailed(_))));
}

#[test]
fn test_missing_module() {
    let memory = Arc::new(MockMemory::new());
    memory.add_module("wowhelper.dll", Address::new(MODULE_BASE), MODULE_SIZE);

    let result = resolve(&memory, &empty_scan());
    assert!(matches!(result, Err(PilotError::ModuleNotFound(name)) if name == "wow.exe"));
}

#[test]
fn test_cancelled_scan() {
    let memory = process();
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = AddressResolver::initialize(&client(&memory), profile(), &empty_scan(), &cancel);
    assert!(matches!(result, Err(PilotError::ScanCancelled)));
}

#[test]
fn test_reader_falls_back_once() {
    let memory = process();
    place_relative(&memory, Vec3::new(1.0, 2.0, 3.0), NORTH);
    let resolver = resolve(&memory, &empty_scan()).unwrap();
    let mut reader = TelemetryReader::new(client(&memory), resolver);
    assert!(reader.read().is_valid());

    // Offsets go stale while the absolute addresses hold the pose
    place_relative(&memory, Vec3::new(1.0, 2.0, 3.0), Vec2::ZERO);
    place_absolute(&memory, Vec3::new(7.0, 8.0, 9.0), NORTH);

    let snapshot = reader.read();
    assert!(snapshot.is_valid());
    assert_eq!(snapshot.position(), Vec3::new(7.0, 8.0, 9.0));
    assert_eq!(reader.resolver().scheme(), Scheme::AbsoluteFallback);
    assert!(reader.last_error().is_none());

    // Absolute is final: an invalid read is reported, not re-resolved
    place_absolute(&memory, Vec3::new(7.0, 8.0, 9.0), Vec2::ZERO);
    let snapshot = reader.read();
    assert!(!snapshot.is_valid());
    assert_eq!(reader.resolver().scheme(), Scheme::AbsoluteFallback);
    assert!(matches!(reader.last_error(), Some(PilotError::InvalidTelemetry(_))));
}

#[test]
fn test_unreadable_offsets_do_not_fall_back() {
    let memory = process();
    place_relative(&memory, Vec3::new(1.0, 2.0, 3.0), NORTH);
    let resolver = resolve(&memory, &empty_scan()).unwrap();
    let mut reader = TelemetryReader::new(client(&memory), resolver);
    assert!(reader.read().is_valid());

    // The module image goes away for a tick while the absolute page is plausible
    memory.unmap_region(Address::new(MODULE_BASE));
    place_absolute(&memory, Vec3::new(7.0, 8.0, 9.0), NORTH);

    let snapshot = reader.read();
    assert!(matches!(snapshot.fault(), Some(TelemetryFault::Unreadable { .. })));
    assert_eq!(reader.resolver().scheme(), Scheme::OffsetDerived);
    assert!(matches!(reader.last_error(), Some(PilotError::ReadFailed { .. })));

    memory.map_zeroed(Address::new(MODULE_BASE), MODULE_SIZE);
    place_relative(&memory, Vec3::new(4.0, 5.0, 6.0), NORTH);
    let snapshot = reader.read();
    assert!(snapshot.is_valid());
    assert_eq!(snapshot.position(), Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(reader.resolver().scheme(), Scheme::OffsetDerived);
    assert!(reader.last_error().is_none());
}

#[test]
fn test_health_follows_pointer_path() {
    let memory = process();
    place_relative(&memory, Vec3::new(1.0, 2.0, 3.0), NORTH);
    let resolver = resolve(&memory, &empty_scan()).unwrap();
    let mut reader = TelemetryReader::new(client(&memory), resolver);
    assert_eq!(reader.read().health(), None);

    // module base + 0xC79CE0 holds a pointer; health sits 0x24 past it
    memory.map_zeroed(Address::new(0x0107_9000), 0x1000);
    memory.write_u32(Address::new(MODULE_BASE + 0x00C7_9CE0), 0x2000_0000).unwrap();
    memory.map_zeroed(Address::new(0x2000_0000), 0x100);
    memory.write_i32(Address::new(0x2000_0024), 250).unwrap();

    let snapshot = reader.read();
    assert!(snapshot.is_valid());
    assert_eq!(snapshot.health(), Some(250));
}

#[test]
fn test_health_anchored_on_player_module_when_offsets_use_another() {
    const FMOD_BASE: usize = 0x2000_0000;
    let memory = process();
    memory.add_module("fmod.dll", Address::new(FMOD_BASE), MODULE_SIZE);
    memory.map_zeroed(Address::new(FMOD_BASE), MODULE_SIZE);
    let at = |offset: usize| Address::new(FMOD_BASE + offset);
    let p = &FMOD_RELATIVE;
    memory.write_f32(at(p.position.x), 1.0).unwrap();
    memory.write_f32(at(p.position.y), 2.0).unwrap();
    memory.write_f32(at(p.position.z), 3.0).unwrap();
    memory.write_f32(at(p.facing.y), 1.0).unwrap();

    // The player module's pointer leads to the real health field
    memory.map_zeroed(Address::new(0x0107_9000), 0x1000);
    memory.write_u32(Address::new(MODULE_BASE + 0x00C7_9CE0), 0x3000_0000).unwrap();
    memory.map_zeroed(Address::new(0x3000_0000), 0x100);
    memory.write_i32(Address::new(0x3000_0024), 250).unwrap();

    // The same offset from fmod.dll leads somewhere else entirely
    memory.map_zeroed(Address::new(FMOD_BASE + 0x00C7_9000), 0x1000);
    memory.write_u32(Address::new(FMOD_BASE + 0x00C7_9CE0), 0x3100_0000).unwrap();
    memory.map_zeroed(Address::new(0x3100_0000), 0x100);
    memory.write_i32(Address::new(0x3100_0024), 999).unwrap();

    let resolver =
        AddressResolver::initialize(&client(&memory), &FMOD_RELATIVE, &empty_scan(), &CancelToken::new())
            .unwrap();
    assert_eq!(resolver.scheme(), Scheme::OffsetDerived);
    assert_eq!(resolver.module_base(), Address::new(FMOD_BASE));
    assert_eq!(resolver.player_base(), Some(Address::new(MODULE_BASE)));

    let mut reader = TelemetryReader::new(client(&memory), resolver);
    let snapshot = reader.read();
    assert!(snapshot.is_valid());
    assert_eq!(snapshot.position(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(snapshot.health(), Some(250));
}
