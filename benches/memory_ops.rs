use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memory_pilot::config::profiles::WOW_EXE;
use memory_pilot::memory::{MemoryClient, MockMemory, ScanOptions};
use memory_pilot::navigation::{shared, Command, NavigationController, NavigationTuning, Waypoint, WaypointPath};
use memory_pilot::resolver::AddressResolver;
use memory_pilot::telemetry::{capture, TelemetrySnapshot};
use memory_pilot::{Address, CancelToken, ProcessArchitecture, Vec2, Vec3};

const BASE: usize = 0x0040_0000;

fn staged_process() -> MemoryClient<MockMemory> {
    let memory = MockMemory::new();
    memory.add_module("wow.exe", Address::new(BASE), 0x70000);
    memory.map_zeroed(Address::new(BASE), 0x70000);
    let at = |offset: usize| Address::new(BASE + offset);
    memory.write_f32(at(WOW_EXE.position.x), -171.4).unwrap();
    memory.write_f32(at(WOW_EXE.position.y), -9339.5).unwrap();
    memory.write_f32(at(WOW_EXE.position.z), 63.7).unwrap();
    memory.write_f32(at(WOW_EXE.facing.x), 0.6).unwrap();
    memory.write_f32(at(WOW_EXE.facing.y), 0.8).unwrap();
    MemoryClient::new(memory, ProcessArchitecture::X86)
}

fn benchmark_reads(c: &mut Criterion) {
    let client = staged_process();
    let x = Address::new(BASE + WOW_EXE.position.x);

    c.bench_function("read_f32", |b| {
        b.iter(|| black_box(client.read_f32(black_box(x))));
    });

    c.bench_function("read_unmapped", |b| {
        b.iter(|| black_box(client.read_f32(black_box(Address::new(0x10)))));
    });

    // Three-level chain through the module image
    let memory = client.memory();
    memory.write_u32(Address::new(BASE + 0x100), (BASE + 0x200) as u32).unwrap();
    memory.write_u32(Address::new(BASE + 0x210), (BASE + 0x300) as u32).unwrap();
    memory.write_u32(Address::new(BASE + 0x320), (BASE + 0x400) as u32).unwrap();
    let base = Address::new(BASE + 0x100);

    c.bench_function("pointer_chain_3", |b| {
        b.iter(|| black_box(client.resolve_pointer_chain(base, black_box(&[0x10, 0x20, 0x24]))));
    });
}

fn benchmark_capture(c: &mut Criterion) {
    let client = staged_process();
    let resolver =
        match AddressResolver::initialize(&client, &WOW_EXE, &ScanOptions::default(), &CancelToken::new()) {
            Ok(resolver) => resolver,
            Err(e) => panic!("staged process did not resolve: {}", e),
        };

    c.bench_function("capture_snapshot", |b| {
        b.iter(|| black_box(capture(&client, &resolver)));
    });
}

fn benchmark_decide(c: &mut Criterion) {
    let path: WaypointPath = (0..100).map(|i| Waypoint::new(i as f32 * 10.0, 0.0)).collect();
    let mut nav = match NavigationController::new(shared(path), NavigationTuning::default()) {
        Ok(nav) => nav,
        Err(e) => panic!("{}", e),
    };
    let snapshot = TelemetrySnapshot::from_raw(Vec3::new(-50.0, 3.0, 0.0), Vec2::new(0.6, 0.8), Some(100));

    c.bench_function("controller_decide", |b| {
        b.iter(|| black_box(nav.decide(black_box(&snapshot), Command::Resume)));
    });
}

criterion_group!(benches, benchmark_reads, benchmark_capture, benchmark_decide);
criterion_main!(benches);
