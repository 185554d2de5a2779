//! Bounded linear scan for a known coordinate triple
//!
//! The scan walks `[start, end)` in fixed-size blocks. Inside each readable
//! block every aligned offset is tested as an X coordinate against the sample;
//! a hit is confirmed by reading Y at +8 and Z at +4. Unreadable blocks are
//! skipped. The cancellation token is checked between blocks.

use super::{MemoryClient, ProcessMemory};
use crate::core::types::{Address, PilotError, PilotResult, Vec3};
use crate::core::CancelToken;
use tracing::{debug, info};

/// Byte offset of Y relative to X in the position record
pub const Y_FROM_X: usize = 8;
/// Byte offset of Z relative to X in the position record
pub const Z_FROM_X: usize = 4;

const PROGRESS_INTERVAL: usize = 100 * 1024 * 1024;

/// Options for the coordinate scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// First address scanned
    pub start_address: Address,
    /// Scan stops before this address
    pub end_address: Address,
    /// Bytes read per block
    pub block_size: usize,
    /// Candidate stride inside a block (1, 2, 4, 8)
    pub alignment: usize,
    /// Absolute tolerance applied to each component
    pub tolerance: f32,
    /// Stop after this many confirmed matches
    pub max_matches: usize,
    /// Coordinates the player is known to be standing at
    pub sample: Vec3,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            start_address: Address::new(0x0040_0000),
            end_address: Address::new(0x7FFF_FFFF),
            block_size: 4096,
            alignment: 4,
            tolerance: 1.0,
            max_matches: 3,
            sample: Vec3::new(-171.408_0, -9339.46, 63.685_944),
        }
    }
}

/// Coordinate scanner over a target's address space
pub struct CoordinateScanner<'a, M> {
    client: &'a MemoryClient<M>,
    options: &'a ScanOptions,
}

impl<'a, M: ProcessMemory> CoordinateScanner<'a, M> {
    /// Create a new scanner
    pub fn new(client: &'a MemoryClient<M>, options: &'a ScanOptions) -> Self {
        CoordinateScanner { client, options }
    }

    /// Run the scan and return the X addresses of confirmed matches, in
    /// ascending address order, at most `max_matches` of them.
    pub fn scan(&self, cancel: &CancelToken) -> PilotResult<Vec<Address>> {
        let opts = self.options;
        let start = opts.start_address.as_usize();
        let end = opts.end_address.as_usize();
        let block_size = opts.block_size.max(4);
        let stride = opts.alignment.max(1);

        info!(
            "Scanning {}..{} for coordinates near ({}, {}, {})",
            opts.start_address, opts.end_address, opts.sample.x, opts.sample.y, opts.sample.z
        );

        let mut matches = Vec::new();
        let mut current = start;

        while current < end && matches.len() < opts.max_matches {
            if cancel.is_cancelled() {
                info!("Coordinate scan cancelled at {}", Address::new(current));
                return Err(PilotError::ScanCancelled);
            }

            let scanned = current - start;
            if scanned > 0 && scanned % PROGRESS_INTERVAL == 0 {
                info!("Scanned {} MB", scanned / (1024 * 1024));
            }

            let len = block_size.min(end - current);
            if let Ok(block) = self.client.read_bytes(Address::new(current), len) {
                self.scan_block(current, &block, &mut matches);
            }

            current = match current.checked_add(block_size) {
                Some(next) => next,
                None => break,
            };
        }

        matches.truncate(opts.max_matches);
        debug!("Coordinate scan finished with {} match(es)", matches.len());
        Ok(matches)
    }

    fn scan_block(&self, block_base: usize, block: &[u8], matches: &mut Vec<Address>) {
        let opts = self.options;
        if block.len() < 4 {
            return;
        }

        for i in (0..=block.len() - 4).step_by(opts.alignment.max(1)) {
            let value = f32::from_le_bytes([block[i], block[i + 1], block[i + 2], block[i + 3]]);
            if !within(value, opts.sample.x, opts.tolerance) {
                continue;
            }

            let candidate = Address::new(block_base + i);
            if self.confirm(candidate) {
                info!("Found coordinate triple at {}", candidate);
                matches.push(candidate);
                if matches.len() >= opts.max_matches {
                    return;
                }
            }
        }
    }

    fn confirm(&self, x_address: Address) -> bool {
        let opts = self.options;
        let y = self.client.read_f32(x_address.offset(Y_FROM_X as isize));
        let z = self.client.read_f32(x_address.offset(Z_FROM_X as isize));
        matches!(
            (y, z),
            (Ok(y), Ok(z)) if within(y, opts.sample.y, opts.tolerance) && within(z, opts.sample.z, opts.tolerance)
        )
    }
}

fn within(value: f32, expected: f32, tolerance: f32) -> bool {
    (value - expected).abs() < tolerance
}
