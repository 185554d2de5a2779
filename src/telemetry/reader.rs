//! Per-tick telemetry reads through the resolved addresses

use super::player::{read_player_info, PlayerInfo};
use super::snapshot::{TelemetryFault, TelemetrySnapshot};
use super::TelemetrySource;
use crate::core::types::{Address, PilotError, PilotResult, Vec2, Vec3};
use crate::memory::{MemoryClient, ProcessMemory};
use crate::resolver::{AddressResolver, AddressSet};
use tracing::{debug, trace};

/// Read one snapshot through the resolver's current address set.
///
/// Health is read through the profile's pointer path; a broken chain leaves
/// health empty without invalidating the snapshot.
pub fn capture<M: ProcessMemory>(
    client: &MemoryClient<M>,
    resolver: &AddressResolver,
) -> TelemetrySnapshot {
    let (position, facing) = match read_pose(client, resolver.addresses()) {
        Ok(pose) => pose,
        Err(address) => return TelemetrySnapshot::unreadable(address),
    };

    let health = match read_health(client, resolver) {
        Ok(health) => Some(health),
        Err(e) => {
            trace!("Health unavailable: {}", e);
            None
        }
    };

    TelemetrySnapshot::from_raw(position, facing, health)
}

/// Raw position and facing, or the first address that failed to read
fn read_pose<M: ProcessMemory>(
    client: &MemoryClient<M>,
    set: &AddressSet,
) -> Result<(Vec3, Vec2), Address> {
    let read = |address: Address| client.read_f32(address).map_err(|_| address);
    let position = Vec3::new(read(set.x)?, read(set.y)?, read(set.z)?);
    let facing = Vec2::new(read(set.facing_x)?, read(set.facing_y)?);
    Ok((position, facing))
}

fn read_health<M: ProcessMemory>(
    client: &MemoryClient<M>,
    resolver: &AddressResolver,
) -> PilotResult<i32> {
    let address = resolver.health_address(client)?;
    client.read_i32(address)
}

/// Telemetry source backed by a live (or mock) process
#[derive(Debug)]
pub struct TelemetryReader<M> {
    client: MemoryClient<M>,
    resolver: AddressResolver,
    last_error: Option<PilotError>,
}

impl<M: ProcessMemory> TelemetryReader<M> {
    pub fn new(client: MemoryClient<M>, resolver: AddressResolver) -> Self {
        TelemetryReader {
            client,
            resolver,
            last_error: None,
        }
    }

    pub fn client(&self) -> &MemoryClient<M> {
        &self.client
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    /// The most recent failed read, cleared by the next valid one
    pub fn last_error(&self) -> Option<&PilotError> {
        self.last_error.as_ref()
    }

    /// Read the status fields of the player, if their module is loaded
    pub fn player_info(&self) -> Option<PlayerInfo> {
        let base = self.resolver.player_base()?;
        Some(read_player_info(&self.client, base, &self.resolver.profile().player))
    }
}

impl<M: ProcessMemory> TelemetrySource for TelemetryReader<M> {
    fn read(&mut self) -> TelemetrySnapshot {
        let mut snapshot = capture(&self.client, &self.resolver);

        // An unreadable page is transient; only garbage values justify the switch
        let implausible = matches!(
            snapshot.fault(),
            Some(fault) if !matches!(fault, TelemetryFault::Unreadable { .. })
        );
        if implausible && self.resolver.fall_back() {
            snapshot = capture(&self.client, &self.resolver);
        }

        match snapshot.fault() {
            Some(fault) => {
                debug!("Invalid telemetry under {}: {}", self.resolver.scheme(), fault);
                self.last_error = Some(fault.to_error());
            }
            None => self.last_error = None,
        }
        snapshot
    }
}
