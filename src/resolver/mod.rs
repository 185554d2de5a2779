//! Address resolution for the telemetry fields
//!
//! Resolution runs once before navigation starts and tries three schemes in
//! order:
//! 1. module base + the profile's offset table
//! 2. the profile's fixed absolute addresses
//! 3. a bounded scan for the known sample coordinates
//!
//! A scheme is adopted only after a snapshot read through it validates (the
//! scan is adopted on its first confirmed match, with a warning if its facing
//! fields do not validate yet). After initialization the only scheme change
//! is the one-shot fall back from offsets to absolute addresses, taken when
//! the fields read but hold implausible values. A read failure never triggers
//! it; the scan never runs again.

use crate::config::OffsetProfile;
use crate::core::types::{Address, PilotError, PilotResult, Scheme};
use crate::core::CancelToken;
use crate::memory::scanner::{Y_FROM_X, Z_FROM_X};
use crate::memory::{CoordinateScanner, MemoryClient, ProcessMemory, ScanOptions, TargetProcess};
use crate::process::find_module;
use crate::telemetry::capture;
use tracing::{info, warn};

/// Addresses of the position and facing fields under one scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressSet {
    pub scheme: Scheme,
    pub x: Address,
    pub y: Address,
    pub z: Address,
    pub facing_x: Address,
    pub facing_y: Address,
}

impl AddressSet {
    /// Module base plus the profile's relative offsets
    pub fn offset_derived(profile: &OffsetProfile, module_base: Address) -> PilotResult<Self> {
        Ok(AddressSet {
            scheme: Scheme::OffsetDerived,
            x: module_base.checked_add(profile.position.x)?,
            y: module_base.checked_add(profile.position.y)?,
            z: module_base.checked_add(profile.position.z)?,
            facing_x: module_base.checked_add(profile.facing.x)?,
            facing_y: module_base.checked_add(profile.facing.y)?,
        })
    }

    /// The profile's fixed absolute addresses
    pub fn absolute(profile: &OffsetProfile) -> Self {
        let abs = &profile.absolute;
        AddressSet {
            scheme: Scheme::AbsoluteFallback,
            x: Address::new(abs.position.x),
            y: Address::new(abs.position.y),
            z: Address::new(abs.position.z),
            facing_x: Address::new(abs.facing.x),
            facing_y: Address::new(abs.facing.y),
        }
    }

    /// Layout around an X coordinate found by the scan
    pub fn scan_discovered(profile: &OffsetProfile, x: Address) -> PilotResult<Self> {
        Ok(AddressSet {
            scheme: Scheme::ScanDiscovered,
            x,
            y: x.checked_add(Y_FROM_X)?,
            z: x.checked_add(Z_FROM_X)?,
            facing_x: x.checked_add(profile.facing_from_x.x)?,
            facing_y: x.checked_add(profile.facing_from_x.y)?,
        })
    }
}

/// Resolved addresses for one attached process
#[derive(Debug, Clone)]
pub struct AddressResolver {
    profile: &'static OffsetProfile,
    module_base: Address,
    player_base: Option<Address>,
    addresses: AddressSet,
}

impl AddressResolver {
    /// Resolve a working address set.
    ///
    /// Fails with `ModuleNotFound` when the profile's module is not loaded,
    /// `ScanCancelled` when `cancel` fires during the scan, and
    /// `AddressResolutionFailed` when no scheme produces valid telemetry.
    pub fn initialize<M: TargetProcess>(
        client: &MemoryClient<M>,
        profile: &'static OffsetProfile,
        scan: &ScanOptions,
        cancel: &CancelToken,
    ) -> PilotResult<Self> {
        let modules = client.memory().modules()?;
        let module_base = find_module(&modules, profile.module_name)?.base_address;
        info!(
            "Using {} base {} (profile {})",
            profile.module_name, module_base, profile.name
        );

        let player_base = match find_module(&modules, profile.player_module_name) {
            Ok(module) => Some(module.base_address),
            Err(e) => {
                warn!("Player fields unavailable: {}", e);
                None
            }
        };

        let mut resolver = AddressResolver {
            profile,
            module_base,
            player_base,
            addresses: AddressSet::offset_derived(profile, module_base)?,
        };
        if resolver.validates(client) {
            info!("Adopted offset-derived addresses, X at {}", resolver.addresses.x);
            return Ok(resolver);
        }

        warn!("Offset-derived addresses are invalid, trying absolute addresses");
        resolver.addresses = AddressSet::absolute(profile);
        if resolver.validates(client) {
            info!("Adopted absolute addresses, X at {}", resolver.addresses.x);
            return Ok(resolver);
        }

        warn!("Absolute addresses are invalid, scanning for coordinates");
        let matches = CoordinateScanner::new(client, scan).scan(cancel)?;
        let x = matches.first().copied().ok_or_else(|| {
            PilotError::AddressResolutionFailed(format!(
                "no scheme produced valid telemetry and the scan of {}..{} found no match",
                scan.start_address, scan.end_address
            ))
        })?;
        resolver.addresses = AddressSet::scan_discovered(profile, x)?;
        info!(
            "Adopted scan-discovered addresses, X at {} ({} candidate(s))",
            x,
            matches.len()
        );
        if !resolver.validates(client) {
            warn!(
                "Scan-discovered addresses at {} do not read as valid telemetry yet",
                x
            );
        }
        Ok(resolver)
    }

    fn validates<M: ProcessMemory>(&self, client: &MemoryClient<M>) -> bool {
        let snapshot = capture(client, self);
        if let Some(fault) = snapshot.fault() {
            tracing::debug!("{} addresses rejected: {}", self.addresses.scheme, fault);
        }
        snapshot.is_valid()
    }

    pub fn scheme(&self) -> Scheme {
        self.addresses.scheme
    }

    pub fn addresses(&self) -> &AddressSet {
        &self.addresses
    }

    pub fn profile(&self) -> &'static OffsetProfile {
        self.profile
    }

    pub fn module_base(&self) -> Address {
        self.module_base
    }

    /// Base of the module holding the player fields, if it is loaded
    pub fn player_base(&self) -> Option<Address> {
        self.player_base
    }

    /// Follow the health pointer path to the current health field.
    ///
    /// The path is anchored on the player module, which need not be the
    /// module the position offsets are relative to.
    pub fn health_address<M: ProcessMemory>(&self, client: &MemoryClient<M>) -> PilotResult<Address> {
        let path = &self.profile.health;
        let player_base = self.player_base.ok_or_else(|| {
            PilotError::ModuleNotFound(self.profile.player_module_name.to_string())
        })?;
        let base = player_base.checked_add(path.base_offset)?;
        client.resolve_pointer_chain(base, path.chain)
    }

    /// Switch from offset-derived to absolute addresses.
    ///
    /// Returns `true` if the scheme changed; any other scheme is final. Callers
    /// invoke this only for implausible values, never for failed reads.
    pub fn fall_back(&mut self) -> bool {
        if self.addresses.scheme != Scheme::OffsetDerived {
            return false;
        }
        warn!(
            "Telemetry invalid under offset-derived addresses, switching to absolute addresses"
        );
        self.addresses = AddressSet::absolute(self.profile);
        true
    }
}
