//! Target address type and the provenance of resolved addresses

use super::error::{PilotError, PilotResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the target process's address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub usize);

impl Address {
    /// Creates a new address from a usize value
    pub const fn new(value: usize) -> Self {
        Address(value)
    }

    /// Creates a null address (0x0)
    pub const fn null() -> Self {
        Address(0)
    }

    /// Checks if the address is null
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Adds a signed byte offset, wrapping like pointer arithmetic in the target
    pub const fn offset(&self, offset: isize) -> Self {
        Address(self.0.wrapping_add_signed(offset))
    }

    /// Adds an unsigned byte offset, failing on overflow
    pub fn checked_add(&self, offset: usize) -> PilotResult<Self> {
        self.0
            .checked_add(offset)
            .map(Address)
            .ok_or_else(|| PilotError::InvalidAddress(format!("{} + {:#x} overflows", self, offset)))
    }

    /// Returns the raw usize value
    pub const fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl From<usize> for Address {
    fn from(value: usize) -> Self {
        Address::new(value)
    }
}

/// Which address-resolution strategy produced an address set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// Module base plus the profile's offset table
    OffsetDerived,
    /// Fixed absolute addresses from the profile
    AbsoluteFallback,
    /// Found by the bounded coordinate scan
    ScanDiscovered,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::OffsetDerived => "offset-derived",
            Scheme::AbsoluteFallback => "absolute-fallback",
            Scheme::ScanDiscovered => "scan-discovered",
        };
        f.write_str(name)
    }
}
