//! Target process and module descriptions

use super::Address;
use serde::{Deserialize, Serialize};

/// Process architecture of the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessArchitecture {
    X86,
    X64,
}

impl ProcessArchitecture {
    /// Returns the pointer size for this architecture
    pub const fn pointer_size(&self) -> usize {
        match self {
            ProcessArchitecture::X86 => 4,
            ProcessArchitecture::X64 => 8,
        }
    }
}

/// A module loaded in the target process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub base_address: Address,
    pub size: usize,
}

impl ModuleInfo {
    /// Creates a new ModuleInfo
    pub fn new(name: impl Into<String>, base_address: Address, size: usize) -> Self {
        ModuleInfo {
            name: name.into(),
            base_address,
            size,
        }
    }

    /// Gets the end address of the module
    pub fn end_address(&self) -> Address {
        Address::new(self.base_address.as_usize().saturating_add(self.size))
    }

    /// Checks if an address is within this module
    pub fn contains_address(&self, address: Address) -> bool {
        address >= self.base_address && address < self.end_address()
    }
}
