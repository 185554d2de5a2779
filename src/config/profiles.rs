//! Memory layouts of supported target builds
//!
//! Each supported client build gets one `OffsetProfile` constant. The active
//! profile is chosen explicitly through `[target] profile` in the
//! configuration; nothing in the resolver hard-codes an offset.

use crate::core::types::ProcessArchitecture;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a built-in offset profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileId {
    /// Coordinates relative to the main executable
    WowExe,
    /// Coordinates relative to the audio module, name relative to the executable
    FmodRelative,
}

impl ProfileId {
    pub fn profile(&self) -> &'static OffsetProfile {
        match self {
            ProfileId::WowExe => &WOW_EXE,
            ProfileId::FmodRelative => &FMOD_RELATIVE,
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}

/// Offsets of X, Y and Z, relative to some base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateOffsets {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

/// Offsets of the two facing components, relative to some base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacingOffsets {
    pub x: usize,
    pub y: usize,
}

/// A base offset from the player module plus the chain followed from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPath {
    pub base_offset: usize,
    pub chain: &'static [usize],
}

/// Fixed absolute addresses used when the module-relative scheme fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteAddresses {
    pub position: CoordinateOffsets,
    pub facing: FacingOffsets,
}

/// Module-relative offsets of the player fields shown in the status readout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerOffsets {
    pub name: usize,
    pub level: usize,
    pub health: usize,
    pub max_health: usize,
    pub mana: usize,
    pub max_mana: usize,
    pub in_combat: usize,
    pub casting: usize,
    pub target_guid: usize,
}

/// Memory layout of one target build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetProfile {
    pub name: &'static str,
    /// Module whose base anchors the relative offsets below
    pub module_name: &'static str,
    /// Module the player fields are relative to
    pub player_module_name: &'static str,
    pub architecture: ProcessArchitecture,
    pub position: CoordinateOffsets,
    pub facing: FacingOffsets,
    pub absolute: AbsoluteAddresses,
    /// Facing offsets relative to a scan-discovered X address
    pub facing_from_x: FacingOffsets,
    pub health: PointerPath,
    pub player: PlayerOffsets,
}

const LEGACY_PLAYER: PlayerOffsets = PlayerOffsets {
    name: 0x00C7_9D18,
    level: 0x00C7_9D1C,
    health: 0x00C7_9D24,
    max_health: 0x00C7_9D28,
    mana: 0x00C7_9D2C,
    max_mana: 0x00C7_9D30,
    in_combat: 0x00C7_9D34,
    casting: 0x00C7_9D38,
    target_guid: 0x00BD_07B0,
};

pub const WOW_EXE: OffsetProfile = OffsetProfile {
    name: "wow-exe",
    module_name: "wow.exe",
    player_module_name: "wow.exe",
    architecture: ProcessArchitecture::X86,
    position: CoordinateOffsets {
        x: 0x65C24,
        y: 0x65C2C,
        z: 0x65C28,
    },
    facing: FacingOffsets {
        x: 0x65C34,
        y: 0x65C38,
    },
    absolute: AbsoluteAddresses {
        position: CoordinateOffsets {
            x: 0x02CD_5C24,
            y: 0x02CD_5C2C,
            z: 0x02CD_5C28,
        },
        facing: FacingOffsets {
            x: 0x02CD_5C34,
            y: 0x02CD_5C38,
        },
    },
    facing_from_x: FacingOffsets { x: 0x10, y: 0x14 },
    health: PointerPath {
        base_offset: 0x00C7_9CE0,
        chain: &[0x24],
    },
    player: LEGACY_PLAYER,
};

pub const FMOD_RELATIVE: OffsetProfile = OffsetProfile {
    name: "fmod-relative",
    module_name: "fmod.dll",
    player_module_name: "wow.exe",
    architecture: ProcessArchitecture::X86,
    position: CoordinateOffsets {
        x: 0x65C24,
        y: 0x65C2C,
        z: 0x65C28,
    },
    facing: FacingOffsets {
        x: 0x65C34,
        y: 0x65C38,
    },
    absolute: WOW_EXE.absolute,
    facing_from_x: FacingOffsets { x: 0x10, y: 0x14 },
    health: WOW_EXE.health,
    player: PlayerOffsets {
        name: 0x0082_7D88,
        ..LEGACY_PLAYER
    },
};
