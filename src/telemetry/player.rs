//! Player status readout

use crate::config::profiles::PlayerOffsets;
use crate::core::types::{Address, PilotResult};
use crate::memory::{MemoryClient, ProcessMemory};
use std::fmt;

const NAME_MAX_LEN: usize = 128;

/// Combat status of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    OutOfCombat,
    InCombat,
    Casting,
}

impl fmt::Display for CombatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CombatState::OutOfCombat => "out of combat",
            CombatState::InCombat => "in combat",
            CombatState::Casting => "casting",
        })
    }
}

/// Player fields; each is `None` when its read failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInfo {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub health: Option<i32>,
    pub max_health: Option<i32>,
    pub mana: Option<i32>,
    pub max_mana: Option<i32>,
    pub combat: Option<CombatState>,
    /// GUID of the current target; 0 means no target
    pub target_guid: Option<i64>,
}

impl PlayerInfo {
    pub fn has_target(&self) -> bool {
        matches!(self.target_guid, Some(guid) if guid != 0)
    }
}

/// Read every player field relative to `base`
pub fn read_player_info<M: ProcessMemory>(
    client: &MemoryClient<M>,
    base: Address,
    offsets: &PlayerOffsets,
) -> PlayerInfo {
    let at = |offset: usize| base.checked_add(offset);
    let int = |offset: usize| at(offset).and_then(|a| client.read_i32(a)).ok();
    let flag = |offset: usize| at(offset).and_then(|a| client.read_bool(a));

    let name = at(offsets.name)
        .ok()
        .map(|a| client.read_string(a, NAME_MAX_LEN))
        .filter(|name| !name.is_empty());

    PlayerInfo {
        name,
        level: int(offsets.level),
        health: int(offsets.health),
        max_health: int(offsets.max_health),
        mana: int(offsets.mana),
        max_mana: int(offsets.max_mana),
        combat: combat_state(flag(offsets.in_combat), flag(offsets.casting)),
        target_guid: at(offsets.target_guid)
            .and_then(|a| client.read_i64(a))
            .ok(),
    }
}

/// Casting only counts while in combat
fn combat_state(in_combat: PilotResult<bool>, casting: PilotResult<bool>) -> Option<CombatState> {
    match (in_combat.ok()?, casting) {
        (false, _) => Some(CombatState::OutOfCombat),
        (true, Ok(true)) => Some(CombatState::Casting),
        (true, _) => Some(CombatState::InCombat),
    }
}

fn field<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "?".to_string(), |v| v.to_string())
}

impl fmt::Display for PlayerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Player: {}", field(&self.name))?;
        writeln!(f, "Level:  {}", field(&self.level))?;
        writeln!(f, "Health: {}/{}", field(&self.health), field(&self.max_health))?;
        writeln!(f, "Mana:   {}/{}", field(&self.mana), field(&self.max_mana))?;
        writeln!(f, "Combat: {}", field(&self.combat))?;
        match self.target_guid {
            Some(0) => write!(f, "Target: none"),
            Some(guid) => write!(f, "Target: 0x{:016X}", guid),
            None => write!(f, "Target: ?"),
        }
    }
}
