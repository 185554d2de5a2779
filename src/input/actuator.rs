//! Held-key bookkeeping on top of a key injector

use super::{Actuator, Key, KeyInjector};
use crate::core::types::PilotResult;
use std::collections::BTreeSet;
use tracing::trace;

/// Converts movement calls into deduplicated press/release events
#[derive(Debug)]
pub struct InputActuator<K> {
    injector: K,
    held: BTreeSet<Key>,
}

impl<K: KeyInjector> InputActuator<K> {
    pub fn new(injector: K) -> Self {
        InputActuator {
            injector,
            held: BTreeSet::new(),
        }
    }

    pub fn injector(&self) -> &K {
        &self.injector
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Keys currently held, in `Key` order
    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }

    /// Press `key` unless it is already held
    pub fn press(&mut self, key: Key) -> PilotResult<()> {
        if self.held.contains(&key) {
            return Ok(());
        }
        trace!("press {:?}", key);
        self.injector.press(key)?;
        self.held.insert(key);
        Ok(())
    }

    /// Release `key` if it is held
    pub fn release(&mut self, key: Key) -> PilotResult<()> {
        if !self.held.contains(&key) {
            return Ok(());
        }
        trace!("release {:?}", key);
        self.injector.release(key)?;
        self.held.remove(&key);
        Ok(())
    }

    /// Release every held key, attempting all of them even if one fails
    pub fn release_all(&mut self) -> PilotResult<()> {
        let mut result = Ok(());
        let held: Vec<Key> = self.held().collect();
        for key in held {
            if let Err(e) = self.release(key) {
                result = Err(e);
            }
        }
        result
    }
}

impl<K: KeyInjector> Actuator for InputActuator<K> {
    fn move_forward(&mut self) -> PilotResult<()> {
        self.release(Key::Down)?;
        self.press(Key::Up)
    }

    fn move_backward(&mut self) -> PilotResult<()> {
        self.release(Key::Up)?;
        self.press(Key::Down)
    }

    fn stop_move(&mut self) -> PilotResult<()> {
        self.release(Key::Up)?;
        self.release(Key::Down)
    }

    fn turn_left(&mut self) -> PilotResult<()> {
        self.release(Key::Right)?;
        self.press(Key::Left)
    }

    fn turn_right(&mut self) -> PilotResult<()> {
        self.release(Key::Left)?;
        self.press(Key::Right)
    }

    fn stop_turn(&mut self) -> PilotResult<()> {
        self.release(Key::Left)?;
        self.release(Key::Right)
    }
}
