//! `SendInput` key injection

use super::{Key, KeyInjector};
use crate::core::types::PilotResult;
use crate::windows::user32;
use windows::Win32::UI::Input::KeyboardAndMouse::{VIRTUAL_KEY, VK_DOWN, VK_LEFT, VK_RIGHT, VK_UP};

/// Injects arrow-key events into whatever window has focus
#[derive(Debug, Default, Clone, Copy)]
pub struct SendInputInjector;

fn virtual_key(key: Key) -> VIRTUAL_KEY {
    match key {
        Key::Up => VK_UP,
        Key::Down => VK_DOWN,
        Key::Left => VK_LEFT,
        Key::Right => VK_RIGHT,
    }
}

impl KeyInjector for SendInputInjector {
    fn press(&mut self, key: Key) -> PilotResult<()> {
        user32::send_key(virtual_key(key), false)
    }

    fn release(&mut self, key: Key) -> PilotResult<()> {
        user32::send_key(virtual_key(key), true)
    }
}
