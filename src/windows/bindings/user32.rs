//! User32.dll bindings for window lookup, focus and keyboard injection

use crate::core::types::{PilotError, PilotResult};
use crate::windows::utils::string_to_wide;
use std::io;
use windows::core::PCWSTR;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP,
    VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    FindWindowW, GetForegroundWindow, GetWindowThreadProcessId, IsWindowVisible,
    SetForegroundWindow, ShowWindow, SW_RESTORE,
};

/// Find a top-level window by class name
pub fn find_window(class: &str) -> Option<HWND> {
    let class = string_to_wide(class);
    // SAFETY: `class` is a null-terminated UTF-16 buffer that outlives the call
    let hwnd = unsafe { FindWindowW(PCWSTR(class.as_ptr()), PCWSTR::null()) };
    (hwnd.0 != 0).then_some(hwnd)
}

/// PID owning the window, or 0 if the window is gone
pub fn window_process_id(hwnd: HWND) -> u32 {
    let mut pid: u32 = 0;
    // SAFETY: `pid` is a valid out pointer for the duration of the call
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    pid
}

pub fn is_visible(hwnd: HWND) -> bool {
    // SAFETY: IsWindowVisible accepts any HWND
    unsafe { IsWindowVisible(hwnd) }.as_bool()
}

pub fn is_foreground(hwnd: HWND) -> bool {
    // SAFETY: GetForegroundWindow is always safe to call
    unsafe { GetForegroundWindow() } == hwnd
}

/// Restore a minimised or hidden window
pub fn restore(hwnd: HWND) {
    // SAFETY: ShowWindow accepts any HWND; the return value is the previous visibility
    unsafe {
        let _ = ShowWindow(hwnd, SW_RESTORE);
    }
}

pub fn set_foreground(hwnd: HWND) -> PilotResult<()> {
    // SAFETY: SetForegroundWindow accepts any HWND
    if unsafe { SetForegroundWindow(hwnd) }.as_bool() {
        Ok(())
    } else {
        Err(PilotError::InputFailed(
            "SetForegroundWindow was refused".to_string(),
        ))
    }
}

/// Send one extended-key keyboard event
pub fn send_key(key: VIRTUAL_KEY, key_up: bool) -> PilotResult<()> {
    let flags = if key_up {
        KEYEVENTF_EXTENDEDKEY | KEYEVENTF_KEYUP
    } else {
        KEYEVENTF_EXTENDEDKEY
    };

    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: key,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    // SAFETY: the slice holds one fully initialised keyboard INPUT
    let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if sent == 1 {
        Ok(())
    } else {
        Err(PilotError::InputFailed(format!(
            "SendInput failed for key 0x{:02X}: {}",
            key.0,
            io::Error::last_os_error()
        )))
    }
}
