//! Locate the target by window class and open it

use super::ProcessHandle;
use crate::config::TargetConfig;
use crate::core::types::{PilotError, PilotResult};
use crate::windows::bindings::user32;
use tracing::info;

/// Attach to the first process owning a window of one of the configured classes
pub fn attach(target: &TargetConfig) -> PilotResult<ProcessHandle> {
    for class in &target.window_classes {
        let Some(window) = user32::find_window(class) else {
            continue;
        };
        let pid = user32::window_process_id(window);
        if pid == 0 {
            continue;
        }
        info!("Found window class {} owned by PID {}", class, pid);
        return ProcessHandle::open_for_read(pid);
    }

    Err(PilotError::ProcessNotFound(format!(
        "no window with class {}",
        target.window_classes.join(" or ")
    )))
}
