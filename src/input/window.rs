//! Target window focus

use crate::core::types::PilotResult;

/// Brings the target window to the foreground before input is injected
pub trait WindowActivator {
    fn activate(&mut self) -> PilotResult<()>;
}

#[cfg(windows)]
pub use self::foreground::ForegroundWindow;

#[cfg(windows)]
mod foreground {
    use super::WindowActivator;
    use crate::core::types::{PilotError, PilotResult};
    use crate::windows::user32;
    use tracing::{debug, info};
    use windows::Win32::Foundation::HWND;

    /// Activates the first window matching one of the configured classes
    #[derive(Debug, Clone)]
    pub struct ForegroundWindow {
        classes: Vec<String>,
        hwnd: Option<HWND>,
    }

    impl ForegroundWindow {
        pub fn new(classes: Vec<String>) -> Self {
            ForegroundWindow {
                classes,
                hwnd: None,
            }
        }

        fn window(&mut self) -> PilotResult<HWND> {
            if let Some(hwnd) = self.hwnd.filter(|&h| user32::window_process_id(h) != 0) {
                return Ok(hwnd);
            }
            let hwnd = self
                .classes
                .iter()
                .find_map(|class| user32::find_window(class))
                .ok_or_else(|| {
                    PilotError::ProcessNotFound(format!(
                        "no window with class {}",
                        self.classes.join(" or ")
                    ))
                })?;
            self.hwnd = Some(hwnd);
            Ok(hwnd)
        }
    }

    impl WindowActivator for ForegroundWindow {
        fn activate(&mut self) -> PilotResult<()> {
            let hwnd = self.window()?;
            if !user32::is_visible(hwnd) {
                debug!("Restoring hidden target window");
                user32::restore(hwnd);
            }
            if !user32::is_foreground(hwnd) {
                user32::set_foreground(hwnd)?;
                info!("Target window activated");
            }
            Ok(())
        }
    }
}
