//! Target process attachment and module lookup
//!
//! Module matching is platform-independent so the resolver can be driven by
//! any `TargetProcess`. Opening a live process is Windows-only.

#[cfg(windows)]
pub mod attach;
#[cfg(windows)]
pub mod handle;

#[cfg(windows)]
pub use attach::attach;
#[cfg(windows)]
pub use handle::ProcessHandle;

use crate::core::types::{ModuleInfo, PilotError, PilotResult};
use tracing::{debug, warn};

/// Find a loaded module by base name.
///
/// Matching is exact and case-insensitive. Modules whose names merely
/// contain the requested name are reported in the log but never adopted.
pub fn find_module<'a>(modules: &'a [ModuleInfo], name: &str) -> PilotResult<&'a ModuleInfo> {
    let wanted = name.to_lowercase();

    if let Some(module) = modules.iter().find(|m| m.name.to_lowercase() == wanted) {
        debug!("Found module {} at {}", module.name, module.base_address);
        return Ok(module);
    }

    let similar: Vec<&str> = modules
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&wanted))
        .map(|m| m.name.as_str())
        .collect();
    if !similar.is_empty() {
        warn!("Module {} not found; similar modules: {:?}", name, similar);
    }

    Err(PilotError::ModuleNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Address;

    fn modules() -> Vec<ModuleInfo> {
        vec![
            ModuleInfo::new("Wow.exe", Address::new(0x0040_0000), 0x0080_0000),
            ModuleInfo::new("fmod.dll", Address::new(0x1000_0000), 0x0010_0000),
            ModuleInfo::new("fmod_event.dll", Address::new(0x1100_0000), 0x0010_0000),
        ]
    }

    #[test]
    fn test_find_module_case_insensitive() {
        let modules = modules();
        let found = find_module(&modules, "wow.exe").unwrap();
        assert_eq!(found.base_address, Address::new(0x0040_0000));
    }

    #[test]
    fn test_find_module_exact_only() {
        let modules = modules();
        assert_eq!(find_module(&modules, "FMOD.DLL").unwrap().name, "fmod.dll");

        let err = find_module(&modules, "fmod").unwrap_err();
        assert!(matches!(err, PilotError::ModuleNotFound(name) if name == "fmod"));
    }
}
