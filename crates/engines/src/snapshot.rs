//! JSON frame snapshots and preset files.

use mathviz_core::error::EngineError;
use mathviz_core::Preset;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Writes a frame as pretty-printed JSON.
///
/// Returns `EngineError::Io` on serialization or write failure.
pub fn write_frame(frame: &Value, path: &Path) -> Result<(), EngineError> {
    let text = serde_json::to_string_pretty(frame).map_err(|e| EngineError::Io(e.to_string()))?;
    fs::write(path, text)
        .map_err(|e| EngineError::Io(format!("writing {}: {e}", path.display())))?;
    log::info!("wrote frame snapshot to {}", path.display());
    Ok(())
}

/// Reads and validates a preset file.
///
/// Returns `EngineError::Io` when the file cannot be read and
/// `EngineError::InvalidParam` when it is not a valid preset.
pub fn read_preset(path: &Path) -> Result<Preset, EngineError> {
    let text = fs::read_to_string(path)
        .map_err(|e| EngineError::Io(format!("reading {}: {e}", path.display())))?;
    let preset: Preset = serde_json::from_str(&text).map_err(|e| EngineError::InvalidParam {
        name: "preset".into(),
        reason: format!("{}: {e}", path.display()),
    })?;
    preset.validate()?;
    Ok(preset)
}
