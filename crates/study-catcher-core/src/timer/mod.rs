mod engine;
mod preset;

pub use engine::{FinishedRun, TickHandle, TimerEngine, TimerState};
pub use preset::{PresetCatalog, TimerPreset, CUSTOM_PRESET_ID};
