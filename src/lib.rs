pub mod cell;
pub mod config;
pub mod engine;
pub mod grid;
pub mod pattern;
pub mod presets;
pub mod render;
pub mod rules;
pub mod timer;

pub use cell::Cell;
pub use engine::Engine;
pub use engine::EngineError;
pub use grid::Grid;

/// Number of generations an engine has advanced through
pub type Generation = u64;
