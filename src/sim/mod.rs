mod context;
pub mod names;
pub mod rebellion;
mod runner;
pub mod signal;
mod system;

pub use context::TickContext;
pub use names::{CultureNameGenerator, NameGenerator};
pub use rebellion::RebellionSystem;
pub use runner::{SimConfig, deliver_signals, dispatch_systems, run, save_systems, should_fire};
pub use signal::Signal;
pub use system::{SimSystem, SystemRegistry, TickFrequency};
