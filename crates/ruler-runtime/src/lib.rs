//! Runtime layer for the clang-format ruler synchronizer.
//!
//! Hosts the update coordinator, the host-event model it reacts to, the
//! file-watch abstraction (with its `notify` implementation), and the event
//! loop that drives everything on a single task.

pub mod coordinator;
pub mod events;
pub mod orchestrator;
pub mod watch;

pub use ruler_core as core;
pub use ruler_settings as settings;
