//! Core domain types for the clang-format ruler synchronizer.
//!
//! Houses the ruler-entry model, the `.clang-format` style scan, and the
//! shared error type. Everything here is host-agnostic: the runtime crate
//! wires these types to real settings stores and file watchers.

pub mod error;
pub mod ruler;
pub mod style;

pub use error::{Result, RulerError};
