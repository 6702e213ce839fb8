//! Platform abstraction layer
//!
//! Handles browser/native differences for input: keyboard keys and the
//! on-screen touch buttons both land in one `InputState` owned by the loop.

pub mod input;

pub use input::{Controls, InputState, TouchButton};
