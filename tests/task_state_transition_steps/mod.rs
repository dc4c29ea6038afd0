//! Step definitions for task state transition scenarios.

mod given;
mod then;
mod when;
pub mod world;
