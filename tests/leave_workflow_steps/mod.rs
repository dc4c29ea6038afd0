//! Step definitions for leave workflow scenarios.

mod given;
mod then;
mod when;
pub mod world;
