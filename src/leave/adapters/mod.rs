//! Adapter implementations for leave ports.

pub mod memory;
pub mod postgres;
