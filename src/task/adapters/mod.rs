//! Adapter implementations for task ports.

pub mod feedback;
pub mod memory;
pub mod postgres;
