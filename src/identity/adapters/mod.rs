//! Adapter implementations for profile persistence.

pub mod memory;
pub mod postgres;
