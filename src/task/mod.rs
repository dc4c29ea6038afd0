//! Task lifecycle management.
//!
//! Tasks move through a validated state machine
//! (`pending → in_progress → completed | failed`); the only other exit
//! from an open status is a leave transfer. Employees append status
//! reports that may carry advisory feedback from an external text
//! generator. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
